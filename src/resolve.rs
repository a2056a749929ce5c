//! Column resolution: mapping a raw header row onto canonical fields.
//!
//! Each field's alias list is tried in declared order. An alias matches a
//! header cell exactly first, then case-insensitively, then by substring
//! containment; the first alias with any match wins and ties resolve to the
//! leftmost column. Fields with no matching alias are simply absent from the
//! resulting map; the row builders fall back to defaults for them.

use std::collections::HashMap;

use calamine::Data;

use crate::cell;
use crate::fields::Field;

/// Canonical field → zero-based column index for one specific header row.
#[derive(Debug, Clone)]
pub struct ColumnMap<F> {
    indices: HashMap<F, usize>,
}

impl<F: Field> ColumnMap<F> {
    pub fn get(&self, field: F) -> Option<usize> {
        self.indices.get(&field).copied()
    }

    pub fn contains(&self, field: F) -> bool {
        self.indices.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Builds the [`ColumnMap`] for a header row. Built once per parse.
pub fn resolve_columns<F: Field>(header: &[Data]) -> ColumnMap<F> {
    let cells: Vec<String> = header.iter().map(cell::cell_text).collect();
    let mut indices = HashMap::new();
    for field in F::all() {
        if let Some(idx) = locate(&cells, &field.aliases()) {
            indices.insert(field, idx);
        }
    }
    ColumnMap { indices }
}

fn locate(cells: &[String], aliases: &[String]) -> Option<usize> {
    for alias in aliases {
        let alias = alias.trim();
        if alias.is_empty() {
            continue;
        }
        if let Some(idx) = cells.iter().position(|cell| cell == alias) {
            return Some(idx);
        }
        if let Some(idx) = cells
            .iter()
            .position(|cell| !cell.is_empty() && cell.eq_ignore_ascii_case(alias))
        {
            return Some(idx);
        }
        let lowered = alias.to_lowercase();
        if let Some(idx) = cells
            .iter()
            .position(|cell| !cell.is_empty() && cell.to_lowercase().contains(&lowered))
        {
            return Some(idx);
        }
    }
    None
}
