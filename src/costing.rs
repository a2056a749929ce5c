//! Costing row construction, line-item parsing, and date-keyed attachment.
//!
//! The costing sheet yields one record per production day. Two optional
//! sheets carry the day's raw-material consumption and production-loss
//! incidents as line items; after the main sheet is built they are grouped
//! by date and attached to the matching record.

use std::collections::{BTreeMap, HashMap};

use calamine::Data;
use chrono::NaiveDate;
use itertools::Itertools as _;

use crate::cell::{self, coerce_number, coerce_string};
use crate::dates;
use crate::fields::{CostItem, CostingField, Field, LossField, RawMaterialField};
use crate::record::{CostingRecord, ProductionLossLine, RawMaterialLine};
use crate::resolve::ColumnMap;
use crate::workbook::RowSkip;

/// Builds one costing record from one body row.
///
/// Later fields read earlier results: the total falls back to the itemized
/// sum, and the per-unit figures fall back to figures derived from the
/// total, so a sparsely-filled sheet still yields a complete record.
pub fn build_row(map: &ColumnMap<CostingField>, row: &[Data]) -> Result<CostingRecord, RowSkip> {
    let date = row_date(map, CostingField::Date, row)?;

    let mut items = BTreeMap::new();
    for item in CostItem::ALL {
        items.insert(
            item,
            coerce_number(map, CostingField::Item(item), row, 0.0),
        );
    }

    let total_production = coerce_number(map, CostingField::TotalProduction, row, 0.0);

    let mut total_cost = coerce_number(map, CostingField::TotalCost, row, 0.0);
    if total_cost == 0.0 {
        total_cost = items.values().sum();
    }

    let derived_per_ton = if total_production > 0.0 {
        total_cost / total_production
    } else {
        0.0
    };
    let mut cost_per_ton = coerce_number(map, CostingField::CostPerTon, row, 0.0);
    if cost_per_ton == 0.0 {
        cost_per_ton = derived_per_ton;
    }
    let mut cost_per_kg = coerce_number(map, CostingField::CostPerKg, row, 0.0);
    if cost_per_kg == 0.0 {
        cost_per_kg = cost_per_ton / 1000.0;
    }
    let mut cost_per_saleable_ton =
        coerce_number(map, CostingField::CostPerSaleableTon, row, 0.0);
    if cost_per_saleable_ton == 0.0 {
        cost_per_saleable_ton = cost_per_ton;
    }

    Ok(CostingRecord {
        date,
        grade: coerce_string(map, CostingField::Grade, row, ""),
        gsm_grade: coerce_string(map, CostingField::GsmGrade, row, ""),
        total_production,
        total_cost,
        cost_per_kg,
        cost_per_ton,
        cost_per_saleable_ton,
        items,
        raw_materials: Vec::new(),
        losses: Vec::new(),
    })
}

/// Builds one dated raw-material line. Lines without a material name are
/// noise rows (subtotals, spacers) and are rejected.
pub fn build_raw_material(
    map: &ColumnMap<RawMaterialField>,
    row: &[Data],
) -> Result<(NaiveDate, RawMaterialLine), RowSkip> {
    let date = row_date(map, RawMaterialField::Date, row)?;
    let material = coerce_string(map, RawMaterialField::Material, row, "");
    if material.is_empty() {
        return Err(RowSkip::BlankLine);
    }
    let quantity = coerce_number(map, RawMaterialField::Quantity, row, 0.0);
    let rate = coerce_number(map, RawMaterialField::Rate, row, 0.0);
    let cost = coerce_number(map, RawMaterialField::Cost, row, quantity * rate);
    Ok((
        date,
        RawMaterialLine {
            material,
            quantity,
            rate,
            cost,
        },
    ))
}

/// Builds one dated production-loss line. Lines without a category are
/// rejected the same way as unnamed material lines.
pub fn build_loss(
    map: &ColumnMap<LossField>,
    row: &[Data],
) -> Result<(NaiveDate, ProductionLossLine), RowSkip> {
    let date = row_date(map, LossField::Date, row)?;
    let category = coerce_string(map, LossField::Category, row, "");
    if category.is_empty() {
        return Err(RowSkip::BlankLine);
    }
    Ok((
        date,
        ProductionLossLine {
            category,
            duration_hours: coerce_number(map, LossField::DurationHours, row, 0.0),
            tonnes_lost: coerce_number(map, LossField::TonnesLost, row, 0.0),
            remarks: coerce_string(map, LossField::Remarks, row, ""),
        },
    ))
}

/// Attaches line items to the costing record sharing their date. Returns the
/// number of lines whose date matched no record; those are dropped.
pub fn attach_lines(
    records: &mut [CostingRecord],
    materials: Vec<(NaiveDate, RawMaterialLine)>,
    losses: Vec<(NaiveDate, ProductionLossLine)>,
) -> usize {
    let mut materials_by_date: HashMap<NaiveDate, Vec<RawMaterialLine>> =
        materials.into_iter().into_group_map();
    let mut losses_by_date: HashMap<NaiveDate, Vec<ProductionLossLine>> =
        losses.into_iter().into_group_map();

    for record in records.iter_mut() {
        if let Some(lines) = materials_by_date.remove(&record.date) {
            record.raw_materials = lines;
        }
        if let Some(lines) = losses_by_date.remove(&record.date) {
            record.losses = lines;
        }
    }

    materials_by_date.values().map(Vec::len).sum::<usize>()
        + losses_by_date.values().map(Vec::len).sum::<usize>()
}

fn row_date<F: Field>(map: &ColumnMap<F>, field: F, row: &[Data]) -> Result<NaiveDate, RowSkip> {
    let date_cell = map
        .get(field)
        .and_then(|idx| row.get(idx))
        .filter(|c| !cell::is_blank(c))
        .ok_or(RowSkip::MissingDate)?;
    dates::normalize_date(date_cell).ok_or(RowSkip::UnparseableDate)
}
