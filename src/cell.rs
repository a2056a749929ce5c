//! Cell extraction and type coercion.
//!
//! The coercers are pure functions of (map, field, row, default): an
//! unmapped column, a blank cell, or a failed numeric conversion all yield
//! the caller's default. Row builders pick the coercer per field, so the
//! target type is always explicit at the call site.

use calamine::Data;

use crate::fields::Field;
use crate::resolve::ColumnMap;

/// Numeric value of a mapped cell, or `default` when the column is unmapped,
/// the cell is blank, or the cell cannot be read as a number.
pub fn coerce_number<F: Field>(map: &ColumnMap<F>, field: F, row: &[Data], default: f64) -> f64 {
    let Some(idx) = map.get(field) else {
        return default;
    };
    let Some(value) = row.get(idx).and_then(number_from_cell) else {
        return default;
    };
    value
}

/// String value of a mapped cell, or `default` when the column is unmapped
/// or the cell is blank.
pub fn coerce_string<F: Field>(map: &ColumnMap<F>, field: F, row: &[Data], default: &str) -> String {
    let Some(idx) = map.get(field) else {
        return default.to_string();
    };
    let text = row.get(idx).map(cell_text).unwrap_or_default();
    if text.is_empty() {
        default.to_string()
    } else {
        text
    }
}

/// Sample-time variant of [`coerce_string`]: Excel stores times as day
/// fractions, which render as `HH:MM` instead of the raw float.
pub fn coerce_time<F: Field>(map: &ColumnMap<F>, field: F, row: &[Data]) -> String {
    let Some(idx) = map.get(field) else {
        return String::new();
    };
    let Some(cell) = row.get(idx) else {
        return String::new();
    };
    let fraction = match cell {
        Data::Float(f) => Some(*f),
        Data::DateTime(dt) => Some(dt.as_f64()),
        _ => None,
    };
    if let Some(f) = fraction
        && (0.0..1.0).contains(&f)
    {
        let minutes = (f * 24.0 * 60.0).round() as u32;
        return format!("{:02}:{:02}", (minutes / 60) % 24, minutes % 60);
    }
    cell_text(cell)
}

pub fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Trimmed display text of a cell; empty for blanks and cell errors.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => format_number(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format_number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

fn number_from_cell(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) if f.is_finite() => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::Bool(b) => Some(f64::from(u8::from(*b))),
        Data::DateTime(dt) => Some(dt.as_f64()),
        Data::String(s) => {
            let cleaned = s.trim().replace(',', "");
            if cleaned.is_empty() {
                return None;
            }
            cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        Data::Float(_) | Data::DateTimeIso(_) | Data::DurationIso(_) | Data::Error(_)
        | Data::Empty => None,
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}
