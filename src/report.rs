//! Terminal previews of parsed records.
//!
//! A fixed set of headline columns per record type, width-fitted for the
//! console. This is a diagnostics surface for judging a parse at a glance,
//! not an export format.

use crate::fields::Metric;
use crate::record::{CostingRecord, QualityRecord};

const QUALITY_COLUMNS: &[&str] = &[
    "date", "shift", "grade", "gsm", "tensile md", "tensile cd", "brightness", "moisture",
];

const COSTING_COLUMNS: &[&str] = &[
    "date",
    "production",
    "total cost",
    "cost/ton",
    "rm lines",
    "loss lines",
];

pub fn quality_table(records: &[QualityRecord], limit: usize) -> String {
    let rows = records
        .iter()
        .take(limit)
        .map(|record| {
            vec![
                record.date.format("%Y-%m-%d").to_string(),
                record.shift.clone(),
                record.grade.clone(),
                fixed(record.value(Metric::Gsm)),
                fixed(record.value(Metric::TensileMd)),
                fixed(record.value(Metric::TensileCd)),
                fixed(record.value(Metric::Brightness)),
                fixed(record.value(Metric::Moisture)),
            ]
        })
        .collect::<Vec<_>>();
    render(QUALITY_COLUMNS, &rows)
}

pub fn costing_table(records: &[CostingRecord], limit: usize) -> String {
    let rows = records
        .iter()
        .take(limit)
        .map(|record| {
            vec![
                record.date.format("%Y-%m-%d").to_string(),
                fixed(record.total_production),
                fixed(record.total_cost),
                fixed(record.cost_per_ton),
                record.raw_materials.len().to_string(),
                record.losses.len().to_string(),
            ]
        })
        .collect::<Vec<_>>();
    render(COSTING_COLUMNS, &rows)
}

fn fixed(value: f64) -> String {
    format!("{value:.2}")
}

fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let mut output = String::new();
    push_row(&mut output, headers.iter().map(|h| (*h).to_string()), &widths);
    push_row(
        &mut output,
        widths.iter().map(|w| "-".repeat(*w)),
        &widths,
    );
    for row in rows {
        push_row(&mut output, row.iter().cloned(), &widths);
    }
    output
}

fn push_row<I>(output: &mut String, cells: I, widths: &[usize])
where
    I: Iterator<Item = String>,
{
    let mut line = String::new();
    for (idx, cell) in cells.enumerate() {
        if idx > 0 {
            line.push_str("  ");
        }
        let pad = widths[idx].saturating_sub(cell.chars().count());
        line.push_str(&cell);
        line.push_str(&" ".repeat(pad));
    }
    output.push_str(line.trim_end());
    output.push('\n');
}
