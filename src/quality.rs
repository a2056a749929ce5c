//! Quality row construction and field derivation.
//!
//! One raw body row becomes one [`QualityRecord`]. The build runs in two
//! passes: first every directly-mapped cell is coerced, then derived fields
//! (the MD/CD ratio and all defaulted control limits) are computed from the
//! completed value set, so the derivation order can never depend on column
//! order in the sheet.

use std::collections::BTreeMap;

use calamine::Data;

use crate::cell::{self, coerce_number, coerce_string, coerce_time};
use crate::dates;
use crate::fields::{Metric, QualityField};
use crate::record::{QualityRecord, Reading};
use crate::resolve::ColumnMap;
use crate::workbook::RowSkip;

/// Builds one record from one body row. A row with a missing or
/// unparseable date is rejected; every other field falls back to a default.
pub fn build_row(map: &ColumnMap<QualityField>, row: &[Data]) -> Result<QualityRecord, RowSkip> {
    let date_cell = map
        .get(QualityField::Date)
        .and_then(|idx| row.get(idx))
        .filter(|cell| !cell::is_blank(cell))
        .ok_or(RowSkip::MissingDate)?;
    let date = dates::normalize_date(date_cell).ok_or(RowSkip::UnparseableDate)?;

    // First pass: directly-mapped cells only.
    let mut values: BTreeMap<Metric, f64> = BTreeMap::new();
    for metric in Metric::ALL {
        values.insert(
            metric,
            coerce_number(map, QualityField::Value(metric), row, 0.0),
        );
    }

    // Second pass: derived values, then limits from the completed set.
    derive_md_cd_ratio(&mut values);

    let mut readings = BTreeMap::new();
    for metric in Metric::ALL {
        let value = values.get(&metric).copied().unwrap_or_default();
        let (default_lcl, default_ucl) = metric.limit_default().bounds(value);
        readings.insert(
            metric,
            Reading {
                value,
                lcl: coerce_number(map, QualityField::Lcl(metric), row, default_lcl),
                ucl: coerce_number(map, QualityField::Ucl(metric), row, default_ucl),
            },
        );
    }

    Ok(QualityRecord {
        date,
        time: coerce_time(map, QualityField::Time, row),
        shift: coerce_string(map, QualityField::Shift, row, ""),
        grade: coerce_string(map, QualityField::Grade, row, ""),
        gsm_grade: coerce_string(map, QualityField::GsmGrade, row, ""),
        lab_technician: coerce_string(map, QualityField::LabTechnician, row, ""),
        machine_operator: coerce_string(map, QualityField::MachineOperator, row, ""),
        remarks: coerce_string(map, QualityField::Remarks, row, ""),
        readings,
    })
}

/// The ratio column is rarely filled in; when absent it derives from the two
/// tensile readings, and stays zero when either of them is missing.
fn derive_md_cd_ratio(values: &mut BTreeMap<Metric, f64>) {
    let ratio = values.get(&Metric::MdCdRatio).copied().unwrap_or_default();
    if ratio != 0.0 {
        return;
    }
    let md = values.get(&Metric::TensileMd).copied().unwrap_or_default();
    let cd = values.get(&Metric::TensileCd).copied().unwrap_or_default();
    if md != 0.0 && cd != 0.0 {
        values.insert(Metric::MdCdRatio, md / cd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve_columns;
    use chrono::NaiveDate;

    fn map_for(headers: &[&str]) -> ColumnMap<QualityField> {
        let cells: Vec<Data> = headers
            .iter()
            .map(|h| Data::String((*h).to_string()))
            .collect();
        resolve_columns(&cells)
    }

    fn text(value: &str) -> Data {
        Data::String(value.to_string())
    }

    #[test]
    fn builds_record_with_defaulted_limits() {
        let map = map_for(&["Date", "GSM"]);
        let row = vec![text("1-Aug-25"), Data::Float(100.0)];
        let record = build_row(&map, &row).unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
        let gsm = record.reading(Metric::Gsm).unwrap();
        assert_eq!(gsm.value, 100.0);
        assert_eq!(gsm.lcl, 95.0);
        assert_eq!(gsm.ucl, 105.0);
    }

    #[test]
    fn tensile_limits_default_at_ten_percent() {
        let map = map_for(&["Date", "Dry Strength (MD)"]);
        let row = vec![text("1-Aug-25"), Data::Float(10.0)];
        let record = build_row(&map, &row).unwrap();
        let tensile = record.reading(Metric::TensileMd).unwrap();
        assert!((tensile.lcl - 9.0).abs() < 1e-9);
        assert!((tensile.ucl - 11.0).abs() < 1e-9);
    }

    #[test]
    fn explicit_limit_columns_win_over_defaults() {
        let map = map_for(&["Date", "GSM", "GSM LCL", "GSM UCL"]);
        let row = vec![
            text("1-Aug-25"),
            Data::Float(100.0),
            Data::Float(90.0),
            Data::Float(110.0),
        ];
        let record = build_row(&map, &row).unwrap();
        let gsm = record.reading(Metric::Gsm).unwrap();
        assert_eq!(gsm.lcl, 90.0);
        assert_eq!(gsm.ucl, 110.0);
    }

    #[test]
    fn blank_limit_cell_falls_back_to_default() {
        let map = map_for(&["Date", "GSM", "GSM LCL"]);
        let row = vec![text("1-Aug-25"), Data::Float(100.0), Data::Empty];
        let record = build_row(&map, &row).unwrap();
        assert_eq!(record.reading(Metric::Gsm).unwrap().lcl, 95.0);
    }

    #[test]
    fn opacity_and_moisture_default_to_fixed_windows() {
        let map = map_for(&["Date", "Opacity", "Moisture"]);
        let row = vec![text("1-Aug-25"), Data::Float(52.0), Data::Float(6.1)];
        let record = build_row(&map, &row).unwrap();
        let opacity = record.reading(Metric::Opacity).unwrap();
        assert_eq!((opacity.lcl, opacity.ucl), (40.0, 60.0));
        let moisture = record.reading(Metric::Moisture).unwrap();
        assert_eq!((moisture.lcl, moisture.ucl), (4.0, 8.0));
    }

    #[test]
    fn md_cd_ratio_derives_from_tensile_pair() {
        let map = map_for(&["Date", "Dry Strength (MD)", "Dry Strength (CD)"]);
        let row = vec![text("1-Aug-25"), Data::Float(450.0), Data::Float(180.0)];
        let record = build_row(&map, &row).unwrap();
        assert!((record.value(Metric::MdCdRatio) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn explicit_ratio_suppresses_derivation() {
        let map = map_for(&["Date", "Dry Strength (MD)", "Dry Strength (CD)", "MD/CD Ratio"]);
        let row = vec![
            text("1-Aug-25"),
            Data::Float(450.0),
            Data::Float(180.0),
            Data::Float(2.2),
        ];
        let record = build_row(&map, &row).unwrap();
        assert!((record.value(Metric::MdCdRatio) - 2.2).abs() < 1e-9);
    }

    #[test]
    fn ratio_stays_zero_when_either_tensile_is_missing() {
        let map = map_for(&["Date", "Dry Strength (MD)"]);
        let row = vec![text("1-Aug-25"), Data::Float(450.0)];
        let record = build_row(&map, &row).unwrap();
        assert_eq!(record.value(Metric::MdCdRatio), 0.0);
    }

    #[test]
    fn derived_ratio_feeds_its_own_limit_defaults() {
        let map = map_for(&["Date", "Dry Strength (MD)", "Dry Strength (CD)"]);
        let row = vec![text("1-Aug-25"), Data::Float(450.0), Data::Float(180.0)];
        let record = build_row(&map, &row).unwrap();
        let ratio = record.reading(Metric::MdCdRatio).unwrap();
        assert!((ratio.lcl - 2.375).abs() < 1e-9);
        assert!((ratio.ucl - 2.625).abs() < 1e-9);
    }

    #[test]
    fn missing_date_column_rejects_the_row() {
        let map = map_for(&["GSM"]);
        let row = vec![Data::Float(100.0)];
        assert_eq!(build_row(&map, &row), Err(RowSkip::MissingDate));
    }

    #[test]
    fn blank_date_cell_rejects_the_row() {
        let map = map_for(&["Date", "GSM"]);
        let row = vec![Data::Empty, Data::Float(100.0)];
        assert_eq!(build_row(&map, &row), Err(RowSkip::MissingDate));
    }

    #[test]
    fn unparseable_date_rejects_the_row() {
        let map = map_for(&["Date", "GSM"]);
        let row = vec![text("holiday"), Data::Float(100.0)];
        assert_eq!(build_row(&map, &row), Err(RowSkip::UnparseableDate));
    }

    #[test]
    fn metadata_strings_default_to_empty() {
        let map = map_for(&["Date", "Shift", "Quality"]);
        let row = vec![text("1-Aug-25"), text("B"), text("Premium")];
        let record = build_row(&map, &row).unwrap();
        assert_eq!(record.shift, "B");
        assert_eq!(record.grade, "Premium");
        assert_eq!(record.remarks, "");
        assert_eq!(record.lab_technician, "");
    }
}
