//! Workbook decoding and the sheet-parsing entry points.
//!
//! Parsing is synchronous and pure: bytes in, a record list plus a skip
//! counter out. Row-level problems never escape; a row that cannot become a
//! record is tallied and the parse continues. Only file-level problems (an
//! unreadable workbook, a missing required sheet, zero surviving rows)
//! surface as [`ParseError`].

use std::io::Cursor;

use calamine::{Data, Range, Reader as _, Sheets, open_workbook_auto_from_rs};
use log::debug;
use thiserror::Error;

use crate::costing;
use crate::fields::Field;
use crate::quality;
use crate::record::{CostingRecord, QualityRecord};
use crate::resolve::{self, ColumnMap};

/// Required sheet for per-shift quality records.
pub const QUALITY_SHEET: &str = "DATA";
/// Required sheet for daily costing records.
pub const COSTING_SHEET: &str = "COSTING";
/// Optional sheet with raw-material consumption line items.
pub const RAW_MATERIAL_SHEET: &str = "RAW MATERIAL";
/// Optional sheet with production-loss line items.
pub const LOSS_SHEET: &str = "LOSSES";

/// File-level failures. Exactly one of these ends a parse attempt; row-level
/// problems are tallied in [`ParsedSheet::skipped`] instead.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("workbook has no sheet named '{0}'")]
    MissingSheet(String),
    #[error("sheet '{0}' has no parseable data rows")]
    NoValidRows(String),
    #[error("could not read workbook: {0}")]
    Unreadable(#[from] calamine::Error),
}

/// Why a single row was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSkip {
    /// The date column is unmapped or the cell is blank.
    MissingDate,
    /// The date cell survived no normalization attempt.
    UnparseableDate,
    /// A line-item row with no material/category name.
    BlankLine,
}

/// Successful parse of one workbook: the sorted records plus the number of
/// body rows that had to be skipped (surfaced to the user as a diagnostic).
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSheet<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

impl<T> ParsedSheet<T> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parses the quality workbook: sheet `DATA`, newest record first.
pub fn parse_quality(bytes: &[u8]) -> Result<ParsedSheet<QualityRecord>, ParseError> {
    let mut workbook = open(bytes)?;
    let range = named_range(&mut workbook, QUALITY_SHEET)?
        .ok_or_else(|| ParseError::MissingSheet(QUALITY_SHEET.to_string()))?;

    let (mut records, skipped) = parse_rows(&range, quality::build_row);
    if records.is_empty() {
        return Err(ParseError::NoValidRows(QUALITY_SHEET.to_string()));
    }
    records.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(ParsedSheet { records, skipped })
}

/// Parses the costing workbook: sheet `COSTING`, plus the optional
/// `RAW MATERIAL` and `LOSSES` line-item sheets, newest record first.
pub fn parse_costing(bytes: &[u8]) -> Result<ParsedSheet<CostingRecord>, ParseError> {
    let mut workbook = open(bytes)?;
    let range = named_range(&mut workbook, COSTING_SHEET)?
        .ok_or_else(|| ParseError::MissingSheet(COSTING_SHEET.to_string()))?;

    let (mut records, mut skipped) = parse_rows(&range, costing::build_row);
    if records.is_empty() {
        return Err(ParseError::NoValidRows(COSTING_SHEET.to_string()));
    }

    let mut materials = Vec::new();
    if let Some(range) = named_range(&mut workbook, RAW_MATERIAL_SHEET)? {
        let (lines, line_skips) = parse_rows(&range, costing::build_raw_material);
        materials = lines;
        skipped += line_skips;
    }
    let mut losses = Vec::new();
    if let Some(range) = named_range(&mut workbook, LOSS_SHEET)? {
        let (lines, line_skips) = parse_rows(&range, costing::build_loss);
        losses = lines;
        skipped += line_skips;
    }
    skipped += costing::attach_lines(&mut records, materials, losses);

    records.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(ParsedSheet { records, skipped })
}

/// Sheet names contained in a workbook, in workbook order.
pub fn sheet_names(bytes: &[u8]) -> Result<Vec<String>, ParseError> {
    let workbook = open(bytes)?;
    Ok(workbook.sheet_names().to_vec())
}

fn open(bytes: &[u8]) -> Result<Sheets<Cursor<&[u8]>>, ParseError> {
    open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(ParseError::Unreadable)
}

/// Looks up a sheet by its literal name. `Ok(None)` means the sheet does not
/// exist; the caller decides whether that is fatal.
fn named_range(
    workbook: &mut Sheets<Cursor<&[u8]>>,
    name: &str,
) -> Result<Option<Range<Data>>, ParseError> {
    if !workbook.sheet_names().iter().any(|sheet| sheet == name) {
        return Ok(None);
    }
    workbook
        .worksheet_range(name)
        .map(Some)
        .map_err(ParseError::Unreadable)
}

/// Resolves the header row once, then builds every body row, accumulating
/// successes and counting skips. The builders are total apart from their
/// declared [`RowSkip`] rejections, so one bad row can never abort the loop.
fn parse_rows<F, T, B>(range: &Range<Data>, build: B) -> (Vec<T>, usize)
where
    F: Field,
    B: Fn(&ColumnMap<F>, &[Data]) -> Result<T, RowSkip>,
{
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return (Vec::new(), 0);
    };
    let map = resolve::resolve_columns::<F>(header);

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (row_idx, row) in rows.enumerate() {
        match build(&map, row) {
            Ok(record) => records.push(record),
            Err(reason) => {
                skipped += 1;
                debug!("skipping body row {}: {reason:?}", row_idx + 2);
            }
        }
    }
    (records, skipped)
}
