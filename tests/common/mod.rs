#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

/// One fixture cell. `Blank` leaves the cell unwritten so the stored sheet
/// has a genuine hole, not an empty string.
#[derive(Debug, Clone)]
pub enum Cell {
    Text(String),
    Num(f64),
    Blank,
}

pub fn text(value: &str) -> Cell {
    Cell::Text(value.to_string())
}

pub fn num(value: f64) -> Cell {
    Cell::Num(value)
}

pub fn blank() -> Cell {
    Cell::Blank
}

/// Builds an in-memory workbook from (sheet name, rows) pairs. Row 0 of each
/// sheet is the header.
pub fn workbook_bytes(sheets: &[(&str, Vec<Vec<Cell>>)]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).expect("sheet name");
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                let row_num = row_idx as u32;
                let col_num = col_idx as u16;
                match cell {
                    Cell::Text(value) => {
                        worksheet
                            .write_string(row_num, col_num, value.as_str())
                            .expect("write string cell");
                    }
                    Cell::Num(value) => {
                        worksheet
                            .write_number(row_num, col_num, *value)
                            .expect("write number cell");
                    }
                    Cell::Blank => {}
                }
            }
        }
    }
    workbook.save_to_buffer().expect("workbook bytes")
}

/// Single-sheet quality workbook: header row plus body rows under `DATA`.
pub fn quality_workbook(header: &[&str], body: Vec<Vec<Cell>>) -> Vec<u8> {
    let mut rows = vec![header.iter().map(|h| text(h)).collect::<Vec<_>>()];
    rows.extend(body);
    workbook_bytes(&[("DATA", rows)])
}

/// Single-sheet costing workbook: header row plus body rows under `COSTING`.
pub fn costing_workbook(header: &[&str], body: Vec<Vec<Cell>>) -> Vec<u8> {
    let mut rows = vec![header.iter().map(|h| text(h)).collect::<Vec<_>>()];
    rows.extend(body);
    workbook_bytes(&[("COSTING", rows)])
}

/// Scratch directory holding workbook fixtures for CLI runs.
pub struct FixtureDir {
    temp_dir: TempDir,
}

impl FixtureDir {
    pub fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.temp_dir.path()
    }

    /// Writes workbook bytes under the directory and returns the path.
    pub fn write(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, bytes).expect("write fixture workbook");
        path
    }
}
