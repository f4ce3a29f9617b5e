//! Table Module
//!
//! The spreadsheet-as-database boundary: a `Table` reads and writes rows of
//! string cells addressed by A1 ranges.
//!
//! # Backends
//! - `SheetsTable` - Google Sheets REST API
//! - `MemoryTable` - in-process rows, for local runs and tests

mod memory;
mod sheets;

use std::fmt;

use async_trait::async_trait;

use crate::error::Result;

pub use memory::MemoryTable;
pub use sheets::SheetsTable;

/// One row of cells, left to right.
pub type Row = Vec<String>;

// == Table Trait ==
/// Row operations offered by the backing spreadsheet.
///
/// No operation is atomic with respect to another; concurrent writers can
/// shift rows under each other.
#[async_trait]
pub trait Table: Send + Sync {
    /// Rows inside `range`, top to bottom. Short rows are not padded.
    async fn read_rows(&self, range: &RowRange) -> Result<Vec<Row>>;

    /// Appends `row` after the last non-empty row of `range`.
    async fn append_row(&self, range: &RowRange, row: Row) -> Result<()>;

    /// Overwrites the single row addressed by `range`.
    async fn update_row(&self, range: &RowRange, row: Row) -> Result<()>;

    /// Deletes the row at zero-based `row_index` of the sheet, shifting later rows up.
    async fn delete_row(&self, sheet_id: i64, row_index: u32) -> Result<()>;

    /// Resolves a sheet title to its numeric id.
    async fn sheet_id(&self, sheet_name: &str) -> Result<i64>;
}

// == Row Range ==
/// A block of whole rows, columns A through `width`.
///
/// Rows are 1-based sheet row numbers; `end_row` of None runs to the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRange {
    pub sheet: String,
    pub start_row: u32,
    pub end_row: Option<u32>,
    pub width: usize,
}

impl RowRange {
    /// Rows `start_row..` to the end of the sheet.
    pub fn from_row(sheet: impl Into<String>, start_row: u32, width: usize) -> Self {
        Self {
            sheet: sheet.into(),
            start_row,
            end_row: None,
            width,
        }
    }

    /// Exactly one row.
    pub fn single(sheet: impl Into<String>, row: u32, width: usize) -> Self {
        Self {
            sheet: sheet.into(),
            start_row: row,
            end_row: Some(row),
            width,
        }
    }
}

impl fmt::Display for RowRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last_column = column_letter(self.width.max(1));
        write!(
            f,
            "{}!A{}:{}",
            quote_sheet_name(&self.sheet),
            self.start_row,
            last_column
        )?;
        if let Some(end) = self.end_row {
            write!(f, "{}", end)?;
        }
        Ok(())
    }
}

/// Letter(s) of the 1-based column `index` (1 -> A, 27 -> AA).
pub fn column_letter(index: usize) -> String {
    let mut n = index;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

fn quote_sheet_name(name: &str) -> String {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "''"))
    }
}
