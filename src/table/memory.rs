//! In-process table backend.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Row, RowRange, Table};
use crate::error::{CatalogError, Result};

/// Rows a write may land past the current end, mirroring the remote grid limit.
pub const MAX_ROW_GROWTH: usize = 1000;

/// A single sheet held in memory; index 0 is sheet row 1.
#[derive(Debug)]
pub struct MemoryTable {
    sheet: String,
    sheet_id: i64,
    rows: RwLock<Vec<Row>>,
}

impl MemoryTable {
    pub fn new(sheet: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            sheet: sheet.into(),
            sheet_id: 0,
            rows: RwLock::new(rows),
        }
    }

    /// A sheet containing only `header` in row 1.
    pub fn with_header<S: AsRef<str>>(sheet: impl Into<String>, header: &[S]) -> Self {
        let header = header.iter().map(|c| c.as_ref().to_string()).collect();
        Self::new(sheet, vec![header])
    }

    /// Copy of every row, header included.
    pub async fn snapshot(&self) -> Vec<Row> {
        self.rows.read().await.clone()
    }

    fn check_sheet(&self, range: &RowRange) -> Result<()> {
        if range.sheet == self.sheet {
            Ok(())
        } else {
            Err(unknown_sheet(&range.sheet))
        }
    }
}

#[async_trait]
impl Table for MemoryTable {
    async fn read_rows(&self, range: &RowRange) -> Result<Vec<Row>> {
        self.check_sheet(range)?;
        let rows = self.rows.read().await;

        let start = (range.start_row.max(1) - 1) as usize;
        let end = range
            .end_row
            .map(|end| (end as usize).min(rows.len()))
            .unwrap_or(rows.len());

        Ok(rows
            .get(start..end.max(start))
            .unwrap_or_default()
            .iter()
            .map(|row| row.iter().take(range.width).cloned().collect())
            .collect())
    }

    async fn append_row(&self, range: &RowRange, row: Row) -> Result<()> {
        self.check_sheet(range)?;
        let mut rows = self.rows.write().await;

        // Pad up to the range start so appends into an empty sheet land there
        let start = (range.start_row.max(1) - 1) as usize;
        check_growth(rows.len(), start)?;
        while rows.len() < start {
            rows.push(Row::new());
        }
        rows.push(row.into_iter().take(range.width).collect());
        Ok(())
    }

    async fn update_row(&self, range: &RowRange, row: Row) -> Result<()> {
        self.check_sheet(range)?;
        let mut rows = self.rows.write().await;

        let index = (range.start_row.max(1) - 1) as usize;
        check_growth(rows.len(), index)?;
        while rows.len() <= index {
            rows.push(Row::new());
        }
        rows[index] = row.into_iter().take(range.width).collect();
        Ok(())
    }

    async fn delete_row(&self, sheet_id: i64, row_index: u32) -> Result<()> {
        if sheet_id != self.sheet_id {
            return Err(CatalogError::remote(
                Some(400),
                format!("No grid with id: {}", sheet_id),
            ));
        }
        let mut rows = self.rows.write().await;

        let index = row_index as usize;
        if index >= rows.len() {
            return Err(CatalogError::remote(
                Some(400),
                format!("Row index {} is outside the grid", row_index),
            ));
        }
        rows.remove(index);
        Ok(())
    }

    async fn sheet_id(&self, sheet_name: &str) -> Result<i64> {
        if sheet_name == self.sheet {
            Ok(self.sheet_id)
        } else {
            Err(unknown_sheet(sheet_name))
        }
    }
}

fn check_growth(len: usize, index: usize) -> Result<()> {
    if index > len + MAX_ROW_GROWTH {
        return Err(CatalogError::remote(
            Some(400),
            format!("Row {} exceeds grid limits", index + 1),
        ));
    }
    Ok(())
}

fn unknown_sheet(name: &str) -> CatalogError {
    CatalogError::remote(Some(400), format!("Unable to parse range: sheet '{}' not found", name))
}
