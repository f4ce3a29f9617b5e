//! Record Store Module
//!
//! Catalog CRUD over the rows of one sheet. A record's id is its sheet row
//! number (data-range offset + 2), so ids are positional:
//!
//! - `add` returns no id; it is only known after the append lands.
//! - `delete(id)` shifts every later row up, decrementing each later id by one.
//! - Nothing serializes concurrent writers; a delete can invalidate the id
//!   another in-flight call is about to use.

mod export;

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::error::{CatalogError, Result};
use crate::models::{offset_for_id, validate, GameDraft, GameRecord, COLUMN_COUNT, FIRST_DATA_ROW};
use crate::table::{RowRange, Table};

pub use export::{to_csv, CSV_BOM};

// == Record Store ==
/// Stateless façade over the backing table; every call hits the table.
#[derive(Clone)]
pub struct RecordStore {
    table: Arc<dyn Table>,
    sheet: String,
}

impl RecordStore {
    pub fn new(table: Arc<dyn Table>, sheet: impl Into<String>) -> Self {
        Self {
            table,
            sheet: sheet.into(),
        }
    }

    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    fn data_range(&self) -> RowRange {
        RowRange::from_row(self.sheet.as_str(), FIRST_DATA_ROW, COLUMN_COUNT)
    }

    fn full_range(&self) -> RowRange {
        RowRange::from_row(self.sheet.as_str(), 1, COLUMN_COUNT)
    }

    // == Get All ==
    /// Every record in sheet order.
    pub async fn get_all(&self) -> Result<Vec<GameRecord>> {
        let range = self.data_range();
        let rows = self.table.read_rows(&range).await.inspect_err(|err| {
            error!(range = %range, error = %err, "failed to list games");
        })?;

        Ok(rows
            .iter()
            .enumerate()
            .map(|(offset, row)| GameRecord::from_row(offset, row))
            .collect())
    }

    // == Get ==
    /// The record currently at `id`.
    pub async fn get(&self, id: u32) -> Result<GameRecord> {
        let records = self.get_all().await?;
        offset_for_id(id)
            .and_then(|offset| records.into_iter().nth(offset))
            .ok_or_else(|| {
                warn!(id, "game not found");
                not_found(id)
            })
    }

    // == Add ==
    /// Appends a record after all existing ones.
    pub async fn add(&self, draft: &GameDraft) -> Result<()> {
        check(draft)?;

        let range = self.data_range();
        self.table
            .append_row(&range, draft.to_row())
            .await
            .inspect_err(|err| {
                error!(nome = %draft.nome, error = %err, "failed to add game");
            })?;

        info!(nome = %draft.nome, "game added");
        Ok(())
    }

    // == Update ==
    /// Overwrites the row at `id` in place.
    ///
    /// Does not check that `id` currently holds a record; an id past the end
    /// writes a new row there.
    pub async fn update(&self, id: u32, draft: &GameDraft) -> Result<()> {
        if id < FIRST_DATA_ROW {
            warn!(id, "rejected update of header or invalid row");
            return Err(CatalogError::invalid(format!(
                "id must be at least {}",
                FIRST_DATA_ROW
            )));
        }
        check(draft)?;

        let range = RowRange::single(self.sheet.as_str(), id, COLUMN_COUNT);
        self.table
            .update_row(&range, draft.to_row())
            .await
            .inspect_err(|err| {
                error!(id, error = %err, "failed to update game");
            })?;

        info!(id, "game updated");
        Ok(())
    }

    // == Delete ==
    /// Removes the row at `id`; later records move up one id.
    pub async fn delete(&self, id: u32) -> Result<()> {
        let range = self.data_range();
        let rows = self.table.read_rows(&range).await.inspect_err(|err| {
            error!(id, error = %err, "failed to read games before delete");
        })?;

        let offset = match offset_for_id(id) {
            Some(offset) if offset < rows.len() => offset,
            _ => {
                warn!(id, row_count = rows.len(), "game not found for delete");
                return Err(not_found(id));
            }
        };

        let sheet_id = self.table.sheet_id(&self.sheet).await.inspect_err(|err| {
            error!(id, sheet = %self.sheet, error = %err, "failed to resolve sheet id");
        })?;

        // Sheet-relative zero-based index: the header is index 0
        let row_index = offset as u32 + 1;
        self.table
            .delete_row(sheet_id, row_index)
            .await
            .inspect_err(|err| {
                error!(id, error = %err, "failed to delete game");
            })?;

        info!(id, "game deleted");
        Ok(())
    }

    // == Export ==
    /// The whole sheet, header first, as CSV text (no BOM).
    pub async fn export_csv(&self) -> Result<String> {
        let range = self.full_range();
        let rows = self.table.read_rows(&range).await.inspect_err(|err| {
            error!(range = %range, error = %err, "failed to export games");
        })?;

        info!(rows = rows.len(), "exported games as CSV");
        to_csv(&rows)
    }
}

fn check(draft: &GameDraft) -> Result<()> {
    let errors = validate(draft);
    if errors.is_empty() {
        Ok(())
    } else {
        warn!(nome = %draft.nome, ?errors, "rejected invalid game");
        Err(CatalogError::Validation(errors))
    }
}

fn not_found(id: u32) -> CatalogError {
    CatalogError::NotFound(format!("Game {} not found", id))
}
