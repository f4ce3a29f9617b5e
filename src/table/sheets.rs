//! Google Sheets REST backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error};

use super::{Row, RowRange, Table};
use crate::error::{CatalogError, Result};

/// Talks to one spreadsheet through the Sheets v4 API.
#[derive(Debug, Clone)]
pub struct SheetsTable {
    http: Client,
    base_url: String,
    spreadsheet_id: String,
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    sheet_id: i64,
    title: String,
}

impl SheetsTable {
    pub fn new(
        base_url: impl Into<String>,
        spreadsheet_id: impl Into<String>,
        access_token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            access_token,
        })
    }

    fn values_url(&self, range: &RowRange) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}",
            self.base_url, self.spreadsheet_id, range
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, operation: &str, request: RequestBuilder) -> Result<Response> {
        let response = self.authorized(request).send().await.map_err(|err| {
            error!(operation, error = %err, "spreadsheet request failed");
            CatalogError::from(err)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
            .unwrap_or(body);
        error!(operation, status = status.as_u16(), %message, "spreadsheet API error");
        Err(CatalogError::remote(Some(status.as_u16()), message))
    }
}

#[async_trait]
impl Table for SheetsTable {
    async fn read_rows(&self, range: &RowRange) -> Result<Vec<Row>> {
        debug!(%range, "reading rows");
        let request = self.http.get(self.values_url(range));
        let body: ValueRange = self.send("values.get", request).await?.json().await?;

        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    async fn append_row(&self, range: &RowRange, row: Row) -> Result<()> {
        debug!(%range, "appending row");
        let request = self
            .http
            .post(format!("{}:append", self.values_url(range)))
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "values": [row] }));
        self.send("values.append", request).await?;
        Ok(())
    }

    async fn update_row(&self, range: &RowRange, row: Row) -> Result<()> {
        debug!(%range, "updating row");
        let request = self
            .http
            .put(self.values_url(range))
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&json!({ "range": range.to_string(), "values": [row] }));
        self.send("values.update", request).await?;
        Ok(())
    }

    async fn delete_row(&self, sheet_id: i64, row_index: u32) -> Result<()> {
        debug!(sheet_id, row_index, "deleting row");
        let request = self
            .http
            .post(format!(
                "{}/spreadsheets/{}:batchUpdate",
                self.base_url, self.spreadsheet_id
            ))
            .json(&json!({
                "requests": [{
                    "deleteDimension": {
                        "range": {
                            "sheetId": sheet_id,
                            "dimension": "ROWS",
                            "startIndex": row_index,
                            "endIndex": row_index + 1,
                        }
                    }
                }]
            }));
        self.send("batchUpdate", request).await?;
        Ok(())
    }

    async fn sheet_id(&self, sheet_name: &str) -> Result<i64> {
        let request = self
            .http
            .get(format!(
                "{}/spreadsheets/{}",
                self.base_url, self.spreadsheet_id
            ))
            .query(&[("fields", "sheets.properties")]);
        let meta: SpreadsheetMeta = self.send("spreadsheets.get", request).await?.json().await?;

        meta.sheets
            .into_iter()
            .find(|sheet| sheet.properties.title == sheet_name)
            .map(|sheet| sheet.properties.sheet_id)
            .ok_or_else(|| {
                error!(sheet_name, "sheet not found in spreadsheet");
                CatalogError::remote(None, format!("Sheet '{}' not found", sheet_name))
            })
    }
}

/// Formatted cells come back as strings; anything else is rendered as text.
fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
