//! CSV rendering for the export.

use crate::error::{CatalogError, Result};

/// Byte-order mark prepended to downloaded exports.
pub const CSV_BOM: &str = "\u{FEFF}";

/// Joins cells with commas and rows with `\n`, without a trailing newline.
///
/// A cell is quoted only when it contains a comma, a quote or a newline;
/// everything else (empty cells, `\r`, surrounding spaces) is written as is.
/// Rows may differ in length, and an empty row is an empty line.
pub fn to_csv<R, C>(rows: &[R]) -> Result<String>
where
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let mut lines = Vec::with_capacity(rows.len());
    for row in rows {
        let cells = row
            .as_ref()
            .iter()
            .map(|cell| render_cell(cell.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        lines.push(cells.join(","));
    }
    Ok(lines.join("\n"))
}

fn render_cell(cell: &str) -> Result<String> {
    if !cell.contains([',', '"', '\n']) {
        return Ok(cell.to_string());
    }

    let mut wtr = ::csv::WriterBuilder::new()
        .quote_style(::csv::QuoteStyle::Always)
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    wtr.write_record([cell])
        .map_err(|err| CatalogError::Internal(format!("CSV write failed: {}", err)))?;

    let bytes = wtr
        .into_inner()
        .map_err(|err| CatalogError::Internal(format!("CSV flush failed: {}", err)))?;
    let mut quoted =
        String::from_utf8(bytes).map_err(|err| CatalogError::Internal(err.to_string()))?;
    // Record terminator
    quoted.pop();
    Ok(quoted)
}
