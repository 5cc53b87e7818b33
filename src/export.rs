//! Flat-file (CSV) export of the inventory collection.

use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::item::InventoryRecord;

/// Header row, in column order.
pub const CSV_HEADER: &str = "id,category,name,price,quantity,status,totalValue";

/// Failure writing an export file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Underlying filesystem error.
    #[error("failed to write export {path}: {source}")]
    Io {
        /// Target path.
        path: PathBuf,
        /// OS error.
        #[source]
        source: std::io::Error,
    },
}

/// Renders a header plus one row per record, rows joined by `\n`.
///
/// Values are written verbatim unless they contain a delimiter, quote or line
/// break, in which case they are quoted with embedded quotes doubled.
pub fn render_csv<'a>(records: impl IntoIterator<Item = &'a InventoryRecord>) -> String {
    let mut out = String::from(CSV_HEADER);
    for rec in records {
        out.push('\n');
        let row = [
            Cow::Owned(rec.id().to_string()),
            escape(rec.category()),
            escape(rec.name()),
            Cow::Owned(rec.price().normalize().to_string()),
            Cow::Owned(rec.quantity().to_string()),
            Cow::Borrowed(rec.status().label()),
            Cow::Owned(rec.total_value().normalize().to_string()),
        ];
        out.push_str(&row.join(","));
    }
    out
}

/// `<product>-inventory.csv`
pub fn export_file_name(product: &str) -> String {
    format!("{product}-inventory.csv")
}

/// Writes the rendered export into `dir` and returns the file path.
pub fn write_csv<'a>(
    dir: impl AsRef<Path>,
    product: &str,
    records: impl IntoIterator<Item = &'a InventoryRecord>,
) -> Result<PathBuf, ExportError> {
    let path = dir.as_ref().join(export_file_name(product));
    fs::write(&path, render_csv(records)).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), "inventory exported");
    Ok(path)
}

fn escape(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
