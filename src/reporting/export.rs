use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::debug;

use crate::models::{newest_first, TransactionRecord};
use crate::reporting::ExportError;
use crate::types::EpochMillis;

pub const CSV_HEADERS: [&str; 8] = [
    "Time",
    "Transaction type",
    "Status",
    "PI amount",
    "USDT amount",
    "Fee",
    "Source account",
    "Exchange rate"
];

pub const JSON_EXPORT_FILE_NAME: &str = "data.json";

const CSV_FILE_PREFIX: &str = "transaction_history_";
const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";
const JSON_MIME_TYPE: &str = "application/json";
const BYTE_ORDER_MARK: &str = "\u{feff}";

/// A rendered export ready to be handed to the user as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>
}

impl ExportFile {
    /// Writes the payload into `directory` under its file name.
    pub fn write_to(&self, directory: &Path) -> io::Result<PathBuf> {
        fs::create_dir_all(directory)?;

        let path = directory.join(&self.file_name);
        fs::write(&path, &self.bytes)?;

        debug!("Exported {} bytes to {}", self.bytes.len(), path.display());

        Ok(path)
    }
}

/// Spreadsheet export, newest record first. Returns `None` for an empty ledger.
///
/// The payload starts with a UTF-8 byte order mark and an unquoted header row.
/// Every data field is quoted, and commas in the exchange rate become periods
/// so locale-formatted decimals do not read as column breaks. Rows are joined by
/// `\n` without a trailing newline.
pub fn export_csv(records: &[TransactionRecord], exported_at: EpochMillis) -> Result<Option<ExportFile>, ExportError> {
    if records.is_empty() {
        return Ok(None)
    }

    let mut buffer = Vec::new();
    buffer.extend_from_slice(BYTE_ORDER_MARK.as_bytes());
    buffer.extend_from_slice(CSV_HEADERS.join(",").as_bytes());
    buffer.push(b'\n');

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buffer);

    for record in newest_first(records) {
        let source_amount = record.source_amount.to_string();
        let target_amount = record.target_amount.to_string();
        let exchange_rate = record.exchange_rate.replace(',', ".");

        writer.write_record([
            record.timestamp.as_str(),
            record.conversion_type.as_str(),
            record.status.as_str(),
            source_amount.as_str(),
            target_amount.as_str(),
            record.fee.as_str(),
            record.source_account.as_str(),
            exchange_rate.as_str()
        ])?;
    }

    let mut bytes = writer.into_inner().map_err(|error| ExportError::Io(error.into_error()))?;

    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }

    Ok(Some(ExportFile {
        file_name: format!("{CSV_FILE_PREFIX}{exported_at}.csv"),
        mime_type: CSV_MIME_TYPE,
        bytes
    }))
}

/// Pretty-printed JSON of the full sequence in stored order. Returns `None` for an empty ledger.
///
/// The output uses the persisted schema, so it can be dropped in as the seed dataset.
pub fn export_json(records: &[TransactionRecord]) -> Result<Option<ExportFile>, ExportError> {
    if records.is_empty() {
        return Ok(None)
    }

    Ok(Some(ExportFile {
        file_name: JSON_EXPORT_FILE_NAME.to_string(),
        mime_type: JSON_MIME_TYPE,
        bytes: serde_json::to_vec_pretty(records)?
    }))
}
