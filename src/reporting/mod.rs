mod errors;
mod export;
mod stats;

pub use errors::ExportError;
pub use export::{export_csv, export_json, ExportFile, CSV_HEADERS, JSON_EXPORT_FILE_NAME};
pub use stats::{aggregate, aggregate_in, summarize, DailyBucket, LedgerStats, Summary, UNKNOWN_DAY_LABEL};
