use std::env;
use std::path::PathBuf;

use tracing::level_filters::LevelFilter;

pub const DATA_DIR_VARIABLE: &str = "LEDGER_DATA_DIR";
pub const SEED_PATH_VARIABLE: &str = "LEDGER_SEED_PATH";
pub const LOG_LEVEL_VARIABLE: &str = "LEDGER_LOG";

const DEFAULT_SEED_FILE: &str = "data.json";

/// Runtime settings for the ledger binary.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    /// Directory the blob store writes into.
    pub data_dir: PathBuf,
    /// Seed dataset used when nothing has been persisted yet.
    pub seed_path: PathBuf,
    pub log_level: LevelFilter
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            seed_path: PathBuf::from(".").join(DEFAULT_SEED_FILE),
            log_level: LevelFilter::ERROR
        }
    }
}

impl LedgerConfig {
    /// Defaults overridden by `LEDGER_DATA_DIR`, `LEDGER_SEED_PATH` and `LEDGER_LOG`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(data_dir) = lookup(DATA_DIR_VARIABLE).filter(|value| !value.is_empty()) {
            config = config.with_data_dir(data_dir);
        }

        if let Some(seed_path) = lookup(SEED_PATH_VARIABLE).filter(|value| !value.is_empty()) {
            config = config.with_seed_path(seed_path);
        }

        if let Some(level) = lookup(LOG_LEVEL_VARIABLE) {
            config = config.with_log_level(parse_log_level(&level));
        }

        config
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_seed_path(mut self, seed_path: impl Into<PathBuf>) -> Self {
        self.seed_path = seed_path.into();
        self
    }

    pub fn with_log_level(mut self, log_level: LevelFilter) -> Self {
        self.log_level = log_level;
        self
    }
}

pub fn parse_log_level(level: &str) -> LevelFilter {
    match level.trim().to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        "off" => LevelFilter::OFF,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}
