mod extraction;
mod record;
#[cfg(test)]
mod tests;

pub use extraction::{
    ExtractedRecord, FALLBACK_ACCOUNT, FALLBACK_FEE, FALLBACK_STATUS, FALLBACK_TYPE, REQUIRED_FIELDS,
};
pub use record::{newest_first, oldest_first, TransactionRecord};
