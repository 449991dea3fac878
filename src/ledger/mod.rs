mod bootstrap;
mod errors;
mod record_store;
mod seed;

pub use bootstrap::{parse_records, BootstrapLoader};
pub use errors::{SeedError, StoreError};
pub use record_store::{RecordStore, RECORDS_KEY};
pub use seed::{FileSeedSource, SeedSource};
