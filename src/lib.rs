//! Ledger of currency conversions captured from receipt images.
//!
//! Records live in a [`ledger::RecordStore`] that writes through to a
//! [`storage::BlobStore`] on every mutation. [`ledger::BootstrapLoader`] hydrates
//! the store at start-up, [`reporting`] derives statistics and export files from
//! the current records, and [`extraction`] turns a receipt extraction into a
//! confirmed record.

pub mod config;
pub mod extraction;
pub mod ledger;
pub mod models;
pub mod reporting;
pub mod storage;
pub mod types;
