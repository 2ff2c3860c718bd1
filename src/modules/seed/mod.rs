//! Bulk load of categories and transactions from JSON documents
//!
//! `categories.json` is an array of category names; `transactions.json` is an
//! array of transactions referencing a category by name. Loading wipes both
//! tables first.

pub mod document;
pub mod loader;

pub use document::{SeedDocument, SeedError, SeedTransaction};
pub use loader::{seed_database, SeedSummary};
