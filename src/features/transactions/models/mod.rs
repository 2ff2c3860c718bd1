mod transaction;

pub use transaction::{TransactionFields, TransactionWithCategory};
