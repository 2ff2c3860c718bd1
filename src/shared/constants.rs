/// Default page size for transaction listing when `limit` is not supplied
pub const DEFAULT_LIMIT: i64 = 100;

/// Message carried in the `detail` of every missing-transaction response
pub const TRANSACTION_NOT_FOUND: &str = "Transaction not found";
