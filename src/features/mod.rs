pub mod categories;
pub mod transactions;
