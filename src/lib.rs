//! Transaction dashboard backend: categories and financial transactions
//! stored in Postgres, served as a JSON CRUD API.

pub mod core;
pub mod features;
pub mod modules;
pub mod shared;
