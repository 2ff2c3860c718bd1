//! Financial transactions: the core CRUD surface of the service.
//!
//! Every transaction returned by any endpoint embeds its category as
//! `category_rel`, read through an explicit join.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `{prefix}/transactions[/]` | Paginated list (`skip`, `limit`) |
//! | POST | `{prefix}/transactions[/]` | Create a transaction |
//! | GET | `{prefix}/transactions/{id}` | Get one transaction |
//! | PUT | `{prefix}/transactions/{id}` | Replace a transaction |
//! | DELETE | `{prefix}/transactions/{id}` | Delete, returning the removed transaction |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgTransactionRepository, TransactionRepository};
pub use services::TransactionService;
