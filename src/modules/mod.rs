//! Modules layer - Infrastructure components outside the request path
//!
//! Contains one-off jobs such as the database seed loader.

pub mod seed;
