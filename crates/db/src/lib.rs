//! SQLite persistence for cached articles.
//!
//! [`schema::initialize`] opens (and if needed creates) the store and returns
//! a [`Storage`] handle. Every repository function takes that handle
//! explicitly and holds a connection only for the duration of the call.

pub mod error;
pub mod migration;
pub mod models;
pub mod repositories;
pub mod schema;

pub use error::DbError;
pub use schema::{health_check, initialize, Storage};
