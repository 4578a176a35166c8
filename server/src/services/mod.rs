//! Service layer: validation, relationship invariants, and transactions.
//!
//! Everything here speaks in domain types and [`ServiceError`](crate::error::ServiceError);
//! no HTTP types cross this boundary. Relationship maintenance (category
//! cascade, recipe reassignment, comment ownership) is done with explicit
//! statements inside transactions, never implicit cascades.

pub mod categories;
pub mod comments;
pub mod recipes;
