//! movies_core - functional core for the Movies document-store adapter.
//!
//! Everything here is pure data and pure functions, except the
//! [`store::DocumentStore`] trait which backends implement.

pub mod document;
pub mod expression;
pub mod movies;
pub mod store;
