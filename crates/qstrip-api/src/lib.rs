//! HTTP surface for the test-strip ingestion service.
//!
//! Handlers are thin; the ingestion coordinator and the query service in
//! [`services`] own the behavior, and [`setup`] wires configuration,
//! database, storage, and routes together.

pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
