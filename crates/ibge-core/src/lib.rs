//! Core types and trait definitions for the IBGE ingest pipeline.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The client and store crates depend on it; it depends on nothing heavy.

pub mod normalize;
pub mod payload;
pub mod row;
pub mod store;

pub use normalize::{SkipReason, normalize};
pub use row::ObservationRow;
