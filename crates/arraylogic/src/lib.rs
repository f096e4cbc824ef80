//! arraylogic: a fixed-rank numeric array engine for scripted logic.
//!
//! The crate provides a 3-axis flat-storage array (`FlatArray`) with total,
//! non-failing semantics for malformed input, the vector primitives used by
//! the vector opcodes, and the two opcode catalogs that bind a display symbol
//! to an operation identity. Hosts look an opcode up in a catalog and then
//! call the matching engine method.
//!
//! Storage bookkeeping for hosts lives in `record` (persisted-state surface)
//! and `bank` (a fixed-capacity list of labelled arrays).
pub mod bank;
pub mod catalog;
pub mod config;
pub mod error;
pub mod math;
pub mod record;
