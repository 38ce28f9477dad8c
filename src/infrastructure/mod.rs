//! # Infrastructure Layer
//!
//! Adapters for storage.
//!
//! - [`persistence`]: repository ports, records and in-memory adapters

pub mod persistence;
