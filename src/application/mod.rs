//! # Application Layer
//!
//! Use cases over the quote aggregate.
//!
//! - [`commands`]: raw request types
//! - [`service`]: the [`QuoteService`] orchestrating load, mutate and save
//! - [`error`]: [`ApplicationError`] and its coarse [`ErrorKind`]

pub mod commands;
pub mod error;
pub mod service;

pub use error::{ApplicationError, ApplicationResult, ErrorKind};
pub use service::QuoteService;
