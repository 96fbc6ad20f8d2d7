//! Core domain for the datamend client: file validation, modification
//! proposals, presentation formatting, and the workflow state machine.
//!
//! Everything interesting about the data itself (parsing, inference, regex
//! application, persistence) happens on the backend service; this crate
//! owns the client-side contract around it.

pub mod error;
pub mod file;
pub mod format;
pub mod modification;
pub mod workflow;

// Re-export common error type
pub use error::{DatamendError, Result};
