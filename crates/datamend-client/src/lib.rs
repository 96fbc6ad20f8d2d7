//! HTTP transport for the datamend workflow: endpoint construction,
//! environment-based configuration, and the reqwest-backed implementation
//! of [`ModificationService`](datamend_core::workflow::ModificationService).

pub mod config;
pub mod endpoints;
pub mod http;

pub use config::ClientConfig;
pub use http::{HttpModificationService, extract_error_message, json_headers};
