//! The session workflow: state aggregate, transport seam, and the
//! controller that orchestrates upload → preview → modify → apply.

pub mod controller;
pub mod service;
pub mod state;

pub use controller::WorkflowController;
pub use service::ModificationService;
pub use state::{Outcome, WorkflowPhase, WorkflowState};
