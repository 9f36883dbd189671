//! Certificate batch execution

mod orchestrator;
mod phase;
mod request;
mod types;


pub use orchestrator::BatchOrchestrator;
pub use phase::{BatchPhase, PhaseTracker};
pub use request::{BatchForm, BatchRequest};
pub use types::{
    AuditStatus, BatchOutcome, BatchReport, MintFailure, MintOutcome, MintResult, MintSuccess,
    TokenIdStatus, format_duration_secs,
};
