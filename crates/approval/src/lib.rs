//! Artist application workflow.
//!
//! - [`submission`]: applicant-side submission with the one-live-application rule.
//! - [`service`]: staff-side approve/reject transitions, single and batched.
//! - [`result`]: per-batch outcome buckets and their summary line.

pub mod error;
pub mod result;
pub mod service;
pub mod submission;

pub use error::{SubmitError, WorkflowError};
pub use result::{ApproveResult, RejectResult};
pub use service::{
    process_multiple_approve, process_multiple_reject, process_single_application,
    process_single_rejection,
};
pub use submission::submit_application;
