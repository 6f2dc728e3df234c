//! Telemetry publishing
//!
//! `Idle -> Serializing -> Sending -> {Succeeded, Failed}`, one attempt per
//! call, no retries.

mod error;
pub mod payload;
mod publisher;
mod state_machine;
mod types;

pub use error::{PayloadError, PayloadResult, PublishError, PublishResult, TransportCause};
pub use publisher::TelemetryPublisher;
pub use state_machine::PublishStateMachine;
pub use types::{PublishEvent, PublishReceipt, PublishState};
