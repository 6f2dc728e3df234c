use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum PublishState {
    Idle,
    Serializing,
    Sending,
    Succeeded { status: u16 },
    Failed { error: String },
}

impl PublishState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PublishState::Succeeded { .. } | PublishState::Failed { .. }
        )
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, PublishState::Succeeded { .. })
    }
}

#[derive(Debug, Clone)]
pub enum PublishEvent {
    Start,
    Encoded { bytes: usize },
    Responded { status: u16 },
    Failed { reason: String },
}

/// Outcome of a successful publish attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublishReceipt {
    pub status: u16,
    pub payload_bytes: usize,
    pub elapsed: Duration,
}
