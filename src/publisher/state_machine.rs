use crate::publisher::error::{PublishError, PublishResult};
use crate::publisher::types::{PublishEvent, PublishState};
use parking_lot::RwLock;
use std::sync::Arc;

/// Tracks one publish attempt. Clones share the same state, so a caller can
/// watch an attempt that runs on the publish worker.
#[derive(Clone)]
pub struct PublishStateMachine {
    state: Arc<RwLock<PublishState>>,
}

impl Default for PublishStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PublishStateMachine {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(PublishState::Idle)),
        }
    }

    /// Get current state
    pub fn current_state(&self) -> PublishState {
        self.state.read().clone()
    }

    /// Transition state based on event
    pub fn transition(&self, event: PublishEvent) -> PublishResult<PublishState> {
        let mut state = self.state.write();

        let new_state = match (&*state, &event) {
            (PublishState::Idle, PublishEvent::Start) => PublishState::Serializing,

            (PublishState::Serializing, PublishEvent::Encoded { .. }) => PublishState::Sending,

            (PublishState::Sending, PublishEvent::Responded { status })
                if (200..300).contains(status) =>
            {
                PublishState::Succeeded { status: *status }
            }

            (PublishState::Sending, PublishEvent::Responded { status }) => PublishState::Failed {
                error: format!("HTTP {status}"),
            },

            (PublishState::Serializing | PublishState::Sending, PublishEvent::Failed { reason }) => {
                PublishState::Failed {
                    error: reason.clone(),
                }
            }

            _ => {
                return Err(PublishError::InvalidStateTransition(format!(
                    "Cannot handle {:?} in state {:?}",
                    event, *state
                )));
            }
        };

        tracing::debug!("Publish state {:?} -> {:?}", *state, new_state);
        *state = new_state.clone();
        Ok(new_state)
    }
}
