use std::fmt;

use tracing::warn;

use crate::event::PipelineEvent;

/// Producer-side lifecycle states implied by the event protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineState {
    /// No events observed yet.
    Idle,
    /// Between `StartedLoadingModel` and `FinishedLoadingModel`.
    LoadingModel,
    /// Model loaded, no generation request started.
    ModelReady,
    /// Between `StartedGeneratingOutput` and a terminal event.
    Generating,
    /// Terminal: generation finished normally.
    Completed,
    /// Terminal: producer reported abnormal termination.
    Failed,
}

impl PipelineState {
    /// Returns true for `Completed` and `Failed`, after which no further
    /// events are legal for the same generation request.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::LoadingModel => "LoadingModel",
            Self::ModelReady => "ModelReady",
            Self::Generating => "Generating",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sequence violations detected by [`SequenceTracker::observe`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    /// The event is not reachable from the current state.
    #[error("event {event} is illegal in state {state}")]
    IllegalTransition {
        state: PipelineState,
        event: &'static str,
    },
    /// An event arrived after `Completed` or `Failed`.
    #[error("event {event} observed after terminal state {state}")]
    AfterTerminal {
        state: PipelineState,
        event: &'static str,
    },
}

/// Tracks the event sequence a well-behaved producer emits:
/// `Idle → StartedLoadingModel → FinishedLoadingModel →
/// StartedGeneratingOutput → (OutputToken)* → Completed`, with `Failed`
/// reachable from any non-terminal state.
///
/// The dispatcher never consults this tracker; the protocol trusts the
/// producer. This type exists so tests and debugging at the producer
/// boundary can assert sequence legality.
#[derive(Debug)]
pub struct SequenceTracker {
    state: PipelineState,
}

impl Default for SequenceTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceTracker {
    /// Creates a tracker in the `Idle` state.
    pub fn new() -> Self {
        Self {
            state: PipelineState::Idle,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Observes one event and advances the state, or reports the violation.
    ///
    /// On error the state is left unchanged, so a test can keep asserting
    /// from the same point.
    pub fn observe(&mut self, event: &PipelineEvent) -> Result<PipelineState, SequenceError> {
        if self.state.is_terminal() {
            warn!(state = %self.state, event = event.name(), "pipeline event after terminal state");
            return Err(SequenceError::AfterTerminal {
                state: self.state,
                event: event.name(),
            });
        }

        let next = match (self.state, event) {
            (PipelineState::Idle, PipelineEvent::StartedLoadingModel) => PipelineState::LoadingModel,
            (PipelineState::LoadingModel, PipelineEvent::FinishedLoadingModel) => {
                PipelineState::ModelReady
            }
            (PipelineState::ModelReady, PipelineEvent::StartedGeneratingOutput) => {
                PipelineState::Generating
            }
            (PipelineState::Generating, PipelineEvent::OutputToken { .. }) => {
                PipelineState::Generating
            }
            (PipelineState::Generating, PipelineEvent::Completed) => PipelineState::Completed,
            (_, PipelineEvent::Failed { .. }) => PipelineState::Failed,
            (state, event) => {
                warn!(state = %state, event = event.name(), "illegal pipeline event sequence");
                return Err(SequenceError::IllegalTransition {
                    state,
                    event: event.name(),
                });
            }
        };
        self.state = next;
        Ok(next)
    }
}
