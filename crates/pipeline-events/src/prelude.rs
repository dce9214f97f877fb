//! Common imports for typical usage.
pub use crate::{
    EventHandler, GenerationFailure, PipelineEvent, PipelineState, SequenceError, SequenceTracker,
};
