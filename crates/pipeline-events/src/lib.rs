//! Lifecycle event protocol for an asynchronous model-inference pipeline.
//!
//! The producer (an inference engine loading model weights and streaming
//! generated tokens) reports its lifecycle as [`PipelineEvent`] values; the
//! consumer handles them through an exhaustive dispatch, either the
//! closure-per-case [`PipelineEvent::dispatch`] or the [`EventHandler`]
//! trait. Both forms require a handler for every case, so a future event
//! kind cannot be silently ignored: it is a compile error at every call
//! site until handled.
//!
//! The crate owns no scheduling. Events are constructed on whatever thread
//! the producer runs on, dispatch runs synchronously on the caller's
//! thread, and ordering between events is the producer's responsibility.
//!
//! ```
//! use pipeline_events::{GenerationFailure, PipelineEvent};
//!
//! let event = PipelineEvent::output_token("hello");
//! event.dispatch(
//!     || println!("loading model"),
//!     || println!("model ready"),
//!     || println!("generating"),
//!     |token| print!("{token}"),
//!     || println!("done"),
//!     |error: GenerationFailure| eprintln!("failed: {error}"),
//! );
//! ```

/// The event type, its factories, and the closure-form exhaustive dispatch.
pub mod event;
/// Failure descriptor carried by the `Failed` event.
pub mod failure;
/// Handler trait form of the exhaustive dispatch.
pub mod handler;
/// Common imports for typical usage.
pub mod prelude;
/// Producer state machine tracker for sequence legality at the producer boundary.
pub mod sequence;

pub use event::PipelineEvent;
pub use failure::GenerationFailure;
pub use handler::EventHandler;
pub use sequence::{PipelineState, SequenceError, SequenceTracker};
