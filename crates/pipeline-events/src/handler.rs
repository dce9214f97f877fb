use crate::event::PipelineEvent;
use crate::failure::GenerationFailure;

/// Trait form of the exhaustive dispatch, for consumers that live longer
/// than one closure set.
///
/// Every method is required. A new event case means a new required method
/// here, which breaks every implementation until it handles the case, the
/// same guarantee [`PipelineEvent::dispatch`] gives closure call sites.
pub trait EventHandler {
    /// Producer began loading model weights.
    fn started_loading_model(&mut self);
    /// Model is loaded and ready for inference.
    fn finished_loading_model(&mut self);
    /// Producer began a generation request.
    fn started_generating_output(&mut self);
    /// One incremental unit of generated output.
    fn output_token(&mut self, token: String);
    /// Generation finished normally.
    fn completed(&mut self);
    /// Producer terminated abnormally.
    fn failed(&mut self, error: GenerationFailure);
}

impl PipelineEvent {
    /// Dispatches on the event's case by invoking exactly one method of
    /// `handler`, with the same contract as [`PipelineEvent::dispatch`].
    pub fn dispatch_to<H: EventHandler + ?Sized>(self, handler: &mut H) {
        match self {
            Self::StartedLoadingModel => handler.started_loading_model(),
            Self::FinishedLoadingModel => handler.finished_loading_model(),
            Self::StartedGeneratingOutput => handler.started_generating_output(),
            Self::OutputToken { token } => handler.output_token(token),
            Self::Completed => handler.completed(),
            Self::Failed { error } => handler.failed(error),
        }
    }
}
