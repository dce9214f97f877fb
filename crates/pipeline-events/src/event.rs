use tracing::trace;

use crate::failure::GenerationFailure;

/// A single lifecycle notification reported by the inference pipeline.
///
/// Exactly one case is active per event, construction goes through the six
/// factory functions, and the value is immutable once built. Consumption is
/// by [`PipelineEvent::dispatch`] (closure per case) or
/// [`PipelineEvent::dispatch_to`] (handler trait); both consume the event,
/// so an event cannot be re-dispatched after its exhaustive match returns.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// Producer began loading model weights.
    StartedLoadingModel,
    /// Model is loaded and ready for inference.
    FinishedLoadingModel,
    /// Producer began a generation request.
    StartedGeneratingOutput,
    /// One incremental unit of generated output.
    OutputToken { token: String },
    /// Generation finished normally.
    Completed,
    /// Producer terminated abnormally.
    Failed { error: GenerationFailure },
}

impl PipelineEvent {
    /// Creates the event reporting that model loading has begun.
    pub fn started_loading_model() -> Self {
        Self::StartedLoadingModel
    }

    /// Creates the event reporting that the model is loaded and ready.
    pub fn finished_loading_model() -> Self {
        Self::FinishedLoadingModel
    }

    /// Creates the event reporting that a generation request has begun.
    pub fn started_generating_output() -> Self {
        Self::StartedGeneratingOutput
    }

    /// Creates the event carrying one generated token.
    ///
    /// An empty token is a valid, if degenerate, output unit; whether to emit
    /// one is the producer's decision.
    pub fn output_token(token: impl Into<String>) -> Self {
        Self::OutputToken {
            token: token.into(),
        }
    }

    /// Creates the event reporting that generation finished normally.
    pub fn completed() -> Self {
        Self::Completed
    }

    /// Creates the event reporting abnormal termination.
    pub fn failed(error: GenerationFailure) -> Self {
        Self::Failed { error }
    }

    /// Returns the case name of this event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartedLoadingModel => "StartedLoadingModel",
            Self::FinishedLoadingModel => "FinishedLoadingModel",
            Self::StartedGeneratingOutput => "StartedGeneratingOutput",
            Self::OutputToken { .. } => "OutputToken",
            Self::Completed => "Completed",
            Self::Failed { .. } => "Failed",
        }
    }

    /// Dispatches on the event's case, invoking exactly one of the six
    /// handlers with that case's payload.
    ///
    /// The handler runs synchronously on the caller's thread; nothing is
    /// scheduled or queued. There is no default path: a new event case is a
    /// compile error at every call site until a handler for it is supplied.
    /// Panics raised inside a handler propagate to the caller unmodified.
    pub fn dispatch(
        self,
        started_loading_model: impl FnOnce(),
        finished_loading_model: impl FnOnce(),
        started_generating_output: impl FnOnce(),
        output_token: impl FnOnce(String),
        completed: impl FnOnce(),
        failed: impl FnOnce(GenerationFailure),
    ) {
        trace!(event = self.name(), "dispatching pipeline event");
        match self {
            Self::StartedLoadingModel => started_loading_model(),
            Self::FinishedLoadingModel => finished_loading_model(),
            Self::StartedGeneratingOutput => started_generating_output(),
            Self::OutputToken { token } => output_token(token),
            Self::Completed => completed(),
            Self::Failed { error } => failed(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn all_cases() -> Vec<PipelineEvent> {
        vec![
            PipelineEvent::started_loading_model(),
            PipelineEvent::finished_loading_model(),
            PipelineEvent::started_generating_output(),
            PipelineEvent::output_token("t"),
            PipelineEvent::completed(),
            PipelineEvent::failed(GenerationFailure::generation("boom")),
        ]
    }

    /// Dispatches with handlers that each log their case name.
    fn dispatch_logging_case_names(event: PipelineEvent) -> Vec<String> {
        let log = RefCell::new(Vec::new());
        event.dispatch(
            || log.borrow_mut().push("StartedLoadingModel".to_string()),
            || log.borrow_mut().push("FinishedLoadingModel".to_string()),
            || log.borrow_mut().push("StartedGeneratingOutput".to_string()),
            |_| log.borrow_mut().push("OutputToken".to_string()),
            || log.borrow_mut().push("Completed".to_string()),
            |_| log.borrow_mut().push("Failed".to_string()),
        );
        log.into_inner()
    }

    #[test]
    fn each_case_invokes_exactly_its_handler_once() {
        for event in all_cases() {
            let expected = event.name().to_string();
            assert_eq!(dispatch_logging_case_names(event), vec![expected]);
        }
    }

    #[test]
    fn started_loading_model_scenario_logs_single_case_name() {
        let log = dispatch_logging_case_names(PipelineEvent::started_loading_model());
        assert_eq!(log, vec!["StartedLoadingModel".to_string()]);
    }

    #[test]
    fn output_token_payload_reaches_handler_unchanged() {
        let log = RefCell::new(Vec::new());
        for token in ["hello", "world"] {
            PipelineEvent::output_token(token).dispatch(
                || panic!("unexpected handler"),
                || panic!("unexpected handler"),
                || panic!("unexpected handler"),
                |token| log.borrow_mut().push(token),
                || panic!("unexpected handler"),
                |_| panic!("unexpected handler"),
            );
        }
        assert_eq!(log.into_inner(), vec!["hello".to_string(), "world".to_string()]);
    }

    #[test]
    fn empty_token_is_valid_and_dispatches_to_token_handler() {
        let log = RefCell::new(Vec::new());
        PipelineEvent::output_token("").dispatch(
            || panic!("unexpected handler"),
            || panic!("unexpected handler"),
            || panic!("unexpected handler"),
            |token| log.borrow_mut().push(token),
            || panic!("unexpected handler"),
            |_| panic!("unexpected handler"),
        );
        assert_eq!(log.into_inner(), vec![String::new()]);
    }

    #[test]
    fn failed_hands_descriptor_to_failure_handler_unmodified() {
        let received = RefCell::new(None);
        PipelineEvent::failed(GenerationFailure::timeout("no response")).dispatch(
            || panic!("unexpected handler"),
            || panic!("unexpected handler"),
            || panic!("unexpected handler"),
            |_| panic!("unexpected handler"),
            || panic!("unexpected handler"),
            |error| *received.borrow_mut() = Some(error),
        );
        let error = received.into_inner().expect("failure handler ran");
        assert_eq!(error.kind(), "Timeout");
        assert_eq!(error.message(), "no response");
        assert_eq!(error, GenerationFailure::timeout("no response"));
    }

    #[test]
    fn name_matches_case() {
        let names: Vec<&str> = all_cases().iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            vec![
                "StartedLoadingModel",
                "FinishedLoadingModel",
                "StartedGeneratingOutput",
                "OutputToken",
                "Completed",
                "Failed",
            ]
        );
    }

    #[test]
    fn tagged_serde_representation_round_trips_payload_cases() {
        let token = PipelineEvent::output_token("hi");
        let json = serde_json::to_value(&token).expect("serialize");
        assert_eq!(json.get("type").and_then(|v| v.as_str()), Some("output_token"));
        let back: PipelineEvent = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, token);

        let failed = PipelineEvent::failed(GenerationFailure::cancelled("stopped"));
        let json = serde_json::to_string(&failed).expect("serialize");
        let back: PipelineEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, failed);
    }
}
