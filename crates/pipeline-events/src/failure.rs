/// Why the producer terminated abnormally, carried as data inside
/// `PipelineEvent::Failed`.
///
/// This is a regular first-class event payload, not an error raised by the
/// event protocol itself. The dispatcher never interprets it; it hands the
/// descriptor unmodified to the `failed` handler. Failure classification is
/// the producer's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum GenerationFailure {
    /// Model weights could not be loaded.
    #[error("model load failed: {message}")]
    ModelLoad { message: String },
    /// Token generation failed after the model was loaded.
    #[error("generation failed: {message}")]
    Generation { message: String },
    /// The producer gave up waiting on the engine.
    #[error("timed out: {message}")]
    Timeout { message: String },
    /// The caller asked the producer to stop.
    #[error("cancelled: {message}")]
    Cancelled { message: String },
}

impl GenerationFailure {
    /// Creates a model-load failure.
    pub fn model_load(message: impl Into<String>) -> Self {
        Self::ModelLoad {
            message: message.into(),
        }
    }

    /// Creates a generation failure.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates a timeout failure.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates a cancellation failure.
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::Cancelled {
            message: message.into(),
        }
    }

    /// Returns the failure kind as its case name.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ModelLoad { .. } => "ModelLoad",
            Self::Generation { .. } => "Generation",
            Self::Timeout { .. } => "Timeout",
            Self::Cancelled { .. } => "Cancelled",
        }
    }

    /// Returns the human-readable message for this failure.
    pub fn message(&self) -> &str {
        match self {
            Self::ModelLoad { message }
            | Self::Generation { message }
            | Self::Timeout { message }
            | Self::Cancelled { message } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_match_cases() {
        assert_eq!(GenerationFailure::model_load("x").kind(), "ModelLoad");
        assert_eq!(GenerationFailure::generation("x").kind(), "Generation");
        assert_eq!(GenerationFailure::timeout("x").kind(), "Timeout");
        assert_eq!(GenerationFailure::cancelled("x").kind(), "Cancelled");
    }

    #[test]
    fn message_is_returned_unmodified() {
        let failure = GenerationFailure::timeout("no response");
        assert_eq!(failure.message(), "no response");
    }

    #[test]
    fn display_includes_kind_prefix_and_message() {
        let failure = GenerationFailure::model_load("weights not found");
        assert_eq!(failure.to_string(), "model load failed: weights not found");
    }
}
