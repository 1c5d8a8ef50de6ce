//! Error types for scenario execution.

use thiserror::Error;

/// Errors raised while running a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Step '{step}' failed: {message}")]
    StepFailed { step: String, message: String },

    #[error("Assertion failed in step '{step}': {message}")]
    AssertionFailed { step: String, message: String },

    #[error("Scenario setup failed: {0}")]
    Setup(String),
}

impl ScenarioError {
    pub fn step_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StepFailed {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn assertion_failed(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            step: step.into(),
            message: message.into(),
        }
    }

    pub fn setup(message: impl Into<String>) -> Self {
        Self::Setup(message.into())
    }
}

/// Result type for scenario execution.
pub type ScenarioResult<T> = Result<T, ScenarioError>;
