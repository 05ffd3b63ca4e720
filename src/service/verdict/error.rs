//! Error types for verdict screening

use thiserror::Error;

use crate::service::llm::LlmError;

/// Reasons a screening attempt produced no usable verdict.
///
/// These never leave the verdict service; each one resolves to the fallback verdict.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScreeningError {
    #[error("Text generation failed: {0}")]
    Transport(#[from] LlmError),

    #[error("Malformed verdict response: {0}")]
    MalformedResponse(String),
}
