use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Reason recorded whenever the automated check could not produce a verdict
pub const FALLBACK_REASON: &str =
    "AI Service unavailable for automated check. Manual review required.";

/// Outcome of a single screening attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum VerdictStatus {
    Approved,
    Flagged,
}

/// Compliance verdict with a short explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Verdict {
    pub status: VerdictStatus,
    pub reason: String,
}

impl Verdict {
    /// Fail-closed verdict used whenever screening fails
    pub fn fallback() -> Self {
        Self {
            status: VerdictStatus::Flagged,
            reason: FALLBACK_REASON.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.status == VerdictStatus::Flagged && self.reason == FALLBACK_REASON
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("Field must not be empty: {0}")]
    EmptyField(&'static str),
}

/// Input to the verdict service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VerdictRequest {
    pub doc_name: String,
    pub doc_type: String,
    /// Extracted document text (e.g. OCR output)
    pub context: String,
}

impl VerdictRequest {
    pub fn new(
        doc_name: impl Into<String>,
        doc_type: impl Into<String>,
        context: impl Into<String>,
    ) -> Result<Self, RequestError> {
        let request = Self {
            doc_name: doc_name.into(),
            doc_type: doc_type.into(),
            context: context.into(),
        };
        request.validate()?;
        Ok(request)
    }

    /// All three fields are required
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.doc_name.trim().is_empty() {
            return Err(RequestError::EmptyField("doc_name"));
        }
        if self.doc_type.trim().is_empty() {
            return Err(RequestError::EmptyField("doc_type"));
        }
        if self.context.trim().is_empty() {
            return Err(RequestError::EmptyField("context"));
        }
        Ok(())
    }
}

/// A reviewer's final decision on a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ManualDecision {
    Approved,
    Rejected,
}

impl ManualDecision {
    /// Reason text recorded for a manual decision
    pub fn annotation(&self) -> String {
        format!("Manually {}", self)
    }
}

impl fmt::Display for ManualDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManualDecision::Approved => f.write_str("Approved"),
            ManualDecision::Rejected => f.write_str("Rejected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_flagged() {
        let verdict = Verdict::fallback();
        assert_eq!(verdict.status, VerdictStatus::Flagged);
        assert_eq!(
            verdict.reason,
            "AI Service unavailable for automated check. Manual review required."
        );
        assert!(verdict.is_fallback());
    }

    #[test]
    fn test_request_requires_all_fields() {
        assert!(VerdictRequest::new("a.pdf", "Mining License", "text").is_ok());
        assert_eq!(
            VerdictRequest::new("", "Mining License", "text"),
            Err(RequestError::EmptyField("doc_name"))
        );
        assert_eq!(
            VerdictRequest::new("a.pdf", " ", "text"),
            Err(RequestError::EmptyField("doc_type"))
        );
        assert_eq!(
            VerdictRequest::new("a.pdf", "Mining License", ""),
            Err(RequestError::EmptyField("context"))
        );
    }

    #[test]
    fn test_manual_annotation() {
        assert_eq!(ManualDecision::Approved.annotation(), "Manually Approved");
        assert_eq!(ManualDecision::Rejected.annotation(), "Manually Rejected");
    }
}
