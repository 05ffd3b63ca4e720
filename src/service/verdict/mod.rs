//! Document fraud screening using an LLM
//!
//! Produces an `Approved`/`Flagged` verdict for a document. Every failure,
//! from a missing API key to an unparseable answer, resolves to the fixed
//! `Flagged` fallback verdict so that an inconclusive check never approves.

use std::sync::Arc;

use crate::model::{ScreeningConfig, Verdict, VerdictRequest};
use crate::service::llm::TextGenerator;
use crate::service::verdict::prompts::build_verdict_prompt;
use crate::service::verdict::validation::parse_verdict;

pub mod error;
pub mod prompts;
pub mod validation;

pub use error::ScreeningError;

/// Service producing compliance verdicts for documents
pub struct VerdictService {
    generator: Arc<dyn TextGenerator>,
    suspicion_markers: Vec<String>,
}

impl VerdictService {
    pub fn new(generator: Arc<dyn TextGenerator>, config: &ScreeningConfig) -> Self {
        tracing::info!(
            model = %generator.model(),
            markers = ?config.suspicion_markers,
            "Verdict service initialized"
        );

        Self {
            generator,
            suspicion_markers: config.suspicion_markers.clone(),
        }
    }

    /// Whether the underlying endpoint has a credential configured
    pub fn has_credential(&self) -> bool {
        self.generator.has_credential()
    }

    pub fn model(&self) -> &str {
        self.generator.model()
    }

    /// Screen a document. Never fails; see [`Verdict::fallback`].
    pub async fn evaluate(&self, request: &VerdictRequest) -> Verdict {
        let start_time = std::time::Instant::now();

        match self.screen(request).await {
            Ok(verdict) => {
                tracing::info!(
                    doc_name = %request.doc_name,
                    model = %self.generator.model(),
                    status = ?verdict.status,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    "Document screening completed"
                );
                verdict
            }
            Err(e) => {
                tracing::error!(
                    doc_name = %request.doc_name,
                    model = %self.generator.model(),
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "Document screening failed, flagging for manual review"
                );
                Verdict::fallback()
            }
        }
    }

    /// Single attempt: prompt, call, parse
    async fn screen(&self, request: &VerdictRequest) -> Result<Verdict, ScreeningError> {
        let prompt = build_verdict_prompt(request, &self.suspicion_markers);

        tracing::debug!(
            doc_name = %request.doc_name,
            doc_type = %request.doc_type,
            prompt_length = prompt.len(),
            "Initiating screening call"
        );

        let text = self.generator.generate_json(&prompt).await?;
        parse_verdict(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VerdictStatus;
    use crate::service::llm::testing::{Reply, StubGenerator};

    fn service(stub: Arc<StubGenerator>) -> VerdictService {
        VerdictService::new(stub, &ScreeningConfig::default())
    }

    fn license_request() -> VerdictRequest {
        VerdictRequest::new(
            "license_scan_2024.pdf",
            "Mining License",
            "This document confirms the mining rights for Copper Ridge in region Katanga. Valid until 2025.",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_well_formed_answer_returned_verbatim() {
        let stub = Arc::new(StubGenerator::json(
            r#"{"status":"Approved","reason":"Dates consistent"}"#,
        ));
        let verdict = service(Arc::clone(&stub)).evaluate(&license_request()).await;

        assert_eq!(verdict.status, VerdictStatus::Approved);
        assert_eq!(verdict.reason, "Dates consistent");
        assert_eq!(stub.calls(), 1);

        let prompt = stub.last_prompt().unwrap();
        assert!(prompt.contains("license_scan_2024.pdf"));
        assert!(prompt.contains("Valid until 2025."));
    }

    #[tokio::test]
    async fn test_flagged_answer_returned_verbatim() {
        let stub = Arc::new(StubGenerator::json(
            r#"{"status":"Flagged","reason":"Account holder mismatch"}"#,
        ));
        let verdict = service(stub).evaluate(&license_request()).await;
        assert_eq!(
            verdict,
            Verdict {
                status: VerdictStatus::Flagged,
                reason: "Account holder mismatch".to_string(),
            }
        );
        assert!(!verdict.is_fallback());
    }

    #[tokio::test]
    async fn test_failures_fall_back_to_flagged() {
        let failures = [
            Reply::NetworkError,
            Reply::Timeout,
            Reply::Empty,
            Reply::MissingCredential,
            Reply::Json("not json at all".to_string()),
            Reply::Json(r#"{"status":"Unknown"}"#.to_string()),
            Reply::Json(r#"{"reason":"no status"}"#.to_string()),
        ];

        for reply in failures {
            let stub = Arc::new(StubGenerator::new(reply.clone()));
            let verdict = service(Arc::clone(&stub)).evaluate(&license_request()).await;
            assert!(verdict.is_fallback(), "expected fallback for {:?}", reply);
            assert_eq!(verdict.status, VerdictStatus::Flagged);
            assert_eq!(stub.calls(), 1, "no retry expected for {:?}", reply);
        }
    }
}
