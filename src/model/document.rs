//! Documents under compliance review and their lifecycle

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::verdict::{ManualDecision, VerdictStatus};

/// Lifecycle state of a document in the verification queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum DocumentState {
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "AI Approved")]
    AiApproved,
    #[serde(rename = "AI Flagged")]
    AiFlagged,
    #[serde(rename = "Approved")]
    Approved,
    #[serde(rename = "Rejected")]
    Rejected,
}

impl DocumentState {
    /// Human-readable label, as shown to reviewers
    pub fn label(&self) -> &'static str {
        match self {
            DocumentState::Pending => "Pending",
            DocumentState::AiApproved => "AI Approved",
            DocumentState::AiFlagged => "AI Flagged",
            DocumentState::Approved => "Approved",
            DocumentState::Rejected => "Rejected",
        }
    }

    /// Terminal states accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, DocumentState::Approved | DocumentState::Rejected)
    }

    /// State reached once an AI verdict is recorded.
    ///
    /// Only a `Pending` document can be scanned.
    pub fn after_verdict(self, status: VerdictStatus) -> Option<DocumentState> {
        match (self, status) {
            (DocumentState::Pending, VerdictStatus::Approved) => Some(DocumentState::AiApproved),
            (DocumentState::Pending, VerdictStatus::Flagged) => Some(DocumentState::AiFlagged),
            (
                DocumentState::AiApproved
                | DocumentState::AiFlagged
                | DocumentState::Approved
                | DocumentState::Rejected,
                _,
            ) => None,
        }
    }

    /// State reached once a reviewer decides manually.
    ///
    /// Allowed from every non-terminal state; the decision is final.
    pub fn after_decision(self, decision: ManualDecision) -> Option<DocumentState> {
        if self.is_terminal() {
            return None;
        }
        match decision {
            ManualDecision::Approved => Some(DocumentState::Approved),
            ManualDecision::Rejected => Some(DocumentState::Rejected),
        }
    }
}

impl fmt::Display for DocumentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A document submitted for compliance review
///
/// `reason` is `None` exactly while the document is `Pending`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Document {
    /// Queue-unique identifier
    pub id: String,
    /// Display name of the uploading user or company
    pub owner: String,
    /// Free-text category, e.g. "Mining License"
    pub doc_type: String,
    pub file_name: String,
    pub state: DocumentState,
    /// Verdict reason, AI or manual
    pub reason: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Create a new pending document
    pub fn pending(
        id: impl Into<String>,
        owner: impl Into<String>,
        doc_type: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            owner: owner.into(),
            doc_type: doc_type.into(),
            file_name: file_name.into(),
            state: DocumentState::Pending,
            reason: None,
            submitted_at: now,
            updated_at: now,
        }
    }

    /// Move to `state` and record `reason`
    pub(crate) fn record(&mut self, state: DocumentState, reason: String) {
        self.state = state;
        self.reason = Some(reason);
        self.updated_at = Utc::now();
    }
}

/// Seed entry for the queue, loaded from configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedDocument {
    pub id: String,
    pub owner: String,
    pub doc_type: String,
    pub file_name: String,
}

impl SeedDocument {
    /// Documents the demo marketplace starts with
    pub fn demo_set() -> Vec<SeedDocument> {
        vec![
            SeedDocument {
                id: "doc1".to_string(),
                owner: "Copper Ridge".to_string(),
                doc_type: "Mining License".to_string(),
                file_name: "license_scan_2024.pdf".to_string(),
            },
            SeedDocument {
                id: "doc2".to_string(),
                owner: "Global Tech".to_string(),
                doc_type: "Proof of Funds".to_string(),
                file_name: "bcl_bank_letter.pdf".to_string(),
            },
        ]
    }
}

impl From<SeedDocument> for Document {
    fn from(seed: SeedDocument) -> Self {
        Document::pending(seed.id, seed.owner, seed.doc_type, seed.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [DocumentState; 5] = [
        DocumentState::Pending,
        DocumentState::AiApproved,
        DocumentState::AiFlagged,
        DocumentState::Approved,
        DocumentState::Rejected,
    ];

    #[test]
    fn test_scan_only_from_pending() {
        assert_eq!(
            DocumentState::Pending.after_verdict(VerdictStatus::Approved),
            Some(DocumentState::AiApproved)
        );
        assert_eq!(
            DocumentState::Pending.after_verdict(VerdictStatus::Flagged),
            Some(DocumentState::AiFlagged)
        );

        for state in ALL_STATES
            .into_iter()
            .filter(|s| *s != DocumentState::Pending)
        {
            assert_eq!(state.after_verdict(VerdictStatus::Approved), None);
            assert_eq!(state.after_verdict(VerdictStatus::Flagged), None);
        }
    }

    #[test]
    fn test_manual_decision_from_non_terminal() {
        for state in [
            DocumentState::Pending,
            DocumentState::AiApproved,
            DocumentState::AiFlagged,
        ] {
            assert_eq!(
                state.after_decision(ManualDecision::Approved),
                Some(DocumentState::Approved)
            );
            assert_eq!(
                state.after_decision(ManualDecision::Rejected),
                Some(DocumentState::Rejected)
            );
        }
    }

    #[test]
    fn test_terminal_states_are_final() {
        for state in [DocumentState::Approved, DocumentState::Rejected] {
            assert!(state.is_terminal());
            assert_eq!(state.after_decision(ManualDecision::Approved), None);
            assert_eq!(state.after_decision(ManualDecision::Rejected), None);
            assert_eq!(state.after_verdict(VerdictStatus::Approved), None);
        }
    }

    #[test]
    fn test_state_labels_serialize() {
        let json = serde_json::to_string(&DocumentState::AiFlagged).unwrap();
        assert_eq!(json, "\"AI Flagged\"");
        assert_eq!(DocumentState::AiApproved.to_string(), "AI Approved");
    }

    #[test]
    fn test_pending_document_has_no_reason() {
        let doc = Document::pending("doc9", "Acme", "Export Permit", "permit.pdf");
        assert_eq!(doc.state, DocumentState::Pending);
        assert!(doc.reason.is_none());
    }
}
