//! Document verification queue
//!
//! Owns the documents under review and enforces their lifecycle:
//! `Pending -> AI Approved / AI Flagged -> Approved / Rejected`. A human
//! decision is allowed from any non-terminal state and is final.
//!
//! At most one scan runs per document. Its id sits in the busy set for the
//! duration of the verdict call, and every transition on a busy document is
//! refused. The state mutex is never held across an await.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tokio::sync::broadcast;
use utoipa::ToSchema;

use crate::model::{Document, DocumentState, ManualDecision, RequestError, VerdictRequest};
use crate::service::verdict::VerdictService;

pub mod error;

pub use error::{Blocker, Operation, QueueError};

/// Buffered notifications per subscriber before old ones are dropped
const EVENT_CAPACITY: usize = 64;

/// Notification sent to queue observers
#[derive(Debug, Clone, PartialEq)]
pub enum QueueEvent {
    /// An AI scan started; the document is busy until the next `Updated`
    ScanStarted { id: String },
    /// A document was added or changed state
    Updated(Document),
}

/// Read-only view of a queued document
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct QueueEntry {
    pub document: Document,
    /// An AI scan is in flight
    pub busy: bool,
}

/// Document counts per state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct QueueSummary {
    pub total: usize,
    pub pending: usize,
    pub ai_approved: usize,
    pub ai_flagged: usize,
    pub approved: usize,
    pub rejected: usize,
    pub busy: usize,
}

#[derive(Debug, Default)]
struct QueueState {
    documents: Vec<Document>,
    busy: HashSet<String>,
}

impl QueueState {
    fn find(&self, id: &str) -> Result<&Document, QueueError> {
        self.documents
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| QueueError::NotFound(id.to_string()))
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Document, QueueError> {
        self.documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| QueueError::NotFound(id.to_string()))
    }
}

/// Clears the busy mark of a document when the scan ends or is dropped
struct ScanGuard<'a> {
    queue: &'a VerificationQueue,
    id: String,
}

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        self.queue.state().busy.remove(&self.id);
    }
}

/// In-memory verification queue
pub struct VerificationQueue {
    state: Mutex<QueueState>,
    verdicts: Arc<VerdictService>,
    events: broadcast::Sender<QueueEvent>,
}

impl VerificationQueue {
    pub fn new(verdicts: Arc<VerdictService>, documents: Vec<Document>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        tracing::info!(documents = documents.len(), "Verification queue initialized");

        Self {
            state: Mutex::new(QueueState {
                documents,
                busy: HashSet::new(),
            }),
            verdicts,
            events,
        }
    }

    fn state(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, event: QueueEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// Subscribe to queue notifications
    pub fn subscribe(&self) -> broadcast::Receiver<QueueEvent> {
        self.events.subscribe()
    }

    /// Add a new pending document with a generated id
    pub fn submit(
        &self,
        owner: &str,
        doc_type: &str,
        file_name: &str,
    ) -> Result<Document, QueueError> {
        for (field, value) in [("owner", owner), ("doc_type", doc_type), ("file_name", file_name)] {
            if value.trim().is_empty() {
                return Err(RequestError::EmptyField(field).into());
            }
        }

        let document = Document::pending(
            uuid::Uuid::new_v4().to_string(),
            owner.trim(),
            doc_type.trim(),
            file_name.trim(),
        );

        self.state().documents.push(document.clone());

        tracing::info!(doc_id = %document.id, doc_type = %document.doc_type, "Document submitted");
        self.notify(QueueEvent::Updated(document.clone()));

        Ok(document)
    }

    /// Get a document by id
    pub fn get(&self, id: &str) -> Result<QueueEntry, QueueError> {
        let state = self.state();
        let document = state.find(id)?.clone();
        Ok(QueueEntry {
            busy: state.busy.contains(id),
            document,
        })
    }

    /// Snapshot of all documents in submission order
    pub fn entries(&self) -> Vec<QueueEntry> {
        let state = self.state();
        state
            .documents
            .iter()
            .map(|d| QueueEntry {
                busy: state.busy.contains(&d.id),
                document: d.clone(),
            })
            .collect()
    }

    /// Whether an AI scan is in flight for `id`
    pub fn is_busy(&self, id: &str) -> bool {
        self.state().busy.contains(id)
    }

    pub fn summary(&self) -> QueueSummary {
        let state = self.state();
        let mut summary = QueueSummary {
            total: state.documents.len(),
            busy: state.busy.len(),
            ..QueueSummary::default()
        };

        for document in &state.documents {
            match document.state {
                DocumentState::Pending => summary.pending += 1,
                DocumentState::AiApproved => summary.ai_approved += 1,
                DocumentState::AiFlagged => summary.ai_flagged += 1,
                DocumentState::Approved => summary.approved += 1,
                DocumentState::Rejected => summary.rejected += 1,
            }
        }

        summary
    }

    /// Run an AI scan on a pending document.
    ///
    /// The document is busy until the verdict arrives, then moves to
    /// `AI Approved` or `AI Flagged` with the verdict's reason. If the
    /// returned future is dropped early the document stays `Pending`.
    pub async fn request_ai_scan(&self, id: &str, context: &str) -> Result<Document, QueueError> {
        let request = {
            let mut state = self.state();
            let document = state.find(id)?;

            if state.busy.contains(id) {
                return Err(QueueError::InvalidTransition {
                    id: id.to_string(),
                    operation: Operation::Scan,
                    blocker: Blocker::ScanInProgress,
                });
            }
            if document.state != DocumentState::Pending {
                return Err(QueueError::InvalidTransition {
                    id: id.to_string(),
                    operation: Operation::Scan,
                    blocker: Blocker::State(document.state),
                });
            }

            let request =
                VerdictRequest::new(document.file_name.as_str(), document.doc_type.as_str(), context)?;
            state.busy.insert(id.to_string());
            request
        };

        let _guard = ScanGuard {
            queue: self,
            id: id.to_string(),
        };

        tracing::info!(doc_id = %id, "AI scan started");
        self.notify(QueueEvent::ScanStarted { id: id.to_string() });

        let verdict = self.verdicts.evaluate(&request).await;
        let fallback = verdict.is_fallback();

        let updated = {
            let mut state = self.state();
            let document = state.find_mut(id)?;
            let next = document.state.after_verdict(verdict.status).ok_or_else(|| {
                QueueError::InvalidTransition {
                    id: id.to_string(),
                    operation: Operation::Scan,
                    blocker: Blocker::State(document.state),
                }
            })?;
            document.record(next, verdict.reason);
            let updated = document.clone();
            state.busy.remove(id);
            updated
        };

        tracing::info!(
            doc_id = %id,
            state = %updated.state,
            fallback = fallback,
            "AI scan completed"
        );
        self.notify(QueueEvent::Updated(updated.clone()));

        Ok(updated)
    }

    /// Record a reviewer's final decision
    pub fn manual_decide(&self, id: &str, decision: ManualDecision) -> Result<Document, QueueError> {
        let updated = {
            let mut state = self.state();
            if state.busy.contains(id) {
                state.find(id)?;
                return Err(QueueError::InvalidTransition {
                    id: id.to_string(),
                    operation: Operation::Decide,
                    blocker: Blocker::ScanInProgress,
                });
            }

            let document = state.find_mut(id)?;
            let next = document.state.after_decision(decision).ok_or_else(|| {
                QueueError::InvalidTransition {
                    id: id.to_string(),
                    operation: Operation::Decide,
                    blocker: Blocker::State(document.state),
                }
            })?;
            document.record(next, decision.annotation());
            document.clone()
        };

        tracing::info!(doc_id = %id, decision = %decision, "Manual decision recorded");
        self.notify(QueueEvent::Updated(updated.clone()));

        Ok(updated)
    }
}
