//! REST API endpoints for the document verification queue

use actix_web::{HttpResponse, Responder, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::model::ManualDecision;
use crate::service::extraction::ContextSource;
use crate::service::queue::{
    Blocker, Operation, QueueEntry, QueueError, QueueSummary, VerificationQueue,
};

/// Queue listing
#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentListResponse {
    pub documents: Vec<QueueEntry>,
    pub summary: QueueSummary,
}

/// Document upload metadata
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitDocumentRequest {
    pub owner: String,
    pub doc_type: String,
    pub file_name: String,
}

/// Optional scan parameters
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ScanRequest {
    /// Extracted document text. When omitted, the configured extraction source is used.
    pub context: Option<String>,
}

/// Reviewer decision
#[derive(Debug, Deserialize, ToSchema)]
pub struct DecisionRequest {
    pub decision: ManualDecision,
}

/// List the verification queue
#[utoipa::path(
    get,
    path = "/v1/documents",
    responses(
        (status = 200, description = "Queue retrieved successfully", body = DocumentListResponse)
    ),
    tag = "documents"
)]
#[get("/v1/documents")]
pub async fn list_documents(queue: web::Data<VerificationQueue>) -> impl Responder {
    HttpResponse::Ok().json(DocumentListResponse {
        documents: queue.entries(),
        summary: queue.summary(),
    })
}

/// Submit a document for review
#[utoipa::path(
    post,
    path = "/v1/documents",
    request_body = SubmitDocumentRequest,
    responses(
        (status = 201, description = "Document queued", body = crate::model::Document),
        (status = 400, description = "Missing field", body = crate::api::error::ErrorResponse)
    ),
    tag = "documents"
)]
#[post("/v1/documents")]
pub async fn submit_document(
    queue: web::Data<VerificationQueue>,
    body: web::Json<SubmitDocumentRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let document = queue.submit(&body.owner, &body.doc_type, &body.file_name)?;
    Ok(HttpResponse::Created().json(document))
}

/// Get a queued document by ID
#[utoipa::path(
    get,
    path = "/v1/documents/{id}",
    params(
        ("id" = String, Path, description = "Document ID")
    ),
    responses(
        (status = 200, description = "Document retrieved successfully", body = QueueEntry),
        (status = 404, description = "Document not found", body = crate::api::error::ErrorResponse)
    ),
    tag = "documents"
)]
#[get("/v1/documents/{id}")]
pub async fn get_document(
    queue: web::Data<VerificationQueue>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let entry = queue.get(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(entry))
}

/// Run the AI fraud scan on a pending document
#[utoipa::path(
    post,
    path = "/v1/documents/{id}/scan",
    params(
        ("id" = String, Path, description = "Document ID")
    ),
    request_body = ScanRequest,
    responses(
        (status = 200, description = "Scan completed", body = crate::model::Document),
        (status = 400, description = "Malformed body or empty context", body = crate::api::error::ErrorResponse),
        (status = 404, description = "Document not found", body = crate::api::error::ErrorResponse),
        (status = 409, description = "Document is not pending or already being scanned", body = crate::api::error::ErrorResponse)
    ),
    tag = "documents"
)]
#[post("/v1/documents/{id}/scan")]
pub async fn scan_document(
    queue: web::Data<VerificationQueue>,
    context_source: web::Data<dyn ContextSource>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    // An empty body means "use the extraction source"; anything else must parse
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        ScanRequest::default()
    } else {
        serde_json::from_slice::<ScanRequest>(&body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid scan request body: {}", e)))?
    };

    // Skip extraction for a document that is already being scanned
    if queue.is_busy(&id) {
        return Err(QueueError::InvalidTransition {
            id,
            operation: Operation::Scan,
            blocker: Blocker::ScanInProgress,
        }
        .into());
    }

    let context = match request.context {
        Some(context) => context,
        None => {
            let entry = queue.get(&id)?;
            context_source.context_for(&entry.document)
        }
    };

    let document = queue.request_ai_scan(&id, &context).await?;
    Ok(HttpResponse::Ok().json(document))
}

/// Record a reviewer's final decision
#[utoipa::path(
    post,
    path = "/v1/documents/{id}/decision",
    params(
        ("id" = String, Path, description = "Document ID")
    ),
    request_body = DecisionRequest,
    responses(
        (status = 200, description = "Decision recorded", body = crate::model::Document),
        (status = 404, description = "Document not found", body = crate::api::error::ErrorResponse),
        (status = 409, description = "Document already decided or being scanned", body = crate::api::error::ErrorResponse)
    ),
    tag = "documents"
)]
#[post("/v1/documents/{id}/decision")]
pub async fn decide_document(
    queue: web::Data<VerificationQueue>,
    path: web::Path<String>,
    body: web::Json<DecisionRequest>,
) -> Result<HttpResponse, ApiError> {
    let document = queue.manual_decide(&path.into_inner(), body.decision)?;
    Ok(HttpResponse::Ok().json(document))
}

/// Configure document routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_documents)
        .service(submit_document)
        .service(get_document)
        .service(scan_document)
        .service(decide_document);
}
