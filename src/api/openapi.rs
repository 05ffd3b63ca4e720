//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use crate::api::error::ApiError;

#[derive(OpenApi)]
#[openapi(
    info(title = "Compliance Screening API"),
    paths(
        crate::api::document::list_documents,
        crate::api::document::submit_document,
        crate::api::document::get_document,
        crate::api::document::scan_document,
        crate::api::document::decide_document,
        crate::api::screening::screen_document,
        crate::api::health::liveness,
        crate::api::health::readiness,
    ),
    components(schemas(
        crate::model::Document,
        crate::model::DocumentState,
        crate::model::Verdict,
        crate::model::VerdictStatus,
        crate::model::VerdictRequest,
        crate::model::ManualDecision,
        crate::service::queue::QueueEntry,
        crate::service::queue::QueueSummary,
        crate::api::document::DocumentListResponse,
        crate::api::document::SubmitDocumentRequest,
        crate::api::document::ScanRequest,
        crate::api::document::DecisionRequest,
        crate::api::error::ErrorResponse,
    )),
    tags(
        (name = "documents", description = "Document verification queue"),
        (name = "screening", description = "AI fraud screening"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> Result<HttpResponse, ApiError> {
    let yaml = ApiDoc::openapi()
        .to_yaml()
        .map_err(|e| ApiError::Internal(format!("Failed to render OpenAPI YAML: {}", e)))?;

    Ok(HttpResponse::Ok().content_type("text/yaml").body(yaml))
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_queue_paths() {
        let spec = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = spec["paths"].as_object().unwrap();
        assert!(paths.contains_key("/v1/documents"));
        assert!(paths.contains_key("/v1/documents/{id}/scan"));
        assert!(paths.contains_key("/v1/documents/{id}/decision"));
        assert!(paths.contains_key("/v1/screenings"));
    }
}
