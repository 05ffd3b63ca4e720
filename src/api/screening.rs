//! Direct access to the verdict service

use actix_web::{HttpResponse, post, web};

use crate::api::error::ApiError;
use crate::model::VerdictRequest;
use crate::service::verdict::VerdictService;

/// Screen document metadata and context without touching the queue
#[utoipa::path(
    post,
    path = "/v1/screenings",
    request_body = VerdictRequest,
    responses(
        (status = 200, description = "Verdict produced (fallback verdict on AI failure)", body = crate::model::Verdict),
        (status = 400, description = "Missing field", body = crate::api::error::ErrorResponse)
    ),
    tag = "screening"
)]
#[post("/v1/screenings")]
pub async fn screen_document(
    service: web::Data<VerdictService>,
    body: web::Json<VerdictRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    request.validate()?;

    let verdict = service.evaluate(&request).await;
    Ok(HttpResponse::Ok().json(verdict))
}

/// Configure screening routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(screen_document);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};

    use super::*;
    use crate::model::{ScreeningConfig, Verdict, VerdictStatus};
    use crate::service::llm::testing::{Reply, StubGenerator};

    #[actix_web::test]
    async fn test_screening_returns_verdict() {
        let stub = Arc::new(StubGenerator::json(
            r#"{"status":"Approved","reason":"Dates consistent"}"#,
        ));
        let service = Arc::new(VerdictService::new(stub, &ScreeningConfig::default()));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(service))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/v1/screenings")
            .set_json(serde_json::json!({
                "doc_name": "license_scan_2024.pdf",
                "doc_type": "Mining License",
                "context": "Valid until 2025."
            }))
            .to_request();
        let verdict: Verdict = test::call_and_read_body_json(&app, req).await;
        assert_eq!(verdict.status, VerdictStatus::Approved);
        assert_eq!(verdict.reason, "Dates consistent");
    }

    #[actix_web::test]
    async fn test_screening_fails_closed() {
        let stub = Arc::new(StubGenerator::new(Reply::MissingCredential));
        let service = Arc::new(VerdictService::new(stub.clone(), &ScreeningConfig::default()));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(service))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/v1/screenings")
            .set_json(serde_json::json!({
                "doc_name": "bcl_bank_letter.pdf",
                "doc_type": "Proof of Funds",
                "context": "Account holder mismatch."
            }))
            .to_request();
        let verdict: Verdict = test::call_and_read_body_json(&app, req).await;
        assert!(verdict.is_fallback());

        let req = test::TestRequest::post()
            .uri("/v1/screenings")
            .set_json(serde_json::json!({
                "doc_name": "bcl_bank_letter.pdf",
                "doc_type": "Proof of Funds",
                "context": ""
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(stub.calls(), 1);
    }
}
