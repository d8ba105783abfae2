// src/api/handlers/system.rs
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use crate::suggest::SuggestionService;
use crate::api::types::StatusResponse;

/// Get service status
#[utoipa::path(
    get,
    path = "/system/status",
    tag = "System",
    responses(
        (status = 200, description = "Current service status", body = StatusResponse)
    )
)]
pub async fn get_status(
    service: web::Data<Arc<SuggestionService>>,
) -> impl Responder {
    HttpResponse::Ok().json(StatusResponse {
        success: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: service.model(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::Value;
    use crate::suggest::provider::MockProvider;

    #[actix_web::test]
    async fn reports_version_and_model() {
        let mut mock = MockProvider::new();
        mock.expect_model().return_const("llama3".to_string());
        let service = Arc::new(SuggestionService::new(Arc::new(mock)).unwrap());

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(service))
                .route("/system/status", web::get().to(get_status)),
        )
        .await;
        let req = test::TestRequest::get().uri("/system/status").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["model"], "llama3");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
