// src/api/handlers/suggestions.rs

use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use log::{info, warn};
use crate::models::SuggestionInput;
use crate::suggest::{validate_request, SuggestionService, GENERIC_FAILURE_MESSAGE};
use crate::api::types::SuggestionResponse;

/// Suggest a password
///
/// Asks the configured language model for a password matching the requested
/// length, complexity and optional keywords, together with a strength rating.
#[utoipa::path(
    post,
    path = "/suggestions",
    tag = "Suggestions",
    request_body = SuggestionInput,
    responses(
        (status = 200, description = "Suggested password", body = SuggestionResponse),
        (status = 400, description = "Invalid request", body = SuggestionResponse),
        (status = 502, description = "Model call failed", body = SuggestionResponse)
    )
)]
pub async fn suggest_password(
    service: web::Data<Arc<SuggestionService>>,
    input: web::Json<SuggestionInput>,
) -> impl Responder {
    // Invalid requests never reach the model
    let request = match validate_request(&input) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected suggestion request: {}", e);
            return HttpResponse::BadRequest().json(SuggestionResponse::failed(Some(e.field()), e.to_string()));
        }
    };

    match service.suggest(&request).await {
        Ok(result) => {
            info!("Suggestion generated ({} characters requested)", request.length());
            HttpResponse::Ok().json(SuggestionResponse::ok(result))
        }
        Err(_) => {
            // Details are already logged by the service
            HttpResponse::BadGateway().json(SuggestionResponse::failed(None, GENERIC_FAILURE_MESSAGE))
        }
    }
}

/// JSON body errors answered in the same shape as every other failure
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    warn!("Malformed suggestion request body: {}", err);
    let response = HttpResponse::BadRequest()
        .json(SuggestionResponse::failed(None, format!("Invalid request body: {}", err)));
    actix_web::error::InternalError::from_response(err, response).into()
}
