// src/api/mod.rs
use actix_web::{web, App, HttpServer};
use actix_cors::Cors;
use std::sync::Arc;
use crate::suggest::SuggestionService;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use utoipa_redoc::{Redoc, Servable};

// This will hold our API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::suggestions::suggest_password,
        crate::api::handlers::system::get_status
    ),
    components(
        schemas(
            crate::models::SuggestionInput,
            crate::models::SuggestionResult,
            crate::models::Complexity,
            crate::api::types::SuggestionResponse,
            crate::api::types::StatusResponse,
            crate::presentation::StrengthIndicator,
            crate::presentation::StrengthLevel
        )
    ),
    tags(
        (name = "Suggestions", description = "AI password suggestion endpoints"),
        (name = "System", description = "Service status")
    ),
    info(
        title = "Aegis Pass API",
        version = "0.1.0",
        description = "Generate secure and memorable passwords with AI",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

pub async fn start_server(service: Arc<SuggestionService>, address: &str, port: u16) -> std::io::Result<()> {
    log::info!("Starting Aegis Pass API server on {}:{}", address, port);

    let service_data = web::Data::new(service);

    HttpServer::new(move || {
        // Configure CORS
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![
                "Content-Type",
                "Accept",
                "X-Requested-With",
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(service_data.clone())
            // Add Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi())
            )
            // Add Redoc
            .service(Redoc::with_url("/redoc", ApiDoc::openapi()))
            .configure(routes::configure_routes)
    })
    .bind((address, port))?
    .run()
    .await
}

pub mod types;
pub mod routes;
pub mod handlers;
