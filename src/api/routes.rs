// src/api/routes.rs
use actix_web::web;
use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Password suggestions
    cfg.service(
        web::scope("/suggestions")
            .app_data(web::JsonConfig::default().error_handler(handlers::suggestions::json_error_handler))
            .route("", web::post().to(handlers::suggestions::suggest_password))
    );

    // Service status
    cfg.service(
        web::scope("/system")
            .route("/status", web::get().to(handlers::system::get_status))
    );
}
