use actix_web::{error::InternalError, web, HttpRequest, HttpResponse};
use crate::state::AppState;
use crate::utils::ErrorEnvelope;

/// Builds an in-process service with the API routes behind the CORS layer.
#[cfg(test)]
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .wrap(crate::middleware::cors::build(crate::api::testing::ORIGIN))
                .configure(crate::api::configure),
        )
        .await
    };
}

pub mod auth;
pub mod body;
pub mod chat;
pub mod health;
pub mod swagger;

// Same default as express.json()
const JSON_LIMIT: usize = 100 * 1024;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health_check))
        .route("/register", web::post().to(auth::register))
        .route("/login", web::post().to(auth::login))
        .route("/gemini-chat", web::post().to(chat::gemini_chat));
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, req: &HttpRequest| {
            let expose = req
                .app_data::<web::Data<AppState>>()
                .map(|state| state.expose_error_details)
                .unwrap_or(false);
            let cause = err.to_string();
            log::warn!("⚠️  Rejected body on {}: {}", req.path(), cause);

            let response = HttpResponse::BadRequest().json(ErrorEnvelope::failed(
                "Invalid request body.",
                &cause,
                expose,
            ));
            InternalError::from_response(err, response).into()
        })
}
