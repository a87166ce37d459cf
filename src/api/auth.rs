use actix_web::{web, HttpResponse};
use crate::api::body::JsonBody;
use crate::models::field_label;
use crate::services::auth_service::{self, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::state::AppState;
use crate::utils::{AppError, ErrorEnvelope};

#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 500, description = "Registration failed", body = ErrorEnvelope)
    )
)]
pub async fn register(
    state: web::Data<AppState>,
    request: JsonBody<RegisterRequest>,
) -> HttpResponse {
    let mobile = field_label(request.mobile.as_ref());
    log::info!("📝 POST /register - mobile: {}", mobile);

    match auth_service::register(state.users.as_ref(), &request).await {
        Ok(()) => {
            log::info!("✅ Registration successful: {}", mobile);
            HttpResponse::Created().json(RegisterResponse {
                status: "success".to_string(),
                message: "User registered successfully!".to_string(),
            })
        }
        Err(e) => {
            log::error!("❌ Registration failed: {} - {}", mobile, e);
            HttpResponse::InternalServerError().json(ErrorEnvelope::failed(
                "Registration failed.",
                e.message(),
                state.expose_error_details,
            ))
        }
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "PIN does not match", body = ErrorEnvelope),
        (status = 404, description = "No user with this mobile number", body = ErrorEnvelope),
        (status = 500, description = "Login failed", body = ErrorEnvelope)
    )
)]
pub async fn login(
    state: web::Data<AppState>,
    request: JsonBody<LoginRequest>,
) -> HttpResponse {
    let mobile = field_label(request.mobile.as_ref());
    log::info!("🔐 POST /login - mobile: {}", mobile);

    match auth_service::login(state.users.as_ref(), &request).await {
        Ok(user) => {
            log::info!("✅ Login successful: {}", mobile);
            HttpResponse::Ok().json(LoginResponse {
                status: "success".to_string(),
                message: "Login successful!".to_string(),
                user,
            })
        }
        Err(AppError::NotFound(_)) => {
            log::warn!("❌ Login failed: {} - user not found", mobile);
            HttpResponse::NotFound().json(ErrorEnvelope::rejected("User not found."))
        }
        Err(AppError::InvalidCredentials) => {
            log::warn!("❌ Login failed: {} - invalid credentials", mobile);
            HttpResponse::Unauthorized().json(ErrorEnvelope::rejected("Invalid credentials."))
        }
        Err(e) => {
            log::error!("❌ Login failed: {} - {}", mobile, e);
            HttpResponse::InternalServerError().json(ErrorEnvelope::failed(
                "Login failed.",
                e.message(),
                state.expose_error_details,
            ))
        }
    }
}
