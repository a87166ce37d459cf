use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Karigar Service API",
        version = "1.0.0",
        description = "Backend for the Karigar Saathi front-end.\n\n**Features:**\n- Registration and login by mobile number and PIN\n- Gemini text generation proxy\n- Health monitoring"
    ),
    paths(
        crate::api::auth::register,
        crate::api::auth::login,
        crate::api::chat::gemini_chat,
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::services::auth_service::RegisterRequest,
            crate::services::auth_service::RegisterResponse,
            crate::services::auth_service::LoginRequest,
            crate::services::auth_service::LoginResponse,
            crate::services::gemini_service::ChatRequest,
            crate::services::gemini_service::ChatResponse,
            crate::models::User,
            crate::utils::ErrorEnvelope,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "User registration and login. PINs are stored and compared as plain text."),
        (name = "Chat", description = "Prompt relay to the hosted Gemini model."),
        (name = "Health", description = "Service and database status."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes() {
        let doc = ApiDoc::openapi();
        for path in ["/register", "/login", "/gemini-chat", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
