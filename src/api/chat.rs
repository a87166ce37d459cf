use actix_web::{web, HttpResponse};
use crate::api::body::JsonBody;
use crate::services::gemini_service::{self, ChatRequest, ChatResponse};
use crate::state::AppState;
use crate::utils::ErrorEnvelope;

#[utoipa::path(
    post,
    path = "/gemini-chat",
    tag = "Chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Generated text", body = ChatResponse),
        (status = 500, description = "Model call failed", body = ErrorEnvelope)
    )
)]
pub async fn gemini_chat(
    state: web::Data<AppState>,
    request: JsonBody<ChatRequest>,
) -> HttpResponse {
    log::info!("💬 POST /gemini-chat");

    match gemini_service::chat(state.generator.as_ref(), &request).await {
        Ok(text) => {
            log::info!("✅ Chat completed ({} chars)", text.len());
            HttpResponse::Ok().json(ChatResponse {
                status: "success".to_string(),
                text,
            })
        }
        Err(e) => {
            log::error!("❌ Gemini call failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorEnvelope::failed(
                "Gemini API call failed.",
                e.message(),
                state.expose_error_details,
            ))
        }
    }
}
