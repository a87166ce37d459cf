use crate::config::Config;
use crate::database::MongoDB;
use crate::services::gemini_service::{GeminiClient, TextGenerator};
use crate::services::user_store::UserStore;
use std::error::Error;
use std::sync::Arc;

/// Shared by every worker through `web::Data`.
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub generator: Arc<dyn TextGenerator>,
    pub expose_error_details: bool,
}

/// External clients, built once per process before the server starts.
pub struct Clients {
    db: MongoDB,
    gemini: Arc<GeminiClient>,
}

impl Clients {
    pub async fn init(config: &Config) -> Result<Self, Box<dyn Error>> {
        let db = MongoDB::connect(&config.service_account).await?;
        let gemini = Arc::new(GeminiClient::new(config));
        log::info!("🤖 Gemini model: {}", config.gemini_model);

        Ok(Self { db, gemini })
    }

    pub fn app_state(&self, expose_error_details: bool) -> AppState {
        AppState {
            users: Arc::new(self.db.clone()),
            generator: self.gemini.clone(),
            expose_error_details,
        }
    }

    pub async fn close(self) {
        self.db.shutdown().await;
    }
}
