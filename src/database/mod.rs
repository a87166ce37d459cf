use crate::config::ServiceAccount;
use mongodb::{Client, Collection, Database};
use std::error::Error;

pub const USERS_COLLECTION: &str = "users";

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn connect(account: &ServiceAccount) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(&account.connection_uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));
        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(client_options)?;
        let db_name = account.database_name();
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;
        log::info!(
            "✅ MongoDB connected: database {} ({} credential)",
            db_name,
            account.account_type.as_deref().unwrap_or("unspecified")
        );

        let mongodb = Self { client, db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Login looks users up by mobile number. The index is not unique: duplicate
    /// registrations for one number are accepted.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::IndexModel;

        let users = self.collection::<mongodb::bson::Document>(USERS_COLLECTION);
        let mobile_index = IndexModel::builder()
            .keys(doc! { "mobile": 1 })
            .build();

        match users.create_index(mobile_index).await {
            Ok(_) => log::info!("   ✅ Index ready: users(mobile)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Closes pooled connections. Call once the HTTP server has stopped.
    pub async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        log::info!("🔌 MongoDB connection closed");
    }
}
