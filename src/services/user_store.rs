use crate::database::{MongoDB, USERS_COLLECTION};
use crate::models::{NewUser, User, UserDocument};
use crate::utils::AppError;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use serde_json::Value;

/// Persistence used by the auth handlers.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Stores a new user; the store assigns the identifier and `createdAt`.
    async fn create_user(&self, user: &NewUser) -> Result<(), AppError>;

    /// All users whose `mobile` equals this value (type included), in
    /// insertion order.
    async fn find_by_mobile(&self, mobile: &Value) -> Result<Vec<User>, AppError>;

    /// Cheap round trip used by the health endpoint.
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl UserStore for MongoDB {
    async fn create_user(&self, user: &NewUser) -> Result<(), AppError> {
        let collection = self.collection::<Document>(USERS_COLLECTION);

        let fields = mongodb::bson::to_document(user)
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        // `$currentDate` lets the database stamp createdAt; `$set` rejects an empty document
        let mut update = doc! { "$currentDate": { "createdAt": true } };
        if !fields.is_empty() {
            update.insert("$set", fields);
        }

        collection
            .update_one(doc! { "_id": ObjectId::new() }, update)
            .upsert(true)
            .await?;

        Ok(())
    }

    async fn find_by_mobile(&self, mobile: &Value) -> Result<Vec<User>, AppError> {
        let collection = self.collection::<UserDocument>(USERS_COLLECTION);
        let mobile = mongodb::bson::to_bson(mobile)
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let cursor = collection
            .find(doc! { "mobile": mobile })
            .sort(doc! { "_id": 1 })
            .await?;

        let documents: Vec<UserDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(User::from).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.database().list_collection_names().await?;
        Ok(())
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    /// Vec-backed store; enumeration order is insertion order.
    #[derive(Default)]
    pub struct InMemoryUserStore {
        users: Mutex<Vec<User>>,
    }

    impl InMemoryUserStore {
        pub fn all(&self) -> Vec<User> {
            self.users.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UserStore for InMemoryUserStore {
        async fn create_user(&self, user: &NewUser) -> Result<(), AppError> {
            let user = user.clone();
            self.users.lock().unwrap().push(User {
                name: user.name,
                mobile: user.mobile,
                city: user.city,
                pin: user.pin,
                role: user.role,
                created_at: Some(Utc::now()),
            });
            Ok(())
        }

        async fn find_by_mobile(&self, mobile: &Value) -> Result<Vec<User>, AppError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .filter(|u| u.mobile.as_ref() == Some(mobile))
                .cloned()
                .collect())
        }
    }

    /// Store whose every call fails, as an unreachable database would.
    pub struct FailingUserStore;

    #[async_trait]
    impl UserStore for FailingUserStore {
        async fn create_user(&self, _user: &NewUser) -> Result<(), AppError> {
            Err(AppError::DatabaseError("connection refused".to_string()))
        }

        async fn find_by_mobile(&self, _mobile: &Value) -> Result<Vec<User>, AppError> {
            Err(AppError::DatabaseError("connection refused".to_string()))
        }

        async fn ping(&self) -> Result<(), AppError> {
            Err(AppError::DatabaseError("connection refused".to_string()))
        }
    }
}
