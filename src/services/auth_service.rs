use crate::models::{field_label, NewUser, User};
use crate::services::user_store::UserStore;
use crate::utils::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Request/Response structures. Field values are not type-checked: a numeric
// PIN is stored and compared as a number.
#[derive(Debug, Deserialize, Default, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub name: Option<Value>,
    pub mobile: Option<Value>,
    pub city: Option<Value>,
    pub pin: Option<Value>,
    pub role: Option<Value>,
}

#[derive(Debug, Deserialize, Default, utoipa::ToSchema)]
pub struct LoginRequest {
    pub mobile: Option<Value>,
    pub pin: Option<Value>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub status: String,
    pub message: String,
    pub user: User,
}

impl From<&RegisterRequest> for NewUser {
    fn from(request: &RegisterRequest) -> Self {
        NewUser {
            name: request.name.clone(),
            mobile: request.mobile.clone(),
            city: request.city.clone(),
            // Stored as given; hashing is not done here
            pin: request.pin.clone(),
            role: request.role.clone(),
        }
    }
}

// User registration
pub async fn register(users: &dyn UserStore, request: &RegisterRequest) -> Result<(), AppError> {
    users.create_user(&NewUser::from(request)).await
}

// User login
pub async fn login(users: &dyn UserStore, request: &LoginRequest) -> Result<User, AppError> {
    let mobile = request.mobile.as_ref().ok_or_else(|| {
        AppError::InvalidRequest("Cannot query users by an undefined mobile number".to_string())
    })?;

    // Duplicate mobiles are possible; the most recently registered one wins
    let user = users
        .find_by_mobile(mobile)
        .await?
        .into_iter()
        .last()
        .ok_or_else(|| AppError::NotFound(format!("No user with mobile {}", field_label(Some(mobile)))))?;

    // Strict equality: the number 1234 does not match the string "1234"
    if user.pin != request.pin {
        return Err(AppError::InvalidCredentials);
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::user_store::testing::{FailingUserStore, InMemoryUserStore};
    use serde_json::json;

    fn registration(mobile: &str, pin: &str) -> RegisterRequest {
        RegisterRequest {
            name: Some(json!("Sunita")),
            mobile: Some(json!(mobile)),
            city: Some(json!("Bhopal")),
            pin: Some(json!(pin)),
            role: Some(json!("artisan")),
        }
    }

    fn credentials(mobile: &str, pin: &str) -> LoginRequest {
        LoginRequest {
            mobile: Some(json!(mobile)),
            pin: Some(json!(pin)),
        }
    }

    #[tokio::test]
    async fn test_register_stores_fields_and_timestamp() {
        let store = InMemoryUserStore::default();
        register(&store, &registration("9000000001", "1234")).await.unwrap();

        let users = store.all();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, Some(json!("Sunita")));
        assert_eq!(users[0].mobile, Some(json!("9000000001")));
        assert_eq!(users[0].city, Some(json!("Bhopal")));
        assert_eq!(users[0].pin, Some(json!("1234")));
        assert_eq!(users[0].role, Some(json!("artisan")));
        assert!(users[0].created_at.is_some());
    }

    #[tokio::test]
    async fn test_register_with_missing_fields() {
        let store = InMemoryUserStore::default();
        let request = RegisterRequest {
            mobile: Some(json!("9000000002")),
            ..Default::default()
        };
        register(&store, &request).await.unwrap();

        let users = store.all();
        assert!(users[0].name.is_none());
        assert!(users[0].pin.is_none());
    }

    #[tokio::test]
    async fn test_login_unknown_mobile() {
        let store = InMemoryUserStore::default();
        register(&store, &registration("9000000001", "1234")).await.unwrap();

        for pin in ["1234", "0000"] {
            let result = login(&store, &credentials("9999999999", pin)).await;
            assert!(matches!(result, Err(AppError::NotFound(_))));
        }
    }

    #[tokio::test]
    async fn test_login_wrong_pin() {
        let store = InMemoryUserStore::default();
        register(&store, &registration("9000000001", "1234")).await.unwrap();

        let result = login(&store, &credentials("9000000001", "4321")).await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_returns_full_user() {
        let store = InMemoryUserStore::default();
        register(&store, &registration("9000000001", "1234")).await.unwrap();

        let user = login(&store, &credentials("9000000001", "1234")).await.unwrap();
        assert_eq!(user.role, Some(json!("artisan")));
        assert_eq!(user.pin, Some(json!("1234")));
        assert!(user.created_at.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_mobile_last_registration_wins() {
        let store = InMemoryUserStore::default();
        register(&store, &registration("9000000001", "1111")).await.unwrap();
        register(&store, &registration("9000000001", "2222")).await.unwrap();

        for _ in 0..3 {
            assert!(login(&store, &credentials("9000000001", "2222")).await.is_ok());
            let older = login(&store, &credentials("9000000001", "1111")).await;
            assert!(matches!(older, Err(AppError::InvalidCredentials)));
        }
    }

    #[tokio::test]
    async fn test_login_without_mobile_is_query_error() {
        let store = InMemoryUserStore::default();
        let request = LoginRequest {
            mobile: None,
            pin: Some(json!("1234")),
        };

        let result = login(&store, &request).await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_numeric_pin_is_stored_and_compared_strictly() {
        let store = InMemoryUserStore::default();
        let request = RegisterRequest {
            mobile: Some(json!("9000000004")),
            pin: Some(json!(1234)),
            ..Default::default()
        };
        register(&store, &request).await.unwrap();
        assert_eq!(store.all()[0].pin, Some(json!(1234)));

        let as_number = LoginRequest {
            mobile: Some(json!("9000000004")),
            pin: Some(json!(1234)),
        };
        assert!(login(&store, &as_number).await.is_ok());

        let as_string = credentials("9000000004", "1234");
        assert!(matches!(login(&store, &as_string).await, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_numeric_mobile_lookup_uses_value_as_given() {
        let store = InMemoryUserStore::default();
        let request = RegisterRequest {
            mobile: Some(json!(9000000005_u64)),
            pin: Some(json!("1234")),
            ..Default::default()
        };
        register(&store, &request).await.unwrap();

        let by_number = LoginRequest {
            mobile: Some(json!(9000000005_u64)),
            pin: Some(json!("1234")),
        };
        assert!(login(&store, &by_number).await.is_ok());

        let by_string = credentials("9000000005", "1234");
        assert!(matches!(login(&store, &by_string).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let result = register(&FailingUserStore, &registration("9000000001", "1234")).await;
        assert!(matches!(result, Err(AppError::DatabaseError(_))));

        let result = login(&FailingUserStore, &credentials("9000000001", "1234")).await;
        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }
}
