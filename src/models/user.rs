use chrono::{DateTime, Utc};
use mongodb::bson::DateTime as BsonDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fields written by registration. Values are stored as sent, whatever their
/// JSON type; absent fields are not stored at all.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct NewUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Value>,
}

/// A stored user as echoed back to callers. The PIN is included on purpose.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Value>,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Raw shape of a document in the `users` collection. `_id` is not read.
#[derive(Debug, Deserialize, Clone)]
pub struct UserDocument {
    pub name: Option<Value>,
    pub mobile: Option<Value>,
    pub city: Option<Value>,
    pub pin: Option<Value>,
    pub role: Option<Value>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<BsonDateTime>,
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            name: doc.name,
            mobile: doc.mobile,
            city: doc.city,
            pin: doc.pin,
            role: doc.role,
            created_at: doc
                .created_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp_millis(ts.timestamp_millis())),
        }
    }
}

/// Loggable form of a request field: strings without quotes, other JSON
/// values as written, `N/A` when absent.
pub fn field_label(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "N/A".to_string(),
    }
}
