use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    #[serde(deserialize_with = "id_from_value")]
    pub id: String,
}

/// Body of the identity service's current-user endpoint.
#[derive(Deserialize, Debug)]
pub struct CurrentUserResponse {
    #[serde(default)]
    pub user: Option<AuthenticatedUser>,
}

// The identity service hands out either string or integer ids.
fn id_from_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) if !id.is_empty() => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(de::Error::custom(format!("unsupported user id: {other}"))),
    }
}
