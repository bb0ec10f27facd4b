use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub fn des_from_str<T: for<'a> Deserialize<'a>>(string: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(string)
}

pub fn ser_to_str<T: Serialize>(t: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(t)
}

pub fn extract_authorization(headers: &HashMap<String, String>) -> Option<&str> {
    headers.get("authorization").map(String::as_str)
}

/// Treats `None` and `""` alike, as the request validation does.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
