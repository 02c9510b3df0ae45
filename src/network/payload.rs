//! Response body shapes
//!
//! The backend is inconsistent about wrapping: lists come bare or under a
//! key, created reviews come bare or under `review`, and profile updates
//! come bare or as `{ user, token }`. These helpers accept every variant.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::models::{Movie, ProfileUpdated, Review, User};

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(format!("{}: {}", what, e)))
}

/// Take `value[key]` when it exists, else the value itself
fn unwrap_key(value: Value, key: &str) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key(key) => map.remove(key).unwrap_or(Value::Null),
        other => other,
    }
}

pub fn movies(value: Value) -> Result<Vec<Movie>> {
    match unwrap_key(value, "movies") {
        list @ Value::Array(_) => decode(list, "movie list"),
        _ => Err(ApiError::Decode("Invalid movies data format".to_string())),
    }
}

pub fn movie(value: Value) -> Result<Movie> {
    decode(unwrap_key(value, "movie"), "movie")
}

pub fn reviews(value: Value) -> Result<Vec<Review>> {
    match unwrap_key(value, "reviews") {
        list @ Value::Array(_) => decode(list, "review list"),
        _ => Err(ApiError::Decode("Invalid reviews data format".to_string())),
    }
}

pub fn review(value: Value) -> Result<Review> {
    decode(unwrap_key(value, "review"), "review")
}

pub fn profile_updated(value: Value) -> Result<ProfileUpdated> {
    let token = value
        .get("token")
        .and_then(|t| t.as_str())
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    let user: User = decode(unwrap_key(value, "user"), "profile")?;
    Ok(ProfileUpdated { user, token })
}
