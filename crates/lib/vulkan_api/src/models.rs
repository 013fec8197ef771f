//! Request and response bodies.
//!
//! Request bodies are lenient: every field is optional so that incomplete
//! payloads reach the handler and are answered with the backend's own 400
//! instead of an extractor rejection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `POST /login` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// `POST /login` success body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// `POST /domains/{id}/emails` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Megabytes, as a JSON number or numeric string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<Value>,
}

/// `PUT /domains/{id}/emails/{email_id}` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStorageRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<Value>,
}

/// `PATCH /domains/{id}/emails/{email_id}/password` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Plain confirmation body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body returned with every non-2xx status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
}

/// Coerce a storage value into a positive number of megabytes.
///
/// Returns `None` for missing, non-numeric, fractional, or non-positive values.
pub fn coerce_storage(value: &Value) -> Option<u64> {
    let mb = match value {
        Value::Number(n) => match n.as_u64() {
            Some(mb) => mb,
            None => whole_megabytes(n.as_f64()?)?,
        },
        Value::String(s) => {
            let trimmed = s.trim();
            match trimmed.parse::<u64>() {
                Ok(mb) => mb,
                Err(_) => whole_megabytes(trimmed.parse::<f64>().ok()?)?,
            }
        }
        _ => return None,
    };
    (mb > 0).then_some(mb)
}

fn whole_megabytes(n: f64) -> Option<u64> {
    (n.is_finite() && n.fract() == 0.0 && n > 0.0 && n <= u64::MAX as f64).then_some(n as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerce_storage_accepts_numbers_and_numeric_strings() {
        assert_eq!(coerce_storage(&json!(2048)), Some(2048));
        assert_eq!(coerce_storage(&json!(2048.0)), Some(2048));
        assert_eq!(coerce_storage(&json!("512")), Some(512));
        assert_eq!(coerce_storage(&json!(" 512 ")), Some(512));
    }

    #[test]
    fn coerce_storage_rejects_invalid_values() {
        for value in [
            json!(0),
            json!(-10),
            json!(1.5),
            json!("abc"),
            json!(""),
            json!(null),
            json!(true),
        ] {
            assert_eq!(coerce_storage(&value), None, "{value}");
        }
    }

    #[test]
    fn create_request_omits_missing_fields() {
        let body = CreateAccountRequest {
            email: Some("a@b.com".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({"email": "a@b.com"}));
    }
}
