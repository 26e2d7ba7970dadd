//! Input validation for user payloads
//!
//! Only field presence is checked. Values are stored verbatim.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::{CreateUserRequest, NewUser, UpdateUserRequest, UserPatch};

/// Maximum request body size (1MB)
pub const MAX_BODY_SIZE: usize = 1024 * 1024;

pub const MISSING_FIELDS: &str = "Missing 'name' or 'email' in request body";

pub const NO_UPDATE_FIELDS: &str = "No fields provided for update";

/// Request bodies must be JSON objects
pub type JsonObject = serde_json::Map<String, Value>;

/// Map a JSON object onto a typed request schema
pub fn parse_object<T: DeserializeOwned>(body: JsonObject) -> Result<T, ApiError> {
    serde_json::from_value(Value::Object(body)).map_err(|e| {
        tracing::warn!(error = %e, "Request body has mistyped fields");
        ApiError::Validation(format!("Invalid request body: {}", e))
    })
}

/// Validate a create payload: `name` and `email` are both required
pub fn validate_create(req: CreateUserRequest) -> Result<NewUser, ApiError> {
    match (req.name, req.email) {
        (Some(name), Some(email)) => Ok(NewUser { name, email }),
        (name, email) => {
            tracing::warn!(
                has_name = name.is_some(),
                has_email = email.is_some(),
                "Create payload missing fields"
            );
            Err(ApiError::Validation(MISSING_FIELDS.to_string()))
        },
    }
}

/// Validate an update payload: at least one updatable field
pub fn validate_update(req: UpdateUserRequest) -> Result<UserPatch, ApiError> {
    let patch = UserPatch {
        name: req.name,
        email: req.email,
    };

    if patch.is_empty() {
        tracing::warn!("Update payload has no updatable fields");
        return Err(ApiError::Validation(NO_UPDATE_FIELDS.to_string()));
    }

    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: Option<&str>, email: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            name: name.map(String::from),
            email: email.map(String::from),
        }
    }

    #[test]
    fn test_validate_create() {
        let user = validate_create(create(Some("Carol"), Some("carol@example.com"))).unwrap();
        assert_eq!(user.name, "Carol");
        assert_eq!(user.email, "carol@example.com");

        assert!(validate_create(create(None, Some("carol@example.com"))).is_err());
        assert!(validate_create(create(Some("Carol"), None)).is_err());
        assert!(validate_create(create(None, None)).is_err());
    }

    #[test]
    fn test_validate_create_keeps_values_verbatim() {
        let user = validate_create(create(Some(""), Some("  not-an-email "))).unwrap();
        assert_eq!(user.name, "");
        assert_eq!(user.email, "  not-an-email ");
    }

    #[test]
    fn test_validate_update() {
        let patch = validate_update(UpdateUserRequest {
            name: None,
            email: Some("c@new.com".to_string()),
        })
        .unwrap();
        assert_eq!(patch.name, None);
        assert_eq!(patch.email.as_deref(), Some("c@new.com"));

        let err = validate_update(UpdateUserRequest::default()).unwrap_err();
        assert_eq!(err.to_string(), NO_UPDATE_FIELDS);
    }

    #[test]
    fn test_parse_object() {
        let body = serde_json::json!({"name": "Carol", "email": "carol@example.com"});
        let req: CreateUserRequest = parse_object(body.as_object().unwrap().clone()).unwrap();
        assert_eq!(req.name.as_deref(), Some("Carol"));

        let body = serde_json::json!({"name": 5, "email": "carol@example.com"});
        let err = parse_object::<CreateUserRequest>(body.as_object().unwrap().clone()).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_null_and_unknown_fields_count_as_absent() {
        let req: UpdateUserRequest =
            serde_json::from_str(r#"{"name": null, "nickname": "x"}"#).unwrap();
        assert!(validate_update(req).is_err());

        let req: CreateUserRequest = serde_json::from_str(r#"{"name": "Dan"}"#).unwrap();
        let err = validate_create(req).unwrap_err();
        assert_eq!(err.to_string(), MISSING_FIELDS);
    }
}
