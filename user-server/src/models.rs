//! API models
//!
//! Request and response bodies for the user endpoints. Request schemas keep
//! every field optional so presence can be checked explicitly in
//! [`crate::validation`] before the store is touched.

use serde::{Deserialize, Serialize};

// ============================================================================
// User Models
// ============================================================================

/// A stored user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier, never reused
    pub id: u64,

    /// Display name
    pub name: String,

    /// Contact email (not required to be unique)
    pub email: String,
}

/// Create user request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

/// Update user request; any subset of fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

/// Validated input for a new user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Validated partial update. At least one field is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

// ============================================================================
// Response Models
// ============================================================================

/// Message body used for every failure response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Crate version
    pub version: String,

    /// Timestamp (RFC 3339)
    pub timestamp: String,

    /// Number of stored users
    pub user_count: usize,
}
