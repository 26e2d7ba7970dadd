//! User Directory Server Library
//!
//! In-memory CRUD REST API for user records (`id`, `name`, `email`).

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod router;
pub mod store;
pub mod validation;

pub use config::{Config, ConfigError, LoggingConfig, ServerConfig};
pub use error::ApiError;
pub use handlers::AppState;
pub use models::{CreateUserRequest, NewUser, UpdateUserRequest, User, UserPatch};
pub use router::create_router;
pub use store::{StoreError, UserStore, INITIAL_NEXT_ID};
