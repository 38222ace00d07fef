//! Domain Layer - Core Entity Trait
//!
//! Every persisted record has a store-assigned id and a creation timestamp.

use serde::{Deserialize, Serialize};

/// Core trait for persisted domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync;

    /// Returns the entity's unique identifier (0 until the store assigns one)
    fn id(&self) -> Self::Id;

    /// RFC 3339 creation timestamp, used for ordering
    fn created_at(&self) -> &str;
}

/// Current UTC time as a fixed-width RFC 3339 string.
///
/// Fixed width keeps lexical order equal to chronological order.
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomainError {
    NotFound(String),
    /// A precondition on the input was violated (quantity below 1, bad slot, ...)
    InvalidInput(String),
    /// The intent is not accepted by the current screen
    Conflict(String),
    Internal(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

