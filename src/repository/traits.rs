//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! The workflow and aggregation engine only ever see these traits; the
//! SQLite implementations are injected at startup.

use async_trait::async_trait;
use crate::domain::{Entity, DomainResult};

/// Append-only store of one entity kind
///
/// Records are written once and never mutated through this trait.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Store a new entity. The returned copy carries the assigned id, which
    /// is strictly greater than every id handed out before.
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// All entities, oldest first
    async fn list(&self) -> DomainResult<Vec<T>>;
}

/// Extension for entities carrying a completion flag
#[async_trait]
pub trait CompletableRepository<T: Entity>: Repository<T> {
    /// Overwrite only the completion flag. Unknown ids are ignored.
    async fn set_completed(&self, id: T::Id, completed: bool) -> DomainResult<()>;
}
