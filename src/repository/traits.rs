//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.

use async_trait::async_trait;
use crate::domain::{Entity, DomainResult, RecordId};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type. The store generates the identifier on
/// create; updates only touch the fields of the entity's patch type.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity from its draft
    async fn create(&self, draft: &T::Draft) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// Apply a patch and return the stored entity; `NotFound` if absent
    async fn update(&self, id: T::Id, patch: &T::Patch) -> DomainResult<T>;

    /// Delete entity by ID; `NotFound` if absent
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}

/// Repositories whose entities are owned by a parent record
#[async_trait]
pub trait ChildRepository<T: Entity>: Repository<T> {
    /// All entities referencing `parent_id`, in insertion order
    async fn list_by_parent(&self, parent_id: RecordId) -> DomainResult<Vec<T>>;
}
