use std::cmp::Ordering;

use async_trait::async_trait;
use thiserror::Error;

use crate::pagination::{Page, PageRequest};

/// A persisted record with a server-assigned identifier.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Table-like name used in logs and errors.
    const KIND: &'static str;

    fn id(&self) -> i64;

    /// Returns the record carrying `id` in place of its current identifier.
    fn with_id(self, id: i64) -> Self;

    /// Unique business key, if the entity has one.
    fn unique_key(&self) -> Option<&str> {
        None
    }

    /// Names accepted by [`Entity::compare_by`].
    fn sortable_fields() -> &'static [&'static str];

    /// Ascending order of two records on `field`; `None` for an unknown field.
    fn compare_by(&self, other: &Self, field: &str) -> Option<Ordering>;
}

/// Errors reported by a [`Store`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} with id {id} does not exist")]
    NotFound { kind: &'static str, id: i64 },

    #[error("{kind} with key '{key}' already exists")]
    UniqueViolation { kind: &'static str, key: String },

    #[error("cannot sort {kind} by unknown property '{field}'")]
    UnknownSortField { kind: &'static str, field: String },
}

/// Entity storage with paginated query support.
#[async_trait]
pub trait Store<T: Entity>: Send + Sync {
    /// Page of records ordered by `request.sort`.
    async fn find_all(&self, request: &PageRequest) -> Result<Page<T>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<T>, StoreError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError>;

    async fn exists_by_unique_key(&self, key: &str) -> Result<bool, StoreError>;

    /// Stores a new record and returns it with its assigned identifier.
    async fn insert(&self, entity: T) -> Result<T, StoreError>;

    /// Replaces the record sharing `entity.id()`.
    async fn update(&self, entity: T) -> Result<T, StoreError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;
}
