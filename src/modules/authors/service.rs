use std::sync::Arc;

use shelf_db::{Page, PageRequest, Store, StoreError};

use super::models::{Author, AuthorDraft};
use crate::modules::error::ServiceError;

pub const AUTHOR_NOT_FOUND: &str = "Author not found!";
pub const AUTHOR_ALREADY_EXISTS: &str = "Author already exists!";
pub const AUTHOR_DOES_NOT_EXIST: &str = "Author does not exist!";

/// Business rules for authors on top of the author store.
pub struct AuthorService {
    store: Arc<dyn Store<Author>>,
}

impl AuthorService {
    pub fn new(store: Arc<dyn Store<Author>>) -> Self {
        Self { store }
    }

    pub async fn find_all(&self, request: &PageRequest) -> Result<Page<Author>, ServiceError> {
        Ok(self.store.find_all(request).await?)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Author, ServiceError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(AUTHOR_NOT_FOUND))
    }

    pub async fn save(&self, draft: AuthorDraft) -> Result<Author, ServiceError> {
        if self.store.exists_by_unique_key(&draft.pseudonym).await? {
            return Err(ServiceError::AlreadyExists(AUTHOR_ALREADY_EXISTS));
        }

        self.store
            .insert(draft.into_author(0))
            .await
            .map_err(conflict_as_exists)
    }

    pub async fn update(&self, id: i64, draft: AuthorDraft) -> Result<Author, ServiceError> {
        if !self.store.exists_by_id(id).await? {
            return Err(ServiceError::NotFound(AUTHOR_DOES_NOT_EXIST));
        }

        self.store
            .update(draft.into_author(id))
            .await
            .map_err(conflict_as_exists)
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        match self.store.delete_by_id(id).await {
            Err(StoreError::NotFound { .. }) => Err(ServiceError::NotFound(AUTHOR_DOES_NOT_EXIST)),
            other => Ok(other?),
        }
    }
}

/// Writes can still lose a race on the pseudonym or the row itself.
fn conflict_as_exists(err: StoreError) -> ServiceError {
    match err {
        StoreError::UniqueViolation { .. } => ServiceError::AlreadyExists(AUTHOR_ALREADY_EXISTS),
        StoreError::NotFound { .. } => ServiceError::NotFound(AUTHOR_DOES_NOT_EXIST),
        other => ServiceError::Store(other),
    }
}
