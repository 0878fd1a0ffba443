use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::pagination::{Direction, Page, PageRequest};
use crate::store::{Entity, Store, StoreError};

struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T: Entity> Table<T> {
    /// Another row already holding `key`, ignoring the row `except`.
    fn key_taken(&self, key: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|row| Some(row.id()) != except && row.unique_key() == Some(key))
    }
}

/// In-process store keeping rows ordered by identifier behind an async lock.
///
/// Identifiers start at 1 and are never reused. Uniqueness checks and writes
/// happen under the same write guard.
pub struct MemoryStore<T> {
    table: RwLock<Table<T>>,
}

impl<T: Entity> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Store<T> for MemoryStore<T> {
    async fn find_all(&self, request: &PageRequest) -> Result<Page<T>, StoreError> {
        let field = request.sort.field.as_str();
        if !T::sortable_fields().contains(&field) {
            return Err(StoreError::UnknownSortField {
                kind: T::KIND,
                field: field.to_string(),
            });
        }

        let table = self.table.read().await;
        let mut rows: Vec<&T> = table.rows.values().collect();
        // Ties fall back to id so descending is the exact reverse of ascending.
        rows.sort_by(|a, b| {
            let ordering = a
                .compare_by(b, field)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id().cmp(&b.id()));
            match request.sort.direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            }
        });

        let total = rows.len() as u64;
        let content: Vec<T> = rows
            .into_iter()
            .skip(request.offset())
            .take(request.size as usize)
            .cloned()
            .collect();

        tracing::debug!(
            kind = T::KIND,
            page = request.page,
            size = request.size,
            sort = %request.sort,
            returned = content.len(),
            total,
            "page query"
        );

        Ok(Page::new(content, request, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<T>, StoreError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.table.read().await.rows.contains_key(&id))
    }

    async fn exists_by_unique_key(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.table.read().await.key_taken(key, None))
    }

    async fn insert(&self, entity: T) -> Result<T, StoreError> {
        let mut table = self.table.write().await;

        if let Some(key) = entity.unique_key() {
            if table.key_taken(key, None) {
                return Err(StoreError::UniqueViolation {
                    kind: T::KIND,
                    key: key.to_string(),
                });
            }
        }

        let id = table.next_id;
        table.next_id += 1;

        let stored = entity.with_id(id);
        table.rows.insert(id, stored.clone());
        tracing::debug!(kind = T::KIND, id, "row inserted");

        Ok(stored)
    }

    async fn update(&self, entity: T) -> Result<T, StoreError> {
        let mut table = self.table.write().await;
        let id = entity.id();

        if !table.rows.contains_key(&id) {
            return Err(StoreError::NotFound { kind: T::KIND, id });
        }

        if let Some(key) = entity.unique_key() {
            if table.key_taken(key, Some(id)) {
                return Err(StoreError::UniqueViolation {
                    kind: T::KIND,
                    key: key.to_string(),
                });
            }
        }

        table.rows.insert(id, entity.clone());
        tracing::debug!(kind = T::KIND, id, "row updated");

        Ok(entity)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        let mut table = self.table.write().await;

        match table.rows.remove(&id) {
            Some(_) => {
                tracing::debug!(kind = T::KIND, id, "row deleted");
                Ok(())
            }
            None => Err(StoreError::NotFound { kind: T::KIND, id }),
        }
    }
}
