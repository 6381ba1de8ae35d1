use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::domain::{Item, NewItem};
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Result of an append: the stored item and the position it was given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Created {
    pub position: usize,
    pub item: Item,
}

/// Trait abstraction for item storage: append-only, position addressed.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Append an item and return it with its position, both taken under the same write.
    async fn create(&self, input: NewItem) -> Result<Created, ServiceError>;
    /// Contiguous slice of items in insertion order.
    async fn list(&self, page: Pagination) -> Vec<Item>;
    /// Item at a zero-based position.
    async fn get(&self, position: i64) -> Result<Item, ServiceError>;
    async fn len(&self) -> usize;
}

/// Process-memory store. Appends hold the write lock, so positions follow
/// the order in which appends acquire it.
#[derive(Default)]
pub struct MemoryItemStore {
    inner: RwLock<Vec<Item>>,
}

impl MemoryItemStore {
    /// Empty store, shared behind an `Arc`.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn create(&self, input: NewItem) -> Item {
        self.append(input).await.item
    }

    /// Append and report the assigned position.
    pub async fn append(&self, input: NewItem) -> Created {
        let item = Item::from(input);
        let mut items = self.inner.write().await;
        let position = items.len();
        items.push(item.clone());
        debug!(position, "item appended");
        Created { position, item }
    }

    pub async fn list(&self, page: Pagination) -> Vec<Item> {
        let items = self.inner.read().await;
        items[page.range(items.len())].to_vec()
    }

    pub async fn get(&self, position: i64) -> Option<Item> {
        let items = self.inner.read().await;
        usize::try_from(position).ok().and_then(|i| items.get(i)).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn create(&self, input: NewItem) -> Result<Created, ServiceError> { Ok(self.append(input).await) }
    async fn list(&self, page: Pagination) -> Vec<Item> { self.list(page).await }
    async fn get(&self, position: i64) -> Result<Item, ServiceError> {
        self.get(position).await.ok_or_else(|| ServiceError::item_not_found(position))
    }
    async fn len(&self) -> usize { self.len().await }
}
