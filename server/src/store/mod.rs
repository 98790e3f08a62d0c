//! Storage seam for todo records.
//!
//! Handlers only see `TodoStore`. `MongoStore` is the production backend;
//! `MemoryStore` keeps records in process and backs the tests.

mod memory;
mod mongo;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{Todo, TodoId, TodoInput};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Persist a new record and return it with its assigned id.
    async fn create(&self, input: TodoInput) -> Result<Todo, StoreError>;

    /// Every record, in the backend's natural order.
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;

    /// Replace title and description of `id`. `None` when no record matches.
    async fn update(&self, id: TodoId, input: TodoInput) -> Result<Option<Todo>, StoreError>;

    /// Remove `id`. Succeeds whether or not the record existed.
    async fn delete(&self, id: TodoId) -> Result<(), StoreError>;
}
