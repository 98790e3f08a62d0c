use async_trait::async_trait;
use tokio::sync::RwLock;

use super::TodoStore;
use crate::error::StoreError;
use crate::model::{Todo, TodoId, TodoInput};

/// In-process store. Records keep insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    todos: RwLock<Vec<Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn create(&self, input: TodoInput) -> Result<Todo, StoreError> {
        let todo = Todo {
            id: TodoId::new(),
            title: input.title,
            description: input.description,
        };
        self.todos.write().await.push(todo.clone());
        Ok(todo)
    }

    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(self.todos.read().await.clone())
    }

    async fn update(&self, id: TodoId, input: TodoInput) -> Result<Option<Todo>, StoreError> {
        let mut todos = self.todos.write().await;
        let Some(todo) = todos.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        todo.title = input.title;
        todo.description = input.description;
        Ok(Some(todo.clone()))
    }

    async fn delete(&self, id: TodoId) -> Result<(), StoreError> {
        self.todos.write().await.retain(|t| t.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, description: Option<&str>) -> TodoInput {
        TodoInput {
            title: title.to_string(),
            description: description.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn create_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.create(input("Same", Some("d"))).await.unwrap();
        let b = store.create(input("Same", Some("d"))).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = MemoryStore::new();
        let first = store.create(input("first", None)).await.unwrap();
        let second = store.create(input("second", None)).await.unwrap();
        let ids: Vec<_> = store.list().await.unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn update_replaces_both_fields() {
        let store = MemoryStore::new();
        let todo = store.create(input("old", Some("old desc"))).await.unwrap();
        let updated = store.update(todo.id, input("new", None)).await.unwrap().unwrap();
        assert_eq!(updated.id, todo.id);
        assert_eq!(updated.title, "new");
        assert!(updated.description.is_none());
    }

    #[tokio::test]
    async fn update_unknown_id_is_none() {
        let store = MemoryStore::new();
        store.create(input("keep", None)).await.unwrap();
        let result = store.update(TodoId::new(), input("x", None)).await.unwrap();
        assert!(result.is_none());
        assert_eq!(store.list().await.unwrap()[0].title, "keep");
    }

    #[tokio::test]
    async fn delete_unknown_id_is_ok() {
        let store = MemoryStore::new();
        let todo = store.create(input("a", None)).await.unwrap();
        store.delete(TodoId::new()).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
        store.delete(todo.id).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }
}
