use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::{FindOneAndReplaceOptions, ReturnDocument};
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};

use super::TodoStore;
use crate::error::StoreError;
use crate::model::{Todo, TodoId, TodoInput};

const COLLECTION_NAME: &str = "todos";

/// Document layout inside the `todos` collection.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct TodoDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl From<TodoInput> for TodoDocument {
    fn from(input: TodoInput) -> Self {
        Self {
            id: None,
            title: input.title,
            description: input.description,
        }
    }
}

impl TodoDocument {
    fn into_todo(self) -> Option<Todo> {
        Some(Todo {
            id: self.id?.into(),
            title: self.title,
            description: self.description,
        })
    }
}

#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
    collection: Collection<TodoDocument>,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let database = client.database(database);
        let collection = database.collection(COLLECTION_NAME);
        Ok(Self {
            database,
            collection,
        })
    }

    /// Round-trip to the server. The driver connects lazily, so this is the
    /// first point a bad URI or unreachable host shows up.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}

#[async_trait]
impl TodoStore for MongoStore {
    async fn create(&self, input: TodoInput) -> Result<Todo, StoreError> {
        let mut document = TodoDocument::from(input);
        let result = self.collection.insert_one(&document, None).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Backend("inserted _id is not an ObjectId".to_string()))?;
        document.id = Some(id);
        document
            .into_todo()
            .ok_or_else(|| StoreError::Backend("inserted document has no _id".to_string()))
    }

    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let cursor = self.collection.find(None, None).await?;
        let documents: Vec<TodoDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().filter_map(TodoDocument::into_todo).collect())
    }

    async fn update(&self, id: TodoId, input: TodoInput) -> Result<Option<Todo>, StoreError> {
        let options = FindOneAndReplaceOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let replacement = TodoDocument::from(input);
        let updated = self
            .collection
            .find_one_and_replace(doc! { "_id": id.object_id() }, &replacement, options)
            .await?;
        Ok(updated.and_then(TodoDocument::into_todo))
    }

    async fn delete(&self, id: TodoId) -> Result<(), StoreError> {
        self.collection
            .delete_one(doc! { "_id": id.object_id() }, None)
            .await?;
        Ok(())
    }
}
