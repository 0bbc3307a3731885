use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Document collections backed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Doctors,
    Patients,
}

impl Collection {
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Doctors => "doctors",
            Collection::Patients => "patients",
        }
    }
}

/// A schemaless record with a server-assigned id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document. Never deduplicates.
    async fn insert(
        &self,
        collection: Collection,
        body: Map<String, Value>,
    ) -> anyhow::Result<InsertResult>;

    /// Every document in insertion order.
    async fn find_all(&self, collection: Collection) -> anyhow::Result<Vec<Document>>;

    /// Documents `[skip, skip + limit)` in insertion order; `limit = None` takes the rest.
    async fn find_page(
        &self,
        collection: Collection,
        skip: i64,
        limit: Option<i64>,
    ) -> anyhow::Result<Vec<Document>>;
}

/// Strip a client-supplied `_id` so the store's id is authoritative.
pub(crate) fn without_client_id(mut body: Map<String, Value>) -> Map<String, Value> {
    body.remove("_id");
    body
}
