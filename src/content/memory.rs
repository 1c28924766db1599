//! In-process document store.
//!
//! Evaluates [`Query`] descriptors with the same filter, ordering and
//! cardinality rules as the hosted store. Projections are ignored; whole
//! documents are returned. An empty store makes every page fall back to
//! bundled content.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::query::{Cardinality, Direction, OrderFilter, Query};
use super::store::{ContentStore, StoreError};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Arc<RwLock<Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: Vec<Value>) -> Self {
        Self {
            documents: Arc::new(RwLock::new(documents)),
        }
    }

    pub async fn insert(&self, document: Value) {
        self.documents.write().await.push(document);
    }

    /// All documents of one type, in insertion order.
    pub async fn documents_of_type(&self, doc_type: &str) -> Vec<Value> {
        self.documents
            .read()
            .await
            .iter()
            .filter(|d| d.get("_type").and_then(Value::as_str) == Some(doc_type))
            .cloned()
            .collect()
    }
}

fn order_of(doc: &Value) -> Option<f64> {
    doc.get("order").and_then(Value::as_f64)
}

fn matches(doc: &Value, query: &Query) -> bool {
    if doc.get("_type").and_then(Value::as_str) != Some(query.doc_type) {
        return false;
    }

    if let Some(slug) = &query.slug {
        let current = doc
            .get("slug")
            .and_then(|s| s.get("current"))
            .and_then(Value::as_str);
        if current != Some(slug.as_str()) {
            return false;
        }
    }

    match (query.order, order_of(doc)) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(OrderFilter::Before(n)), Some(order)) => order < n as f64,
        (Some(OrderFilter::After(n)), Some(order)) => order > n as f64,
    }
}

/// Documents without an order sort after those with one.
fn compare_orders(a: &Value, b: &Value, direction: Direction) -> Ordering {
    match (order_of(a), order_of(b)) {
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            match direction {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn fetch(&self, query: &Query) -> Result<Value, StoreError> {
        let documents = self.documents.read().await;
        let mut hits: Vec<&Value> = documents.iter().filter(|d| matches(d, query)).collect();

        if let Some(direction) = query.sort {
            hits.sort_by(|a, b| compare_orders(a, b, direction));
        }

        Ok(match query.cardinality {
            Cardinality::First => hits.first().map(|d| (*d).clone()).unwrap_or(Value::Null),
            Cardinality::All => Value::Array(hits.into_iter().cloned().collect()),
        })
    }

    async fn create(&self, mut document: Value) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        match document.as_object_mut() {
            Some(map) => {
                map.insert("_id".to_string(), Value::String(id.clone()));
            }
            None => {
                return Err(StoreError::ReadOnly(
                    "documents must be JSON objects".to_string(),
                ))
            }
        }
        self.documents.write().await.push(document);
        Ok(id)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project(slug: &str, order: i64) -> Value {
        json!({ "_type": "project", "_id": slug, "title": slug, "slug": { "current": slug }, "order": order })
    }

    fn store() -> MemoryStore {
        MemoryStore::with_documents(vec![
            project("c", 3),
            project("a", 1),
            project("d", 4),
            project("b", 2),
            json!({ "_type": "siteSettings", "contactEmail": "x@y.z" }),
        ])
    }

    #[tokio::test]
    async fn test_slug_lookup_returns_single_document() {
        let doc = store().fetch(&Query::project_by_slug("b")).await.unwrap();
        assert_eq!(doc["order"], 2);

        let missing = store().fetch(&Query::project_by_slug("zzz")).await.unwrap();
        assert!(missing.is_null());
    }

    #[tokio::test]
    async fn test_all_projects_sorted_by_order() {
        let docs = store().fetch(&Query::all_projects()).await.unwrap();
        let slugs: Vec<&str> = docs
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["slug"]["current"].as_str().unwrap())
            .collect();
        assert_eq!(slugs, vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_order_comparison_queries() {
        let prev = store().fetch(&Query::previous_project(3)).await.unwrap();
        assert_eq!(prev["slug"]["current"], "b");

        let next = store().fetch(&Query::next_project(3)).await.unwrap();
        assert_eq!(next["slug"]["current"], "d");

        let none = store().fetch(&Query::next_project(4)).await.unwrap();
        assert!(none.is_null());
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let s = MemoryStore::new();
        let id = s
            .create(json!({ "_type": "contactSubmission", "name": "Ada" }))
            .await
            .unwrap();
        let docs = s.documents_of_type("contactSubmission").await;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["_id"], id.as_str());
    }
}
