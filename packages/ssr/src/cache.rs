//! Per-request data-fetching cache.
//!
//! A fresh cache is created for every render so requests never share state.
//! Dehydration serializes all entries into the JSON array the client reads
//! from `window.__QUERY_STATE__` to resume without refetching.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One cached query result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEntry {
    #[serde(rename = "queryKey")]
    pub query_key: Value,
    pub data: Value,
}

/// Request-scoped query cache.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: Vec<QueryEntry>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for a key.
    pub fn set(&mut self, query_key: Value, data: Value) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.query_key == query_key) {
            entry.data = data;
        } else {
            self.entries.push(QueryEntry { query_key, data });
        }
    }

    pub fn get(&self, query_key: &Value) -> Option<&Value> {
        self.entries
            .iter()
            .find(|e| &e.query_key == query_key)
            .map(|e| &e.data)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize every entry for the client bootstrap script.
    pub fn dehydrate(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_cache_dehydrates_to_empty_array() {
        let cache = QueryCache::new();
        assert_eq!(cache.dehydrate().unwrap(), "[]");
    }

    #[test]
    fn test_set_replaces_existing_key() {
        let mut cache = QueryCache::new();
        cache.set(json!(["templates"]), json!([1, 2]));
        cache.set(json!(["templates"]), json!([1, 2, 3]));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&json!(["templates"])), Some(&json!([1, 2, 3])));
    }

    #[test]
    fn test_dehydrate_shape() {
        let mut cache = QueryCache::new();
        cache.set(json!(["user", 7]), json!({"name": "sam"}));

        assert_eq!(
            cache.dehydrate().unwrap(),
            r#"[{"queryKey":["user",7],"data":{"name":"sam"}}]"#
        );
    }
}
