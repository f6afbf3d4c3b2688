//! 内存会话存储

use dify_errors::AppResult;
use dify_ports::SessionStore;
use parking_lot::RwLock;
use std::collections::HashMap;

/// 进程内会话存储
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用初始键值创建
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemorySessionStore::new();
        assert!(store.is_empty());

        store.set("dify_token", "abc").unwrap();
        assert_eq!(store.get("dify_token").as_deref(), Some("abc"));
        assert!(store.contains("dify_token"));

        store.remove("dify_token").unwrap();
        assert!(store.get("dify_token").is_none());
        // removing a missing key is not an error
        store.remove("dify_token").unwrap();
    }

    #[test]
    fn test_with_entries() {
        let store = MemorySessionStore::with_entries([("a", "1"), ("b", "2")]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("b").as_deref(), Some("2"));
    }
}
