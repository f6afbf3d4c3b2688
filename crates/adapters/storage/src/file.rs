//! JSON 文件会话存储
//!
//! 整个存储是一个字符串到字符串的 JSON 对象。每次读取都重新加载文件，
//! 以便多个进程看到一致的登录状态。

use dify_errors::AppResult;
use dify_ports::SessionStore;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::StorageError;

type Entries = BTreeMap<String, String>;

/// 文件会话存储
#[derive(Debug)]
pub struct JsonFileSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Entries, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&raw).map_err(|_| StorageError::Corrupt {
            path: self.path.clone(),
        })
    }

    fn persist(&self, entries: &Entries) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let body = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, body).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;
        Ok(())
    }

    /// 写操作在损坏文件上从空白状态重新开始
    fn load_for_update(&self) -> Result<Entries, StorageError> {
        match self.load() {
            Err(StorageError::Corrupt { path }) => {
                warn!(path = %path.display(), "Discarding corrupt session file");
                Ok(Entries::new())
            }
            other => other,
        }
    }
}

impl SessionStore for JsonFileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(entries) => entries.get(key).cloned(),
            Err(e) => {
                warn!(error = %e, key, "Session store unreadable");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock();
        let mut entries = self.load_for_update()?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock();
        let mut entries = self.load_for_update()?;
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir()
            .join(format!("dify-session-{}-{}-{}", name, std::process::id(), nanos))
            .join("session.json")
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let store = JsonFileSessionStore::new(temp_path("missing"));
        assert!(store.get("dify_token").is_none());
    }

    #[test]
    fn test_persists_across_instances() {
        let path = temp_path("persist");
        let store = JsonFileSessionStore::new(&path);
        store.set("dify_token", "abc").unwrap();
        store.set("dify_user_role", "admin").unwrap();

        let reopened = JsonFileSessionStore::new(&path);
        assert_eq!(reopened.get("dify_token").as_deref(), Some("abc"));

        reopened.remove("dify_token").unwrap();
        assert!(store.get("dify_token").is_none());
        assert_eq!(store.get("dify_user_role").as_deref(), Some("admin"));

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_corrupt_file_degrades_to_none() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();

        let store = JsonFileSessionStore::new(&path);
        assert!(store.get("dify_token").is_none());

        // a write starts over from an empty session
        store.set("dify_token", "fresh").unwrap();
        assert_eq!(store.get("dify_token").as_deref(), Some("fresh"));

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
