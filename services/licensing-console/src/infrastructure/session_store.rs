use std::sync::Arc;

use dify_adapter_storage::JsonFileSessionStore;
use dify_config::SessionConfig;
use dify_ports::SessionStore;
use tracing::debug;

/// 基于 JSON 文件的持久化会话存储
pub fn build_session_store(config: &SessionConfig) -> Arc<dyn SessionStore> {
    debug!(path = %config.store_path, "Using file session store");
    Arc::new(JsonFileSessionStore::new(&config.store_path))
}
