//! SessionStore trait 定义

use dify_errors::AppResult;
use std::sync::Arc;

/// 字符串键值的本地会话存储
///
/// 读取永不失败：缺失或不可读的数据一律视为 `None`。
pub trait SessionStore: Send + Sync {
    /// 获取值
    fn get(&self, key: &str) -> Option<String>;

    /// 设置值
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// 删除值
    fn remove(&self, key: &str) -> AppResult<()>;

    /// 检查是否存在
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        (**self).remove(key)
    }
}
