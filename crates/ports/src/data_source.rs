//! DataSource trait 定义

use async_trait::async_trait;
use dify_common::{PagedResult, Pagination, Resource};
use dify_errors::AppResult;
use serde_json::Value;

/// 资源数据源
///
/// 远程后端与本地样例数据各有一个实现，由配置选择，
/// 不允许在远程调用失败后悄悄退回样例数据。
#[async_trait]
pub trait DataSource: Send + Sync {
    /// 分页列出资源
    async fn list(&self, resource: Resource, pagination: &Pagination)
        -> AppResult<PagedResult<Value>>;

    /// 根据 ID 获取单条记录
    async fn get(&self, resource: Resource, id: &str) -> AppResult<Option<Value>>;

    /// 数据源名称（日志用）
    fn name(&self) -> &'static str;
}
