use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use dify_adapter_fixture::FixtureDataSource;
use dify_adapter_http::RemoteDataSource;
use dify_config::{ApiConfig, DataSourceConfig, DataSourceMode};
use dify_errors::{AppError, AppResult};
use dify_ports::DataSource;
use secrecy::Secret;
use tracing::info;

/// 按配置选择数据源
///
/// 远程模式下优先使用配置的固定令牌，其次使用会话令牌。
/// 远程调用失败时直接返回错误，不会回退到样例数据。
/// fixture 模式下相对的 `fixture_path` 按 `config_dir` 解析。
pub fn build_data_source(
    data_source: &DataSourceConfig,
    api: &ApiConfig,
    config_dir: &Path,
    session_token: Option<String>,
) -> AppResult<Arc<dyn DataSource>> {
    match data_source.mode {
        DataSourceMode::Remote => {
            let mut remote =
                RemoteDataSource::new(&api.base_url, Duration::from_secs(api.timeout_secs))?;
            let token = api
                .token
                .clone()
                .or_else(|| session_token.map(Secret::new));
            if let Some(token) = token {
                remote = remote.with_bearer_token(token);
            }
            info!(base_url = %remote.base_url(), "Using remote data source");
            Ok(Arc::new(remote))
        }
        DataSourceMode::Fixture => {
            let path = data_source
                .resolve_fixture_path(config_dir)
                .ok_or_else(|| {
                    AppError::validation("data_source.fixture_path is required in fixture mode")
                })?;
            info!(path = %path.display(), "Using fixture data source");
            Ok(Arc::new(FixtureDataSource::from_path(&path)?))
        }
    }
}
