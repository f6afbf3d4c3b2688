//! dify-config - 配置加载库

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use rust_decimal::Decimal;
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// 后端 API 配置
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// 版本化 base path，如 `http://localhost:8000/api/v1`
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// 服务端调用时使用的固定令牌；为空时使用会话令牌
    pub token: Option<Secret<String>>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    10
}

/// 数据源模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceMode {
    Remote,
    Fixture,
}

/// 数据源配置
#[derive(Debug, Clone, Deserialize)]
pub struct DataSourceConfig {
    pub mode: DataSourceMode,
    /// fixture 模式下的样例数据文件，相对路径按配置目录解析
    pub fixture_path: Option<String>,
}

impl DataSourceConfig {
    pub fn resolve_fixture_path(&self, config_dir: &Path) -> Option<PathBuf> {
        let path = Path::new(self.fixture_path.as_deref()?);
        if path.is_absolute() {
            Some(path.to_path_buf())
        } else {
            Some(config_dir.join(path))
        }
    }
}

/// 会话存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_store_path")]
    pub store_path: String,
}

fn default_store_path() -> String {
    ".dify/session.json".to_string()
}

/// 报价配置
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// 年限计价模型：`discount_factor` 或 `multi_year_multiplier`，必须显式配置
    pub model: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_tax_rate")]
    pub default_tax_rate: Decimal,
    /// 授权类型基础价格（每套每年）
    #[serde(default = "default_base_prices")]
    pub base_prices: BTreeMap<String, Decimal>,
}

fn default_currency() -> String {
    "CNY".to_string()
}

fn default_tax_rate() -> Decimal {
    Decimal::new(3, 2)
}

fn default_base_prices() -> BTreeMap<String, Decimal> {
    BTreeMap::from([
        ("BASIC".to_string(), Decimal::from(28_000)),
        ("STANDARD".to_string(), Decimal::from(58_000)),
        ("PROFESSIONAL".to_string(), Decimal::from(98_000)),
        ("ENTERPRISE".to_string(), Decimal::from(168_000)),
    ])
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    pub app_env: String,
    pub api: ApiConfig,
    pub data_source: DataSourceConfig,
    pub session: SessionConfig,
    pub pricing: PricingConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// 加载时的配置目录；`from_figment` 构建时为空，即当前目录
    #[serde(skip)]
    pub config_dir: PathBuf,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 依次合并 `default.toml`、`{APP_ENV}.toml` 与 `DIFY_` 前缀的环境变量
    /// （嵌套字段用 `__` 分隔，如 `DIFY_PRICING__MODEL`）。
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let figment = Figment::new()
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("DIFY_").split("__"));

        let mut config = Self::from_figment(figment)?;
        config.config_dir = PathBuf::from(config_dir);
        Ok(config)
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }
}

#[cfg(test)]
mod tests;
