use std::path::Path;

use crate::{ApiConfig, AppConfig, DataSourceConfig, DataSourceMode};
use figment::{
    Figment,
    providers::{Format, Toml},
};
use rust_decimal_macros::dec;
use secrecy::{ExposeSecret, Secret};

const MINIMAL: &str = r#"
app_name = "licensing-console"
app_env = "development"

[api]
base_url = "http://localhost:8000/api/v1"

[data_source]
mode = "fixture"
fixture_path = "fixtures.json"

[session]

[pricing]
model = "discount_factor"
"#;

#[test]
fn test_defaults_are_applied() {
    let config = AppConfig::from_figment(Figment::from(Toml::string(MINIMAL))).unwrap();

    assert!(config.is_development());
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.api.page_size, 10);
    assert!(config.api.token.is_none());
    assert_eq!(config.data_source.mode, DataSourceMode::Fixture);
    assert_eq!(config.session.store_path, ".dify/session.json");
    assert_eq!(config.pricing.currency, "CNY");
    assert_eq!(config.pricing.default_tax_rate, dec!(0.03));
    assert_eq!(config.pricing.base_prices["STANDARD"], dec!(58000));
    assert_eq!(config.telemetry.log_level, "info");
    assert!(!config.telemetry.json);
}

#[test]
fn test_pricing_model_is_required() {
    let without_model = MINIMAL.replace("model = \"discount_factor\"", "");
    let result = AppConfig::from_figment(Figment::from(Toml::string(&without_model)));
    assert!(result.is_err());
}

#[test]
fn test_overrides_merge() {
    let overrides = r#"
[pricing]
default_tax_rate = "0.06"

[pricing.base_prices]
STANDARD = 60000
"#;
    let config = AppConfig::from_figment(
        Figment::from(Toml::string(MINIMAL)).merge(Toml::string(overrides)),
    )
    .unwrap();

    assert_eq!(config.pricing.model, "discount_factor");
    assert_eq!(config.pricing.default_tax_rate, dec!(0.06));
    assert_eq!(config.pricing.base_prices["STANDARD"], dec!(60000));
}

#[test]
fn test_secret_redaction() {
    let secret = Secret::new("my_api_token".to_string());
    let debug_output = format!("{:?}", secret);
    assert!(debug_output.contains("Secret([REDACTED"));
    assert!(!debug_output.contains("my_api_token"));
}

#[test]
fn test_config_struct_redaction() {
    let config = ApiConfig {
        base_url: "http://localhost:8000/api/v1".to_string(),
        timeout_secs: 30,
        page_size: 10,
        token: Some(Secret::new("bearer-abc".to_string())),
    };
    let debug_output = format!("{:?}", config);
    assert!(!debug_output.contains("bearer-abc"));
    assert_eq!(config.token.unwrap().expose_secret(), "bearer-abc");
}

#[test]
fn test_relative_fixture_path_resolves_against_config_dir() {
    let config = AppConfig::from_figment(Figment::from(Toml::string(MINIMAL))).unwrap();
    assert!(config.config_dir.as_os_str().is_empty());

    let resolved = config
        .data_source
        .resolve_fixture_path(Path::new("/srv/console/config"))
        .unwrap();
    assert_eq!(resolved, Path::new("/srv/console/config/fixtures.json"));
}

#[test]
fn test_absolute_fixture_path_is_kept() {
    let data_source = DataSourceConfig {
        mode: DataSourceMode::Fixture,
        fixture_path: Some("/data/fixtures.json".to_string()),
    };
    let resolved = data_source
        .resolve_fixture_path(Path::new("/srv/console/config"))
        .unwrap();
    assert_eq!(resolved, Path::new("/data/fixtures.json"));

    let without = DataSourceConfig {
        mode: DataSourceMode::Remote,
        fixture_path: None,
    };
    assert!(without.resolve_fixture_path(Path::new("config")).is_none());
}
