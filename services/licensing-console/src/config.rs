//! 服务配置装配

use dify_config::PricingConfig;
use dify_domain_core::Currency;
use dify_errors::AppResult;
use tracing::info;

use crate::domain::{PriceTable, PricingEngine, PricingModel};

/// 按配置构建报价引擎
///
/// 计价模型必须显式配置；未知模型名、负价格或空授权代码均视为配置错误。
pub fn build_pricing_engine(config: &PricingConfig) -> AppResult<PricingEngine> {
    let model: PricingModel = config.model.parse()?;
    let prices = PriceTable::from_entries(Currency::new(&config.currency), &config.base_prices)?;

    info!(
        model = %model,
        currency = prices.currency().code(),
        license_types = prices.len(),
        "Pricing engine configured"
    );
    Ok(PricingEngine::with_model(prices, model))
}
