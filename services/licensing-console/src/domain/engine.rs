//! 报价引擎

use dify_domain_core::{Currency, Decimal, Money};

use super::duration::{DurationPricing, DurationYears, PricingModel};
use super::license::{LicenseType, PriceTable};
use super::line_item::{LineItem, LineQuote};
use crate::error::PricingError;

/// 报价引擎
///
/// 组合价目表与年限计价策略。金额计算全程使用精确小数，
/// 只有含税合计舍入到分。
#[derive(Debug)]
pub struct PricingEngine {
    prices: PriceTable,
    pricing: Box<dyn DurationPricing>,
}

impl PricingEngine {
    pub fn new(prices: PriceTable, pricing: Box<dyn DurationPricing>) -> Self {
        Self { prices, pricing }
    }

    pub fn with_model(prices: PriceTable, model: PricingModel) -> Self {
        Self::new(prices, model.strategy())
    }

    pub fn model(&self) -> PricingModel {
        self.pricing.model()
    }

    pub fn currency(&self) -> &Currency {
        self.prices.currency()
    }

    pub fn price_table(&self) -> &PriceTable {
        &self.prices
    }

    /// 年限调整后的单价
    pub fn unit_price(
        &self,
        license_type: &LicenseType,
        years: DurationYears,
    ) -> Result<Money, PricingError> {
        let base = self.prices.base_price(license_type)?;
        Ok(base.scale(self.pricing.unit_factor(years)))
    }

    /// 计算单行报价
    pub fn line_total(&self, item: &LineItem) -> Result<LineQuote, PricingError> {
        let years = item.duration_years();
        let unit_price = self.unit_price(item.license_type(), years)?;

        let units = Decimal::from(item.quantity())
            .checked_mul(Decimal::from(self.pricing.billed_terms(years)))
            .ok_or(PricingError::Overflow)?;
        let subtotal = unit_price
            .amount
            .checked_mul(units)
            .ok_or(PricingError::Overflow)?;
        let with_tax = subtotal
            .checked_mul(Decimal::ONE + item.tax_rate())
            .ok_or(PricingError::Overflow)?;

        let currency = unit_price.currency.clone();
        Ok(LineQuote {
            license_type: item.license_type().clone(),
            quantity: item.quantity(),
            duration_years: years,
            tax_rate: item.tax_rate(),
            subtotal: Money::new(subtotal, currency.clone()),
            total_with_tax: Money::new(with_tax, currency).round_cents(),
            unit_price,
        })
    }

    /// 逐行报价
    pub fn quote_lines(&self, items: &[LineItem]) -> Result<Vec<LineQuote>, PricingError> {
        items.iter().map(|item| self.line_total(item)).collect()
    }

    /// 订单合计：各行含税合计之和，空订单为零
    pub fn order_total(&self, items: &[LineItem]) -> Result<Money, PricingError> {
        let lines = self.quote_lines(items)?;
        self.sum_lines(&lines)
    }

    pub fn sum_lines(&self, lines: &[LineQuote]) -> Result<Money, PricingError> {
        lines
            .iter()
            .try_fold(Money::zero(self.currency().clone()), |acc, line| {
                acc.checked_add(&line.total_with_tax).ok_or_else(|| {
                    if acc.currency != line.total_with_tax.currency {
                        PricingError::CurrencyMismatch {
                            expected: acc.currency.code().to_string(),
                            actual: line.total_with_tax.currency.code().to_string(),
                        }
                    } else {
                        PricingError::Overflow
                    }
                })
            })
    }
}

/// 按百分比折扣：`amount × (1 − percent / 100)`，不舍入
///
/// 超出 [0, 100] 的折扣直接拒绝，不做截断。
pub fn apply_percent_discount(amount: &Money, percent: Decimal) -> Result<Money, PricingError> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(PricingError::DiscountOutOfRange(percent));
    }
    Ok(amount.scale(Decimal::ONE - percent / Decimal::ONE_HUNDRED))
}
