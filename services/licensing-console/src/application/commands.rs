//! 报价请求
//!
//! 面向 JSON 输入的原始请求，数量与年限保留为有符号整数，
//! 以便把 `0`、`-1` 这类输入报告为校验错误而不是反序列化错误。

use dify_domain_core::Decimal;
use serde::Deserialize;

use crate::domain::{LicenseType, LineItem, Order};
use crate::error::PricingError;

/// 单行报价请求
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteLineRequest {
    pub license_type: String,
    pub quantity: i64,
    pub duration_years: i64,
    /// 缺省时使用配置的默认税率
    #[serde(default)]
    pub tax_rate: Option<Decimal>,
}

/// 报价 / 下单请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub items: Vec<QuoteLineRequest>,
    /// 整单折扣百分比，0..=100
    #[serde(default)]
    pub discount_percent: Option<Decimal>,
    #[serde(default)]
    pub agreement_acknowledged: bool,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl QuoteLineRequest {
    pub fn to_line_item(&self, default_tax_rate: Decimal) -> Result<LineItem, PricingError> {
        LineItem::new(
            LicenseType::new(&self.license_type)?,
            self.quantity,
            self.duration_years,
            self.tax_rate.unwrap_or(default_tax_rate),
        )
    }
}

impl QuoteRequest {
    /// 校验并转换为订单草稿
    pub fn to_order(&self, default_tax_rate: Decimal) -> Result<Order, PricingError> {
        let mut order = Order::new();
        for line in &self.items {
            order.add_item(line.to_line_item(default_tax_rate)?);
        }
        order.set_discount_percent(self.discount_percent)?;
        order.acknowledge_agreement(self.agreement_acknowledged);
        if let Some(name) = &self.customer_name {
            order = order.with_customer_name(name.as_str());
        }
        if let Some(notes) = &self.notes {
            order = order.with_notes(notes.as_str());
        }
        Ok(order)
    }
}
