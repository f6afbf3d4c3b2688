//! 订单草稿与提交

use chrono::{DateTime, Utc};
use dify_domain_core::{Decimal, Money};
use serde::Serialize;
use tracing::info;

use super::engine::{PricingEngine, apply_percent_discount};
use super::line_item::{LineItem, LineQuote};
use super::numerals::amount_to_chinese_numerals;
use crate::error::PricingError;

/// 订单草稿
#[derive(Debug, Clone, Default)]
pub struct Order {
    items: Vec<LineItem>,
    discount_percent: Option<Decimal>,
    agreement_acknowledged: bool,
    customer_name: Option<String>,
    notes: Option<String>,
}

impl Order {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn add_item(&mut self, item: LineItem) {
        self.items.push(item);
    }

    /// 移除指定行，越界时返回 None
    pub fn remove_item(&mut self, index: usize) -> Option<LineItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// 替换指定行，越界时返回 false
    pub fn replace_item(&mut self, index: usize, item: LineItem) -> bool {
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub fn set_discount_percent(&mut self, percent: Option<Decimal>) -> Result<(), PricingError> {
        if let Some(p) = percent {
            if p < Decimal::ZERO || p > Decimal::ONE_HUNDRED {
                return Err(PricingError::DiscountOutOfRange(p));
            }
        }
        self.discount_percent = percent;
        Ok(())
    }

    pub fn discount_percent(&self) -> Option<Decimal> {
        self.discount_percent
    }

    pub fn acknowledge_agreement(&mut self, acknowledged: bool) {
        self.agreement_acknowledged = acknowledged;
    }

    pub fn is_agreement_acknowledged(&self) -> bool {
        self.agreement_acknowledged
    }

    pub fn with_customer_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.customer_name = (!name.trim().is_empty()).then_some(name);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = (!notes.trim().is_empty()).then_some(notes);
        self
    }

    /// 报价：逐行计算、求和、应用整单折扣
    pub fn price(&self, engine: &PricingEngine) -> Result<OrderQuote, PricingError> {
        let lines = engine.quote_lines(&self.items)?;
        let total = engine.sum_lines(&lines)?;
        let payable = match self.discount_percent {
            Some(percent) => apply_percent_discount(&total, percent)?.round_cents(),
            None => total.clone(),
        };
        let payable_in_words = amount_to_chinese_numerals(payable.amount);

        Ok(OrderQuote {
            model: engine.model().as_str(),
            lines,
            total,
            discount_percent: self.discount_percent,
            payable,
            payable_in_words,
        })
    }

    /// 提交订单：至少一行且已确认协议
    pub fn submit(&self, engine: &PricingEngine) -> Result<OrderSubmission, PricingError> {
        if self.items.is_empty() {
            return Err(PricingError::EmptyOrder);
        }
        if !self.agreement_acknowledged {
            return Err(PricingError::AgreementNotAcknowledged);
        }

        let quote = self.price(engine)?;
        info!(
            lines = quote.lines.len(),
            payable = %quote.payable,
            "Order submitted"
        );
        Ok(OrderSubmission {
            quote,
            customer_name: self.customer_name.clone(),
            notes: self.notes.clone(),
            submitted_at: Utc::now(),
        })
    }
}

/// 整单报价
#[derive(Debug, Clone, Serialize)]
pub struct OrderQuote {
    pub model: &'static str,
    pub lines: Vec<LineQuote>,
    /// 各行含税合计之和
    pub total: Money,
    pub discount_percent: Option<Decimal>,
    /// 折扣后应付金额，舍入到分
    pub payable: Money,
    pub payable_in_words: String,
}

/// 已提交订单
#[derive(Debug, Clone, Serialize)]
pub struct OrderSubmission {
    #[serde(flatten)]
    pub quote: OrderQuote,
    pub customer_name: Option<String>,
    pub notes: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LicenseType, PriceTable, PricingModel};
    use dify_domain_core::Currency;
    use rust_decimal_macros::dec;

    fn engine() -> PricingEngine {
        PricingEngine::with_model(
            PriceTable::standard(Currency::cny()),
            PricingModel::DiscountFactor,
        )
    }

    fn standard_line(quantity: i64) -> LineItem {
        LineItem::new(LicenseType::new("STANDARD").unwrap(), quantity, 1, dec!(0.03)).unwrap()
    }

    #[test]
    fn test_submit_requires_items() {
        let mut order = Order::new();
        order.acknowledge_agreement(true);
        assert_eq!(order.submit(&engine()).unwrap_err(), PricingError::EmptyOrder);
    }

    #[test]
    fn test_submit_requires_agreement() {
        let mut order = Order::new();
        order.add_item(standard_line(5));
        assert_eq!(
            order.submit(&engine()).unwrap_err(),
            PricingError::AgreementNotAcknowledged
        );

        order.acknowledge_agreement(true);
        let submission = order.submit(&engine()).unwrap();
        assert_eq!(submission.quote.payable.amount, dec!(298700.00));
        assert_eq!(submission.quote.payable_in_words, "贰拾玖万捌仟柒佰元整");
    }

    #[test]
    fn test_edit_lines() {
        let mut order = Order::new();
        order.add_item(standard_line(1));
        order.add_item(standard_line(2));

        assert!(order.replace_item(0, standard_line(3)));
        assert!(!order.replace_item(5, standard_line(3)));
        assert_eq!(order.items()[0].quantity(), 3);

        assert_eq!(order.remove_item(1).map(|i| i.quantity()), Some(2));
        assert!(order.remove_item(1).is_none());
        assert_eq!(order.items().len(), 1);
    }

    #[test]
    fn test_discount_applies_to_order_total() {
        let mut order = Order::new();
        order.add_item(standard_line(5));
        order.set_discount_percent(Some(dec!(10))).unwrap();

        let quote = order.price(&engine()).unwrap();
        assert_eq!(quote.total.amount, dec!(298700.00));
        assert_eq!(quote.payable.amount, dec!(268830.00));

        assert!(order.set_discount_percent(Some(dec!(101))).is_err());
        assert_eq!(order.discount_percent(), Some(dec!(10)));
    }

    #[test]
    fn test_blank_customer_name_is_dropped() {
        let order = Order::new().with_customer_name("  ").with_notes("rush");
        assert!(order.customer_name.is_none());
        assert_eq!(order.notes.as_deref(), Some("rush"));
    }
}
