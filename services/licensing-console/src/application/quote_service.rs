//! 报价应用服务

use chrono::{DateTime, Utc};
use dify_domain_core::{Decimal, Money};
use dify_errors::{AppError, AppResult};
use metrics::counter;
use serde::Serialize;
use tracing::{info, warn};

use super::commands::QuoteRequest;
use crate::domain::{LineQuote, OrderQuote, OrderSubmission, PricingEngine, validate_tax_rate};
use crate::error::PricingError;

/// 报价服务
pub struct QuoteService {
    engine: PricingEngine,
    default_tax_rate: Decimal,
}

impl QuoteService {
    pub fn new(engine: PricingEngine, default_tax_rate: Decimal) -> AppResult<Self> {
        validate_tax_rate(default_tax_rate)?;
        Ok(Self {
            engine,
            default_tax_rate,
        })
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    /// 报价，不要求确认协议
    pub fn quote(&self, request: &QuoteRequest) -> AppResult<QuoteResponse> {
        let result = request
            .to_order(self.default_tax_rate)
            .and_then(|order| order.price(&self.engine));

        let quote = self.record("quote", result)?;
        info!(
            model = quote.model,
            lines = quote.lines.len(),
            payable = %quote.payable,
            "Quote computed"
        );
        Ok(QuoteResponse::from_quote(quote, None))
    }

    /// 提交订单
    pub fn submit(&self, request: &QuoteRequest) -> AppResult<QuoteResponse> {
        let result = request
            .to_order(self.default_tax_rate)
            .and_then(|order| order.submit(&self.engine));

        let OrderSubmission {
            quote,
            submitted_at,
            ..
        } = self.record("submit", result)?;
        Ok(QuoteResponse::from_quote(quote, Some(submitted_at)))
    }

    fn record<T>(
        &self,
        operation: &'static str,
        result: Result<T, PricingError>,
    ) -> AppResult<T> {
        match result {
            Ok(value) => {
                counter!("quotes_total", "operation" => operation).increment(1);
                Ok(value)
            }
            Err(e) => {
                counter!(
                    "quote_rejections_total",
                    "operation" => operation,
                    "reason" => rejection_reason(&e)
                )
                .increment(1);
                warn!(operation, error = %e, "Quote rejected");
                Err(AppError::from(e))
            }
        }
    }
}

fn rejection_reason(error: &PricingError) -> &'static str {
    match error {
        PricingError::UnknownLicenseType(_) => "unknown_license_type",
        PricingError::InvalidQuantity(_) => "invalid_quantity",
        PricingError::InvalidDuration(_) => "invalid_duration",
        PricingError::InvalidTaxRate(_) => "invalid_tax_rate",
        PricingError::DiscountOutOfRange(_) => "discount_out_of_range",
        PricingError::EmptyOrder => "empty_order",
        PricingError::AgreementNotAcknowledged => "agreement_not_acknowledged",
        _ => "other",
    }
}

/// 报价行输出
#[derive(Debug, Clone, Serialize)]
pub struct LineQuoteResponse {
    pub license_type: String,
    pub quantity: u32,
    pub duration_years: u8,
    pub tax_rate: String,
    pub unit_price: String,
    pub subtotal: String,
    pub total_with_tax: String,
}

impl From<LineQuote> for LineQuoteResponse {
    fn from(line: LineQuote) -> Self {
        Self {
            license_type: line.license_type.to_string(),
            quantity: line.quantity,
            duration_years: line.duration_years.get(),
            tax_rate: line.tax_rate.normalize().to_string(),
            unit_price: cents(&line.unit_price),
            subtotal: cents(&line.subtotal),
            total_with_tax: cents(&line.total_with_tax),
        }
    }
}

/// 报价输出，金额统一以两位小数字符串表示
#[derive(Debug, Clone, Serialize)]
pub struct QuoteResponse {
    pub model: String,
    pub currency: String,
    pub lines: Vec<LineQuoteResponse>,
    pub total: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<String>,
    pub payable: String,
    pub payable_in_words: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl QuoteResponse {
    fn from_quote(quote: OrderQuote, submitted_at: Option<DateTime<Utc>>) -> Self {
        Self {
            model: quote.model.to_string(),
            currency: quote.total.currency.code().to_string(),
            total: cents(&quote.total),
            discount_percent: quote.discount_percent.map(|p| p.normalize().to_string()),
            payable: cents(&quote.payable),
            payable_in_words: quote.payable_in_words,
            lines: quote.lines.into_iter().map(Into::into).collect(),
            submitted_at,
        }
    }
}

fn cents(money: &Money) -> String {
    format!("{:.2}", money.round_cents().amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::QuoteLineRequest;
    use crate::domain::{PriceTable, PricingModel};
    use dify_domain_core::Currency;
    use rust_decimal_macros::dec;

    fn service() -> QuoteService {
        let engine = PricingEngine::with_model(
            PriceTable::standard(Currency::cny()),
            PricingModel::DiscountFactor,
        );
        QuoteService::new(engine, dec!(0.03)).unwrap()
    }

    fn line(code: &str, quantity: i64, years: i64) -> QuoteLineRequest {
        QuoteLineRequest {
            license_type: code.to_string(),
            quantity,
            duration_years: years,
            tax_rate: None,
        }
    }

    #[test]
    fn test_quote_formats_amounts() {
        let response = service()
            .quote(&QuoteRequest {
                items: vec![line("STANDARD", 5, 1)],
                ..Default::default()
            })
            .unwrap();

        assert_eq!(response.model, "discount_factor");
        assert_eq!(response.currency, "CNY");
        assert_eq!(response.lines[0].unit_price, "58000.00");
        assert_eq!(response.lines[0].subtotal, "290000.00");
        assert_eq!(response.lines[0].total_with_tax, "298700.00");
        assert_eq!(response.lines[0].tax_rate, "0.03");
        assert_eq!(response.payable, "298700.00");
        assert_eq!(response.payable_in_words, "贰拾玖万捌仟柒佰元整");
        assert!(response.submitted_at.is_none());
    }

    #[test]
    fn test_invalid_default_tax_rate() {
        let engine = PricingEngine::with_model(
            PriceTable::standard(Currency::cny()),
            PricingModel::DiscountFactor,
        );
        assert!(QuoteService::new(engine, dec!(2)).is_err());
    }

    #[test]
    fn test_submit_preconditions_map_to_failed_precondition() {
        let err = service().submit(&QuoteRequest::default()).unwrap_err();
        assert!(matches!(err, AppError::FailedPrecondition(_)));

        let err = service()
            .submit(&QuoteRequest {
                items: vec![line("BASIC", 1, 1)],
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, AppError::FailedPrecondition(_)));
    }

    #[test]
    fn test_unknown_type_is_validation() {
        let err = service()
            .quote(&QuoteRequest {
                items: vec![line("DIAMOND", 1, 1)],
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("DIAMOND"));
    }
}
