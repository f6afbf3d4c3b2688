//! 货币值对象

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 货币代码
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency(pub String);

impl Currency {
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_uppercase())
    }

    pub fn cny() -> Self {
        Self("CNY".to_string())
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::cny()
    }
}

/// 金额值对象
///
/// 内部保持精确小数，只有在调用 [`Money::round_cents`] 时才舍入到分。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: Decimal,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    pub fn cny(amount: Decimal) -> Self {
        Self::new(amount, Currency::cny())
    }

    /// 四舍五入到分（half-up，远离零方向）
    pub fn round_cents(&self) -> Self {
        Self::new(
            self.amount
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            self.currency.clone(),
        )
    }

    /// 按系数缩放，不舍入
    pub fn scale(&self, factor: Decimal) -> Self {
        Self::new(self.amount * factor, self.currency.clone())
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// 币种一致时相加，否则返回 None
    pub fn checked_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount
            .checked_add(other.amount)
            .map(|amount| Money::new(amount, self.currency.clone()))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}", self.currency.code(), self.round_cents().amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_cents_half_up() {
        assert_eq!(Money::cny(dec!(1.005)).round_cents().amount, dec!(1.01));
        assert_eq!(Money::cny(dec!(1.004)).round_cents().amount, dec!(1.00));
        assert_eq!(Money::cny(dec!(-1.005)).round_cents().amount, dec!(-1.01));
    }

    #[test]
    fn test_scale_keeps_precision() {
        let money = Money::cny(dec!(58000)).scale(dec!(0.95));
        assert_eq!(money.amount, dec!(55100.00));
        let thirds = Money::cny(dec!(1)).scale(dec!(0.333));
        assert_eq!(thirds.amount, dec!(0.333));
    }

    #[test]
    fn test_checked_add_currency_mismatch() {
        let cny = Money::cny(dec!(1));
        let usd = Money::new(dec!(1), Currency::new("usd"));
        assert_eq!(usd.currency.code(), "USD");
        assert!(cny.checked_add(&usd).is_none());
        assert!(usd.checked_add(&cny).is_none());
        assert_eq!(cny.checked_add(&cny).unwrap().amount, dec!(2));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::cny(dec!(298700)).to_string(), "CNY 298700.00");
    }
}
