//! 授权类型与价目表

use std::collections::BTreeMap;
use std::fmt;

use dify_domain_core::{Currency, Decimal, Money};
use serde::{Deserialize, Serialize};

use crate::error::PricingError;

/// 授权类型代码，如 `STANDARD`
///
/// 构造时去除首尾空白并转为大写，只保证非空；
/// 是否存在对应价格由 [`PriceTable`] 判定。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LicenseType(String);

impl LicenseType {
    pub const BASIC: &'static str = "BASIC";
    pub const STANDARD: &'static str = "STANDARD";
    pub const PROFESSIONAL: &'static str = "PROFESSIONAL";
    pub const ENTERPRISE: &'static str = "ENTERPRISE";

    pub fn new(code: &str) -> Result<Self, PricingError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(PricingError::UnknownLicenseType(String::new()));
        }
        Ok(Self(code.to_uppercase()))
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LicenseType {
    type Error = PricingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<LicenseType> for String {
    fn from(value: LicenseType) -> Self {
        value.0
    }
}

/// 授权类型基础价目表（每套每年）
#[derive(Debug, Clone)]
pub struct PriceTable {
    currency: Currency,
    prices: BTreeMap<LicenseType, Decimal>,
}

impl PriceTable {
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            prices: BTreeMap::new(),
        }
    }

    /// 标准价目：BASIC 28000 / STANDARD 58000 / PROFESSIONAL 98000 / ENTERPRISE 168000
    pub fn standard(currency: Currency) -> Self {
        let mut table = Self::new(currency);
        for (code, price) in [
            (LicenseType::BASIC, 28_000),
            (LicenseType::STANDARD, 58_000),
            (LicenseType::PROFESSIONAL, 98_000),
            (LicenseType::ENTERPRISE, 168_000),
        ] {
            table.prices.insert(LicenseType(code.to_string()), Decimal::from(price));
        }
        table
    }

    /// 从 `代码 -> 价格` 映射构建，拒绝空代码与负价格
    pub fn from_entries<'a>(
        currency: Currency,
        entries: impl IntoIterator<Item = (&'a String, &'a Decimal)>,
    ) -> Result<Self, PricingError> {
        let mut table = Self::new(currency);
        for (code, price) in entries {
            table = table.with_price(LicenseType::new(code)?, *price)?;
        }
        Ok(table)
    }

    pub fn with_price(
        mut self,
        license_type: LicenseType,
        price: Decimal,
    ) -> Result<Self, PricingError> {
        if price < Decimal::ZERO {
            return Err(PricingError::NegativeBasePrice(license_type.to_string()));
        }
        self.prices.insert(license_type, price);
        Ok(self)
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// 查询基础价格，未知类型返回错误
    pub fn base_price(&self, license_type: &LicenseType) -> Result<Money, PricingError> {
        self.prices
            .get(license_type)
            .map(|price| Money::new(*price, self.currency.clone()))
            .ok_or_else(|| PricingError::UnknownLicenseType(license_type.to_string()))
    }

    pub fn license_types(&self) -> impl Iterator<Item = &LicenseType> {
        self.prices.keys()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
