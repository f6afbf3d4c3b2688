//! 订单行

use dify_domain_core::{Decimal, Money};
use serde::Serialize;

use super::duration::DurationYears;
use super::license::LicenseType;
use crate::error::PricingError;

/// 校验税率在 [0, 1] 内
pub fn validate_tax_rate(tax_rate: Decimal) -> Result<Decimal, PricingError> {
    if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
        return Err(PricingError::InvalidTaxRate(tax_rate));
    }
    Ok(tax_rate)
}

/// 校验数量为正整数
pub fn validate_quantity(quantity: i64) -> Result<u32, PricingError> {
    if quantity < 1 {
        return Err(PricingError::InvalidQuantity(quantity));
    }
    u32::try_from(quantity).map_err(|_| PricingError::InvalidQuantity(quantity))
}

/// 订单行
///
/// 只保存输入字段，价格由 `PricingEngine` 计算，因此不会出现
/// 修改数量后金额过期的情况。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    license_type: LicenseType,
    quantity: u32,
    duration_years: DurationYears,
    tax_rate: Decimal,
}

impl LineItem {
    pub fn new(
        license_type: LicenseType,
        quantity: i64,
        duration_years: i64,
        tax_rate: Decimal,
    ) -> Result<Self, PricingError> {
        Ok(Self {
            license_type,
            quantity: validate_quantity(quantity)?,
            duration_years: DurationYears::new(duration_years)?,
            tax_rate: validate_tax_rate(tax_rate)?,
        })
    }

    pub fn license_type(&self) -> &LicenseType {
        &self.license_type
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn duration_years(&self) -> DurationYears {
        self.duration_years
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    pub fn with_license_type(mut self, license_type: LicenseType) -> Self {
        self.license_type = license_type;
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Result<Self, PricingError> {
        self.quantity = validate_quantity(quantity)?;
        Ok(self)
    }

    pub fn with_duration(mut self, duration_years: i64) -> Result<Self, PricingError> {
        self.duration_years = DurationYears::new(duration_years)?;
        Ok(self)
    }

    pub fn with_tax_rate(mut self, tax_rate: Decimal) -> Result<Self, PricingError> {
        self.tax_rate = validate_tax_rate(tax_rate)?;
        Ok(self)
    }
}

/// 订单行报价结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineQuote {
    pub license_type: LicenseType,
    pub quantity: u32,
    pub duration_years: DurationYears,
    pub tax_rate: Decimal,
    /// 年限调整后的单价，未舍入
    pub unit_price: Money,
    /// 单价 × 数量 × 计费期数，未舍入
    pub subtotal: Money,
    /// 含税合计，舍入到分
    pub total_with_tax: Money,
}
