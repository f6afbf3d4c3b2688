//! 授权年限与年限计价模型
//!
//! 两种模型并存，由配置显式选择：
//! - `discount_factor`：单价按年限打折，按年计费（3 年 = 单价 × 0.90 × 3）
//! - `multi_year_multiplier`：多年打包价，一次计费（3 年 = 单价 × 2.7）

use std::fmt;
use std::str::FromStr;

use dify_domain_core::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PricingError;

/// 授权年限，只允许 1、2、3 年
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct DurationYears(u8);

impl DurationYears {
    pub const ONE: Self = Self(1);
    pub const TWO: Self = Self(2);
    pub const THREE: Self = Self(3);

    pub fn new(years: i64) -> Result<Self, PricingError> {
        match years {
            1..=3 => Ok(Self(years as u8)),
            _ => Err(PricingError::InvalidDuration(years)),
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    fn index(&self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl TryFrom<i64> for DurationYears {
    type Error = PricingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DurationYears> for u8 {
    fn from(value: DurationYears) -> Self {
        value.0
    }
}

impl fmt::Display for DurationYears {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}y", self.0)
    }
}

/// 计价模型名称
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingModel {
    DiscountFactor,
    MultiYearMultiplier,
}

impl PricingModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DiscountFactor => "discount_factor",
            Self::MultiYearMultiplier => "multi_year_multiplier",
        }
    }

    /// 按默认系数构造对应策略
    pub fn strategy(&self) -> Box<dyn DurationPricing> {
        match self {
            Self::DiscountFactor => Box::new(DiscountFactorPricing::default()),
            Self::MultiYearMultiplier => Box::new(MultiYearMultiplierPricing::default()),
        }
    }
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingModel {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "discount_factor" => Ok(Self::DiscountFactor),
            "multi_year_multiplier" => Ok(Self::MultiYearMultiplier),
            _ => Err(PricingError::UnknownPricingModel(s.to_string())),
        }
    }
}

/// 年限计价策略
///
/// 行小计 = 基础价 × `unit_factor` × 数量 × `billed_terms`
pub trait DurationPricing: Send + Sync + fmt::Debug {
    fn model(&self) -> PricingModel;

    /// 作用于基础价的单价系数
    fn unit_factor(&self, years: DurationYears) -> Decimal;

    /// 单价被计费的期数
    fn billed_terms(&self, years: DurationYears) -> u32;
}

/// 年限折扣：1 年 1.00、2 年 0.95、3 年 0.90，按年计费
#[derive(Debug, Clone)]
pub struct DiscountFactorPricing {
    factors: [Decimal; 3],
}

impl DiscountFactorPricing {
    pub fn new(factors: [Decimal; 3]) -> Self {
        Self { factors }
    }
}

impl Default for DiscountFactorPricing {
    fn default() -> Self {
        Self::new([Decimal::ONE, Decimal::new(95, 2), Decimal::new(90, 2)])
    }
}

impl DurationPricing for DiscountFactorPricing {
    fn model(&self) -> PricingModel {
        PricingModel::DiscountFactor
    }

    fn unit_factor(&self, years: DurationYears) -> Decimal {
        self.factors[years.index()]
    }

    fn billed_terms(&self, years: DurationYears) -> u32 {
        u32::from(years.get())
    }
}

/// 多年打包：1 年 ×1、2 年 ×1.9、3 年 ×2.7，一次计费
#[derive(Debug, Clone)]
pub struct MultiYearMultiplierPricing {
    multipliers: [Decimal; 3],
}

impl MultiYearMultiplierPricing {
    pub fn new(multipliers: [Decimal; 3]) -> Self {
        Self { multipliers }
    }
}

impl Default for MultiYearMultiplierPricing {
    fn default() -> Self {
        Self::new([Decimal::ONE, Decimal::new(19, 1), Decimal::new(27, 1)])
    }
}

impl DurationPricing for MultiYearMultiplierPricing {
    fn model(&self) -> PricingModel {
        PricingModel::MultiYearMultiplier
    }

    fn unit_factor(&self, years: DurationYears) -> Decimal {
        self.multipliers[years.index()]
    }

    fn billed_terms(&self, _years: DurationYears) -> u32 {
        1
    }
}
