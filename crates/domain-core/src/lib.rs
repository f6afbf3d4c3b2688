//! domain-core - 跨模块共享的领域值对象
//!
//! 报价与合同文本共用的金额类型

mod money;

pub use money::*;

pub use rust_decimal::Decimal;
