//! 领域层
//!
//! 授权类型价目、年限计价模型、订单行与订单、中文大写金额

pub mod duration;
pub mod engine;
pub mod license;
pub mod line_item;
pub mod numerals;
pub mod order;

pub use duration::*;
pub use engine::*;
pub use license::*;
pub use line_item::*;
pub use numerals::*;
pub use order::*;
