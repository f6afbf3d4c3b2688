//! ports - 抽象 trait 层
//!
//! 会话存储与数据源的抽象接口

mod data_source;
mod session_store;

pub use data_source::*;
pub use session_store::*;
