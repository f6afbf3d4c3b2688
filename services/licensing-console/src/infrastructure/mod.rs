//! 基础设施层：按配置装配会话存储与数据源

mod data_source;
mod session_store;

pub use data_source::*;
pub use session_store::*;
