//! dify-adapter-fixture - 样例数据源
//!
//! 用于演示与测试环境，只能通过配置显式启用。

mod fixture;

pub use fixture::*;
