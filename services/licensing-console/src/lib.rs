//! Licensing Console Library
//!
//! 模块化架构：
//! - `domain`: 报价领域（授权类型价目、年限计价模型、订单、中文大写金额）
//! - `application`: 报价与订单提交用例、会话查询
//! - `infrastructure`: 按配置装配会话存储与数据源

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
