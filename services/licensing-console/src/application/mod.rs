//! 应用层

pub mod commands;
pub mod quote_service;
pub mod session_service;

pub use commands::*;
pub use quote_service::*;
pub use session_service::*;
