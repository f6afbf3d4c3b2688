//! common - 通用类型

pub mod resource;
pub mod types;

pub use resource::*;
pub use types::*;
