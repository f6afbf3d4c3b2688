//! dify-adapter-storage - 本地会话存储适配器

mod error;
mod file;
mod memory;

pub use error::*;
pub use file::*;
pub use memory::*;
