//! dify-adapter-http - REST 后端适配器

mod remote;

pub use remote::*;
