//! 输出模块：CSS 美化与 UserCSS 元数据写入
pub mod beautifier;
pub mod emitter;

pub use self::beautifier::{CssBeautifier, NoopBeautifier, LightningBeautifier};
pub use self::emitter::{normalize_source, Emitter, UNKNOWN_SOURCE};
