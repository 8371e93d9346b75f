//! 转换模块：串联门禁、规则提取、模式转换与输出
pub mod converter;
pub mod global;

// 导出核心接口
pub use self::converter::{Conversion, UserStyleConverter};
pub use self::global::{convert, default_converter, process};
