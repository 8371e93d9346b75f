//! 匹配模式模块：浏览器 host permission 风格的 match pattern 校验
pub mod validator;

pub use self::validator::MatchPatternValidator;
