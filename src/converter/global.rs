//! 默认转换器（进程内共享，只读）
use once_cell::sync::Lazy;

use super::converter::{Conversion, UserStyleConverter};
use crate::error::ConvertResult;

static DEFAULT_CONVERTER: Lazy<UserStyleConverter> = Lazy::new(UserStyleConverter::default);

/// 获取默认配置的转换器
pub fn default_converter() -> &'static UserStyleConverter {
    &DEFAULT_CONVERTER
}

/// 转换 UserStyle，不可转换时返回 None
pub fn process(text: &str, converted_from: Option<&str>) -> Option<String> {
    DEFAULT_CONVERTER.process(text, converted_from)
}

/// 转换 UserStyle 并返回模式集合或拒绝原因
pub fn convert(text: &str, converted_from: Option<&str>) -> ConvertResult<Conversion> {
    DEFAULT_CONVERTER.convert(text, converted_from)
}
