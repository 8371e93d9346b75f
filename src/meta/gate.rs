//! 元数据门禁
//! 必须有 ==UserStyle== 元数据块；checkbox 变量、less/stylus 预处理器变量、多段 @-moz-document 都不转换

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ConvertError, ConvertResult};
use crate::utils::log_debug;

static METADATA_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)==UserStyle==(.+?)==/UserStyle==").unwrap()
});
static CHECKBOX_VARIABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@(var|advanced)\s+checkbox").unwrap()
});
static VARIABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@(var|advanced)\s+\S+").unwrap()
});
// @type 是部分 UserStyle 使用的写法
static VARIABLE_PREPROCESSOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)@(preprocessor|type)\s+(less|stylus)\s").unwrap()
});
pub(crate) static SECTION_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@-moz-document|@document").unwrap()
});

/// 元数据门禁
pub struct MetadataGate;

impl MetadataGate {
    pub fn eligible(text: &str) -> bool {
        Self::check(text).is_ok()
    }

    /// 返回不可转换的原因
    pub fn check(text: &str) -> ConvertResult<()> {
        let result = Self::check_inner(text);
        if let Err(e) = &result {
            log_debug!("UserStyle not eligible: {}", e);
        }
        result
    }

    fn check_inner(text: &str) -> ConvertResult<()> {
        let meta = Self::metadata(text).ok_or(ConvertError::MissingMetadata)?;

        if CHECKBOX_VARIABLE.is_match(meta) {
            return Err(ConvertError::CheckboxVariable);
        }
        // less/stylus 自己消费 @var
        if VARIABLE.is_match(meta) && VARIABLE_PREPROCESSOR.is_match(meta) {
            return Err(ConvertError::PreprocessorVariables);
        }

        let sections = Self::section_count(text);
        if sections > 2 {
            return Err(ConvertError::MultipleSections(sections));
        }

        Ok(())
    }

    /// ==UserStyle== 与 ==/UserStyle== 之间的内容
    pub fn metadata(text: &str) -> Option<&str> {
        METADATA_BLOCK
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// 按 @-moz-document / @document 切分后的段数
    pub fn section_count(text: &str) -> usize {
        SECTION_KEYWORD.split(text).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(meta: &str, body: &str) -> String {
        format!("/* ==UserStyle==\n@name Test\n{meta}\n==/UserStyle== */\n{body}")
    }

    #[test]
    fn test_missing_metadata() {
        assert!(matches!(
            MetadataGate::check("a { color: red; }"),
            Err(ConvertError::MissingMetadata)
        ));
        assert!(!MetadataGate::eligible("/* ==UserStyle====/UserStyle== */"));
    }

    #[test]
    fn test_case_insensitive_markers() {
        let text = "/* ==userstyle==\n@name x\n==/USERSTYLE== */";
        assert_eq!(MetadataGate::metadata(text), Some("\n@name x\n"));
        assert!(MetadataGate::eligible(text));
    }

    #[test]
    fn test_checkbox_rejected() {
        let text = style("@var checkbox dark \"Dark\" 1", "a {}");
        assert!(matches!(MetadataGate::check(&text), Err(ConvertError::CheckboxVariable)));
        let text = style("@advanced  checkbox dark \"Dark\" 1", "a {}");
        assert!(!MetadataGate::eligible(&text));
    }

    #[test]
    fn test_preprocessor_variables_rejected() {
        let text = style("@preprocessor stylus\n@var color bg \"Bg\" #fff", "a {}");
        assert!(matches!(MetadataGate::check(&text), Err(ConvertError::PreprocessorVariables)));
        let text = style("@type LESS\n@advanced text w \"W\" 10px", "a {}");
        assert!(!MetadataGate::eligible(&text));
    }

    #[test]
    fn test_variables_without_preprocessor_allowed() {
        let text = style("@var color bg \"Bg\" #fff", "a {}");
        assert!(MetadataGate::eligible(&text));
        let text = style("@preprocessor less", "a {}");
        assert!(MetadataGate::eligible(&text));
    }

    #[test]
    fn test_multiple_sections_rejected() {
        let body = "@-moz-document domain(\"a.com\") { a {} }\n@document domain(\"b.com\") { b {} }";
        let text = style("", body);
        assert_eq!(MetadataGate::section_count(&text), 3);
        assert!(matches!(MetadataGate::check(&text), Err(ConvertError::MultipleSections(3))));
    }

    #[test]
    fn test_single_section_allowed() {
        let text = style("", "@-moz-document domain(\"a.com\") { a {} }");
        assert_eq!(MetadataGate::section_count(&text), 2);
        assert!(MetadataGate::eligible(&text));
    }
}
