//! UserCSS 输出
//! 元数据标记改为 ==UserCSS==，并在结束标记前写入 @compatible / @converted-from / @match / @include

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use url::Url;

use super::beautifier::CssBeautifier;
use crate::config::ConvertConfig;
use crate::error::ConvertResult;
use crate::rule::PatternSet;

static OPEN_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)==UserStyle==").unwrap());
static CLOSE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)==/UserStyle==").unwrap());

// 元数据键对齐宽度
const KEY_WIDTH: usize = 18;
/// 调用方未给出来源时 @converted-from 的值
pub const UNKNOWN_SOURCE: &str = "unknown";

pub struct Emitter<'a> {
    config: &'a ConvertConfig,
    beautifier: &'a dyn CssBeautifier,
}

impl<'a> Emitter<'a> {
    pub fn new(config: &'a ConvertConfig, beautifier: &'a dyn CssBeautifier) -> Self {
        Self { config, beautifier }
    }

    pub fn emit(&self, text: &str, patterns: &PatternSet, converted_from: Option<&str>) -> String {
        let body = if self.config.beautify {
            self.beautifier.beautify(text, &self.config.beautify_options)
        } else {
            text.to_string()
        };

        let directives = self.directives(patterns, converted_from);
        let body = OPEN_MARKER.replace(&body, "==UserCSS==");
        CLOSE_MARKER
            .replace(&body, NoExpand(&format!("{directives}\n==/UserCSS==")))
            .into_owned()
    }

    /// 每行以换行开头
    pub fn directives(&self, patterns: &PatternSet, converted_from: Option<&str>) -> String {
        let mut out = String::new();
        push_directive(&mut out, "@compatible", &self.config.compatible);
        let source = converted_from
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SOURCE);
        push_directive(&mut out, "@converted-from", source);
        for pattern in &patterns.matches {
            push_directive(&mut out, "@match", pattern);
        }
        for pattern in &patterns.includes {
            push_directive(&mut out, "@include", pattern);
        }
        out
    }
}

/// 校验并规范化 @converted-from 来源地址
pub fn normalize_source(source: &str) -> ConvertResult<String> {
    Ok(Url::parse(source.trim())?.to_string())
}

fn push_directive(out: &mut String, key: &str, value: &str) {
    out.push('\n');
    out.push_str(&format!("{key:<width$}{value}", width = KEY_WIDTH));
}
