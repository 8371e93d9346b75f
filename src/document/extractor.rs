//! @-moz-document 规则提取器
//! 不是完整的 CSS 解析器，只处理单段作用域的常见写法

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ConvertError, ConvertResult};
use crate::meta::gate::SECTION_KEYWORD;
use crate::utils::{log_debug, preview_compact};

static UPDATE_URL_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)@(downloadURL|installURL|updateURL)\s.+[\r\n]+").unwrap()
});
static MATCH_DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@(match|include)\s+\S+").unwrap()
});
// 规则列表到第一个后面紧跟 { 的 )，CSS 到文档最后一个 }
static DOCUMENT_RULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)(?:@-moz-document|@document)(\s.+?\))\s*\{(.+)\}").unwrap()
});
static EMPTY_RULE_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+\}").unwrap());
static RULE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\s/\*.*?\*/\s").unwrap());

/// 提取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    // 作用域规则之前的文本（含元数据块）
    pub preamble: String,
    // 规则列表文本（已去注释），全局样式为 None
    pub rule: Option<String>,
    // 规则包裹的 CSS 及其后的文本
    pub body: String,
}

impl ExtractedDocument {
    pub fn is_global(&self) -> bool {
        self.rule.is_none()
    }

    /// 全局样式是否已经声明了 @match/@include
    pub fn has_match_directives(&self) -> bool {
        MATCH_DIRECTIVE.is_match(&self.preamble) || MATCH_DIRECTIVE.is_match(&self.body)
    }

    /// 拼回样式表；拆出过规则时补齐缺失的 }
    pub fn into_text(self) -> String {
        let repair = !self.is_global();
        let mut text = self.preamble;
        text.push_str(&self.body);
        if repair {
            balance_braces(&mut text);
        }
        text
    }
}

/// 规则提取器
pub struct DocumentRuleExtractor;

impl DocumentRuleExtractor {
    pub fn extract(text: &str) -> ConvertResult<ExtractedDocument> {
        let text = Self::strip_update_urls(text);

        if Self::is_global(&text) {
            return Ok(ExtractedDocument {
                preamble: text,
                rule: None,
                body: String::new(),
            });
        }

        let caps = DOCUMENT_RULE.captures(&text).ok_or(ConvertError::UnparseableRule)?;
        let (Some(whole), Some(rule), Some(css)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            return Err(ConvertError::UnparseableRule);
        };

        let rule = Self::strip_rule_comments(rule.as_str()).trim().to_string();
        // 空规则块 { } 残留的 }
        let css = EMPTY_RULE_CLOSE.replace(css.as_str(), "");
        log_debug!("scoping rule: {}", preview_compact(&rule, 120));

        let mut body = css.into_owned();
        body.push_str(&text[whole.end()..]);

        Ok(ExtractedDocument {
            preamble: text[..whole.start()].to_string(),
            rule: Some(rule),
            body,
        })
    }

    /// 去掉 @downloadURL / @installURL / @updateURL 行
    pub fn strip_update_urls(text: &str) -> String {
        UPDATE_URL_LINE.replace_all(text, "").into_owned()
    }

    /// 没有 @-moz-document 段（或关键字后为空）即全局样式
    pub fn is_global(text: &str) -> bool {
        SECTION_KEYWORD
            .split(text)
            .nth(1)
            .is_none_or(|segment| segment.is_empty())
    }

    /// 被注释掉的规则分支不参与转换
    pub fn strip_rule_comments(rule: &str) -> String {
        RULE_COMMENT.replace_all(rule, " ").into_owned()
    }
}

/// { 多于 } 时补一个 }
fn balance_braces(text: &mut String) {
    let open = text.matches('{').count();
    let close = text.matches('}').count();
    if open > close {
        text.push('}');
    }
}
