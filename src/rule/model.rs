//! 作用域规则数据模型
//! @-moz-document url(...), url-prefix(...), domain(...), regexp(...)

use std::fmt;
use std::str::FromStr;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ConvertError;

static RULE_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(url|url-prefix|domain|regexp)\s*\(['"]([^'"]+)['"]\)"#).unwrap()
});

/// 作用域函数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleFunction {
    Url,
    UrlPrefix,
    Domain,
    Regexp,
}

impl RuleFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleFunction::Url => "url",
            RuleFunction::UrlPrefix => "url-prefix",
            RuleFunction::Domain => "domain",
            RuleFunction::Regexp => "regexp",
        }
    }
}

impl FromStr for RuleFunction {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "url" => Ok(RuleFunction::Url),
            "url-prefix" => Ok(RuleFunction::UrlPrefix),
            "domain" => Ok(RuleFunction::Domain),
            "regexp" => Ok(RuleFunction::Regexp),
            other => Err(ConvertError::InvalidInput(format!("unknown scoping function: {}", other))),
        }
    }
}

impl fmt::Display for RuleFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个函数调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCall {
    pub function: RuleFunction,
    pub value: String,
}

impl RuleCall {
    pub fn new(function: RuleFunction, value: impl Into<String>) -> Self {
        Self {
            function,
            value: value.into(),
        }
    }

    /// 从一段文本中找出第一个带引号参数的函数调用
    pub fn find(text: &str) -> Option<Self> {
        let caps = RULE_CALL.captures(text)?;
        let function = caps.get(1)?.as_str().parse().ok()?;
        let value = caps.get(2)?.as_str();
        Some(Self::new(function, value))
    }
}

impl fmt::Display for RuleCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(\"{}\")", self.function, self.value)
    }
}

/// @-moz-document 的规则列表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopingRule {
    pub calls: Vec<RuleCall>,
}

impl ScopingRule {
    /// 解析规则列表，无法取出参数的片段直接跳过
    pub fn parse(text: &str) -> Self {
        let calls = split_calls(text)
            .into_iter()
            .filter_map(RuleCall::find)
            .collect();
        Self { calls }
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

/// 按顶层逗号切分：逗号前（允许空白）紧跟 ) 才算分隔符
pub fn split_calls(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if ch == ',' && text[start..idx].trim_end().ends_with(')') {
            pieces.push(&text[start..idx]);
            start = idx + 1;
        }
    }
    pieces.push(&text[start..]);

    pieces
}
