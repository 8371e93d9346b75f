//! 正则改写步骤
//! 每一步都是独立的 &str -> String 变换，按 RewritePass::ALL 的顺序执行

use once_cell::sync::Lazy;
use regex::Regex;

static ASSERTIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(\?(=|!|<=|<!).+?\)").unwrap()
});
static SCHEME_STUTTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"http[^:]{2,}:").unwrap()
});
static QUANTIFIER_BRACES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{[^}]+\}").unwrap()
});
static OPTIONAL_GROUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\([^)]+\)\?").unwrap()
});
static CHAR_CLASS_REPEAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[[^\]]+\][+*]").unwrap()
});
static ESCAPED_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\+([/:])").unwrap()
});
static ESCAPED_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\+([.?])").unwrap()
});
static CLASS_ESCAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\\+[dws][+*]?").unwrap()
});

/// 改写步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewritePass {
    StripAnchors,
    DropAssertions,
    OpenNonCapturing,
    UnwrapPlainGroups,
    FoldScheme,
    QuantifierBraces,
    OptionalGroups,
    CharClassRepeats,
    PlusToStar,
    DotWildcards,
    UnescapeSeparators,
    UnescapeLiterals,
    ClassEscapes,
    CollapseWildcards,
}

impl RewritePass {
    /// 执行顺序
    pub const ALL: [RewritePass; 14] = [
        RewritePass::StripAnchors,
        RewritePass::DropAssertions,
        RewritePass::OpenNonCapturing,
        RewritePass::UnwrapPlainGroups,
        RewritePass::FoldScheme,
        RewritePass::QuantifierBraces,
        RewritePass::OptionalGroups,
        RewritePass::CharClassRepeats,
        RewritePass::PlusToStar,
        RewritePass::DotWildcards,
        RewritePass::UnescapeSeparators,
        RewritePass::UnescapeLiterals,
        RewritePass::ClassEscapes,
        RewritePass::CollapseWildcards,
    ];

    pub fn apply(self, s: &str) -> String {
        match self {
            RewritePass::StripAnchors => strip_anchors(s),
            RewritePass::DropAssertions => ASSERTIONS.replace_all(s, "").into_owned(),
            RewritePass::OpenNonCapturing => s.replace("(?:", "("),
            RewritePass::UnwrapPlainGroups => unwrap_plain_groups(s),
            RewritePass::FoldScheme => fold_scheme(s),
            RewritePass::QuantifierBraces => QUANTIFIER_BRACES.replace_all(s, "+").into_owned(),
            RewritePass::OptionalGroups => OPTIONAL_GROUP.replace_all(s, "*").into_owned(),
            RewritePass::CharClassRepeats => CHAR_CLASS_REPEAT.replace_all(s, "*").into_owned(),
            RewritePass::PlusToStar => s.replace('+', "*"),
            RewritePass::DotWildcards => dot_wildcards(s),
            RewritePass::UnescapeSeparators => ESCAPED_SEPARATOR.replace_all(s, "$1").into_owned(),
            RewritePass::UnescapeLiterals => ESCAPED_LITERAL.replace_all(s, "$1").into_owned(),
            RewritePass::ClassEscapes => CLASS_ESCAPE.replace_all(s, "*").into_owned(),
            RewritePass::CollapseWildcards => collapse_wildcards(s),
        }
    }
}

/// 去掉开头的 ^ 与结尾的 $
pub fn strip_anchors(s: &str) -> String {
    let s = s.strip_prefix('^').unwrap_or(s);
    s.strip_suffix('$').unwrap_or(s).to_string()
}

/// 不含 | 且后面不跟 ? 的分组，去掉括号
pub fn unwrap_plain_groups(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '(' {
            let mut j = i + 1;
            while j < chars.len() && chars[j] != ')' && chars[j] != '|' {
                j += 1;
            }
            let closed = j < chars.len() && chars[j] == ')' && j > i + 1;
            if closed && chars.get(j + 1) != Some(&'?') {
                out.extend(&chars[i + 1..j]);
                i = j + 1;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out
}

/// (http|https) / (https|http) / http. / https? 等统一为 http*
pub fn fold_scheme(s: &str) -> String {
    let s = s
        .replace("(http|https)", "http*")
        .replace("(https|http)", "http*")
        .replace("http.", "http*");
    SCHEME_STUTTER.replace_all(&s, "http*:").into_owned()
}

/// 未转义的 . 后跟 * 或 ? 时，去掉 .
pub fn dot_wildcards(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let escaped = i > 0 && chars[i - 1] == '\\';
        if c == '.' && !escaped {
            if let Some(&next @ ('*' | '?')) = chars.get(i + 1) {
                out.push(next);
                i += 2;
                continue;
            }
        }
        out.push(c);
        i += 1;
    }

    out
}

/// 连续的 * ? 只保留最后一个
pub fn collapse_wildcards(s: &str) -> String {
    let is_wildcard = |c: char| c == '*' || c == '?';
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if is_wildcard(c) && chars.peek().is_some_and(|&n| is_wildcard(n)) {
            continue;
        }
        out.push(c);
    }

    out
}
