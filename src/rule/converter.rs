//! 作用域规则 -> @match / @include 转换
//! 合法的 match pattern 进 matches，带端口等无法作为 match 的进 includes

use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{RuleCall, RuleFunction, ScopingRule};
use super::pattern_set::PatternSet;
use crate::glob::RegexToGlobTranspiler;
use crate::pattern::MatchPatternValidator;
use crate::pattern::validator::CATCH_ALL;
use crate::utils::log_debug;

static ABSOLUTE_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://.+").unwrap());
// match pattern 的 host 不能带端口
static URL_PORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://[^/]+:\d+").unwrap());
static SLASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"/+").unwrap());
// 扩展内部页面（chrome-extension:// moz-extension:// 等），不可移植
static EXTENSION_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^:]+-extension:").unwrap());

/// 规则转换器
pub struct RuleToPatternConverter;

impl RuleToPatternConverter {
    /// 转换规则列表文本
    pub fn convert(rule_list: &str) -> PatternSet {
        Self::convert_rule(&ScopingRule::parse(rule_list))
    }

    pub fn convert_rule(rule: &ScopingRule) -> PatternSet {
        let mut set = PatternSet::new();
        for call in &rule.calls {
            Self::convert_call(call, &mut set);
        }

        let promoted = set.promote_includes(Self::include_to_match);
        if promoted > 0 {
            log_debug!("promoted {} include pattern(s) to @match", promoted);
        }

        if set.collapse_catch_all() {
            log_debug!("catch-all {} present, other patterns dropped", CATCH_ALL);
        }

        set
    }

    /// 单个函数调用分类
    pub fn convert_call(call: &RuleCall, set: &mut PatternSet) {
        let value = call.value.as_str();
        match call.function {
            RuleFunction::Url => {
                if !is_absolute_url(value) {
                    return;
                }
                if has_port(value) {
                    set.add_include(value);
                } else {
                    set.add_match(value);
                }
            }

            RuleFunction::UrlPrefix => {
                if !is_absolute_url(value) {
                    return;
                }
                match (has_port(value), has_path(value)) {
                    (true, true) => set.add_include(format!("{value}*")),
                    (true, false) => set.add_include(format!("{value}/*")),
                    (false, true) => set.add_match(format!("{value}*")),
                    // 只有 host 的前缀对 match 来说太宽，降级为 include
                    (false, false) => set.add_include(format!("{value}*/*")),
                }
            }

            RuleFunction::Domain => {
                // 子域名已由 *. 覆盖
                let domain = value.strip_prefix("www.").unwrap_or(value);
                if !domain.contains('*') {
                    set.add_match(format!("*://*.{domain}/*"));
                }
            }

            RuleFunction::Regexp => match value {
                _ if EXTENSION_SCHEME.is_match(value) => {
                    log_debug!("extension-internal regexp dropped: {}", value);
                }
                ".*" | ".+" => set.add_match(CATCH_ALL),
                "http:.*" | "http:.+" => set.add_match("http://*/*"),
                "https:.*" | "https:.+" => set.add_match("https://*/*"),
                _ => {
                    for glob in RegexToGlobTranspiler::to_globs(value) {
                        set.add_include(glob);
                    }
                }
            },
        }
    }

    /// include 能否作为 match：http*: 改为 *:，缺路径补 /，再做合法性校验
    pub fn include_to_match(include: &str) -> Option<String> {
        let mut candidate = match include.strip_prefix("http*:") {
            Some(rest) => format!("*:{rest}"),
            None => include.to_string(),
        };
        if !has_path(&candidate) {
            candidate.push('/');
        }

        MatchPatternValidator::is_valid_match_pattern(&candidate).then_some(candidate)
    }
}

fn is_absolute_url(value: &str) -> bool {
    ABSOLUTE_URL.is_match(value) && !value.contains('*')
}

fn has_port(value: &str) -> bool {
    URL_PORT.is_match(value)
}

/// 按 / 切分超过两段（scheme + host + path）
fn has_path(value: &str) -> bool {
    SLASHES.split(value).count() > 2
}
