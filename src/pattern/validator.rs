//! match pattern 合法性校验
//! 判断一个字符串能否作为 @match 使用的唯一依据

use once_cell::sync::Lazy;
use regex::Regex;

/// 所有 URL
pub const ALL_URLS: &str = "<all_urls>";
/// 最宽泛的匹配模式，覆盖其他一切模式
pub const CATCH_ALL: &str = "*://*/*";

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(https?|\*)://(\*|\*\.[^*:/]+|[^*:/]+)/.*$").unwrap()
});
static FILE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^file:///.+$").unwrap()
});

/// match pattern 校验器
pub struct MatchPatternValidator;

impl MatchPatternValidator {
    /// scheme 只能是 http/https/*，host 不能带端口，通配符只能出现在 host 开头
    pub fn is_valid_match_pattern(pattern: &str) -> bool {
        pattern == ALL_URLS || URL_PATTERN.is_match(pattern) || FILE_PATTERN.is_match(pattern)
    }
}
