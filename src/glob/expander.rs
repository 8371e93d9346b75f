//! 管道分组展开
//! before(a|b|c)after -> beforeaafter / beforebafter / beforecafter
//! 以工作队列逐轮（广度优先）展开，轮数与分支数都有上限

use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils::log_debug;

/// 最多展开轮数，防止病态输入导致分支爆炸
pub const MAX_EXPANSION_ROUNDS: usize = 5;
/// 分支总数上限，超过则整个正则视为无法转换
pub const MAX_BRANCHES: usize = 256;

// 含 | 且无嵌套括号的分组
static ALTERNATION_GROUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\([^)]+\|[^)]+\)").unwrap()
});
static FIRST_GROUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(.*?)\((.+?)\)(.*)").unwrap()
});

pub fn has_alternation(s: &str) -> bool {
    ALTERNATION_GROUP.is_match(s)
}

/// 展开第一个分组；没有分组时原样返回
pub fn expand_first_group(s: &str) -> Vec<String> {
    let Some(caps) = FIRST_GROUP.captures(s) else {
        return vec![s.to_string()];
    };
    let (Some(before), Some(inner), Some(after)) = (caps.get(1), caps.get(2), caps.get(3)) else {
        return vec![s.to_string()];
    };

    let before = &s[..before.end()];
    let after = &s[after.start()..];
    inner
        .as_str()
        .split('|')
        .map(|alt| format!("{before}{alt}{after}"))
        .collect()
}

/// 逐轮展开所有分支，直到不再含管道分组或达到轮数上限
/// 分支数超过 MAX_BRANCHES 时返回 None
pub fn expand_alternations(s: &str) -> Option<Vec<String>> {
    let mut branches = vec![s.to_string()];
    let mut rounds = 0;

    while rounds < MAX_EXPANSION_ROUNDS && branches.iter().any(|b| has_alternation(b)) {
        let mut next = Vec::with_capacity(branches.len() * 2);
        for branch in &branches {
            next.extend(expand_first_group(branch));
            if next.len() > MAX_BRANCHES {
                log_debug!("alternation expansion exceeds {} branches: {}", MAX_BRANCHES, s);
                return None;
            }
        }
        branches = next;
        rounds += 1;
    }

    Some(branches)
}
