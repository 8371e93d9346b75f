//! 转换结果：@match 与 @include 两组模式
//! 按插入顺序去重，顺序只为可读性

use indexmap::IndexSet;
use serde::Serialize;

use crate::pattern::validator::CATCH_ALL;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatternSet {
    pub matches: IndexSet<String>,
    pub includes: IndexSet<String>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 仅含 *://*/* 的结果
    pub fn catch_all() -> Self {
        let mut set = Self::new();
        set.add_match(CATCH_ALL);
        set
    }

    pub fn add_match(&mut self, pattern: impl Into<String>) {
        self.matches.insert(pattern.into());
    }

    pub fn add_include(&mut self, pattern: impl Into<String>) {
        self.includes.insert(pattern.into());
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty() && self.includes.is_empty()
    }

    pub fn has_catch_all(&self) -> bool {
        self.matches.contains(CATCH_ALL)
    }

    /// 含 *://*/* 时其余模式都被覆盖，只保留它
    pub fn collapse_catch_all(&mut self) -> bool {
        if !self.has_catch_all() {
            return false;
        }
        *self = Self::catch_all();
        true
    }

    /// 能转为 match 的 include 移入 matches，其余保留
    pub fn promote_includes<F>(&mut self, mut to_match: F) -> usize
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut promoted = 0;
        let mut remaining = IndexSet::with_capacity(self.includes.len());

        for include in std::mem::take(&mut self.includes) {
            match to_match(&include) {
                Some(pattern) => {
                    self.matches.insert(pattern);
                    promoted += 1;
                }
                None => {
                    remaining.insert(include);
                }
            }
        }

        self.includes = remaining;
        promoted
    }
}
