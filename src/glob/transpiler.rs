//! 正则 -> Glob 转换器
//! 只处理实际常见的正则子集；无法完全消除的语法一律拒绝，不输出近似结果

use super::expander::expand_alternations;
use super::passes::{collapse_wildcards, RewritePass};
use crate::error::{ConvertError, ConvertResult};
use crate::utils::log_debug;

// 展开后仍残留这些字符说明无法转换
const RESIDUAL_SYNTAX: [char; 4] = ['(', ')', '|', '\\'];

/// 正则转 Glob
pub struct RegexToGlobTranspiler;

impl RegexToGlobTranspiler {
    /// 返回空列表表示无法转换
    pub fn to_globs(pattern: &str) -> Vec<String> {
        Self::try_to_globs(pattern).unwrap_or_default()
    }

    pub fn try_to_globs(pattern: &str) -> ConvertResult<Vec<String>> {
        let rewritten = RewritePass::ALL
            .iter()
            .fold(pattern.to_string(), |acc, pass| pass.apply(&acc));

        let branches: Vec<String> = expand_alternations(&rewritten)
            .ok_or_else(|| ConvertError::UnconvertibleRegex(pattern.to_string()))?
            .iter()
            .map(|b| collapse_wildcards(b))
            .collect();

        if branches.iter().any(|b| b.contains(RESIDUAL_SYNTAX)) {
            log_debug!("regexp not convertible, residual syntax: {} -> {:?}", pattern, branches);
            return Err(ConvertError::UnconvertibleRegex(pattern.to_string()));
        }

        let globs: Vec<String> = branches.into_iter().filter(|b| !b.is_empty()).collect();
        if globs.is_empty() {
            return Err(ConvertError::UnconvertibleRegex(pattern.to_string()));
        }

        log_debug!("regexp {} -> globs {:?}", pattern, globs);
        Ok(globs)
    }
}
