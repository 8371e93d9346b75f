//! 正则转 Glob 模块：把 regexp() 中常见的正则子集改写为 @include 可用的 glob
pub mod passes;
pub mod expander;
pub mod transpiler;

pub use self::passes::RewritePass;
pub use self::expander::{expand_alternations, MAX_BRANCHES, MAX_EXPANSION_ROUNDS};
pub use self::transpiler::RegexToGlobTranspiler;
