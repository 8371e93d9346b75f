//! 规则模块：@-moz-document 作用域规则的数据模型与转换
pub mod model;
pub mod pattern_set;
pub mod converter;

// 导出核心接口
pub use self::model::{RuleCall, RuleFunction, ScopingRule};
pub use self::pattern_set::PatternSet;
pub use self::converter::RuleToPatternConverter;
