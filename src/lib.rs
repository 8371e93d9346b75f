//! rsusercss - UserStyle（@-moz-document）到 UserCSS（@match/@include）转换工具

// 导出全局错误类型
pub use self::error::{ConvertError, ConvertResult};

// 导出配置模块
pub use self::config::{BeautifyOptions, ConfigManager, ConvertConfig, ConvertConfigBuilder};

// 导出各阶段核心接口
pub use self::meta::MetadataGate;
pub use self::document::{DocumentRuleExtractor, ExtractedDocument};
pub use self::rule::{PatternSet, RuleCall, RuleFunction, RuleToPatternConverter, ScopingRule};
pub use self::glob::RegexToGlobTranspiler;
pub use self::pattern::MatchPatternValidator;
pub use self::emit::{normalize_source, CssBeautifier, Emitter, LightningBeautifier, NoopBeautifier, UNKNOWN_SOURCE};

// 导出转换入口
pub use self::converter::{convert, default_converter, process, Conversion, UserStyleConverter};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod utils;
pub mod meta;
pub mod document;
pub mod rule;
pub mod glob;
pub mod pattern;
pub mod emit;
pub mod converter;
