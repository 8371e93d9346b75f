//! 文档模块：拆出 @-moz-document 规则与其包裹的 CSS
pub mod extractor;

pub use self::extractor::{DocumentRuleExtractor, ExtractedDocument};
