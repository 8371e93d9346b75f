//! 全局错误类型定义
//! 转换拒绝（输入不可转换）与基础错误（IO/JSON/URL）统一在一个枚举中

use thiserror::Error;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum ConvertError {
    // 元数据门禁拒绝
    #[error("no ==UserStyle== metadata block")]
    MissingMetadata,
    #[error("@var/@advanced checkbox has no UserCSS equivalent")]
    CheckboxVariable,
    #[error("@var/@advanced used together with a less/stylus preprocessor")]
    PreprocessorVariables,
    #[error("document has {0} sections, only a single @-moz-document section can be converted")]
    MultipleSections(usize),

    // 规则转换拒绝
    #[error("no recognizable @-moz-document rule")]
    UnparseableRule,
    #[error("no scoping function could be translated into @match/@include")]
    UntranslatablePattern,
    #[error("regular expression cannot be expressed as a glob: {0}")]
    UnconvertibleRegex(String),

    // 基础错误
    #[error("IO operation failed: {0}")]
    Io(#[from] IoError),
    #[error("JSON parse failed: {0}")]
    Json(#[from] SerdeJsonError),
    #[error("URL parse failed: {0}")]
    UrlError(#[from] UrlParseError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ConvertError {
    /// 是否属于"不可转换"类拒绝（而非IO等基础错误）
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            ConvertError::MissingMetadata
                | ConvertError::CheckboxVariable
                | ConvertError::PreprocessorVariables
                | ConvertError::MultipleSections(_)
                | ConvertError::UnparseableRule
                | ConvertError::UntranslatablePattern
                | ConvertError::UnconvertibleRegex(_)
        )
    }
}

// 全局Result类型
pub type ConvertResult<T> = Result<T, ConvertError>;
