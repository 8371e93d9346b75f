//! 全局配置管理,存储转换器的可配置项
//! 注意：converted-from 来源地址按次传入，不属于配置

use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::error::ConvertResult;

/// CSS 美化选项（传递给外部美化器）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeautifyOptions {
    // 缩进空格数
    pub indent_size: usize,
}

impl Default for BeautifyOptions {
    fn default() -> Self {
        Self {
            indent_size: 2,
        }
    }
}

/// 转换配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    // @compatible 行的值
    pub compatible: String,
    // 是否美化 CSS 正文
    pub beautify: bool,
    pub beautify_options: BeautifyOptions,
    // 全局样式（无 @-moz-document）且无 @match/@include 时是否补 *://*/*
    pub infer_catch_all: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            compatible: "FireMonkey".to_string(),
            beautify: true,
            beautify_options: BeautifyOptions::default(),
            infer_catch_all: true,
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> ConvertConfig {
        ConvertConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> ConvertConfigBuilder {
        ConvertConfigBuilder::new()
    }

    /// 从 JSON 文件加载配置，缺省字段取默认值
    pub fn load_json(path: &Path) -> ConvertResult<ConvertConfig> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    pub fn from_json_str(data: &str) -> ConvertResult<ConvertConfig> {
        Ok(serde_json::from_str(data)?)
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct ConvertConfigBuilder {
    config: ConvertConfig,
}

impl ConvertConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ConvertConfig::default(),
        }
    }

    pub fn compatible(mut self, compatible: impl Into<String>) -> Self {
        self.config.compatible = compatible.into();
        self
    }

    pub fn beautify(mut self, beautify: bool) -> Self {
        self.config.beautify = beautify;
        self
    }

    pub fn beautify_options(mut self, options: BeautifyOptions) -> Self {
        self.config.beautify_options = options;
        self
    }

    pub fn infer_catch_all(mut self, infer: bool) -> Self {
        self.config.infer_catch_all = infer;
        self
    }

    pub fn build(self) -> ConvertConfig {
        self.config
    }
}
