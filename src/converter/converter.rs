//! UserStyle -> UserCSS 转换器核心
//! 无状态：converted-from 按次传入，同一实例可并发使用

use serde::Serialize;

use crate::config::ConvertConfig;
use crate::document::DocumentRuleExtractor;
use crate::emit::{CssBeautifier, Emitter, LightningBeautifier};
use crate::error::{ConvertError, ConvertResult};
use crate::meta::MetadataGate;
use crate::rule::{PatternSet, RuleToPatternConverter, ScopingRule};
use crate::utils::log_debug;

/// 转换结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    pub text: String,
    pub patterns: PatternSet,
}

/// 转换器
pub struct UserStyleConverter {
    config: ConvertConfig,
    beautifier: Box<dyn CssBeautifier>,
}

impl Default for UserStyleConverter {
    fn default() -> Self {
        Self::new(ConvertConfig::default())
    }
}

impl std::fmt::Debug for UserStyleConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStyleConverter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl UserStyleConverter {
    pub fn new(config: ConvertConfig) -> Self {
        Self {
            config,
            beautifier: Box::new(LightningBeautifier),
        }
    }

    /// 替换 CSS 美化器
    pub fn with_beautifier(mut self, beautifier: impl CssBeautifier + 'static) -> Self {
        self.beautifier = Box::new(beautifier);
        self
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// 转换并给出拒绝原因
    pub fn convert(&self, text: &str, converted_from: Option<&str>) -> ConvertResult<Conversion> {
        // 1. 元数据门禁
        MetadataGate::check(text)?;

        // 2. 拆出 @-moz-document 规则
        let document = DocumentRuleExtractor::extract(text)?;

        // 3. 规则 -> @match / @include
        let patterns = match document.rule.as_deref() {
            None => {
                // 已有 @match/@include 的全局样式不再扩大到所有网址
                if document.has_match_directives() || !self.config.infer_catch_all {
                    PatternSet::new()
                } else {
                    PatternSet::catch_all()
                }
            }
            Some(rule_list) => {
                let rule = ScopingRule::parse(rule_list);
                if rule.is_empty() {
                    return Err(ConvertError::UnparseableRule);
                }
                log_debug!("scoping functions: {:?}", rule.calls);

                let patterns = RuleToPatternConverter::convert_rule(&rule);
                if patterns.is_empty() {
                    return Err(ConvertError::UntranslatablePattern);
                }
                patterns
            }
        };
        log_debug!(
            "patterns: {} @match, {} @include",
            patterns.matches.len(),
            patterns.includes.len()
        );

        // 4. 输出
        let emitter = Emitter::new(&self.config, self.beautifier.as_ref());
        let text = emitter.emit(&document.into_text(), &patterns, converted_from);

        Ok(Conversion { text, patterns })
    }

    /// 不可转换时返回 None，原文档保持不变
    pub fn process(&self, text: &str, converted_from: Option<&str>) -> Option<String> {
        self.convert(text, converted_from).ok().map(|c| c.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use crate::emit::NoopBeautifier;

    const STYLE: &str = "/* ==UserStyle==
@name        Example Dark
@namespace   example
@version     1.0.0
@updateURL   https://userstyles.world/api/style/1.user.css
==/UserStyle== */
@-moz-document domain(\"www.example.com\"), url-prefix(\"http://localhost:3000\") {
  body{background:#000;color:#eee}
}
";

    #[test]
    fn test_full_conversion() {
        let converter = UserStyleConverter::default();
        let conversion = converter
            .convert(STYLE, Some("https://userstyles.world/style/1"))
            .unwrap();

        assert_eq!(
            conversion.text,
            "/* ==UserCSS==
@name        Example Dark
@namespace   example
@version     1.0.0

@compatible       FireMonkey
@converted-from   https://userstyles.world/style/1
@match            *://*.example.com/*
@include          http://localhost:3000/*
==/UserCSS== */
body {
  background: #000;
  color: #eee;
}
"
        );
        assert_eq!(conversion.patterns.matches.len(), 1);
        assert_eq!(conversion.patterns.includes.len(), 1);
    }

    #[test]
    fn test_conversion_serializes_patterns() {
        let conversion = UserStyleConverter::default().convert(STYLE, None).unwrap();
        let value = serde_json::to_value(&conversion).unwrap();
        assert_eq!(value["patterns"]["matches"][0], "*://*.example.com/*");
        assert_eq!(value["patterns"]["includes"][0], "http://localhost:3000/*");
        assert!(value["text"].as_str().unwrap().starts_with("/* ==UserCSS=="));
    }

    #[test]
    fn test_global_style_gets_catch_all() {
        let text = "/* ==UserStyle==\n@name x\n==/UserStyle== */\na { color: red; }";
        let conversion = UserStyleConverter::default().convert(text, None).unwrap();
        assert_eq!(conversion.patterns, PatternSet::catch_all());
        assert!(conversion.text.contains("@match            *://*/*"));
        assert!(conversion.text.contains("@converted-from   unknown"));
    }

    #[test]
    fn test_global_style_without_inference() {
        let config = ConfigManager::custom().infer_catch_all(false).build();
        let text = "/* ==UserStyle==\n@name x\n==/UserStyle== */\na { color: red; }";
        let conversion = UserStyleConverter::new(config).convert(text, None).unwrap();
        assert!(conversion.patterns.is_empty());
    }

    #[test]
    fn test_global_style_with_existing_match() {
        let text = "/* ==UserStyle==\n@name x\n@match https://example.com/*\n==/UserStyle== */\na { color: red; }";
        let conversion = UserStyleConverter::default().convert(text, None).unwrap();
        assert!(conversion.patterns.is_empty());
        assert!(!conversion.text.contains("*://*/*"));
    }

    #[test]
    fn test_rule_without_functions() {
        let text = "/* ==UserStyle==\n@name x\n==/UserStyle== */\n@-moz-document media(\"screen\") { a {} }";
        assert!(matches!(
            UserStyleConverter::default().convert(text, None),
            Err(ConvertError::UnparseableRule)
        ));
    }

    #[test]
    fn test_untranslatable_rule() {
        let text = "/* ==UserStyle==\n@name x\n==/UserStyle== */\n@-moz-document regexp(\"chrome-extension://.*\") { a {} }";
        assert!(matches!(
            UserStyleConverter::default().convert(text, None),
            Err(ConvertError::UntranslatablePattern)
        ));
    }

    #[test]
    fn test_custom_beautifier_and_label() {
        let config = ConfigManager::custom().compatible("Stylus").build();
        let converter = UserStyleConverter::new(config).with_beautifier(NoopBeautifier);
        let text = "/* ==UserStyle==\n@name x\n==/UserStyle== */\n@-moz-document domain(\"a.com\") {a{b:c}}";
        let out = converter.process(text, None).unwrap();
        assert!(out.contains("@compatible       Stylus"));
        assert!(out.ends_with("==/UserCSS== */\na{b:c}"));
    }
}
