//! CSS 美化器
//! 转换核心只依赖 CssBeautifier trait；默认实现 LightningBeautifier 基于 lightningcss：
//! 元数据注释原样保留，其后的 CSS 解析后以非压缩模式重新输出，解析失败时原样返回

use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{ParserOptions, StyleSheet};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::BeautifyOptions;
use crate::utils::log_debug;

// 元数据块（含其所在注释）及之前的全部内容
static METADATA_HEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^.*?==/User(?:Style|CSS)==.*?\*/").unwrap()
});

// lightningcss 固定使用两个空格缩进
const PRINTER_INDENT: usize = 2;

/// 外部美化器接口
pub trait CssBeautifier: Send + Sync {
    fn beautify(&self, css: &str, options: &BeautifyOptions) -> String;
}

/// 原样输出
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBeautifier;

impl CssBeautifier for NoopBeautifier {
    fn beautify(&self, css: &str, _options: &BeautifyOptions) -> String {
        css.to_string()
    }
}

/// 基于 lightningcss 的美化器
#[derive(Debug, Clone, Copy, Default)]
pub struct LightningBeautifier;

impl CssBeautifier for LightningBeautifier {
    fn beautify(&self, css: &str, options: &BeautifyOptions) -> String {
        let (head, rest) = split_metadata(css);

        let printed = match print_stylesheet(rest) {
            Ok(printed) => printed,
            Err(e) => {
                log_debug!("beautify skipped, CSS not parsed: {}", e);
                return css.to_string();
            }
        };
        let printed = reindent(printed.trim(), options.indent_size);

        match (head.trim_end(), printed.is_empty()) {
            ("", _) => format!("{printed}\n"),
            (head, true) => format!("{head}\n"),
            (head, false) => format!("{head}\n{printed}\n"),
        }
    }
}

/// 拆出元数据注释；lightningcss 输出时会丢弃普通注释
fn split_metadata(css: &str) -> (&str, &str) {
    match METADATA_HEAD.find(css) {
        Some(m) => css.split_at(m.end()),
        None => ("", css),
    }
}

fn print_stylesheet(css: &str) -> Result<String, String> {
    let sheet = StyleSheet::parse(css, ParserOptions::default()).map_err(|e| e.to_string())?;
    let result = sheet
        .to_css(PrinterOptions { minify: false, ..PrinterOptions::default() })
        .map_err(|e| e.to_string())?;
    Ok(result.code)
}

/// 行首缩进按 indent_size 重新换算
fn reindent(css: &str, indent_size: usize) -> String {
    if indent_size == PRINTER_INDENT {
        return css.to_string();
    }
    css.lines()
        .map(|line| {
            let body = line.trim_start_matches(' ');
            let depth = (line.len() - body.len()) / PRINTER_INDENT;
            format!("{}{body}", " ".repeat(depth * indent_size))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beautify(css: &str) -> String {
        LightningBeautifier.beautify(css, &BeautifyOptions::default())
    }

    #[test]
    fn test_declarations_one_per_line() {
        let out = beautify("a{color:red;margin:0}");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "a {");
        assert!(lines[1].starts_with("  color: red"));
        assert!(lines[2].starts_with("  margin: 0"));
        assert_eq!(lines[3], "}");
    }

    #[test]
    fn test_metadata_comment_verbatim() {
        let css = "/* ==UserStyle==\n@name   Dark  Mode\n==/UserStyle== */\na{color:red}";
        let out = beautify(css);
        assert!(out.starts_with("/* ==UserStyle==\n@name   Dark  Mode\n==/UserStyle== */\na {"));
    }

    #[test]
    fn test_combinators_spaced() {
        let out = beautify("ul>li+li{color:red}");
        assert!(out.starts_with("ul > li + li {"));
    }

    #[test]
    fn test_escaped_selector_kept() {
        let out = beautify(".w-1\\+2{color:red}");
        assert!(out.starts_with(".w-1\\+2 {"));
    }

    #[test]
    fn test_nested_blocks_indent() {
        let options = BeautifyOptions { indent_size: 4 };
        let out = LightningBeautifier.beautify("@media screen{a{color:red}}", &options);
        assert!(out.contains("\n    a {\n        color: red"));
    }

    #[test]
    fn test_unparseable_css_unchanged() {
        let css = "/* ==UserStyle==\n==/UserStyle== */\na..b{color:red}";
        assert_eq!(beautify(css), css);
    }

    #[test]
    fn test_reindent() {
        assert_eq!(reindent("a {\n  b\n}", 2), "a {\n  b\n}");
        assert_eq!(reindent("a {\n  b {\n    c\n  }\n}", 1), "a {\n b {\n  c\n }\n}");
    }

    #[test]
    fn test_noop() {
        let css = "a{color:red}";
        assert_eq!(NoopBeautifier.beautify(css, &BeautifyOptions::default()), css);
    }
}
