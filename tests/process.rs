//! 端到端转换测试
use rsusercss::{
    process, ConvertError, MatchPatternValidator, RegexToGlobTranspiler, RuleToPatternConverter,
    UserStyleConverter,
};

const SOURCE: &str = "https://userstyles.world/style/42";

fn user_style(meta: &str, body: &str) -> String {
    format!("/* ==UserStyle==\n@name Test\n@version 1.0.0\n{meta}==/UserStyle== */\n{body}")
}

#[test]
fn test_without_metadata_not_convertible() {
    assert_eq!(process("@-moz-document domain(\"a.com\") { a { color: red; } }", None), None);
    assert_eq!(process("", Some(SOURCE)), None);
}

#[test]
fn test_checkbox_not_convertible() {
    let text = user_style("@var checkbox dark \"Dark mode\" 1\n", "a { color: red; }");
    assert_eq!(process(&text, None), None);
}

#[test]
fn test_less_variables_not_convertible() {
    let text = user_style(
        "@preprocessor less\n@var color bg \"Background\" #000\n",
        "a { color: @bg; }",
    );
    assert!(matches!(
        UserStyleConverter::default().convert(&text, None),
        Err(ConvertError::PreprocessorVariables)
    ));
}

#[test]
fn test_multiple_sections_not_convertible() {
    let text = user_style(
        "",
        "@-moz-document domain(\"a.com\") { a {} }\n@-moz-document domain(\"b.com\") { b {} }",
    );
    assert_eq!(process(&text, None), None);
}

#[test]
fn test_validator_properties() {
    assert!(MatchPatternValidator::is_valid_match_pattern("<all_urls>"));
    assert!(MatchPatternValidator::is_valid_match_pattern("*://*.example.com/*"));
    assert!(!MatchPatternValidator::is_valid_match_pattern("http://example.com:8080/*"));
}

#[test]
fn test_rule_conversion_properties() {
    let set = RuleToPatternConverter::convert(r#"url-prefix("https://example.com/foo")"#);
    assert_eq!(set.matches.iter().collect::<Vec<_>>(), vec!["https://example.com/foo*"]);
    assert!(set.includes.is_empty());

    let set = RuleToPatternConverter::convert(r#"url-prefix("https://example.com:8080/foo")"#);
    assert_eq!(set.includes.iter().collect::<Vec<_>>(), vec!["https://example.com:8080/foo*"]);
    assert!(set.matches.is_empty());

    let set = RuleToPatternConverter::convert(r#"domain("www.example.com")"#);
    assert_eq!(set.matches.iter().collect::<Vec<_>>(), vec!["*://*.example.com/*"]);
}

#[test]
fn test_glob_properties() {
    assert_eq!(
        RegexToGlobTranspiler::to_globs(r"^https?://example\.com/.*$"),
        vec!["http*://example.com/*"]
    );
    assert_eq!(
        RegexToGlobTranspiler::to_globs(r"^(foo|bar)\.example\.com$"),
        vec!["foo.example.com", "bar.example.com"]
    );
}

#[test]
fn test_catch_all_wins() {
    let text = user_style(
        "",
        "@-moz-document domain(\"example.com\"), url-prefix(\"http://localhost:8080/app\"), regexp(\".*\") {\n  a { color: red; }\n}",
    );
    let conversion = UserStyleConverter::default().convert(&text, Some(SOURCE)).unwrap();
    assert_eq!(conversion.patterns.matches.iter().collect::<Vec<_>>(), vec!["*://*/*"]);
    assert!(conversion.patterns.includes.is_empty());
    assert_eq!(conversion.text.matches("@match").count(), 1);
    assert!(!conversion.text.contains("@include"));
}

#[test]
fn test_scoped_conversion_output() {
    let text = user_style(
        "@updateURL https://userstyles.world/api/style/42.user.css\n",
        "@-moz-document url-prefix(\"https://example.com/forum\"), regexp(\"https?://(www\\\\.)?example\\\\.org/.*\") {\n  .post>.title{font-weight:bold}\n}\n",
    );
    let out = process(&text, Some(SOURCE)).unwrap();

    assert!(out.starts_with("/* ==UserCSS==\n@name Test\n@version 1.0.0\n"));
    assert!(!out.contains("@updateURL"));
    assert!(!out.contains("@-moz-document"));
    assert!(out.contains("\n@compatible       FireMonkey"));
    assert!(out.contains("\n@converted-from   https://userstyles.world/style/42"));
    assert!(out.contains("\n@match            https://example.com/forum*"));
    assert!(out.contains("\n@include          http*://*example.org/*"));
    assert!(out.contains("\n==/UserCSS== */\n"));
    assert!(out.ends_with(".post > .title {\n  font-weight: bold;\n}\n"));
}

#[test]
fn test_rerun_on_output_is_noop() {
    let text = user_style("", "@-moz-document domain(\"example.com\") { a { color: red; } }");
    let converted = process(&text, Some(SOURCE)).unwrap();
    // 输出已是 UserCSS，不会再次转换
    assert_eq!(process(&converted, Some(SOURCE)), None);
}

#[test]
fn test_existing_match_not_widened() {
    let text = user_style("@match https://example.com/*\n", "a { color: red; }");
    let out = process(&text, None).unwrap();
    assert!(!out.contains("*://*/*"));
    assert_eq!(out.matches("@match").count(), 1);
}

#[test]
fn test_concurrent_conversions() {
    let texts: Vec<String> = (0..8)
        .map(|i| user_style("", &format!("@-moz-document domain(\"site{i}.com\") {{ a {{}} }}")))
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                scope.spawn(move || {
                    let source = format!("https://example.com/{i}");
                    (i, process(text, Some(&source)).unwrap())
                })
            })
            .collect();

        for handle in handles {
            let (i, out) = handle.join().unwrap();
            assert!(out.contains(&format!("@match            *://*.site{i}.com/*")));
            assert!(out.contains(&format!("@converted-from   https://example.com/{i}")));
        }
    });
}
