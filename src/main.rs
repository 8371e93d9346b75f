//! rsusercss 命令行
//! 运行命令：cargo run --features cli -- convert style.user.css

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rsusercss::{
    normalize_source, ConfigManager, Conversion, ConvertConfig, ConvertError,
    MatchPatternValidator, NoopBeautifier, RegexToGlobTranspiler, UserStyleConverter,
};
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rsusercss")]
#[command(author, version, about = "Convert UserStyle stylesheets into UserCSS", long_about = None)]
struct Cli {
    /// 输出 debug 日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert local UserStyle files
    Convert {
        files: Vec<PathBuf>,
        /// Source URL written to @converted-from
        #[arg(long)]
        converted_from: Option<String>,
        /// Output directory (default: next to each input)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Print a JSON report instead of writing files
        #[arg(long)]
        json: bool,
        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Keep the CSS body as is
        #[arg(long)]
        no_beautify: bool,
    },
    /// Download a UserStyle and convert it
    Fetch {
        url: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long, default_value_t = 30)]
        timeout: u64,
    },
    /// Print the globs of regular expressions
    Glob { patterns: Vec<String> },
    /// Check whether strings are valid match patterns
    Check { patterns: Vec<String> },
}

#[derive(Serialize)]
struct FileReport {
    file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    conversion: Option<Conversion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    // 文档本身不可转换（区别于读取失败等错误）
    refused: bool,
}

impl FileReport {
    fn converted(file: PathBuf, conversion: Conversion) -> Self {
        Self { file, conversion: Some(conversion), error: None, refused: false }
    }

    fn failed(file: PathBuf, error: impl ToString) -> Self {
        Self { file, conversion: None, error: Some(error.to_string()), refused: false }
    }

    fn rejected(file: PathBuf, error: ConvertError) -> Self {
        let refused = error.is_refusal();
        Self { file, conversion: None, error: Some(error.to_string()), refused }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Convert {
            files,
            converted_from,
            out_dir,
            json,
            config,
            no_beautify,
        } => {
            let config = load_config(config.as_deref(), no_beautify)?;
            let converted_from = converted_from.map(|s| validate_source(&s)).transpose()?;
            run_convert(files, converted_from, out_dir, json, config).await
        }
        Commands::Fetch { url, out, timeout } => run_fetch(&url, out, timeout).await,
        Commands::Glob { patterns } => {
            for pattern in patterns {
                let globs = RegexToGlobTranspiler::to_globs(&pattern);
                if globs.is_empty() {
                    println!("{pattern}\t(not convertible)");
                } else {
                    println!("{pattern}\t{}", globs.join(" "));
                }
            }
            Ok(())
        }
        Commands::Check { patterns } => {
            for pattern in patterns {
                let valid = MatchPatternValidator::is_valid_match_pattern(&pattern);
                println!("{pattern}\t{}", if valid { "valid" } else { "invalid" });
            }
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn load_config(path: Option<&Path>, no_beautify: bool) -> Result<ConvertConfig> {
    let mut config = match path {
        Some(path) => ConfigManager::load_json(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ConfigManager::get_default(),
    };
    if no_beautify {
        config.beautify = false;
    }
    Ok(config)
}

fn validate_source(source: &str) -> Result<String> {
    normalize_source(source).with_context(|| format!("invalid URL: {source}"))
}

fn build_converter(config: ConvertConfig) -> UserStyleConverter {
    let beautify = config.beautify;
    let converter = UserStyleConverter::new(config);
    if beautify {
        converter
    } else {
        converter.with_beautifier(NoopBeautifier)
    }
}

/// <stem>.user.css；输入本身以 .user.css 结尾时改为 <stem>.usercss.css 避免覆盖
fn output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "style.css".to_string());
    let stem = name
        .strip_suffix(".user.css")
        .or_else(|| name.strip_suffix(".css"))
        .unwrap_or(&name);
    let file_name = if name.ends_with(".user.css") {
        format!("{stem}.usercss.css")
    } else {
        format!("{stem}.user.css")
    };

    match out_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

async fn run_convert(
    files: Vec<PathBuf>,
    converted_from: Option<String>,
    out_dir: Option<PathBuf>,
    json: bool,
    config: ConvertConfig,
) -> Result<()> {
    if files.is_empty() {
        bail!("no input files");
    }
    if let Some(dir) = &out_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let converter = Arc::new(build_converter(config));
    let mut tasks = JoinSet::new();

    for file in files {
        let converter = Arc::clone(&converter);
        let converted_from = converted_from.clone();
        tasks.spawn(async move {
            let text = match tokio::fs::read_to_string(&file).await {
                Ok(text) => text,
                Err(e) => {
                    return FileReport::failed(file, e);
                }
            };
            // 转换是纯 CPU 计算
            let result = tokio::task::spawn_blocking(move || {
                converter.convert(&text, converted_from.as_deref())
            })
            .await;

            match result {
                Ok(Ok(conversion)) => FileReport::converted(file, conversion),
                Ok(Err(e)) => FileReport::rejected(file, e),
                Err(e) => FileReport::failed(file, e),
            }
        });
    }

    let mut reports = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        reports.push(joined.context("conversion task panicked")?);
    }
    reports.sort_by(|a, b| a.file.cmp(&b.file));

    let converted = reports.iter().filter(|r| r.conversion.is_some()).count();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            match (&report.conversion, &report.error) {
                (Some(conversion), _) => {
                    let target = output_path(&report.file, out_dir.as_deref());
                    tokio::fs::write(&target, &conversion.text)
                        .await
                        .with_context(|| format!("failed to write {}", target.display()))?;
                    info!("{} -> {}", report.file.display(), target.display());
                    println!("converted\t{}\t{}", report.file.display(), target.display());
                }
                (None, error) => {
                    let reason = error.as_deref().unwrap_or("not convertible");
                    if report.refused {
                        info!("{} left unchanged: {}", report.file.display(), reason);
                        println!("skipped\t{}\t{}", report.file.display(), reason);
                    } else {
                        warn!("{} failed: {}", report.file.display(), reason);
                        println!("failed\t{}\t{}", report.file.display(), reason);
                    }
                }
            }
        }
    }

    if converted == 0 {
        bail!("no file could be converted");
    }
    Ok(())
}

async fn run_fetch(url: &str, out: Option<PathBuf>, timeout: u64) -> Result<()> {
    let source = validate_source(url)?;
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout))
        .build()?;

    debug!("fetching {}", source);
    let response = client
        .get(&source)
        .header("User-Agent", concat!("rsusercss/", env!("CARGO_PKG_VERSION")))
        .send()
        .await?;
    if !response.status().is_success() {
        bail!("{} returned status {}", source, response.status());
    }
    let text = response.text().await?;

    let conversion = rsusercss::convert(&text, Some(&source))
        .with_context(|| format!("{source} is not convertible"))?;

    match out {
        Some(path) => {
            tokio::fs::write(&path, &conversion.text)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("{} -> {}", source, path.display());
        }
        None => print!("{}", conversion.text),
    }
    Ok(())
}
