//! strip-thinking CLI — run request payloads through the sanitizing pipeline
//!
//! Usage:
//!   strip-thinking-cli sanitize [--file <path>] [--pipeline <config>] [--compact]
//!   strip-thinking-cli stages
//!   strip-thinking-cli version

use std::path::PathBuf;
use strip_thinking::pipeline::PIPELINE_ENV_VAR;
use strip_thinking::plugins::get_plugin_registry;
use strip_thinking::{Error, ErrorContext, Pipeline, PipelineConfig};
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let outcome = match args[1].as_str() {
        "sanitize" => cmd_sanitize(&args[2..]).await,
        "stages" => {
            cmd_stages();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            cmd_version();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"strip-thinking-cli — remove reasoning/thinking metadata from request payloads

USAGE:
    strip-thinking-cli <COMMAND> [OPTIONS]

COMMANDS:
    sanitize [--file <path>] [--pipeline <config>] [--compact]
                                Read a JSON payload (stdin by default) and print it sanitized
    stages                      List registered pipeline stages
    version                     Show version information
    help                        Show this help message

ENVIRONMENT:
    {PIPELINE_ENV_VAR}     Pipeline config file (YAML or .json)
    RUST_LOG                    Log filter (default: warn)"#
    );
}

fn cmd_version() {
    println!("strip-thinking-cli {}", env!("CARGO_PKG_VERSION"));
}

fn cmd_stages() {
    let registry = get_plugin_registry();
    for plugin in registry.list_by_priority() {
        println!("{:<24} {:?}", plugin.name(), plugin.priority());
    }
}

/// Value following `flag`, if the flag is present. A flag with no value, or one
/// directly followed by another `--` option, is an error.
fn flag_value(args: &[String], flag: &str) -> strip_thinking::Result<Option<String>> {
    let Some(i) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    match args.get(i + 1) {
        Some(v) if !v.starts_with("--") => Ok(Some(v.clone())),
        _ => Err(Error::configuration_with_context(
            format!("{flag} requires a value"),
            ErrorContext::new().with_field_path(flag).with_source("cli"),
        )),
    }
}

async fn resolve_config(args: &[String]) -> strip_thinking::Result<PipelineConfig> {
    let path = flag_value(args, "--pipeline")?
        .map(PathBuf::from)
        .or_else(|| std::env::var(PIPELINE_ENV_VAR).ok().map(PathBuf::from));
    match path {
        Some(p) => PipelineConfig::load(&p).await,
        None => Ok(PipelineConfig::default()),
    }
}

async fn cmd_sanitize(args: &[String]) -> strip_thinking::Result<()> {
    let config = resolve_config(args).await?;
    let pipeline = Pipeline::from_config(&config, get_plugin_registry())?;
    tracing::info!(stages = ?pipeline.stage_names(), "pipeline ready");

    let input = match flag_value(args, "--file")? {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    let body: serde_json::Value = serde_json::from_str(&input)?;
    let out = pipeline.process_request(body).await?;

    if args.iter().any(|a| a == "--compact") {
        println!("{}", serde_json::to_string(&out)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&out)?);
    }
    Ok(())
}
