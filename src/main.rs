// src/main.rs

//! The command line front-end: load one document, traverse one or more paths, print the matches.

use anyhow::{Context, Result, anyhow};
use jsontraverse::config::Config;
use jsontraverse::core::{JsonTraverse, Source};
use std::env;
use tracing::{debug, error};

const USAGE: &str = "Usage: jsontraverse [--config FILE] [--separator SEP] \
[--ignore-case | --case-sensitive] [--values] <SOURCE> <PATH>...";

/// Options taken from the command line. Anything left unset falls back to the config file.
#[derive(Debug, Default)]
struct CliArgs {
    config_path: Option<String>,
    separator: Option<String>,
    ignore_case: Option<bool>,
    values_only: bool,
    show_version: bool,
    show_help: bool,
    source: String,
    paths: Vec<String>,
}

impl CliArgs {
    fn parse(args: &[String]) -> Result<Self> {
        let mut cli = CliArgs::default();
        let mut positional = Vec::new();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--config" => {
                    let path = iter
                        .next()
                        .ok_or_else(|| anyhow!("--config flag requires a value"))?;
                    cli.config_path = Some(path.clone());
                }
                "--separator" => {
                    let sep = iter
                        .next()
                        .ok_or_else(|| anyhow!("--separator flag requires a value"))?;
                    cli.separator = Some(sep.clone());
                }
                "--ignore-case" => cli.ignore_case = Some(true),
                "--case-sensitive" => cli.ignore_case = Some(false),
                "--values" => cli.values_only = true,
                "--version" => {
                    cli.show_version = true;
                    return Ok(cli);
                }
                "--help" | "-h" => {
                    cli.show_help = true;
                    return Ok(cli);
                }
                // A bare `--` ends flag parsing, including `--help` and `--version`.
                "--" => {
                    positional.extend(iter.by_ref().cloned());
                }
                flag if flag.starts_with("--") => return Err(anyhow!("Unknown flag: {flag}")),
                _ => positional.push(arg.clone()),
            }
        }

        let mut positional = positional.into_iter();
        cli.source = positional
            .next()
            .ok_or_else(|| anyhow!("a JSON file or URL is required"))?;
        cli.paths = positional.collect();
        if cli.paths.is_empty() {
            return Err(anyhow!("at least one path is required"));
        }
        Ok(cli)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let args: Vec<String> = env::args().skip(1).collect();

    let cli = match CliArgs::parse(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };
    if cli.show_version {
        println!("jsontraverse version {VERSION}");
        return Ok(());
    }
    if cli.show_help {
        println!("{USAGE}");
        return Ok(());
    }

    let mut config = match &cli.config_path {
        Some(path) => match Config::from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load configuration from \"{path}\": {e:#}");
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    // Command line flags take precedence over the config file.
    if let Some(separator) = cli.separator.clone() {
        config.traverse.separator = separator;
    }
    if let Some(ignore_case) = cli.ignore_case {
        config.traverse.ignore_case = ignore_case;
    }

    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .compact()
        .with_ansi(true)
        .init();

    if let Err(e) = run(&cli, config).await {
        error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn run(cli: &CliArgs, config: Config) -> Result<()> {
    debug!("Using traversal options {:?}", config.traverse);
    let source = Source::from_arg(&cli.source);
    let session = JsonTraverse::load(source, config.traverse, &config.http)
        .await
        .with_context(|| format!("Failed to load '{}'", cli.source))?;

    for path in &cli.paths {
        let found = session
            .traverse(path, !cli.values_only)
            .with_context(|| format!("Failed to traverse '{path}'"))?;
        debug!("'{}' matched {} value(s)", path, found.len());
        println!("{}", serde_json::to_string_pretty(&found.to_value())?);
    }
    Ok(())
}
