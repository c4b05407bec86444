//! CSS Insight - class and id hover/completion from the command line
//!
//! Usage: css-insight [--config <PATH>] <COMMAND> ...

use std::env;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use url::Url;

use insight_css::{save_snapshot, PatternExtractor, RuleExtractor};
use insight_net::{resolve_href, HttpClient, StylesheetFetcher};
use insight_resolve::{Document, InsightConfig, NameResolver, DEFAULT_CONFIG_FILE};

const VERSION: &str = env!("CARGO_PKG_VERSION");

type CliResult<T> = Result<T, Box<dyn Error>>;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let mut args: Vec<String> = env::args().collect();
    let program = args.first().cloned().unwrap_or_else(|| "css-insight".into());

    let config_path = match take_config_flag(&mut args) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.len() < 2 {
        print_usage(&program);
        return ExitCode::FAILURE;
    }

    let result = match args[1].as_str() {
        "--help" | "-h" => {
            print_usage(&program);
            return ExitCode::SUCCESS;
        }
        "--version" | "-V" => {
            println!("css-insight {}", VERSION);
            return ExitCode::SUCCESS;
        }
        "hover" => {
            if args.len() < 4 {
                eprintln!("Usage: {} hover <FILE> <OFFSET>", program);
                return ExitCode::FAILURE;
            }
            run_hover(&config_path, &args[2], &args[3]).await
        }
        "complete" => {
            if args.len() < 3 {
                eprintln!("Usage: {} complete <FILE>", program);
                return ExitCode::FAILURE;
            }
            run_complete(&config_path, &args[2]).await
        }
        "snapshot" => {
            if args.len() < 4 {
                eprintln!("Usage: {} snapshot <CSS-URL> <OUT.json>", program);
                return ExitCode::FAILURE;
            }
            run_snapshot(&config_path, &args[2], &args[3]).await
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage(&program);
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_usage(program: &str) {
    println!(
        r#"css-insight {} - CSS rule lookup for class and id attributes

USAGE:
    {} [--config <PATH>] <COMMAND>

COMMANDS:
    hover <FILE> <OFFSET>        Show rules for the attribute at a character offset
    complete <FILE>              List every known class and id with its rule
    snapshot <CSS-URL> <OUT>     Extract a stylesheet into a definition snapshot

OPTIONS:
    --config <PATH>   Configuration file (default: {})
    -h, --help        Print this help message
    -V, --version     Print version information

EXAMPLES:
    {} hover index.html 120
    {} complete src/App.jsx
    {} snapshot https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.css data/bootstrap-classes.json

"#,
        VERSION, program, DEFAULT_CONFIG_FILE, program, program, program
    );
}

/// Remove `--config <PATH>` from `args`, returning the path to use
fn take_config_flag(args: &mut Vec<String>) -> Result<PathBuf, String> {
    match args.iter().position(|arg| arg == "--config") {
        Some(index) => {
            if index + 1 >= args.len() {
                return Err("--config requires a path".into());
            }
            let path = args.remove(index + 1);
            args.remove(index);
            Ok(PathBuf::from(path))
        }
        None => Ok(PathBuf::from(DEFAULT_CONFIG_FILE)),
    }
}

/// Read a document and its `file://` URL for resolving relative links
fn read_document(path_str: &str) -> CliResult<(String, Url)> {
    let path = Path::new(path_str);
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path_str, e))?;
    let absolute = path.canonicalize()?;
    let base = Url::from_file_path(&absolute)
        .map_err(|_| format!("Cannot build a URL for {}", absolute.display()))?;
    Ok((text, base))
}

/// Hover text for `offset` in the file at `path_str`
async fn hover_text(config: &InsightConfig, path_str: &str, offset: usize) -> CliResult<Option<String>> {
    let (text, base) = read_document(path_str)?;
    let resolver = NameResolver::from_config(config)?;
    let document = Document::new(&text).with_base_url(&base);
    Ok(resolver.hover(&document, offset).await)
}

async fn run_hover(config_path: &Path, path_str: &str, offset_str: &str) -> CliResult<()> {
    let offset: usize = offset_str
        .parse()
        .map_err(|_| format!("Invalid offset: {}", offset_str))?;
    let config = InsightConfig::load(config_path)?;

    match hover_text(&config, path_str, offset).await? {
        Some(markdown) => print!("{}", markdown),
        None => println!("No CSS information."),
    }
    Ok(())
}

async fn run_complete(config_path: &Path, path_str: &str) -> CliResult<()> {
    let config = InsightConfig::load(config_path)?;
    let (text, base) = read_document(path_str)?;
    let resolver = NameResolver::from_config(&config)?;

    let items = resolver
        .completions(&Document::new(&text).with_base_url(&base))
        .await;
    for item in &items {
        println!("{}\t{}", item.label, item.detail.replace('\n', " "));
    }
    log::info!("{} completions", items.len());
    Ok(())
}

/// Fetch a stylesheet (URL or local path), extract it and write the snapshot
async fn run_snapshot(config_path: &Path, source: &str, out: &str) -> CliResult<()> {
    let config = InsightConfig::load(config_path)?;
    let url = match resolve_href(None, source) {
        Ok(url) => url,
        Err(_) => {
            let absolute = Path::new(source).canonicalize()?;
            Url::from_file_path(&absolute)
                .map_err(|_| format!("Cannot build a URL for {}", absolute.display()))?
        }
    };

    let client = HttpClient::with_config(config.client_config())?;
    let css = client.fetch(&url).await?;
    let table = PatternExtractor::new().extract(&css);
    save_snapshot(&table, Path::new(out))?;

    println!("{} definitions from {} saved to {}", table.len(), url, out);
    Ok(())
}
