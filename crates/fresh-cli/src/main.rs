use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fresh_core::ConvertConfig;

#[derive(Parser)]
#[command(
    name = "fresh-convert",
    version,
    about = "Convert Fresh markup manifests to JSON or to the Fresh language"
)]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML file with [json] and [fresh] output settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert markup to JSON
    Json {
        /// Markup file to read (default: stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// File to write (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert markup to indented Fresh language text on stdout
    Fresh {
        /// Markup file to read (default: stdin)
        #[arg()]
        file: Option<PathBuf>,

        /// Fail with no output if a closing bracket has no opener
        #[arg(long)]
        strict: bool,
    },

    /// Dump the parsed element tree as pretty JSON
    Tree {
        /// Markup file to read (default: stdin)
        #[arg()]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries converted output only.
    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(level))
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => ConvertConfig::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ConvertConfig::default(),
    };

    match cli.command {
        Commands::Json { input, output } => cmd_json(input.as_deref(), output.as_deref(), &config),
        Commands::Fresh { file, strict } => cmd_fresh(file.as_deref(), strict, &config),
        Commands::Tree { file } => cmd_tree(file.as_deref()),
    }
}

fn cmd_json(input: Option<&Path>, output: Option<&Path>, config: &ConvertConfig) -> Result<()> {
    let (source, name) = read_source(input)?;
    let json = fresh_lang::markup_to_json(&source, &name, &config.json)
        .with_context(|| format!("failed to convert {name} to JSON"))?;
    tracing::debug!(input = %name, bytes = json.len(), "converted to JSON");

    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => write_stdout(&json)?,
    }
    Ok(())
}

fn cmd_fresh(file: Option<&Path>, strict: bool, config: &ConvertConfig) -> Result<()> {
    let (source, name) = read_source(file)?;
    let mut fresh = config.fresh.clone();
    fresh.strict |= strict;

    let result = fresh_lang::markup_to_fresh(&source, &name, &fresh)
        .with_context(|| format!("failed to convert {name} to the Fresh language"))?;
    tracing::debug!(input = %name, underflows = result.underflows, "converted to Fresh");
    write_stdout(&result.text)
}

fn cmd_tree(file: Option<&Path>) -> Result<()> {
    let (source, name) = read_source(file)?;
    let root = fresh_lang::parse_document(&source, &name)?;
    let mut dump = root.to_json_pretty().context("failed to serialize tree")?;
    dump.push('\n');
    write_stdout(&dump)
}

/// Source text plus the name used in error locations.
fn read_source(path: Option<&Path>) -> Result<(String, String)> {
    match path {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok((source, path.display().to_string()))
        }
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            Ok((source, "<stdin>".to_string()))
        }
    }
}

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
