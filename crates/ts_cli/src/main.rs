use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ts_strip::{check_javascript, strip_types, InvalidOutput};
use ts_syntax::StripSyntax;

mod sources;

#[derive(Parser)]
#[command(name = "tstrip", about = "Erase TypeScript types, keep the JavaScript")]
struct Cli {
    /// More logging (-v debug, -vv trace). `TSTRIP_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Link .ts files and directories into one script and erase its types.
    Strip {
        /// Input files or directories.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Output file (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// JSON file selecting which constructs to erase.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Do not put a `/* <file name> */` line before each file.
        #[arg(long)]
        no_header: bool,
    },
    /// Erase types and check that the result parses as JavaScript.
    Check {
        input: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Dump the tokens of a file as JSON.
    Tokens { input: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("TSTRIP_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Strip {
            inputs,
            output,
            config,
            no_header,
        } => {
            let syntax = load_syntax(config.as_deref())?;
            let files = sources::collect_sources(&inputs)?;
            let linked = sources::link_sources(&files, !no_header)?;
            let stripped = strip_types(&linked, &syntax).context("type erasure failed")?;

            match &output {
                Some(path) => {
                    std::fs::write(path, &stripped)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(files = files.len(), bytes = stripped.len(), "wrote {}", path.display());
                }
                None => print!("{stripped}"),
            }
        }
        Commands::Check { input, config } => {
            let syntax = load_syntax(config.as_deref())?;
            let source = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let filename = input.display().to_string();
            let stripped = strip_types(&source, &syntax).context("type erasure failed")?;

            if let Err(err) = check_javascript(&stripped, &filename) {
                if let Some(invalid) = err.downcast_ref::<InvalidOutput>() {
                    eprintln!("{invalid}");
                    return Ok(ExitCode::from(1));
                }
                return Err(err);
            }
            eprintln!("OK: {filename}");
        }
        Commands::Tokens { input } => {
            let source = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let tokens = ts_lexer::tokenize(&source);
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Feature flags from a JSON file, or the defaults.
fn load_syntax(path: Option<&Path>) -> Result<StripSyntax> {
    let Some(path) = path else {
        return Ok(StripSyntax::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}
