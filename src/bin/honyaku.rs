//! Command-line front end for Honyaku.
//!
//! Usage:
//!
//! ```text
//! honyaku engines
//! honyaku languages
//! honyaku translate --engine OpenAI/GPT-4o-mini --to Japanese "Hello"
//! echo "Hello" | honyaku compare -e OpenAI/GPT-4o -e Ollama/gemma-3-4b-it-gguf --to Japanese
//! ```
//!
//! Configuration comes from the environment (see [`honyaku::config`]);
//! `--models` and `--timeout` override it for one run. Logs go to stderr and
//! honour `RUST_LOG`.

use camino::Utf8PathBuf;
use clap::{ArgAction, Args, Parser, Subcommand};
use honyaku::app::TranslatorApp;
use honyaku::config::AppConfig;
use honyaku::translation::{
    domain::{ComparisonResult, FailureKind, TranslationOutcome, TranslationRequest, TranslationResult},
    ports::TranslationBackend,
};
use std::io::{self, Read, Write};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Parser)]
#[command(name = "honyaku", version)]
#[command(about = "Translate text with hosted and local LLM engines and compare the results")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Model catalogue file (YAML or JSON); overrides HONYAKU_MODELS
    #[arg(long, global = true)]
    models: Option<Utf8PathBuf>,

    /// Per-call timeout in seconds; overrides HONYAKU_TIMEOUT_SECS
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List configured engines
    Engines,

    /// List supported target languages
    Languages,

    /// Translate with one engine
    Translate(TranslateArgs),

    /// Translate with several engines side by side
    Compare(CompareArgs),
}

#[derive(Debug, Args)]
struct TranslateArgs {
    /// Engine display name, for example OpenAI/GPT-4o-mini
    #[arg(short, long)]
    engine: String,

    #[command(flatten)]
    input: InputArgs,
}

#[derive(Debug, Args)]
struct CompareArgs {
    /// Engine display name; repeat for several, defaults to every engine
    #[arg(short = 'e', long = "engine")]
    engines: Vec<String>,

    /// Maximum number of engines called at once
    #[arg(long)]
    max_in_flight: Option<usize>,

    #[command(flatten)]
    input: InputArgs,
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Target language, for example Japanese
    #[arg(short = 't', long = "to")]
    language: String,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Text to translate; read from stdin when omitted
    text: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, BoxError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = AppConfig::from_env()?;
    if let Some(path) = cli.models {
        config = config.with_catalog_path(path);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let app = TranslatorApp::from_config(&config)?;
    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let succeeded = run(app, cli.command, &mut stdin, &mut stdout).await?;
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("honyaku={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Executes one command; returns whether it produced a usable translation.
async fn run<H, L>(
    app: TranslatorApp<H, L>,
    command: Command,
    input: &mut impl Read,
    out: &mut impl Write,
) -> Result<bool, BoxError>
where
    H: TranslationBackend + 'static,
    L: TranslationBackend + 'static,
{
    match command {
        Command::Engines => {
            for engine in app.engines() {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    engine.name(),
                    engine.kind(),
                    engine.model_id()
                )?;
            }
            Ok(true)
        }
        Command::Languages => {
            for language in app.languages() {
                writeln!(out, "{language}")?;
            }
            Ok(true)
        }
        Command::Translate(args) => {
            let request = build_request(&args.input, input)?;
            let result = app.translate(&args.engine, &request).await;
            if args.input.json {
                write_json(out, &result)?;
            } else {
                write_result(out, &result)?;
            }
            Ok(result.is_success())
        }
        Command::Compare(args) => {
            let request = build_request(&args.input, input)?;
            let engines: Vec<String> = if args.engines.is_empty() {
                app.engine_names().map(str::to_owned).collect()
            } else {
                args.engines
            };
            let comparison = app
                .with_max_in_flight(args.max_in_flight)
                .compare(&engines, &request)
                .await;
            if args.input.json {
                write_json(out, &comparison)?;
            } else {
                write_comparison(out, &comparison)?;
            }
            Ok(comparison.success_count() > 0)
        }
    }
}

fn build_request(args: &InputArgs, input: &mut impl Read) -> Result<TranslationRequest, BoxError> {
    let text = if let Some(given) = &args.text {
        given.clone()
    } else {
        let mut buffer = String::new();
        input.read_to_string(&mut buffer)?;
        buffer
    };
    Ok(TranslationRequest::from_input(text, &args.language)?)
}

fn write_json(out: &mut impl Write, value: &impl serde::Serialize) -> Result<(), BoxError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_comparison(out: &mut impl Write, comparison: &ComparisonResult) -> io::Result<()> {
    for (position, result) in comparison.results().iter().enumerate() {
        if position > 0 {
            writeln!(out)?;
        }
        write_result(out, result)?;
    }
    Ok(())
}

fn write_result(out: &mut impl Write, result: &TranslationResult) -> io::Result<()> {
    writeln!(
        out,
        "== {} ({} ms) ==",
        result.engine(),
        result.elapsed().as_millis()
    )?;
    match result.outcome() {
        TranslationOutcome::Success { text } => writeln!(out, "{text}"),
        TranslationOutcome::Failure(failure) => {
            writeln!(out, "error [{}]: {}", failure.kind(), failure.message())?;
            if let Some(remedy) = hint(failure.kind()) {
                writeln!(out, "hint: {remedy}")?;
            }
            Ok(())
        }
    }
}

/// Remedy shown under a failure; `None` when the message already says it.
const fn hint(kind: FailureKind) -> Option<&'static str> {
    match kind {
        FailureKind::Config => Some("check the model catalogue and HONYAKU_* variables"),
        FailureKind::UnknownEngine => Some("run `honyaku engines` to list configured engines"),
        FailureKind::Auth => Some("set OPENAI_API_KEY to a valid key"),
        FailureKind::RateLimit => Some("wait a moment and try again"),
        FailureKind::ServerUnreachable => {
            Some("start the local server with `ollama serve` or point OLLAMA_HOST at it")
        }
        FailureKind::Timeout => Some("raise --timeout or HONYAKU_TIMEOUT_SECS"),
        FailureKind::ModelNotFound | FailureKind::Backend => None,
    }
}
