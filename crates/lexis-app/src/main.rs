use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use lexis_config::Config;
use tokio::io::AsyncWriteExt;
use tokio::signal;

pub mod commands;
pub mod controller;
pub mod events;
pub mod io;
pub mod logging;
pub mod output;
pub mod state;


use self::controller::AppController;
use self::io::InputSource;
use self::output::OutputFormat;
use self::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "lexis", version, about = "Dictionary entry markdown toolkit")]
struct Cli {
    /// JSON config profile; environment variables are used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a JSON dictionary entry as canonical markdown
    Render {
        /// Input file, or `-` for stdin
        input: PathBuf,
    },
    /// Repair dictionary markdown
    Normalize {
        /// Input file, or `-` for stdin
        input: PathBuf,
    },
    /// Replay a chunk transcript, one chunk per line
    Stream {
        /// Input file, or `-` for stdin
        input: PathBuf,

        /// Print updates as JSON lines
        #[arg(long)]
        json: bool,

        /// Term the lookup is labelled with in logs
        #[arg(long)]
        term: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::new(),
    };
    logging::init(&config.log);

    tracing::debug!("lexis v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Render { input } => {
            let text = InputSource::from_arg(&input).read_to_string().await?;
            let options = lexis_markdown::BuilderOptions::new(config.markdown.label_language);
            print_markdown(&commands::render(&text, &options)?).await
        }
        Command::Normalize { input } => {
            let text = InputSource::from_arg(&input).read_to_string().await?;
            print_markdown(&commands::normalize(&text)).await
        }
        Command::Stream { input, json, term } => {
            let source = InputSource::from_arg(&input);
            let term = term.unwrap_or_else(|| source.term());
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            };
            let state = Arc::new(AppState::new(config));
            run_stream(state, source, term, format).await
        }
    }
}

async fn print_markdown(markdown: &str) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(markdown.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}

async fn run_stream(
    state: Arc<AppState>,
    source: InputSource,
    term: String,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let input = source.open().await?;
    let controller = AppController::new(state).await;
    let mut tasks = controller.spawn_tasks(term, input, format, tokio::io::stdout());

    // Shutdown future (Ctrl+C)
    let shutdown = signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = &mut shutdown => {
                if let Err(e) = result {
                    tracing::error!("Failed to listen for ctrl+c: {e}");
                }
                tracing::info!("Shutdown requested");
                controller.shutdown();
                break;
            }
            joined = tasks.join_next() => {
                match joined {
                    Some(Ok(Ok(()))) => {}
                    Some(Ok(Err(e))) => {
                        tracing::error!("Task failed: {e:#}");
                        controller.shutdown();
                        return Err(e);
                    }
                    Some(Err(e)) => {
                        tracing::error!("Task panicked: {e}");
                        controller.shutdown();
                        return Err(e.into());
                    }
                    None => break,
                }
            }
        }
    }

    while let Some(joined) = tasks.join_next().await {
        if let Ok(Err(e)) = joined {
            tracing::debug!("Task ended during shutdown: {e:#}");
        }
    }
    Ok(())
}
