use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use textconvert_common::{logger, AppConfig, ConverterError, OutputFormat};
use textconvert_llm::{CancellationToken, ChunkProcessor, Chunker, OllamaClient};
use textconvert_render::{DocumentRenderer, Renderer};

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    match find_project_root().map(|root| root.join(".env")) {
        Some(env_path) if env_path.exists() => {
            dotenv::from_path(&env_path).ok();
        }
        _ => {
            dotenv::dotenv().ok();
        }
    }
}

#[derive(Parser)]
#[command(name = "textconvert")]
#[command(about = "AI text converter - turn plain text into DOCX, PDF, HTML or Markdown", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides API_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides API_PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Convert a text file without starting the server
    Convert(ConvertArgs),
}

#[derive(Args)]
struct ConvertArgs {
    /// UTF-8 text file to convert
    input: PathBuf,

    /// Output format: docx, pdf, html, markdown or structured_text
    #[arg(long, short)]
    format: OutputFormat,

    /// Output file (defaults to converted.<ext> next to the input)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Skip the completion service and render the text as is
    #[arg(long)]
    no_ai: bool,

    /// Extra guidance appended to every prompt
    #[arg(long, default_value = "")]
    prompt: String,
}

async fn serve(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.api_host = host;
    }
    if let Some(port) = port {
        config.api_port = port;
    }
    config.validate()?;

    logger::setup_logging(&config.log_dir, &config.log_level)?;

    tracing::info!("Text converter starting...");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Model: {}", config.ollama_model);
    tracing::info!("  GPU: {}", config.use_gpu);

    println!("Server listening on http://{}", config.server_bind_address());

    textconvert_server::start_server(config).await?;
    Ok(())
}

/// Read the input the same way the upload endpoint does
fn read_input(path: &Path, max_file_size: usize) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    if bytes.len() > max_file_size {
        return Err(ConverterError::file_too_large(bytes.len(), max_file_size).into());
    }
    String::from_utf8(bytes).map_err(|_| ConverterError::InvalidEncoding.into())
}

fn default_output_path(input: &Path, filename: &str) -> PathBuf {
    input
        .parent()
        .map(|dir| dir.join(filename))
        .unwrap_or_else(|| PathBuf::from(filename))
}

async fn convert(config: AppConfig, args: ConvertArgs) -> Result<()> {
    logger::setup_console_logging(&config.log_level)?;

    let text = read_input(&args.input, config.max_file_size)?;

    let text = if args.no_ai {
        text
    } else {
        let chunker = Chunker::new(config.chunk_size)?;
        let client = Arc::new(OllamaClient::from_config(&config)?);
        let processor = ChunkProcessor::from_config(client, &config);

        let cancel = CancellationToken::new();
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupted, stopping after the current chunk");
                on_interrupt.cancel();
            }
        });

        let chunks = chunker.split(&text);
        let output = processor
            .process_all(chunks, args.format, &args.prompt, cancel.clone())
            .await;

        if cancel.is_cancelled() {
            bail!("Conversion cancelled, nothing written");
        }
        if output.fallbacks > 0 {
            tracing::warn!(
                "{} of {} chunk(s) kept their original text",
                output.fallbacks,
                output.chunks
            );
        }
        output.text
    };

    let rendered = Renderer.render(&text, args.format)?;
    let output_path = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input, rendered.filename));

    std::fs::write(&output_path, &rendered.bytes)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    println!(
        "Wrote {} ({} bytes)",
        output_path.display(),
        rendered.bytes.len()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // AppConfig::from_env() loads .env as well; loading from the project
    // root first lets the binary run from any subdirectory
    load_dotenv_from_project_root();

    let config = AppConfig::from_env()?;

    match cli.command {
        Some(Commands::Serve { host, port }) => serve(config, host, port).await,
        Some(Commands::Convert(args)) => convert(config, args).await,
        None => serve(config, None, None).await,
    }
}
