//! askgem CLI: Command-line interface for the askgem chat client

use askgem_engine::{
    AskClient, Config, ConfigError, HttpAskClient, Session, SubmitError, ASKGEM_DIR, CONFIG_FILE,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Chat with Gemini through an ask-gemini backend
#[derive(Parser)]
#[command(name = "askgem")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file (default: .askgem/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:3000
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Seconds to wait for a reply
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui,

    /// Ask a single question and print the reply
    Ask {
        /// The question to send
        #[arg(required = true)]
        prompt: Vec<String>,
    },

    /// Initialize .askgem/ directory and config
    Init,

    /// Print the effective configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Log file used while the TUI owns the terminal.
const LOG_FILE: &str = "askgem.log";

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn";

fn main() {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(|| Path::new(ASKGEM_DIR).join(CONFIG_FILE));

    match cli.command {
        None | Some(Commands::Tui) => {
            let config = load_config(&config_path, cli.endpoint, cli.timeout);
            init_file_logging(&Path::new(ASKGEM_DIR).join(LOG_FILE));
            cmd_tui(&config);
        }
        Some(Commands::Ask { prompt }) => {
            let config = load_config(&config_path, cli.endpoint, cli.timeout);
            init_stderr_logging();
            cmd_ask(&config, &prompt.join(" "));
        }
        Some(Commands::Init) => {
            cmd_init(&config_path);
        }
        Some(Commands::Config { json }) => {
            let config = load_config(&config_path, cli.endpoint, cli.timeout);
            cmd_config(&config, &config_path, json);
        }
    }
}

fn load_config(path: &Path, endpoint: Option<String>, timeout: Option<u64>) -> Config {
    match resolve_config(path, endpoint, timeout) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

/// Load the config file, apply overrides, and validate the result.
fn resolve_config(
    path: &Path,
    endpoint: Option<String>,
    timeout: Option<u64>,
) -> Result<Config, ConfigError> {
    let config = apply_overrides(Config::load_or_default(path)?, endpoint, timeout);
    config.validate()?;
    Ok(config)
}

/// Apply command-line overrides on top of the loaded configuration.
fn apply_overrides(mut config: Config, endpoint: Option<String>, timeout: Option<u64>) -> Config {
    if let Some(endpoint) = endpoint {
        config.base_url = endpoint;
    }
    if let Some(timeout) = timeout {
        config.timeout_seconds = timeout;
    }
    config
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// Log to a file so the alternate screen stays clean.
fn init_file_logging(path: &Path) {
    let file = match open_log_file(path) {
        Ok(file) => file,
        Err(e) => {
            // Printed before the alternate screen takes over
            eprintln!("Warning: logging disabled, cannot open {}: {e}", path.display());
            return;
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
}

fn open_log_file(path: &Path) -> std::io::Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}

fn runtime() -> tokio::runtime::Runtime {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    }
}

fn http_client(config: &Config) -> HttpAskClient {
    match HttpAskClient::from_config(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create HTTP client: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_tui(config: &Config) {
    let client: Arc<dyn AskClient> = Arc::new(http_client(config));
    let rt = runtime();
    if let Err(e) = rt.block_on(askgem_tui::run_tui(config, client)) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_ask(config: &Config, prompt: &str) {
    let client = http_client(config);
    let rt = runtime();

    let mut session = Session::new(config);
    session.set_input(prompt);
    debug!(endpoint = client.url(), "sending one-shot prompt");

    match rt.block_on(session.exchange(&client)) {
        Ok(()) => {
            // A failed exchange still produces a reply to print
            if let Some(reply) = session.conversation().last() {
                println!("{}", reply.text);
            }
        }
        Err(SubmitError::EmptyPrompt) => {
            eprintln!("Error: prompt is empty");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_init(config_path: &Path) {
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return;
    }

    match Config::default().save(config_path) {
        Ok(()) => println!("Created {}", config_path.display()),
        Err(e) => {
            eprintln!("Failed to write config: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_config(config: &Config, config_path: &Path, json: bool) {
    if json {
        match serde_json::to_string_pretty(config) {
            Ok(output) => println!("{output}"),
            Err(e) => {
                eprintln!("Failed to serialize config: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("askgem configuration\n");
    let source = if config_path.exists() {
        config_path.display().to_string()
    } else {
        "(defaults)".to_string()
    };
    println!("Source:     {source}");
    println!("Endpoint:   {}", config.endpoint_url());
    println!("Timeout:    {}s", config.timeout_seconds);
    println!(
        "Timestamps: {}",
        if config.timestamps { "on" } else { "off" }
    );
}
