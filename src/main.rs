use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use datachat::connector::api::{Container, ContainerConfig, Router};
use datachat::{Commands, OllamaConfig};

#[derive(Parser)]
#[command(name = "datachat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// CSV file whose first rows are sent along with every question
    #[arg(short, long, global = true, default_value = "bengaluru_house_prices.csv")]
    dataset: PathBuf,

    /// Generate endpoint (falls back to OLLAMA_URL, then the local default)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Model name (falls back to OLLAMA_MODEL, then llama3.2:1b)
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Give up on a reply after this many seconds
    #[arg(long, global = true, default_value = "120")]
    timeout_secs: u64,

    /// Answer with canned replies instead of calling the server
    #[arg(long, global = true)]
    mock_llm: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    fn ollama_config(&self) -> OllamaConfig {
        let mut config =
            OllamaConfig::from_env().with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(url) = &self.url {
            config = config.with_url(url);
        }
        if let Some(model) = &self.model {
            config = config.with_model(model);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ContainerConfig {
        dataset_path: cli.dataset.clone(),
        ollama: cli.ollama_config(),
        mock_llm: cli.mock_llm,
    };
    let container = Container::new(config)?;

    let mut state = container
        .load_dataset_use_case()
        .initial_state()
        .context("cannot start without the dataset")?;

    let command = cli.command.unwrap_or(Commands::Chat);
    debug!("Running {:?}", command);

    let router = Router::new(&container);
    let output = router.route(command, &mut state).await?;
    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}
