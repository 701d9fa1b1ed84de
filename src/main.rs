use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use tracing_subscriber::EnvFilter;

use cellar_lookup::cellar::Cellar;
use cellar_lookup::config::{load_config, CONFIG_FILENAME};
use cellar_lookup::mcp::McpServer;

/// Resolve CELEX numbers and ECLI identifiers against EUR-Lex Cellar.
#[derive(Parser)]
#[command(
    name = "cellar-lookup",
    version,
    about = "Resolve CELEX numbers and ECLI identifiers against EUR-Lex Cellar"
)]
struct Cli {
    /// Configuration file (default: ./cellar-lookup.json if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// SPARQL endpoint URL, overriding the configuration file
    #[arg(short, long, global = true)]
    endpoint: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a CELEX number and print its English title and ECLI
    Validate {
        /// CELEX number, e.g. 32019R0947
        celex: String,
    },
    /// Find the CELEX number and title for a case-law identifier
    FindByEcli {
        /// Case-law identifier, e.g. ECLI:EU:C:2024:819
        ecli: String,
    },
    /// Start the MCP tool server on stdio
    Serve,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so stdout carries only results and protocol messages.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "cellar_lookup=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> cellar_lookup::errors::Result<()> {
    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let mut config = load_config(&config_path)?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    let cellar = Cellar::new(config)?;

    match cli.command {
        Commands::Validate { celex } => {
            let result = cellar.validate_checked(&celex)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::FindByEcli { ecli } => {
            let result = cellar.find_by_ecli_checked(&ecli)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Serve => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let server = McpServer::new(cellar);
            runtime.block_on(server.run())?;
        }
    }
    Ok(())
}
