use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vaporzone::cli::{self, commands, Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing; stderr keeps command output clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vaporzone=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Library errors were already shown by the command itself
            if !e.is::<commands::Reported>() {
                cli::error(&format!("{:#}", e));
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        config,
        api_url,
        command,
    } = cli;
    let app = || commands::open_app(config.as_deref(), api_url.clone());

    match command {
        Commands::Init => commands::init().await,
        Commands::Login { username, password } => commands::login(&app()?, username, password).await,
        Commands::Logout => commands::logout(&app()?).await,
        Commands::Whoami => commands::whoami(&app()?).await,
        Commands::Open { path } => commands::open(&app()?, &path).await,
        Commands::Catalogo { format } => commands::catalogo(&app()?, format).await,
        Commands::Inventario { action } => commands::inventario(&app()?, action).await,
        Commands::Contabilidad { format } => commands::contabilidad(&app()?, format).await,
        Commands::Transacciones { action } => commands::transacciones(&app()?, action).await,
    }
}
