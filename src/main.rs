use admin_console::{
    config,
    errors::Result,
    host::{Cli, Console},
};
use clap::Parser;
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file; variables can also be set externally
    dotenv().ok();

    // 3. Parse the command line and load config.toml
    let cli = Cli::parse();
    let app_config = config::load_or_default(&cli.config)
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    info!("Configuration loaded from {}", cli.config.display());

    // 4. Run the requested page
    let console = Console::new(app_config, cli.source)?;
    match console.run(cli.command).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", e.user_message());
            Err(e)
        }
    }
}
