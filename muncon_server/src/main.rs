use clap::Parser;
use tracing_subscriber::prelude::*;

use muncon_server::{commands::Command, config, state::AppState};

#[derive(Parser)]
#[command(name = "muncon_server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::read_config();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.logging_config))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let state = AppState::new(config.db_url.clone()).await;

    match cli.command {
        Some(command) => command.run(state).await?,
        None => {
            let app = muncon_server::app_with_state(state).await;
            let addr = format!("{}:{}", config.host, config.port).parse()?;
            tracing::info!("Listening on {}", addr);
            axum::Server::bind(&addr)
                .serve(app.into_make_service())
                .await?;
        }
    }

    Ok(())
}
