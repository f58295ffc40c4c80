mod auth;
mod bindings;
mod cli;
mod router;
mod routes;
mod state;

use std::sync::Arc;

use clap::Parser;
use snowduck_common::logging::init_logging;
use snowduck_emulator::Emulator;

use crate::cli::Cli;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    let listen_addr = cli.listen_addr.clone();
    let config = cli.into_config();

    let emulator = Emulator::open(config)?;
    let state = AppState {
        emulator: Arc::new(emulator),
    };

    let app = router::build(state);
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    tracing::info!(%listen_addr, "snowduck-server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
