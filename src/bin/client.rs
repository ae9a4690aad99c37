use std::process::ExitCode;

use anyhow::Context;
use flight_footprint::{
    STARTUP_FAILURE,
    config::{Config, Frontend},
    console::Terminal,
    controller::ClientController,
    db::MySqlGateway,
    init_tracing,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let config = match Config::from_env(Frontend::Client).context("loading client configuration") {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{:#}", err);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(?config, "starting {} console", config.frontend);

    let gateway = MySqlGateway::new(&config);
    if let Err(err) = gateway.ping().await {
        tracing::error!(error = %err, frontend = %config.frontend, "initial connection failed");
        eprintln!("{}", STARTUP_FAILURE);
        return ExitCode::FAILURE;
    }

    let mut controller = ClientController::new(gateway, Terminal);
    match controller.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            err.log();
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
