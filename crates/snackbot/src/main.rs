use std::process::ExitCode;

use snackbot::{BotConfig, ServerAddr, Shutdown};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: snackbot <server[:port]> <nick> <channel> [channel...]";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 || args.iter().any(|a| a == "-h" || a == "--help") {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    }

    let server = match args[0].parse::<ServerAddr>() {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "bad server address");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let config = match BotConfig::builder(&args[1]).channels(&args[2..]).build() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "bad arguments");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match snackbot::run(&server, config).await {
        Ok(Shutdown::Quit) => {
            info!("shut down on request");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "session ended");
            ExitCode::FAILURE
        }
    }
}
