use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use shop_client::handlers::{self, cli::Cli};
use shop_client::{build_backends, Config, FileStore};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::debug!("client state kept in {}", config.state_file.display());

    let backends = build_backends(&config);
    let store = Arc::new(FileStore::new(&config.state_file));

    match handlers::dispatch(cli.command, &backends, store).await {
        Ok(response) => {
            print!("{}", response.text);
            if response.failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
