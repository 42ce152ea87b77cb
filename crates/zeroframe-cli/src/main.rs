mod bridge;
mod cli;
mod config;

use std::path::Path;

use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use zeroframe_core::{Command, Dispatcher};

use crate::cli::ConfigCommand;

/// Entry point wiring the CLI to a scripted host.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = cli::Cli::parse();
    let config = config::load(cli.config.as_deref())?;
    init_tracing(config.log_level.as_deref());

    let dispatcher = Dispatcher::new(bridge::frame_from_config(&config.frame));
    match cli.command {
        cli::Command::Send { command, params } => {
            let params = bridge::parse_params(params.as_deref())?;
            let delivered =
                bridge::send(&dispatcher, Command::with_params(command.as_str(), params));
            println!("Sent {command} ({delivered} completion(s) delivered)");
        }
        cli::Command::Call { command, params } => {
            let params = bridge::parse_params(params.as_deref())?;
            let result = bridge::call(&dispatcher, Command::with_params(command, params)).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        cli::Command::Ping => {
            bridge::ping(dispatcher).await?;
            println!("pong");
        }
        cli::Command::Version => print_version(),
        cli::Command::Config(ConfigCommand::Init) => init_config(cli.config.as_deref())?,
    }

    Ok(())
}

fn init_tracing(default_level: Option<&str>) {
    // Respect user-provided filters, then the config file, then info.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.unwrap_or("info")));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn print_version() {
    println!("zeroframe {}", env!("CARGO_PKG_VERSION"));
}

fn init_config(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => config::default_path()?,
    };
    let path = config::write_if_missing(&config::Config::starter(), &path)?;
    println!("Config initialized at {}", path.display());
    Ok(())
}
