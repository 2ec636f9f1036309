use std::collections::BTreeMap;

use clap::{Parser, Subcommand};
use finproj::api::{self, ApiError};
use finproj::config::{ConfigArgs, LogLevel, build_config};
use serde::Serialize;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "finproj",
    version,
    about = "Deterministic financial projection calculators (compound interest, ROI, retirement, SIP, fees)"
)]
struct Cli {
    /// Log level; RUST_LOG takes precedence when set
    #[arg(long, global = true, env = "FINPROJ_LOG_LEVEL", value_enum, ignore_case = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the calculators as a JSON HTTP API
    Serve {
        #[arg(long, env = "FINPROJ_HOST")]
        host: Option<String>,
        #[arg(short, long, env = "FINPROJ_PORT")]
        port: Option<u16>,
    },
    /// Run one calculator and print the result as JSON
    Calc {
        /// Calculator slug, e.g. compound-interest
        calculator: String,
        /// Currency code used to label amounts
        #[arg(long)]
        currency: Option<String>,
        /// Input fields as name=value pairs, e.g. principal=10000 rate=7
        #[arg(value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// List calculators and their input constraints
    List,
}

fn parse_field(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got '{arg}'")),
    }
}

fn init_tracing(log_level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::from(log_level).into())
                .from_env_lossy(),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Failed to serialize output: {e}");
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port } => {
            let config = match build_config(&ConfigArgs {
                host,
                port,
                log_level: cli.log_level,
            }) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Configuration error: {e}");
                    std::process::exit(1);
                }
            };
            init_tracing(config.log_level);
            info!(
                host = %config.host,
                port = config.port,
                log_level = ?config.log_level,
                "Server configuration loaded"
            );

            if let Err(e) = api::run_http_server(&config).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Calc {
            calculator,
            currency,
            fields,
        } => {
            init_tracing(cli.log_level.unwrap_or(LogLevel::Warn));

            let params: BTreeMap<String, String> = fields.into_iter().collect();
            let raw = api::raw_input_from_params(params);
            match api::calculate(&calculator, &raw, currency.as_deref()) {
                Ok(response) => print_json(&response),
                Err(ApiError::Validation(errors)) => {
                    for error in errors.errors() {
                        eprintln!("{}: {}", error.field, error.message);
                    }
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }
        Command::List => print_json(&api::catalog()),
    }
}
