use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::time::Duration;
use tokio::sync::oneshot;

use sat_o_track::watch::{BackendClient, Coordinates, Target, WatchOptions, Watcher};
use sat_o_track::web::config::ConfigError;
use sat_o_track::web::{self, Config};

const BACKEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser)]
#[command(name = "sat-o-track")]
#[command(about = "Satellite position proxy and live tracker")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the caching proxy backend (default)
    Serve {
        /// Optional YAML config; environment variables override it
        #[arg(long)]
        config: Option<String>,
    },
    /// Poll a running backend and print the satellite's live position
    Watch {
        #[arg(long, default_value = "http://localhost:5000")]
        backend: String,
        /// NORAD catalogue id
        #[arg(long, default_value_t = 25544)]
        id: u32,
        #[arg(long, default_value_t = 41.702, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, default_value_t = -76.014, allow_negative_numbers = true)]
        lng: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        alt: f64,
        #[arg(long, default_value_t = 10)]
        seconds: u32,
        #[arg(long, default_value = "5s", value_parser = humantime::parse_duration)]
        interval: Duration,
        /// View centre as "lat,lng"; reports whether it is on the satellite
        #[arg(long, allow_hyphen_values = true)]
        center: Option<Coordinates>,
        /// Number of history entries kept
        #[arg(long, default_value_t = 50)]
        history: usize,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve { config: None }) {
        Commands::Serve { config } => serve(config.as_deref()).await,
        Commands::Watch {
            backend,
            id,
            lat,
            lng,
            alt,
            seconds,
            interval,
            center,
            history,
        } => {
            let options = WatchOptions {
                target: Target {
                    norad_id: id,
                    observer_lat: lat,
                    observer_lng: lng,
                    observer_alt: alt,
                    seconds,
                },
                interval,
                center,
                history,
            };
            watch(&backend, options).await
        }
    }
}

async fn serve(path: Option<&str>) -> ExitCode {
    let config = match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let Some(path) = path else {
        return Config::from_env();
    };
    let mut config = Config::from_file(path)?;
    config.apply_env()?;
    Ok(config)
}

async fn watch(backend: &str, options: WatchOptions) -> ExitCode {
    let client = match BackendClient::new(backend, BACKEND_TIMEOUT) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error creating client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let (stop_tx, stop_rx) = oneshot::channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = stop_tx.send(());
            }
            Err(e) => {
                log::error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        }
    });

    println!("Watching NORAD {} via {}", options.target.norad_id, backend);
    let state = Watcher::new(client, options).run(stop_rx).await;
    println!("Stopped after {} positions", state.history().count());
    ExitCode::SUCCESS
}
