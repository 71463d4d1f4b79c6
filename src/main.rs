use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chorewheel::api::{self, AppContext};
use chorewheel::config::Config;
use chorewheel::jobs;
use chorewheel::services::ConfirmationService;
use chorewheel::sms::SmsClient;
use chorewheel::store::{Store, StoreError};

#[derive(Parser)]
#[command(name = "chorewheel")]
#[command(about = "Household chore rotation with SMS notifications")]
struct Cli {
    /// Path to the household configuration file
    #[arg(short, long, default_value = "data/config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the confirmation/history web server
    Serve {
        /// Port for the HTTP server
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
    /// Archive the outgoing week, rotate assignments, and notify members
    Rotate,
    /// Send reminders for unconfirmed chores past the configured threshold
    Remind,
    /// Send the weekly status summary to household admins
    Summary,
    /// Print the current week's status
    Status,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "chorewheel=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::load(&cli.config)?;
    let store = Store::from_env()?;

    match cli.command {
        Commands::Serve { port } => {
            let ctx = AppContext {
                config: Arc::new(config),
                store: Arc::new(store),
            };
            let app = api::create_router(ctx);

            let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{port}")).await?;
            tracing::info!("chorewheel listening on http://127.0.0.1:{port}");
            axum::serve(listener, app).await?;
        }
        Commands::Rotate => {
            let sms = SmsClient::from_env()?;
            jobs::rotate::run(&config, &store, &sms).await?;
        }
        Commands::Remind => {
            let sms = SmsClient::from_env()?;
            jobs::remind::run(&config, &store, &sms).await?;
        }
        Commands::Summary => {
            let sms = SmsClient::from_env()?;
            jobs::summary::run(&config, &store, &sms).await?;
        }
        Commands::Status => {
            let state = match store.load().await {
                Ok((state, _)) => state,
                Err(StoreError::NotFound) => {
                    println!("No state yet; run `chorewheel rotate` to start the first week.");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };

            if state.current_week.assignments.is_empty() {
                println!("No active week.");
                return Ok(());
            }

            if let Some(week_of) = state.current_week.week_of {
                println!(
                    "Week of {} (rotation index {})",
                    week_of.format("%Y-%m-%d"),
                    state.current_week.rotation_index
                );
            }
            let confirmations = ConfirmationService::new(&config);
            println!("{}", confirmations.summary_text(&state));
            if confirmations.all_confirmed(&state) {
                println!("All chores confirmed.");
            }
        }
    }

    Ok(())
}
