mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rifa")]
#[command(about = "Raffle ticket sales engine - catalog, lucky draw, and cart")]
#[command(version)]
struct Cli {
    /// Lottery backend base URL
    #[arg(short, long, global = true)]
    base_url: Option<String>,

    /// Lottery campaign id
    #[arg(short, long, global = true)]
    lottery: Option<u32>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of the ticket catalog
    Catalog {
        /// 1-based page index
        #[arg(default_value_t = 1)]
        page: u32,
    },
    /// Check whether a manually entered ticket number is still available
    Check {
        /// The four digit fields, left to right (e.g. 3251)
        digits: String,
    },
    /// Spin the lucky draw for a random available ticket
    Draw {
        /// Add the resolved ticket to a selection and print the checkout URL
        #[arg(long)]
        confirm: bool,
    },
    /// Browse the catalog interactively and build a selection
    Browse,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "rifa_cli={},rifa_core={},rifa_draw={}",
            log_level, log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let defaults = config::CliConfig::default();
    let base_url = cli.base_url.unwrap_or(defaults.base_url);
    let lottery_id = cli.lottery.unwrap_or(defaults.lottery_id);

    let result = match cli.command {
        Commands::Catalog { page } => commands::show_catalog(&base_url, page).await,
        Commands::Check { digits } => commands::check_ticket(&base_url, lottery_id, &digits).await,
        Commands::Draw { confirm } => commands::run_draw(&base_url, lottery_id, confirm).await,
        Commands::Browse => commands::browse(&base_url, lottery_id).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
