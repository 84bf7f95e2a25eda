//! Skydrop planner entry point.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use skydrop_planner::{run, Config};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Day of the month
    day: u32,

    /// Month (1-12)
    month: u32,

    /// Four-digit year
    year: i32,

    /// Web server port
    #[arg(long)]
    web_port: Option<u16>,

    /// SQLite database path
    #[arg(long)]
    db_path: Option<String>,

    /// Directory for the route file
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Maximum moves for the day
    #[arg(long)]
    move_budget: Option<usize>,
}

impl Args {
    fn apply(self, mut config: Config) -> Config {
        if let Some(port) = self.web_port {
            config.web_port = port;
        }
        if let Some(path) = self.db_path {
            config.db_path = path;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(budget) = self.move_budget {
            config.move_budget = budget;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("skydrop_planner=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let date = NaiveDate::from_ymd_opt(args.year, args.month, args.day).with_context(|| {
        format!(
            "Invalid date {:02}-{:02}-{}",
            args.day, args.month, args.year
        )
    })?;
    let config = args.apply(Config::from_env());

    tracing::info!(%date, web_port = config.web_port, "Starting planner...");

    let summary = run(&config, date).await?;

    tracing::info!(
        orders = summary.orders,
        delivered = summary.result.jobs_done.len(),
        value_captured = summary.result.value_captured,
        route_file = %summary.route_file.display(),
        "Planner finished"
    );

    Ok(())
}
