//! One planning run for a single delivery date.

use crate::config::Config;
use crate::output::write_route_file;
use crate::persistence::{self, Delivery};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use skydrop_client::{build_jobs, OrderRecord, WebClient};
use skydrop_core::{select, PlanResult, PlannerConfig};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

/// What a run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub orders: usize,
    pub result: PlanResult,
    pub route_file: PathBuf,
}

/// Delivery rows for the jobs the plan completed, in delivery order.
pub fn deliveries_for(result: &PlanResult, orders: &[OrderRecord]) -> Vec<Delivery> {
    let by_no: HashMap<&str, &OrderRecord> = orders
        .iter()
        .map(|order| (order.order_no.as_str(), order))
        .collect();

    result
        .jobs_done
        .iter()
        .filter_map(|job| {
            let Some(order) = by_no.get(job.id.as_str()) else {
                warn!(job = %job.id, "Completed job has no matching order");
                return None;
            };
            Some(Delivery {
                order_no: job.id.clone(),
                delivered_to: order.deliver_to.clone(),
                cost_in_pence: i64::from(job.value),
            })
        })
        .collect()
}

/// Load the day's orders, plan the route and write every output.
pub async fn run(config: &Config, date: NaiveDate) -> Result<RunSummary> {
    let db = persistence::init_database(&config.db_path, 1).await?;
    let orders = persistence::load_orders(db.pool(), date)
        .await
        .context("Failed to load orders")?;
    info!(%date, orders = orders.len(), "Loaded orders");

    let client = WebClient::new(&config.web_host, config.web_port)?;
    let menus = client.fetch_menus().await?;
    let zones = client.fetch_no_fly_zones().await?;
    let landmarks = client.fetch_landmarks().await?;
    let jobs = build_jobs(&client, &menus, &orders).await;

    let planner_config = PlannerConfig::default().with_move_budget(config.move_budget);
    let result = select(&jobs, &zones, &landmarks, &planner_config)?;

    info!(
        delivered = result.jobs_done.len(),
        moves = result.moves_used,
        utilization = %format!("{:.2}%", result.utilization() * 100.0),
        "Planned route"
    );

    let route_file = write_route_file(&config.output_dir, date, &result.route)?;
    persistence::write_deliveries(db.pool(), &deliveries_for(&result, &orders)).await?;
    persistence::write_flightpath(db.pool(), &result.route).await?;

    Ok(RunSummary {
        orders: orders.len(),
        result,
        route_file,
    })
}
