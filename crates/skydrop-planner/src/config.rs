//! Planner configuration from environment.

use skydrop_core::config::DEFAULT_MOVE_BUDGET;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub web_host: String,
    pub web_port: u16,
    pub db_path: String,
    pub output_dir: PathBuf,
    pub move_budget: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web_host: "localhost".to_string(),
            web_port: 80,
            db_path: "data/skydrop.db".to_string(),
            output_dir: PathBuf::from("."),
            move_budget: DEFAULT_MOVE_BUDGET,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            web_host: env::var("SKYDROP_HOST").unwrap_or(defaults.web_host),
            web_port: env::var("SKYDROP_WEB_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.web_port),
            db_path: env::var("SKYDROP_DB_PATH").unwrap_or(defaults.db_path),
            output_dir: env::var("SKYDROP_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            move_budget: env::var("SKYDROP_MOVE_BUDGET")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.move_budget),
        }
    }
}
