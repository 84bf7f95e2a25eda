//! Daily delivery planner: reads the day's orders, plans one route and
//! writes the flight log, the delivery list and a GeoJSON route file.

pub mod config;
pub mod output;
pub mod persistence;
pub mod run;

pub use config::Config;
pub use run::{run, RunSummary};
