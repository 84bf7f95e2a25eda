//! Persistence layer for the planner.
//!
//! SQLite-backed storage for the day's orders and for the output of a
//! planning run.

pub mod db;
pub mod flightpath;
pub mod orders;

pub use db::{init_database, Database};
pub use flightpath::{write_deliveries, write_flightpath, Delivery};
pub use orders::load_orders;
