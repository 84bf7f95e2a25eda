//! Client for the delivery web server: menus, three-word locations,
//! no-fly zones and landmarks.

pub mod client;
pub mod geo;
pub mod menus;
pub mod orders;

pub use client::WebClient;
pub use geo::{parse_landmarks, parse_no_fly_zones};
pub use menus::{MenuItem, Menus, Restaurant, DELIVERY_CHARGE};
pub use orders::{build_jobs, jobs_from_orders, OrderRecord};
