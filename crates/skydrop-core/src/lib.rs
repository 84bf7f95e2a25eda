pub mod config;
pub mod error;
pub mod landmarks;
pub mod models;
pub mod pathing;
pub mod point;
pub mod selector;
pub mod spatial;
pub mod zones;

pub use config::{FlightRules, PlannerConfig, HOVER_ANGLE};
pub use error::PlanError;
pub use landmarks::{route, LegPlanner};
pub use models::{
    Commitment, Job, Move, MoveRecord, MoveTag, Path, PickupOrdering, PlanResult, Route,
};
pub use pathing::{max_steps, synthesize};
pub use point::{Bounds, Heading, Point};
pub use selector::select;
pub use spatial::segments_intersect;
pub use zones::{NoFlyZones, Zone};
