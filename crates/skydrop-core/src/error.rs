//! Typed planning errors.
//!
//! Unreachable legs are not errors: synthesis and routing return `None` and
//! the selector excludes the option. Only malformed input surfaces here.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    #[error("job {job_id} declares {count} pickup points (expected 1..={max})")]
    InvalidPickupCount {
        job_id: String,
        count: usize,
        max: usize,
    },

    #[error("zone needs at least 3 distinct vertices, got {vertices}")]
    DegenerateZone { vertices: usize },

    #[error("step length {step_length} must be positive and no larger than tolerance {tolerance}")]
    InvalidFlightRules { step_length: f64, tolerance: f64 },

    #[error("max_pickups {max_pickups} is outside 1..={supported}")]
    UnsupportedMaxPickups { max_pickups: usize, supported: usize },
}

pub type Result<T> = core::result::Result<T, PlanError>;
