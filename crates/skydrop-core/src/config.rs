//! Planner configuration and movement rules.

use crate::error::{PlanError, Result};
use crate::point::{Bounds, Point};
use serde::{Deserialize, Serialize};

/// Length of one move in degrees.
pub const STEP_LENGTH: f64 = 0.00015;

/// Two points closer than this are treated as the same place. Equal to the
/// step length so a single move can always land "close enough".
pub const CLOSE_TOLERANCE: f64 = 0.00015;

/// Angle written to persistence for a hover move.
pub const HOVER_ANGLE: i32 = -999;

/// Default move budget for one planning run.
pub const DEFAULT_MOVE_BUDGET: usize = 1500;

/// Maximum pickup points a single job may declare.
pub const MAX_PICKUPS: usize = 2;

/// Default base (Appleton Tower).
pub const DEFAULT_BASE: Point = Point::new(-3.186874, 55.944494);

/// Default confinement area.
pub const DEFAULT_BOUNDS: Bounds = Bounds {
    west: -3.192473,
    east: -3.184319,
    south: 55.942617,
    north: 55.946233,
};

/// How a single move behaves: step size, arrival tolerance and the area the
/// vehicle must stay inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightRules {
    pub step_length: f64,
    pub tolerance: f64,
    pub bounds: Bounds,
}

impl Default for FlightRules {
    fn default() -> Self {
        Self {
            step_length: STEP_LENGTH,
            tolerance: CLOSE_TOLERANCE,
            bounds: DEFAULT_BOUNDS,
        }
    }
}

impl FlightRules {
    /// A tolerance below the step length lets a leg orbit its goal without
    /// ever arriving.
    pub fn validate(&self) -> Result<()> {
        let step_ok = self.step_length.is_finite() && self.step_length > 0.0;
        if !step_ok || self.tolerance < self.step_length {
            return Err(PlanError::InvalidFlightRules {
                step_length: self.step_length,
                tolerance: self.tolerance,
            });
        }
        Ok(())
    }
}

/// Everything the job selector needs besides the snapshot data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Where the route starts and must end
    pub base: Point,
    /// Maximum number of moves in one run
    pub move_budget: usize,
    /// Maximum pickup points per job
    pub max_pickups: usize,
    pub rules: FlightRules,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE,
            move_budget: DEFAULT_MOVE_BUDGET,
            max_pickups: MAX_PICKUPS,
            rules: FlightRules::default(),
        }
    }
}

impl PlannerConfig {
    pub fn with_move_budget(mut self, move_budget: usize) -> Self {
        self.move_budget = move_budget;
        self
    }

    pub fn with_base(mut self, base: Point) -> Self {
        self.base = base;
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.rules.bounds = bounds;
        self
    }

    /// Reject movement rules that cannot converge and pickup limits the
    /// selector has no ordering search for.
    pub fn validate(&self) -> Result<()> {
        self.rules.validate()?;
        if self.max_pickups == 0 || self.max_pickups > MAX_PICKUPS {
            return Err(PlanError::UnsupportedMaxPickups {
                max_pickups: self.max_pickups,
                supported: MAX_PICKUPS,
            });
        }
        Ok(())
    }
}
