//! Planar coordinate primitives and single-move kinematics.
//!
//! Coordinates are treated as a flat plane measured in degrees. At the scale
//! of a single campus the distortion does not matter.

use crate::config::{FlightRules, HOVER_ANGLE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A longitude/latitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(rename = "lng")]
    pub longitude: f64,
    #[serde(rename = "lat")]
    pub latitude: f64,
}

impl Point {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Euclidean distance in degrees.
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = other.longitude - self.longitude;
        let dy = other.latitude - self.latitude;
        (dx * dx + dy * dy).sqrt()
    }

    /// Quantized heading from `self` towards `to`.
    ///
    /// 0 is east, 90 north, increasing counter-clockwise; the raw bearing is
    /// rounded to the nearest multiple of 10 with ties going up and 360
    /// folding back to 0. Callers never ask for the heading between two
    /// coincident points.
    pub fn heading_towards(&self, to: Point) -> Heading {
        let x = to.longitude - self.longitude;
        let y = to.latitude - self.latitude;

        let from_east = if x == 0.0 {
            if y >= 0.0 {
                90.0
            } else {
                270.0
            }
        } else {
            let angle = (y / x).atan().to_degrees();
            if x > 0.0 && y >= 0.0 {
                angle
            } else if x < 0.0 && y >= 0.0 {
                180.0 - angle.abs()
            } else if x < 0.0 {
                180.0 + angle
            } else {
                360.0 - angle.abs()
            }
        };

        Heading::quantize(from_east)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.longitude, self.latitude)
    }
}

/// Direction of a single move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heading {
    /// Multiple of 10 in `[0, 360)`
    Degrees(u16),
    /// Zero-displacement dwell
    Hover,
}

impl Heading {
    /// Round an angle in `[0, 360]` to the nearest multiple of 10.
    pub fn quantize(angle: f64) -> Self {
        // f64::round sends x.5 away from zero, i.e. up for non-negative angles.
        let rounded = (angle / 10.0).round() as i64 * 10;
        Heading::Degrees(rounded.rem_euclid(360) as u16)
    }

    /// Integer form used by persistence, with [`HOVER_ANGLE`] for hovering.
    pub fn as_degrees(&self) -> i32 {
        match self {
            Heading::Degrees(d) => i32::from(*d),
            Heading::Hover => HOVER_ANGLE,
        }
    }

    pub fn is_hover(&self) -> bool {
        matches!(self, Heading::Hover)
    }
}

/// Axis-aligned confinement rectangle. Points on an edge are outside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

impl Bounds {
    pub fn contains(&self, p: Point) -> bool {
        p.longitude > self.west
            && p.longitude < self.east
            && p.latitude > self.south
            && p.latitude < self.north
    }
}

impl FlightRules {
    /// True when `a` and `b` are within the arrival tolerance.
    pub fn is_close(&self, a: Point, b: Point) -> bool {
        a.distance_to(b) < self.tolerance
    }

    /// Position after one move from `from` at `heading`.
    pub fn step(&self, from: Point, heading: Heading) -> Point {
        match heading {
            Heading::Hover => from,
            Heading::Degrees(d) => {
                let theta = f64::from(d).to_radians();
                Point::new(
                    from.longitude + self.step_length * theta.cos(),
                    from.latitude + self.step_length * theta.sin(),
                )
            }
        }
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }
}
