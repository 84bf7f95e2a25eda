//! Landmark fallback routing.
//!
//! When the direct leg is blocked, try every landmark as a single
//! intermediate hop and keep the shortest complete detour.

use crate::config::FlightRules;
use crate::models::Path;
use crate::pathing::synthesize;
use crate::point::Point;
use crate::zones::NoFlyZones;
use tracing::{debug, trace};

/// Route from `start` to `goal`, going through at most one landmark.
///
/// Returns the direct path unchanged when it exists. Otherwise returns the
/// landmark detour with the fewest moves (first landmark wins ties), with
/// the hover over the landmark removed. The onward leg starts where the
/// inbound leg arrived. `None` when nothing works.
pub fn route(
    start: Point,
    goal: Point,
    zones: &NoFlyZones,
    landmarks: &[Point],
    rules: &FlightRules,
) -> Option<Path> {
    if let Some(direct) = synthesize(start, goal, zones, rules) {
        return Some(direct);
    }

    let best = landmarks
        .iter()
        .filter_map(|&landmark| {
            let inbound = synthesize(start, landmark, zones, rules)?;
            let reached = inbound.last_point().unwrap_or(start);
            let onward = synthesize(reached, goal, zones, rules)?;
            Some((landmark, inbound.join_via_landmark(onward)))
        })
        .fold(None, |best: Option<(Point, Path)>, candidate| match best {
            Some(current) if current.1.len() <= candidate.1.len() => Some(current),
            _ => Some(candidate),
        });

    match best {
        Some((landmark, path)) => {
            debug!(%start, %goal, %landmark, moves = path.len(), "routed via landmark");
            Some(path)
        }
        None => {
            trace!(%start, %goal, "no landmark detour available");
            None
        }
    }
}

/// The static inputs every leg needs, bundled so the selector does not thread
/// them through each call.
#[derive(Debug, Clone, Copy)]
pub struct LegPlanner<'a> {
    pub zones: &'a NoFlyZones,
    pub landmarks: &'a [Point],
    pub rules: &'a FlightRules,
}

impl<'a> LegPlanner<'a> {
    pub fn new(zones: &'a NoFlyZones, landmarks: &'a [Point], rules: &'a FlightRules) -> Self {
        Self {
            zones,
            landmarks,
            rules,
        }
    }

    pub fn leg(&self, from: Point, to: Point) -> Option<Path> {
        route(from, to, self.zones, self.landmarks, self.rules)
    }

    /// Chain legs through `stops` in order, starting at `from`. Each leg
    /// starts where the previous one actually arrived.
    pub fn tour(&self, from: Point, stops: &[Point]) -> Option<Path> {
        let mut path = Path::new();
        let mut current = from;
        for &stop in stops {
            let leg = self.leg(current, stop)?;
            current = leg.last_point().unwrap_or(current);
            path.extend(leg);
        }
        Some(path)
    }
}
