//! Greedy move synthesis between two points.
//!
//! The vehicle always heads straight for the goal at the nearest quantized
//! heading. There is no search: the first illegal step aborts the leg and the
//! caller decides what to do (see [`crate::landmarks`]).

use crate::config::FlightRules;
use crate::models::Path;
use crate::point::{Heading, Point};
use crate::zones::NoFlyZones;
use tracing::trace;

/// Simulate the move sequence from `start` to `goal`.
///
/// Returns `None` when a step would leave the bounds or cross a zone edge, or
/// when the leg has not arrived after [`max_steps`] moves. On arrival one
/// extra [`Heading::Hover`] is appended at the final point. Starting already
/// close to the goal yields an empty path.
pub fn synthesize(
    start: Point,
    goal: Point,
    zones: &NoFlyZones,
    rules: &FlightRules,
) -> Option<Path> {
    let mut path = Path::new();
    let mut current = start;
    let limit = max_steps(start, goal, rules)?;

    while !rules.is_close(current, goal) {
        if path.len() >= limit {
            trace!(%start, %goal, limit, "leg did not converge");
            return None;
        }
        let heading = current.heading_towards(goal);
        let candidate = rules.step(current, heading);

        if !rules.is_valid_move(current, candidate, zones) {
            trace!(
                %start,
                %goal,
                blocked_at = %current,
                steps = path.len(),
                "direct leg blocked"
            );
            return None;
        }

        path.push(heading, candidate);
        if rules.is_close(candidate, goal) {
            path.push(Heading::Hover, candidate);
        }
        current = candidate;
    }

    Some(path)
}

/// Upper bound on the moves a leg may take. With 10° quantization every step
/// taken from outside the tolerance closes nearly half a step, so three
/// steps per step-length of distance is never reached by a converging leg.
/// `None` when the step length cannot make progress at all.
pub fn max_steps(start: Point, goal: Point, rules: &FlightRules) -> Option<usize> {
    if !(rules.step_length.is_finite() && rules.step_length > 0.0) {
        return None;
    }
    let spans = (start.distance_to(goal) / rules.step_length).ceil();
    Some(3 * spans as usize + 8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Bounds;
    use crate::zones::Zone;

    fn open_rules() -> FlightRules {
        FlightRules {
            bounds: Bounds {
                west: -1.0,
                east: 1.0,
                south: -1.0,
                north: 1.0,
            },
            ..FlightRules::default()
        }
    }

    #[test]
    fn test_open_field_path_length_tracks_distance() {
        let rules = open_rules();
        let start = Point::new(0.0, 0.0);
        let goal = Point::new(0.003, 0.0);
        let path = synthesize(start, goal, &NoFlyZones::default(), &rules).unwrap();

        // 0.003 / 0.00015 = 20 steps; arrival within tolerance happens one
        // step early, plus the hover.
        let expected = (start.distance_to(goal) / rules.step_length).ceil() as usize;
        assert!(path.len() >= expected - 1 && path.len() <= expected + 1);
        assert_eq!(path.headings().last(), Some(&Heading::Hover));
        assert!(rules.is_close(path.last_point().unwrap(), goal));
        assert_eq!(path.points().len(), path.headings().len());
    }

    #[test]
    fn test_only_the_final_move_hovers() {
        let rules = open_rules();
        let path = synthesize(
            Point::new(0.0, 0.0),
            Point::new(0.002, 0.0015),
            &NoFlyZones::default(),
            &rules,
        )
        .unwrap();
        let hovers = path.headings().iter().filter(|h| h.is_hover()).count();
        assert_eq!(hovers, 1);
        let (last, rest) = path.points().split_last().unwrap();
        assert_eq!(rest.last(), Some(last));
    }

    #[test]
    fn test_already_close_is_an_empty_path() {
        let rules = open_rules();
        let p = Point::new(0.0, 0.0);
        let path = synthesize(p, Point::new(0.0001, 0.0), &NoFlyZones::default(), &rules).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_wall_in_the_way_is_unreachable() {
        let rules = open_rules();
        let wall = Zone::new(vec![
            Point::new(0.001, -0.01),
            Point::new(0.0012, -0.01),
            Point::new(0.0012, 0.01),
            Point::new(0.001, 0.01),
        ])
        .unwrap();
        let zones = NoFlyZones::new(vec![wall]);
        assert!(synthesize(Point::new(0.0, 0.0), Point::new(0.003, 0.0), &zones, &rules).is_none());
    }

    #[test]
    fn test_leaving_bounds_is_unreachable() {
        let rules = FlightRules::default();
        let inside = Point::new(-3.1880, 55.9440);
        let outside = Point::new(-3.1800, 55.9440);
        assert!(synthesize(inside, outside, &NoFlyZones::default(), &rules).is_none());
    }

    #[test]
    fn test_tolerance_tighter_than_step_gives_up() {
        let rules = FlightRules {
            tolerance: 0.00001,
            ..open_rules()
        };
        let start = Point::new(0.0, 0.0);
        let goal = Point::new(0.00107, 0.00033);
        assert!(synthesize(start, goal, &NoFlyZones::default(), &rules).is_none());
    }

    #[test]
    fn test_zero_step_length_is_unreachable() {
        let rules = FlightRules {
            step_length: 0.0,
            ..open_rules()
        };
        let path = synthesize(
            Point::new(0.0, 0.0),
            Point::new(0.001, 0.0),
            &NoFlyZones::default(),
            &rules,
        );
        assert!(path.is_none());
    }

    #[test]
    fn test_converging_legs_stay_under_the_step_limit() {
        let rules = FlightRules::default();
        let start = Point::new(-3.1920, 55.9428);
        let goal = Point::new(-3.1846, 55.9460);
        let path = synthesize(start, goal, &NoFlyZones::default(), &rules).unwrap();
        assert!(path.len() < max_steps(start, goal, &rules).unwrap());
    }

    #[test]
    fn test_every_step_is_legal() {
        let rules = FlightRules::default();
        let start = Point::new(-3.1910, 55.9430);
        let goal = Point::new(-3.1850, 55.9460);
        let zones = NoFlyZones::default();
        let path = synthesize(start, goal, &zones, &rules).unwrap();
        let mut prev = start;
        for (point, heading) in path.points().iter().zip(path.headings()) {
            assert_eq!(*point, rules.step(prev, *heading));
            assert!(rules.is_valid_move(prev, *point, &zones) || heading.is_hover());
            prev = *point;
        }
    }
}
