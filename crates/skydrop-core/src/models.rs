//! Core data models for delivery planning.

use crate::config::FlightRules;
use crate::error::{PlanError, Result};
use crate::point::{Heading, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag written for moves that are not part of any job.
pub const RETURN_TO_BASE_TAG: &str = "--------";

/// A candidate delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    /// Value in pence
    pub value: u32,
    /// Pickup coordinates; `None` when the location could not be resolved
    pub pickups: Vec<Option<Point>>,
    /// Drop coordinate; `None` when the location could not be resolved
    pub drop: Option<Point>,
}

impl Job {
    pub fn new(
        id: impl Into<String>,
        value: u32,
        pickups: Vec<Option<Point>>,
        drop: Option<Point>,
    ) -> Self {
        Self {
            id: id.into(),
            value,
            pickups,
            drop,
        }
    }

    /// Reject a pickup count outside `1..=max_pickups`.
    pub fn validate(&self, max_pickups: usize) -> Result<()> {
        let count = self.pickups.len();
        if count == 0 || count > max_pickups {
            return Err(PlanError::InvalidPickupCount {
                job_id: self.id.clone(),
                count,
                max: max_pickups,
            });
        }
        Ok(())
    }

    /// Pickups and drop when every coordinate is known.
    pub fn resolved(&self) -> Option<(Vec<Point>, Point)> {
        let pickups = self.pickups.iter().copied().collect::<Option<Vec<_>>>()?;
        Some((pickups, self.drop?))
    }
}

/// Which job a move belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveTag {
    Job(String),
    ReturnToBase,
}

impl fmt::Display for MoveTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveTag::Job(id) => f.write_str(id),
            MoveTag::ReturnToBase => f.write_str(RETURN_TO_BASE_TAG),
        }
    }
}

/// One committed step of the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub heading: Heading,
    pub to: Point,
    pub tag: MoveTag,
}

/// An untagged move sequence between two points. Points and headings are
/// index-aligned: `headings[i]` is the heading that produced `points[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    points: Vec<Point>,
    headings: Vec<Heading>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, heading: Heading, point: Point) {
        self.headings.push(heading);
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Append another path after this one.
    pub fn extend(&mut self, other: Path) {
        self.points.extend(other.points);
        self.headings.extend(other.headings);
    }

    /// Splice `self` (ending at a landmark) onto `onward`, dropping the hover
    /// over the landmark.
    pub fn join_via_landmark(mut self, onward: Path) -> Path {
        if self.headings.last().is_some_and(Heading::is_hover) {
            self.points.pop();
            self.headings.pop();
        }
        self.extend(onward);
        self
    }

    /// Tag every step of the path.
    pub fn into_moves(self, tag: &MoveTag) -> impl Iterator<Item = Move> + '_ {
        self.headings
            .into_iter()
            .zip(self.points)
            .map(move |(heading, to)| Move {
                heading,
                to,
                tag: tag.clone(),
            })
    }
}

/// One row of the flight log: where a move started, its heading, where it
/// ended and which job it served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Point,
    pub heading: Heading,
    pub to: Point,
    pub tag: MoveTag,
}

/// The full committed route, starting at `origin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub origin: Point,
    pub moves: Vec<Move>,
}

impl Route {
    pub fn starting_at(origin: Point) -> Self {
        Self {
            origin,
            moves: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn append(&mut self, path: Path, tag: MoveTag) {
        self.moves.extend(path.into_moves(&tag));
    }

    /// Current end of the route.
    pub fn end(&self) -> Point {
        self.moves.last().map(|m| m.to).unwrap_or(self.origin)
    }

    /// Every visited position, origin first.
    pub fn points(&self) -> Vec<Point> {
        std::iter::once(self.origin)
            .chain(self.moves.iter().map(|m| m.to))
            .collect()
    }

    /// Moves as `(from, heading, to, tag)` rows.
    pub fn records(&self) -> Vec<MoveRecord> {
        let mut from = self.origin;
        self.moves
            .iter()
            .map(|m| {
                let record = MoveRecord {
                    from,
                    heading: m.heading,
                    to: m.to,
                    tag: m.tag.clone(),
                };
                from = m.to;
                record
            })
            .collect()
    }

    /// True if no move leaves the bounds or crosses a zone.
    pub fn is_legal(&self, rules: &FlightRules, zones: &crate::zones::NoFlyZones) -> bool {
        self.records().iter().all(|r| {
            r.heading.is_hover() || rules.is_valid_move(r.from, r.to, zones)
        })
    }
}

/// Order in which the pickups of a job were visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupOrdering {
    /// Pickups visited as listed
    AsListed,
    /// Two pickups visited second-first
    Reversed,
}

/// Why and at what cost a job was committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commitment {
    pub job_id: String,
    /// Value per move at the time of selection
    pub ratio: f64,
    /// Moves spent on the job's leg
    pub moves: usize,
    pub ordering: PickupOrdering,
}

/// Outcome of one planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    pub jobs_done: Vec<Job>,
    pub route: Route,
    pub moves_used: usize,
    pub total_offered_value: u64,
    pub value_captured: u64,
    pub commitments: Vec<Commitment>,
}

impl PlanResult {
    /// Captured value as a fraction of everything offered.
    pub fn utilization(&self) -> f64 {
        if self.total_offered_value == 0 {
            return 0.0;
        }
        self.value_captured as f64 / self.total_offered_value as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pickup_count_outside_range_is_rejected() {
        let p = Some(Point::new(0.0, 0.0));
        let three = Job::new("abc", 100, vec![p, p, p], p);
        assert!(matches!(
            three.validate(2),
            Err(PlanError::InvalidPickupCount { count: 3, max: 2, .. })
        ));
        let none = Job::new("def", 100, vec![], p);
        assert!(none.validate(2).is_err());
        let two = Job::new("ghi", 100, vec![p, p], p);
        assert!(two.validate(2).is_ok());
    }

    #[test]
    fn test_unresolved_coordinates_make_job_unresolved() {
        let p = Some(Point::new(0.0, 0.0));
        assert!(Job::new("a", 1, vec![p, None], p).resolved().is_none());
        assert!(Job::new("b", 1, vec![p], None).resolved().is_none());
        assert!(Job::new("c", 1, vec![p], p).resolved().is_some());
    }

    #[test]
    fn test_landmark_join_drops_only_the_hover() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        let mut first = Path::new();
        first.push(Heading::Degrees(0), a);
        first.push(Heading::Hover, a);
        let mut second = Path::new();
        second.push(Heading::Degrees(0), b);
        second.push(Heading::Hover, b);

        let joined = first.join_via_landmark(second);
        assert_eq!(joined.len(), 3);
        assert_eq!(
            joined.headings(),
            &[Heading::Degrees(0), Heading::Degrees(0), Heading::Hover]
        );
    }

    #[test]
    fn test_records_chain_from_origin() {
        let origin = Point::new(0.0, 0.0);
        let mut path = Path::new();
        path.push(Heading::Degrees(0), Point::new(1.0, 0.0));
        path.push(Heading::Hover, Point::new(1.0, 0.0));
        let mut route = Route::starting_at(origin);
        route.append(path, MoveTag::Job("abcd1234".into()));

        let records = route.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].from, origin);
        assert_eq!(records[1].from, Point::new(1.0, 0.0));
        assert_eq!(route.points().len(), 3);
        assert_eq!(route.end(), Point::new(1.0, 0.0));
    }

    #[test]
    fn test_return_tag_displays_as_dashes() {
        assert_eq!(MoveTag::ReturnToBase.to_string(), "--------");
        assert_eq!(MoveTag::Job("1ad5f1ff".into()).to_string(), "1ad5f1ff");
    }

    #[test]
    fn test_utilization_handles_empty_offer() {
        let result = PlanResult {
            jobs_done: vec![],
            route: Route::starting_at(Point::new(0.0, 0.0)),
            moves_used: 0,
            total_offered_value: 0,
            value_captured: 0,
            commitments: vec![],
        };
        assert_eq!(result.utilization(), 0.0);
    }
}
