//! Forbidden polygonal zones.

use crate::config::FlightRules;
use crate::error::{PlanError, Result};
use crate::point::Point;
use crate::spatial::segments_intersect;
use serde::{Deserialize, Serialize};

/// A closed polygon the vehicle may never cross. The last vertex connects
/// back to the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    vertices: Vec<Point>,
}

impl Zone {
    /// Build a zone from its ring. A repeated closing vertex (as GeoJSON
    /// rings carry) is dropped.
    pub fn new(mut vertices: Vec<Point>) -> Result<Self> {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(PlanError::DegenerateZone {
                vertices: vertices.len(),
            });
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Edges as consecutive vertex pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// True if the segment `from-to` touches any edge of this zone.
    pub fn crossed_by(&self, from: Point, to: Point) -> bool {
        self.edges()
            .any(|(a, b)| segments_intersect(from, to, a, b))
    }
}

/// All forbidden zones for one planning run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoFlyZones {
    zones: Vec<Zone>,
}

impl NoFlyZones {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self { zones }
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// True if the segment `from-to` crosses an edge of any zone.
    pub fn crosses(&self, from: Point, to: Point) -> bool {
        self.zones.iter().any(|zone| zone.crossed_by(from, to))
    }
}

impl FromIterator<Zone> for NoFlyZones {
    fn from_iter<I: IntoIterator<Item = Zone>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl FlightRules {
    /// A move is legal when it lands inside the bounds and does not cross any
    /// zone edge on the way.
    pub fn is_valid_move(&self, from: Point, to: Point, zones: &NoFlyZones) -> bool {
        self.in_bounds(to) && !zones.crosses(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, side: f64) -> Zone {
        Zone::new(vec![
            Point::new(x0, y0),
            Point::new(x0 + side, y0),
            Point::new(x0 + side, y0 + side),
            Point::new(x0, y0 + side),
        ])
        .unwrap()
    }

    #[test]
    fn test_closing_vertex_is_dropped() {
        let ring = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 0.0),
        ];
        let zone = Zone::new(ring).unwrap();
        assert_eq!(zone.vertices().len(), 3);
        assert_eq!(zone.edges().count(), 3);
    }

    #[test]
    fn test_too_few_vertices_is_rejected() {
        let err = Zone::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]).unwrap_err();
        assert_eq!(err, PlanError::DegenerateZone { vertices: 2 });
    }

    #[test]
    fn test_edges_wrap_around() {
        let zone = square(0.0, 0.0, 1.0);
        let edges: Vec<_> = zone.edges().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3], (Point::new(0.0, 1.0), Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_segment_through_zone_is_a_crossing() {
        let zones: NoFlyZones = vec![square(1.0, 1.0, 1.0)].into_iter().collect();
        assert!(zones.crosses(Point::new(0.5, 1.5), Point::new(2.5, 1.5)));
        assert!(!zones.crosses(Point::new(0.5, 0.5), Point::new(2.5, 0.5)));
    }

    #[test]
    fn test_valid_move_requires_bounds_and_no_crossing() {
        let rules = FlightRules::default();
        let zones = NoFlyZones::default();
        let inside = Point::new(-3.1880, 55.9440);
        let next = rules.step(inside, crate::point::Heading::Degrees(0));
        assert!(rules.is_valid_move(inside, next, &zones));
        let outside = Point::new(-3.1800, 55.9440);
        assert!(!rules.is_valid_move(inside, outside, &zones));
    }
}
