//! Segment intersection for move validation.
//!
//! Called once per zone edge for every candidate move, so it stays a plain
//! slope/intercept test with no allocation.

use crate::point::Point;

/// Residual below which two lines are taken to agree at the solved longitude.
const LINE_AGREEMENT_EPS: f64 = 1e-10;

/// Check whether segment `p1-p2` intersects segment `q1-q2`.
///
/// Touching endpoints count as an intersection. Parallel segments only
/// intersect when they are collinear and overlap.
pub fn segments_intersect(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    let (p_min_x, p_max_x) = min_max(p1.longitude, p2.longitude);
    let (q_min_x, q_max_x) = min_max(q1.longitude, q2.longitude);

    // No overlap in longitude means no intersection.
    if p_max_x < q_min_x || q_max_x < p_min_x {
        return false;
    }

    let p_vertical = p1.longitude == p2.longitude;
    let q_vertical = q1.longitude == q2.longitude;

    match (p_vertical, q_vertical) {
        (true, true) => {
            // Same longitude is guaranteed by the overlap check above.
            let (p_lo, p_hi) = min_max(p1.latitude, p2.latitude);
            let (q_lo, q_hi) = min_max(q1.latitude, q2.latitude);
            p_lo <= q_hi && q_lo <= p_hi
        }
        (true, false) => crosses_vertical(q1, q2, p1.longitude, p1.latitude, p2.latitude),
        (false, true) => crosses_vertical(p1, p2, q1.longitude, q1.latitude, q2.latitude),
        (false, false) => {
            let (m1, c1) = slope_intercept(p1, p2);
            let (m2, c2) = slope_intercept(q1, q2);

            if m1 == m2 {
                // Parallel: only collinear overlap counts, and the longitude
                // ranges already overlap.
                return c1 == c2;
            }

            let x = (c2 - c1) / (m1 - m2);
            let y1 = m1 * x + c1;
            let y2 = m2 * x + c2;
            if (y2 - y1).abs() >= LINE_AGREEMENT_EPS {
                return false;
            }

            let lower = p_min_x.max(q_min_x);
            let upper = p_max_x.min(q_max_x);
            x >= lower && x <= upper
        }
    }
}

/// Evaluate the non-vertical segment `a-b` at longitude `x` and test whether
/// it falls inside the vertical span `[lat_a, lat_b]`.
fn crosses_vertical(a: Point, b: Point, x: f64, lat_a: f64, lat_b: f64) -> bool {
    let (m, c) = slope_intercept(a, b);
    let y = m * x + c;
    let (lo, hi) = min_max(lat_a, lat_b);
    y >= lo && y <= hi
}

fn slope_intercept(a: Point, b: Point) -> (f64, f64) {
    let m = (a.latitude - b.latitude) / (a.longitude - b.longitude);
    (m, a.latitude - m * a.longitude)
}

fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
