// Copyright 2016 planar-overlay Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! A segment/segment intersector, standing in for spec.md §6's "robust
//! segment intersector... assumed to return topologically consistent
//! intersection points under a chosen precision model."

use crate::coord::Coordinate;
use crate::geom::PrecisionModel;

/// The outcome of intersecting two line segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntersectionResult {
    NoIntersection,
    PointIntersection(Coordinate),
    /// The segments are collinear and overlap along `(a, b)`.
    CollinearIntersection(Coordinate, Coordinate),
}

/// Computes segment/segment intersections, rounding results through a
/// [`PrecisionModel`] so noded coordinates stay consistent across repeated
/// computations (spec.md §6's precision-model contract).
#[derive(Debug, Clone, Copy)]
pub struct LineIntersector {
    precision: PrecisionModel,
}

const EPSILON: f64 = 1e-10;

impl Default for LineIntersector {
    fn default() -> Self {
        LineIntersector::new(PrecisionModel::Floating)
    }
}

impl LineIntersector {
    pub fn new(precision: PrecisionModel) -> LineIntersector {
        LineIntersector { precision }
    }

    pub fn compute(&self, p1: Coordinate, p2: Coordinate, q1: Coordinate, q2: Coordinate) -> IntersectionResult {
        let result = self.compute_raw(p1, p2, q1, q2);
        match result {
            IntersectionResult::PointIntersection(c) => {
                IntersectionResult::PointIntersection(self.precision.make_precise(c))
            }
            IntersectionResult::CollinearIntersection(a, b) => IntersectionResult::CollinearIntersection(
                self.precision.make_precise(a),
                self.precision.make_precise(b),
            ),
            IntersectionResult::NoIntersection => IntersectionResult::NoIntersection,
        }
    }

    fn compute_raw(&self, p1: Coordinate, p2: Coordinate, q1: Coordinate, q2: Coordinate) -> IntersectionResult {
        let d1 = cross(q2, q1, p1);
        let d2 = cross(q2, q1, p2);
        let d3 = cross(p2, p1, q1);
        let d4 = cross(p2, p1, q2);

        if straddles(d1, d2) && straddles(d3, d4) {
            let denom = (p2.x - p1.x) * (q2.y - q1.y) - (p2.y - p1.y) * (q2.x - q1.x);
            if denom.abs() < EPSILON {
                return self.collinear_overlap(p1, p2, q1, q2);
            }
            let t = ((q1.x - p1.x) * (q2.y - q1.y) - (q1.y - p1.y) * (q2.x - q1.x)) / denom;
            let point = Coordinate::new(p1.x + t * (p2.x - p1.x), p1.y + t * (p2.y - p1.y));
            return IntersectionResult::PointIntersection(point);
        }

        if d1.abs() < EPSILON && on_segment(q1, p1, p2) {
            return IntersectionResult::PointIntersection(q1);
        }
        if d2.abs() < EPSILON && on_segment(q2, p1, p2) {
            return IntersectionResult::PointIntersection(q2);
        }
        if d3.abs() < EPSILON && on_segment(p1, q1, q2) {
            return IntersectionResult::PointIntersection(p1);
        }
        if d4.abs() < EPSILON && on_segment(p2, q1, q2) {
            return IntersectionResult::PointIntersection(p2);
        }

        if d1.abs() < EPSILON && d2.abs() < EPSILON && d3.abs() < EPSILON && d4.abs() < EPSILON {
            return self.collinear_overlap(p1, p2, q1, q2);
        }

        IntersectionResult::NoIntersection
    }

    fn collinear_overlap(&self, p1: Coordinate, p2: Coordinate, q1: Coordinate, q2: Coordinate) -> IntersectionResult {
        let axis_is_x = (p2.x - p1.x).abs() >= (p2.y - p1.y).abs();
        let param = |c: Coordinate| if axis_is_x { c.x } else { c.y };

        let (p_lo, p_hi) = order(param(p1), param(p2));
        let (q_lo, q_hi) = order(param(q1), param(q2));
        let lo = p_lo.max(q_lo);
        let hi = p_hi.min(q_hi);
        if lo > hi + EPSILON {
            return IntersectionResult::NoIntersection;
        }

        let at = |t: f64| -> Coordinate {
            if axis_is_x {
                let frac = if (p2.x - p1.x).abs() < EPSILON { 0.0 } else { (t - p1.x) / (p2.x - p1.x) };
                Coordinate::new(t, p1.y + frac * (p2.y - p1.y))
            } else {
                let frac = if (p2.y - p1.y).abs() < EPSILON { 0.0 } else { (t - p1.y) / (p2.y - p1.y) };
                Coordinate::new(p1.x + frac * (p2.x - p1.x), t)
            }
        };

        if (hi - lo).abs() < EPSILON {
            IntersectionResult::PointIntersection(at(lo))
        } else {
            IntersectionResult::CollinearIntersection(at(lo), at(hi))
        }
    }
}

fn order(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn cross(a: Coordinate, b: Coordinate, c: Coordinate) -> f64 {
    (a.x - b.x) * (c.y - b.y) - (a.y - b.y) * (c.x - b.x)
}

fn straddles(d1: f64, d2: f64) -> bool {
    (d1 > EPSILON && d2 < -EPSILON) || (d1 < -EPSILON && d2 > EPSILON)
}

fn on_segment(p: Coordinate, a: Coordinate, b: Coordinate) -> bool {
    p.x >= a.x.min(b.x) - EPSILON
        && p.x <= a.x.max(b.x) + EPSILON
        && p.y >= a.y.min(b.y) - EPSILON
        && p.y <= a.y.max(b.y) + EPSILON
}
