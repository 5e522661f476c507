// Copyright 2016 planar-overlay Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! `PointLocator::locate(coord, geometry) -> Location`, the collaborator
//! spec.md §4.5 Stage D and §4.7's coverage tests rely on.

use crate::coord::Coordinate;
use crate::geom::{Geometry, LineString};
use crate::location::Location;

const EPSILON: f64 = 1e-9;

/// Answers "where does `coord` lie relative to `geometry`?" via ray casting
/// with an explicit on-boundary check.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointLocator;

impl PointLocator {
    pub fn new() -> PointLocator {
        PointLocator
    }

    pub fn locate(&self, coord: Coordinate, geometry: &Geometry) -> Location {
        match geometry {
            Geometry::Point(p) => {
                if p.0 == coord {
                    Location::Interior
                } else {
                    Location::Exterior
                }
            }
            Geometry::MultiPoint(mp) => {
                if mp.0.iter().any(|p| p.0 == coord) {
                    Location::Interior
                } else {
                    Location::Exterior
                }
            }
            Geometry::LineString(ls) => self.locate_on_line(coord, ls),
            Geometry::MultiLineString(mls) => mls
                .0
                .iter()
                .map(|ls| self.locate_on_line(coord, ls))
                .find(|loc| *loc != Location::Exterior)
                .unwrap_or(Location::Exterior),
            Geometry::Polygon(p) => self.locate_in_polygon(coord, &p.exterior, &p.interiors),
            Geometry::MultiPolygon(mp) => mp
                .0
                .iter()
                .map(|p| self.locate_in_polygon(coord, &p.exterior, &p.interiors))
                .find(|loc| *loc != Location::Exterior)
                .unwrap_or(Location::Exterior),
            Geometry::GeometryCollection(gc) => gc
                .0
                .iter()
                .map(|g| self.locate(coord, g))
                .find(|loc| *loc != Location::Exterior)
                .unwrap_or(Location::Exterior),
        }
    }

    /// `locate` restricted to a single line, without wrapping it in a
    /// [`Geometry`] first; used by the result builders' coverage tests.
    pub fn locate_line(&self, coord: Coordinate, ls: &LineString) -> Location {
        self.locate_on_line(coord, ls)
    }

    /// `locate` restricted to a single polygon, without wrapping it in a
    /// [`Geometry`] first; used by the result builders' coverage tests.
    pub fn locate_polygon(&self, coord: Coordinate, polygon: &crate::geom::Polygon) -> Location {
        self.locate_in_polygon(coord, &polygon.exterior, &polygon.interiors)
    }

    fn locate_on_line(&self, coord: Coordinate, ls: &LineString) -> Location {
        for (a, b) in ls.lines() {
            if point_on_segment(coord, a, b) {
                if (coord == a || coord == b) && !ls.is_closed() {
                    return Location::Boundary;
                }
                return Location::Interior;
            }
        }
        Location::Exterior
    }

    fn locate_in_polygon(&self, coord: Coordinate, exterior: &LineString, interiors: &[LineString]) -> Location {
        let shell = ring_locate(coord, exterior);
        if shell == Location::Exterior || shell == Location::Boundary {
            return shell;
        }
        for hole in interiors {
            let hole_loc = ring_locate(coord, hole);
            match hole_loc {
                Location::Interior => return Location::Exterior,
                Location::Boundary => return Location::Boundary,
                _ => {}
            }
        }
        Location::Interior
    }
}

/// Ray-casting point-in-ring test with an explicit on-boundary check.
fn ring_locate(coord: Coordinate, ring: &LineString) -> Location {
    let pts = &ring.0;
    if pts.len() < 4 {
        return Location::Exterior;
    }
    for i in 0..pts.len() - 1 {
        if point_on_segment(coord, pts[i], pts[i + 1]) {
            return Location::Boundary;
        }
    }

    let mut inside = false;
    for i in 0..pts.len() - 1 {
        let a = pts[i];
        let b = pts[i + 1];
        let crosses_y = (a.y > coord.y) != (b.y > coord.y);
        if crosses_y {
            let x_at_y = a.x + (coord.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if coord.x < x_at_y {
                inside = !inside;
            }
        }
    }
    if inside {
        Location::Interior
    } else {
        Location::Exterior
    }
}

fn point_on_segment(p: Coordinate, a: Coordinate, b: Coordinate) -> bool {
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    if cross.abs() > EPSILON {
        return false;
    }
    p.x >= a.x.min(b.x) - EPSILON
        && p.x <= a.x.max(b.x) + EPSILON
        && p.y >= a.y.min(b.y) - EPSILON
        && p.y <= a.y.max(b.y) + EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Polygon;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn square() -> Polygon {
        Polygon::new(
            LineString(vec![c(0.0, 0.0), c(10.0, 0.0), c(10.0, 10.0), c(0.0, 10.0), c(0.0, 0.0)]),
            Vec::new(),
        )
    }

    #[test]
    fn locates_interior_boundary_and_exterior_points() {
        let locator = PointLocator::new();
        let poly = Geometry::Polygon(square());
        assert_eq!(locator.locate(c(5.0, 5.0), &poly), Location::Interior);
        assert_eq!(locator.locate(c(0.0, 5.0), &poly), Location::Boundary);
        assert_eq!(locator.locate(c(20.0, 20.0), &poly), Location::Exterior);
    }

    #[test]
    fn hole_punches_interior_back_to_exterior() {
        let locator = PointLocator::new();
        let poly = Geometry::Polygon(Polygon::new(
            LineString(vec![c(0.0, 0.0), c(10.0, 0.0), c(10.0, 10.0), c(0.0, 10.0), c(0.0, 0.0)]),
            vec![LineString(vec![c(2.0, 2.0), c(8.0, 2.0), c(8.0, 8.0), c(2.0, 8.0), c(2.0, 2.0)])],
        ));
        assert_eq!(locator.locate(c(5.0, 5.0), &poly), Location::Exterior);
        assert_eq!(locator.locate(c(1.0, 1.0), &poly), Location::Interior);
    }
}
