// Copyright 2016 planar-overlay Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! The concrete geometry representation the overlay core operates on.
//!
//! Spec.md treats "the geometry factory and coordinate value types" as an
//! assumed external collaborator; this module is that collaborator's
//! concrete, in-crate implementation, shaped like `geo-types` (optional
//! conversions live behind the `geo-types` feature in [`convert`]).

mod factory;
#[cfg(feature = "geo-types")]
mod convert;

pub use factory::{GeometryFactory, PrecisionModel};

use itertools::Itertools;

use crate::coord::Coordinate;

/// A single point.
#[derive(Debug, Clone, PartialEq)]
pub struct Point(pub Coordinate);

/// An ordered sequence of coordinates. Closed (ring) when `first == last`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString(pub Vec<Coordinate>);

impl LineString {
    pub fn is_closed(&self) -> bool {
        self.0.len() >= 4 && self.0.first() == self.0.last()
    }

    pub fn is_ring(&self) -> bool {
        self.0.len() >= 4 && self.is_closed()
    }

    /// Signed area via the shoelace formula; positive for counter-clockwise
    /// rings, negative for clockwise.
    pub fn signed_area(&self) -> f64 {
        let pts = &self.0;
        if pts.len() < 4 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..pts.len() - 1 {
            sum += pts[i].x * pts[i + 1].y - pts[i + 1].x * pts[i].y;
        }
        sum / 2.0
    }

    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    pub fn reversed(&self) -> LineString {
        let mut v = self.0.clone();
        v.reverse();
        LineString(v)
    }

    pub fn lines(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.0.iter().copied().tuple_windows()
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        Rect::of(self.0.iter().copied())
    }
}

/// A polygon: one exterior ring, zero or more interior rings (holes).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub exterior: LineString,
    pub interiors: Vec<LineString>,
}

impl Polygon {
    pub fn new(exterior: LineString, interiors: Vec<LineString>) -> Polygon {
        Polygon {
            exterior,
            interiors,
        }
    }

    pub fn rings(&self) -> impl Iterator<Item = &LineString> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        self.exterior.bounding_rect()
    }

    /// Orients the exterior ring clockwise and every interior ring
    /// counter-clockwise, per the Right-hand-side convention spec.md §4.6
    /// requires ("shells are oriented clockwise").
    pub fn normalized(&self) -> Polygon {
        let exterior = if self.exterior.is_clockwise() {
            self.exterior.clone()
        } else {
            self.exterior.reversed()
        };
        let interiors = self
            .interiors
            .iter()
            .map(|r| {
                if r.is_clockwise() {
                    r.reversed()
                } else {
                    r.clone()
                }
            })
            .collect();
        Polygon {
            exterior,
            interiors,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiPoint(pub Vec<Point>);

#[derive(Debug, Clone, PartialEq)]
pub struct MultiLineString(pub Vec<LineString>);

#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon(pub Vec<Polygon>);

#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCollection(pub Vec<Geometry>);

/// The union of every concrete geometry type the overlay engine can consume
/// or produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::LineString(ls) => ls.0.is_empty(),
            Geometry::Polygon(p) => p.exterior.0.is_empty(),
            Geometry::MultiPoint(mp) => mp.0.is_empty(),
            Geometry::MultiLineString(mls) => mls.0.is_empty(),
            Geometry::MultiPolygon(mp) => mp.0.is_empty(),
            Geometry::GeometryCollection(gc) => gc.0.iter().all(Geometry::is_empty),
        }
    }

    /// 0 for points, 1 for lines, 2 for areas; the max over a collection.
    pub fn dimension(&self) -> u8 {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => 0,
            Geometry::LineString(_) | Geometry::MultiLineString(_) => 1,
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => 2,
            Geometry::GeometryCollection(gc) => {
                gc.0.iter().map(Geometry::dimension).max().unwrap_or(0)
            }
        }
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        match self {
            Geometry::Point(p) => Rect::of(std::iter::once(p.0)),
            Geometry::LineString(ls) => ls.bounding_rect(),
            Geometry::Polygon(p) => p.bounding_rect(),
            Geometry::MultiPoint(mp) => Rect::of(mp.0.iter().map(|p| p.0)),
            Geometry::MultiLineString(mls) => {
                mls.0.iter().filter_map(|ls| ls.bounding_rect()).reduce(|a, b| a.expand(&b))
            }
            Geometry::MultiPolygon(mp) => mp
                .0
                .iter()
                .filter_map(|p| p.bounding_rect())
                .reduce(|a, b| a.expand(&b)),
            Geometry::GeometryCollection(gc) => gc
                .0
                .iter()
                .filter_map(Geometry::bounding_rect)
                .reduce(|a, b| a.expand(&b)),
        }
    }

    /// Every ring (exterior + interior) a polygon-bearing geometry contains.
    pub fn rings(&self) -> Vec<&LineString> {
        match self {
            Geometry::Polygon(p) => p.rings().collect(),
            Geometry::MultiPolygon(mp) => mp.0.iter().flat_map(|p| p.rings()).collect(),
            Geometry::GeometryCollection(gc) => gc.0.iter().flat_map(Geometry::rings).collect(),
            _ => Vec::new(),
        }
    }
}

/// An axis-aligned bounding rectangle, used only for the disjoint fast path
/// and ring bounds — not a spatial index (spec.md's Non-goals rule that out).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Coordinate,
    pub max: Coordinate,
}

impl Rect {
    pub fn of(coords: impl Iterator<Item = Coordinate>) -> Option<Rect> {
        let mut iter = coords;
        let first = iter.next()?;
        let mut rect = Rect {
            min: first,
            max: first,
        };
        for c in iter {
            rect.min.x = rect.min.x.min(c.x);
            rect.min.y = rect.min.y.min(c.y);
            rect.max.x = rect.max.x.max(c.x);
            rect.max.y = rect.max.y.max(c.y);
        }
        Some(rect)
    }

    pub fn expand(&self, other: &Rect) -> Rect {
        Rect {
            min: Coordinate::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Coordinate::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.max.x < other.min.x
            || other.max.x < self.min.x
            || self.max.y < other.min.y
            || other.max.y < self.min.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(coords: &[(f64, f64)]) -> LineString {
        LineString(coords.iter().map(|&(x, y)| Coordinate::new(x, y)).collect())
    }

    #[test]
    fn signed_area_sign_matches_winding() {
        let ccw = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]);
        let cw = ccw.reversed();
        assert!(ccw.signed_area() > 0.0);
        assert!(cw.signed_area() < 0.0);
        assert!(!ccw.is_clockwise());
        assert!(cw.is_clockwise());
    }

    #[test]
    fn normalized_polygon_orients_shell_clockwise() {
        let shell = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]);
        let poly = Polygon::new(shell, vec![]);
        let normalized = poly.normalized();
        assert!(normalized.exterior.is_clockwise());
    }
}
