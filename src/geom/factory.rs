// Copyright 2016 planar-overlay Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! The geometry-factory collaborator spec.md §6 assumes: `BuildGeometry(list)
//! -> geometry`, which selects the most specific result type, plus the
//! `PrecisionModel` that configures the noding intersector.

use crate::coord::Coordinate;
use crate::geom::{Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};

/// How a computed intersection coordinate is snapped before being used as a
/// node. `Floating` keeps coordinates exactly as computed; `FixedScale`
/// rounds to the nearest `1 / scale` unit, the way JTS's fixed precision
/// models work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrecisionModel {
    Floating,
    FixedScale(f64),
}

impl PrecisionModel {
    pub fn make_precise(&self, c: Coordinate) -> Coordinate {
        match self {
            PrecisionModel::Floating => c,
            PrecisionModel::FixedScale(scale) => {
                Coordinate::new((c.x * scale).round() / scale, (c.y * scale).round() / scale)
            }
        }
    }
}

/// Assembles the most specific concrete [`Geometry`] for a set of result
/// polygons, lines, and points (spec.md §6's `BuildGeometry`).
#[derive(Debug, Clone)]
pub struct GeometryFactory {
    pub precision: PrecisionModel,
}

impl Default for GeometryFactory {
    fn default() -> Self {
        GeometryFactory {
            precision: PrecisionModel::Floating,
        }
    }
}

impl GeometryFactory {
    pub fn new(precision: PrecisionModel) -> GeometryFactory {
        GeometryFactory { precision }
    }

    pub fn build_geometry(&self, polygons: Vec<Polygon>, lines: Vec<LineString>, points: Vec<Point>) -> Geometry {
        let (has_p, has_l, has_pt) = (!polygons.is_empty(), !lines.is_empty(), !points.is_empty());
        match (has_p, has_l, has_pt) {
            (false, false, false) => Geometry::GeometryCollection(GeometryCollection(Vec::new())),
            (true, false, false) => {
                if polygons.len() == 1 {
                    Geometry::Polygon(polygons.into_iter().next().unwrap())
                } else {
                    Geometry::MultiPolygon(MultiPolygon(polygons))
                }
            }
            (false, true, false) => {
                if lines.len() == 1 {
                    Geometry::LineString(lines.into_iter().next().unwrap())
                } else {
                    Geometry::MultiLineString(MultiLineString(lines))
                }
            }
            (false, false, true) => {
                if points.len() == 1 {
                    Geometry::Point(points.into_iter().next().unwrap())
                } else {
                    Geometry::MultiPoint(MultiPoint(points))
                }
            }
            _ => {
                let mut items = Vec::with_capacity(polygons.len() + lines.len() + points.len());
                items.extend(polygons.into_iter().map(Geometry::Polygon));
                items.extend(lines.into_iter().map(Geometry::LineString));
                items.extend(points.into_iter().map(Geometry::Point));
                Geometry::GeometryCollection(GeometryCollection(items))
            }
        }
    }
}
