// Copyright 2016 planar-overlay Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! `geo-types` interop, enabled by the `geo-types` feature (mirrors the
//! teacher's own optional `geo-types` dependency).

use geo_types as gt;

use crate::coord::Coordinate;
use crate::geom::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};

impl From<Coordinate> for gt::Coord<f64> {
    fn from(c: Coordinate) -> Self {
        gt::coord! { x: c.x, y: c.y }
    }
}

impl From<gt::Coord<f64>> for Coordinate {
    fn from(c: gt::Coord<f64>) -> Self {
        Coordinate::new(c.x, c.y)
    }
}

impl From<Point> for gt::Point<f64> {
    fn from(p: Point) -> Self {
        gt::Point(p.0.into())
    }
}

impl From<gt::Point<f64>> for Point {
    fn from(p: gt::Point<f64>) -> Self {
        Point(p.0.into())
    }
}

impl From<LineString> for gt::LineString<f64> {
    fn from(ls: LineString) -> Self {
        gt::LineString(ls.0.into_iter().map(Into::into).collect())
    }
}

impl From<gt::LineString<f64>> for LineString {
    fn from(ls: gt::LineString<f64>) -> Self {
        LineString(ls.0.into_iter().map(Into::into).collect())
    }
}

impl From<Polygon> for gt::Polygon<f64> {
    fn from(p: Polygon) -> Self {
        gt::Polygon::new(p.exterior.into(), p.interiors.into_iter().map(Into::into).collect())
    }
}

impl From<gt::Polygon<f64>> for Polygon {
    fn from(p: gt::Polygon<f64>) -> Self {
        let (exterior, interiors) = p.into_inner();
        Polygon::new(exterior.into(), interiors.into_iter().map(Into::into).collect())
    }
}

impl From<MultiPoint> for gt::MultiPoint<f64> {
    fn from(mp: MultiPoint) -> Self {
        gt::MultiPoint(mp.0.into_iter().map(Into::into).collect())
    }
}

impl From<gt::MultiPoint<f64>> for MultiPoint {
    fn from(mp: gt::MultiPoint<f64>) -> Self {
        MultiPoint(mp.0.into_iter().map(Into::into).collect())
    }
}

impl From<MultiLineString> for gt::MultiLineString<f64> {
    fn from(mls: MultiLineString) -> Self {
        gt::MultiLineString(mls.0.into_iter().map(Into::into).collect())
    }
}

impl From<gt::MultiLineString<f64>> for MultiLineString {
    fn from(mls: gt::MultiLineString<f64>) -> Self {
        MultiLineString(mls.0.into_iter().map(Into::into).collect())
    }
}

impl From<MultiPolygon> for gt::MultiPolygon<f64> {
    fn from(mp: MultiPolygon) -> Self {
        gt::MultiPolygon(mp.0.into_iter().map(Into::into).collect())
    }
}

impl From<gt::MultiPolygon<f64>> for MultiPolygon {
    fn from(mp: gt::MultiPolygon<f64>) -> Self {
        MultiPolygon(mp.0.into_iter().map(Into::into).collect())
    }
}

impl From<Geometry> for gt::Geometry<f64> {
    fn from(g: Geometry) -> Self {
        match g {
            Geometry::Point(p) => gt::Geometry::Point(p.into()),
            Geometry::LineString(ls) => gt::Geometry::LineString(ls.into()),
            Geometry::Polygon(p) => gt::Geometry::Polygon(p.into()),
            Geometry::MultiPoint(mp) => gt::Geometry::MultiPoint(mp.into()),
            Geometry::MultiLineString(mls) => gt::Geometry::MultiLineString(mls.into()),
            Geometry::MultiPolygon(mp) => gt::Geometry::MultiPolygon(mp.into()),
            Geometry::GeometryCollection(gc) => {
                gt::Geometry::GeometryCollection(gt::GeometryCollection(gc.0.into_iter().map(Into::into).collect()))
            }
        }
    }
}

impl From<gt::Geometry<f64>> for Geometry {
    fn from(g: gt::Geometry<f64>) -> Self {
        match g {
            gt::Geometry::Point(p) => Geometry::Point(p.into()),
            gt::Geometry::Line(l) => {
                Geometry::LineString(LineString(vec![l.start.into(), l.end.into()]))
            }
            gt::Geometry::LineString(ls) => Geometry::LineString(ls.into()),
            gt::Geometry::Polygon(p) => Geometry::Polygon(p.into()),
            gt::Geometry::MultiPoint(mp) => Geometry::MultiPoint(mp.into()),
            gt::Geometry::MultiLineString(mls) => Geometry::MultiLineString(mls.into()),
            gt::Geometry::MultiPolygon(mp) => Geometry::MultiPolygon(mp.into()),
            gt::Geometry::GeometryCollection(gc) => {
                Geometry::GeometryCollection(GeometryCollection(gc.0.into_iter().map(Into::into).collect()))
            }
            gt::Geometry::Rect(r) => Geometry::Polygon(Polygon::new(
                LineString(vec![
                    r.min().into(),
                    gt::coord! { x: r.max().x, y: r.min().y }.into(),
                    r.max().into(),
                    gt::coord! { x: r.min().x, y: r.max().y }.into(),
                    r.min().into(),
                ]),
                Vec::new(),
            )),
            gt::Geometry::Triangle(t) => Geometry::Polygon(Polygon::new(
                LineString(vec![t.0.into(), t.1.into(), t.2.into(), t.0.into()]),
                Vec::new(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_roundtrips_through_geo_types() {
        let p = Point(Coordinate::new(1.5, -2.5));
        let gt_point: gt::Point<f64> = p.clone().into();
        let back: Point = gt_point.into();
        assert_eq!(p, back);
    }
}
