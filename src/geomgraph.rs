// Copyright 2016 planar-overlay Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! `GeometryGraph`: decomposes one input geometry into labelled edges and
//! points, then nodes them against itself and against the other argument's
//! graph (`ComputeSelfNodes`, `ComputeEdgeIntersections`, `ComputeSplitEdges`,
//! `GetNodeEnumerator`).
//!
//! Edges are kept at minimum granularity (one segment each) from the start,
//! rather than assembled into JTS-style maximal multi-point edges before
//! noding. Splitting a segment at an interior intersection is then just
//! replacing one edge with two; the planar graph and overlay driver
//! downstream are indifferent to edge length, so this trades a larger
//! `EdgeList` for a much simpler noding pass (see `DESIGN.md`).

use crate::bintree::BinTree;
use crate::coord::Coordinate;
use crate::edge::Edge;
use crate::geom::{Geometry, LineString, Polygon, Rect};
use crate::interval::Interval;
use crate::intersect::{IntersectionResult, LineIntersector};
use crate::label::{GeometryLabel, Label};
use crate::location::Location;

/// One argument's decomposed geometry: segment edges (tagged with the ring
/// or line they came from, for `ring_self_touch_only` filtering) plus any
/// standalone points.
#[derive(Debug, Clone)]
pub struct GeometryGraph {
    arg_index: usize,
    edges: Vec<Edge>,
    ring_ids: Vec<usize>,
    points: Vec<(Coordinate, Label)>,
}

const MAX_NODING_PASSES: usize = 6;

impl GeometryGraph {
    pub fn new(arg_index: usize, geometry: &Geometry) -> GeometryGraph {
        let mut graph = GeometryGraph {
            arg_index,
            edges: Vec::new(),
            ring_ids: Vec::new(),
            points: Vec::new(),
        };
        let mut next_ring_id = 0;
        graph.decompose(geometry, &mut next_ring_id);
        graph
    }

    fn decompose(&mut self, geometry: &Geometry, next_ring_id: &mut usize) {
        match geometry {
            Geometry::Point(p) => self.push_point(p.0),
            Geometry::MultiPoint(mp) => {
                for p in &mp.0 {
                    self.push_point(p.0);
                }
            }
            Geometry::LineString(ls) => self.push_line(ls, next_ring_id),
            Geometry::MultiLineString(mls) => {
                for ls in &mls.0 {
                    self.push_line(ls, next_ring_id);
                }
            }
            Geometry::Polygon(p) => self.push_polygon(p, next_ring_id),
            Geometry::MultiPolygon(mp) => {
                for p in &mp.0 {
                    self.push_polygon(p, next_ring_id);
                }
            }
            Geometry::GeometryCollection(gc) => {
                for g in &gc.0 {
                    self.decompose(g, next_ring_id);
                }
            }
        }
    }

    fn push_point(&mut self, coord: Coordinate) {
        let label = Label::single(self.arg_index, GeometryLabel::line(Location::Interior));
        self.points.push((coord, label));
    }

    fn push_line(&mut self, ls: &LineString, next_ring_id: &mut usize) {
        let ring_id = *next_ring_id;
        *next_ring_id += 1;
        let label = Label::single(self.arg_index, GeometryLabel::line(Location::Interior));
        for (a, b) in ls.lines() {
            self.edges.push(Edge::new(vec![a, b], label));
            self.ring_ids.push(ring_id);
        }
    }

    fn push_polygon(&mut self, polygon: &Polygon, next_ring_id: &mut usize) {
        let normalized = polygon.normalized();
        // Left = exterior, Right = interior, for every ring once shells are
        // clockwise and holes counter-clockwise (see Polygon::normalized).
        let label = Label::single(self.arg_index, GeometryLabel::area(Location::Exterior, Location::Boundary, Location::Interior));
        for ring in normalized.rings() {
            let ring_id = *next_ring_id;
            *next_ring_id += 1;
            for (a, b) in ring.lines() {
                self.edges.push(Edge::new(vec![a, b], label));
                self.ring_ids.push(ring_id);
            }
        }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn points(&self) -> &[(Coordinate, Label)] {
        &self.points
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        let from_edges = self
            .edges
            .iter()
            .filter_map(|e| Rect::of(e.coordinates().iter().copied()))
            .reduce(|a, b| a.expand(&b));
        let from_points = Rect::of(self.points.iter().map(|(c, _)| *c));
        match (from_edges, from_points) {
            (Some(a), Some(b)) => Some(a.expand(&b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.points.is_empty()
    }

    /// Every distinct vertex coordinate this graph contributes.
    pub fn node_enumerator(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.edges
            .iter()
            .flat_map(|e| e.coordinates().iter().copied())
            .chain(self.points.iter().map(|(c, _)| *c))
    }

    /// Nodes this graph against itself: splits any two non-adjacent
    /// segments at their interior crossing. When `ring_self_touch_only` is
    /// set, only segments belonging to the same ring/line are compared.
    pub fn compute_self_nodes(&mut self, intersector: &LineIntersector, ring_self_touch_only: bool) {
        for _ in 0..MAX_NODING_PASSES {
            let candidates = self.build_index();
            let mut splits: Vec<(usize, Coordinate)> = Vec::new();
            for i in 0..self.edges.len() {
                let xi = x_interval(&self.edges[i]);
                for &j in candidates.query(xi) {
                    if j <= i {
                        continue;
                    }
                    if ring_self_touch_only && self.ring_ids[i] != self.ring_ids[j] {
                        continue;
                    }
                    record_split(&self.edges[i], &self.edges[j], intersector, &mut splits, i, j);
                }
            }
            if splits.is_empty() {
                break;
            }
            self.apply_splits(splits);
        }
    }

    /// Nodes this graph against `other`, splitting segments on both sides
    /// at interior crossings.
    pub fn compute_edge_intersections(&mut self, other: &mut GeometryGraph, intersector: &LineIntersector) {
        for _ in 0..MAX_NODING_PASSES {
            let other_index = other.build_index();
            let mut self_splits: Vec<(usize, Coordinate)> = Vec::new();
            let mut other_splits: Vec<(usize, Coordinate)> = Vec::new();
            for i in 0..self.edges.len() {
                let xi = x_interval(&self.edges[i]);
                for &j in other_index.query(xi) {
                    match intersector.compute(
                        self.edges[i].coordinates()[0],
                        self.edges[i].coordinates()[1],
                        other.edges[j].coordinates()[0],
                        other.edges[j].coordinates()[1],
                    ) {
                        IntersectionResult::PointIntersection(p) => {
                            if is_interior_point(&self.edges[i], p) {
                                self_splits.push((i, p));
                            }
                            if is_interior_point(&other.edges[j], p) {
                                other_splits.push((j, p));
                            }
                        }
                        IntersectionResult::CollinearIntersection(a, b) => {
                            for p in [a, b] {
                                if is_interior_point(&self.edges[i], p) {
                                    self_splits.push((i, p));
                                }
                                if is_interior_point(&other.edges[j], p) {
                                    other_splits.push((j, p));
                                }
                            }
                        }
                        IntersectionResult::NoIntersection => {}
                    }
                }
            }
            let nothing_to_do = self_splits.is_empty() && other_splits.is_empty();
            self.apply_splits(self_splits);
            other.apply_splits(other_splits);
            if nothing_to_do {
                break;
            }
        }
    }

    /// Appends this graph's current (fully noded) edges to `out`.
    pub fn compute_split_edges(&self, out: &mut Vec<Edge>) {
        out.extend(self.edges.iter().cloned());
    }

    fn build_index(&self) -> BinTree<usize> {
        let mut tree = BinTree::new();
        for (i, edge) in self.edges.iter().enumerate() {
            tree.insert(x_interval(edge), i);
        }
        tree
    }

    /// Replaces each split edge with its ordered chain of sub-edges,
    /// applying all splits in one deferred pass so the edge vector is never
    /// mutated mid-scan (the same discipline as `EdgeList::replace_collapsed_edges`).
    fn apply_splits(&mut self, mut splits: Vec<(usize, Coordinate)>) {
        if splits.is_empty() {
            return;
        }
        splits.sort_by_key(|&(i, _)| i);

        let old_edges = std::mem::take(&mut self.edges);
        let old_ring_ids = std::mem::take(&mut self.ring_ids);
        let mut new_edges = Vec::with_capacity(old_edges.len());
        let mut new_ring_ids = Vec::with_capacity(old_ring_ids.len());

        let mut split_iter = splits.into_iter().peekable();
        for (idx, edge) in old_edges.into_iter().enumerate() {
            let mut points = Vec::new();
            while let Some(&(si, _)) = split_iter.peek() {
                if si == idx {
                    let (_, p) = split_iter.next().unwrap();
                    points.push(p);
                } else {
                    break;
                }
            }
            if points.is_empty() {
                new_ring_ids.push(old_ring_ids[idx]);
                new_edges.push(edge);
                continue;
            }
            let start = edge.coordinates()[0];
            points.sort_by(|a, b| start.distance(a).partial_cmp(&start.distance(b)).unwrap());
            points.dedup();
            let mut prev = start;
            for p in points {
                if p != prev {
                    new_edges.push(Edge::new(vec![prev, p], edge.label));
                    new_ring_ids.push(old_ring_ids[idx]);
                    prev = p;
                }
            }
            let end = *edge.coordinates().last().unwrap();
            if end != prev {
                new_edges.push(Edge::new(vec![prev, end], edge.label));
                new_ring_ids.push(old_ring_ids[idx]);
            }
        }
        self.edges = new_edges;
        self.ring_ids = new_ring_ids;
    }
}

fn x_interval(edge: &Edge) -> Interval {
    let a = edge.coordinates()[0];
    let b = *edge.coordinates().last().unwrap();
    Interval::new(a.x, b.x)
}

fn is_interior_point(edge: &Edge, p: Coordinate) -> bool {
    p != edge.coordinates()[0] && p != *edge.coordinates().last().unwrap()
}

fn record_split(a: &Edge, b: &Edge, intersector: &LineIntersector, out: &mut Vec<(usize, Coordinate)>, i: usize, j: usize) {
    let result = intersector.compute(a.coordinates()[0], a.coordinates()[1], b.coordinates()[0], b.coordinates()[1]);
    let mut consider = |p: Coordinate| {
        if is_interior_point(a, p) {
            out.push((i, p));
        }
        if is_interior_point(b, p) {
            out.push((j, p));
        }
    };
    match result {
        IntersectionResult::PointIntersection(p) => consider(p),
        IntersectionResult::CollinearIntersection(p1, p2) => {
            consider(p1);
            consider(p2);
        }
        IntersectionResult::NoIntersection => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn decomposes_polygon_into_labelled_boundary_edges() {
        let poly = Geometry::Polygon(Polygon::new(
            LineString(vec![c(0.0, 0.0), c(1.0, 0.0), c(1.0, 1.0), c(0.0, 1.0), c(0.0, 0.0)]),
            Vec::new(),
        ));
        let graph = GeometryGraph::new(0, &poly);
        assert_eq!(graph.edges().len(), 4);
        for edge in graph.edges() {
            assert!(edge.label.is_area(0));
        }
    }

    #[test]
    fn decomposes_point_into_a_standalone_point_not_an_edge() {
        let graph = GeometryGraph::new(1, &Geometry::Point(Point(c(5.0, 5.0))));
        assert!(graph.edges().is_empty());
        assert_eq!(graph.points().len(), 1);
    }

    #[test]
    fn cross_noding_splits_both_crossing_segments() {
        let mut a = GeometryGraph::new(0, &Geometry::LineString(LineString(vec![c(0.0, 0.0), c(10.0, 10.0)])));
        let mut b = GeometryGraph::new(1, &Geometry::LineString(LineString(vec![c(0.0, 10.0), c(10.0, 0.0)])));
        let intersector = LineIntersector::default();
        a.compute_edge_intersections(&mut b, &intersector);
        assert_eq!(a.edges().len(), 2);
        assert_eq!(b.edges().len(), 2);
        for edge in a.edges() {
            let last = *edge.coordinates().last().unwrap();
            let first = edge.coordinates()[0];
            assert!(first == c(5.0, 5.0) || last == c(5.0, 5.0));
        }
    }
}
