// Copyright 2016 planar-overlay Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Result builders (spec.md §4.7): `PolygonBuilder`, `LineBuilder`, and
//! `PointBuilder`, assembled in the mandatory polygon -> line -> point
//! order so each later stage's coverage test sees the earlier stages'
//! already-built results.

use std::collections::HashSet;

use crate::coord::Coordinate;
use crate::edge::EdgeList;
use crate::geom::{LineString, Polygon};
use crate::graph::{DirectedEdgeId, PlanarGraph};
use crate::locate::PointLocator;
use crate::location::{Location, Position};
use crate::overlay::{is_result_of_op, OverlayOp};

/// Walks the marked (`InResult`) half-edges into minimal enclosing rings,
/// then classifies each ring as shell or hole and nests holes inside their
/// enclosing shell.
pub fn build_polygons(graph: &PlanarGraph) -> Vec<Polygon> {
    let mut visited: HashSet<DirectedEdgeId> = HashSet::new();
    let mut rings: Vec<LineString> = Vec::new();

    for id in 0..graph.directed_edge_count() {
        if graph.directed_edge(id).in_result && !visited.contains(&id) {
            if let Some(ring) = walk_ring(graph, id, &mut visited) {
                rings.push(ring);
            }
        }
    }

    let (shells, holes): (Vec<LineString>, Vec<LineString>) = rings.into_iter().partition(|r| r.is_clockwise());
    let mut polygons: Vec<Polygon> = shells.into_iter().map(|s| Polygon::new(s, Vec::new())).collect();

    for hole in holes {
        match enclosing_shell(&polygons, &hole) {
            Some(idx) => polygons[idx].interiors.push(hole),
            None => polygons.push(Polygon::new(hole.reversed(), Vec::new())),
        }
    }

    polygons.into_iter().map(|p| p.normalized()).collect()
}

/// Follows half-edges around node stars starting from `start` until the
/// ring closes. At each node, the walk continues with the next `InResult`
/// half-edge found going clockwise from the current edge's `Sym` in the
/// node's angle-sorted star -- the standard planar-graph ring-assembly
/// rule (mirrors JTS `MaximalEdgeRing`/`MinimalEdgeRing` construction).
fn walk_ring(graph: &PlanarGraph, start: DirectedEdgeId, visited: &mut HashSet<DirectedEdgeId>) -> Option<LineString> {
    let mut coords: Vec<Coordinate> = Vec::new();
    let mut current = start;
    let first_coord = graph.directed_edge(start).coordinates()[0];

    loop {
        visited.insert(current);
        let de = graph.directed_edge(current);
        if coords.is_empty() {
            coords.extend_from_slice(de.coordinates());
        } else {
            coords.extend_from_slice(&de.coordinates()[1..]);
        }

        let sym = de.sym;
        let node = graph.node(de.dest);
        let star = &node.star;
        let pos = star.iter().position(|&id| id == sym)?;

        let mut next_idx = (pos + 1) % star.len();
        let mut steps = 0;
        while !graph.directed_edge(star[next_idx]).in_result {
            next_idx = (next_idx + 1) % star.len();
            steps += 1;
            if steps > star.len() {
                return None; // no InResult continuation: malformed ring
            }
        }
        let next = star[next_idx];
        visited.insert(next);

        if next == start {
            break;
        }
        current = next;
    }

    if *coords.last().unwrap() != first_coord {
        coords.push(first_coord);
    }
    Some(LineString(coords))
}

fn enclosing_shell(polygons: &[Polygon], hole: &LineString) -> Option<usize> {
    let sample = *hole.0.first()?;
    let mut best: Option<(usize, f64)> = None;
    for (idx, polygon) in polygons.iter().enumerate() {
        if point_in_ring(sample, &polygon.exterior) {
            let area = polygon.exterior.signed_area().abs();
            if best.map_or(true, |(_, best_area)| area < best_area) {
                best = Some((idx, area));
            }
        }
    }
    best.map(|(idx, _)| idx)
}

fn point_in_ring(coord: Coordinate, ring: &LineString) -> bool {
    let pts = &ring.0;
    if pts.len() < 4 {
        return false;
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
    inside
}

/// Collects edges whose label indicates a line in the result (dimensional
/// collapse, or a line-geometry input), suppressing any segment whose
/// endpoints are covered by a result polygon (spec.md §4.7's
/// `IsCoveredByA`).
pub fn build_lines(edge_list: &EdgeList, polygons: &[Polygon], op: OverlayOp) -> Vec<LineString> {
    let locator = PointLocator::new();
    let mut out = Vec::new();
    for edge in edge_list.edges() {
        if edge.label.is_area(0) || edge.label.is_area(1) {
            continue;
        }
        let loc0 = edge.label.get(0, Position::On);
        let loc1 = edge.label.get(1, Position::On);
        if loc0 == Location::None && loc1 == Location::None {
            continue;
        }
        if !is_result_of_op(loc0, loc1, op) {
            continue;
        }
        let coords = edge.coordinates();
        let a = coords[0];
        let b = *coords.last().unwrap();
        if is_covered_by_polygons(a, polygons, &locator) && is_covered_by_polygons(b, polygons, &locator) {
            continue;
        }
        out.push(LineString(coords.to_vec()));
    }
    out
}

fn is_covered_by_polygons(coord: Coordinate, polygons: &[Polygon], locator: &PointLocator) -> bool {
    polygons.iter().any(|p| locator.locate_polygon(coord, p) != Location::Exterior)
}

/// `IsCoveredByLA` (spec.md §4.7): true if `coord` is covered by any result
/// line or result polygon.
pub fn is_covered_by(coord: Coordinate, lines: &[LineString], polygons: &[Polygon], locator: &PointLocator) -> bool {
    if is_covered_by_polygons(coord, polygons, locator) {
        return true;
    }
    lines.iter().any(|ls| locator.locate_line(coord, ls) != Location::Exterior)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;
    use crate::label::{GeometryLabel, Label};

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn build_polygons_walks_a_single_square_ring() {
        let label = Label::single(0, GeometryLabel::area(Location::Exterior, Location::Boundary, Location::Interior));
        let mut edge_list = EdgeList::new();
        // Normalized (clockwise) order, matching what `GeometryGraph` feeds
        // the planar graph in the real pipeline.
        let raw = Polygon::new(
            LineString(vec![c(0.0, 0.0), c(10.0, 0.0), c(10.0, 10.0), c(0.0, 10.0), c(0.0, 0.0)]),
            Vec::new(),
        )
        .normalized();
        let square = raw.exterior.0;
        for w in square.windows(2) {
            edge_list.insert_edge(Edge::new(vec![w[0], w[1]], label));
        }
        let mut graph = PlanarGraph::build_from_edges(&edge_list);
        // Mark only the half-edges that traverse the ring in its own stored
        // (forward) direction; their Sym half-edges stay unmarked.
        for id in 0..graph.directed_edge_count() {
            let de = graph.directed_edge(id);
            let forward = square.windows(2).any(|w| w[0] == de.coordinates()[0] && w[1] == de.coordinates()[1]);
            graph.directed_edge_mut(id).in_result = forward;
        }
        let polygons = build_polygons(&graph);
        assert_eq!(polygons.len(), 1);
        assert!(polygons[0].interiors.is_empty());
    }
}
