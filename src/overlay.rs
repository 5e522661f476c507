// Copyright 2016 planar-overlay Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! The overlay driver (spec.md §4's "Overlay driver", ~30% of the core):
//! orchestrates noding, unique insertion, depth-derived label update,
//! collapsed-edge replacement, node labelling completion, result-edge
//! selection, and duplicate-edge cancellation, then hands off to the
//! builders in `crate::builder`.

use log::{debug, trace};

use crate::builder;
use crate::edge::EdgeList;
use crate::error::{OverlayError, Result};
use crate::geom::{Geometry, GeometryCollection, GeometryFactory};
use crate::geomgraph::GeometryGraph;
use crate::graph::PlanarGraph;
use crate::intersect::LineIntersector;
use crate::label::Label;
use crate::locate::PointLocator;
use crate::location::{Location, Position};

/// The four Boolean set operations `Overlay` supports (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayOp {
    Intersection,
    Union,
    Difference,
    SymDifference,
}

/// `IsResultOfOp(loc0, loc1, op)` (spec.md §4.6/§6): Boundary is treated as
/// Interior before the four set-membership rules are applied.
pub fn is_result_of_op(loc0: Location, loc1: Location, op: OverlayOp) -> bool {
    let loc0 = normalize_boundary(loc0);
    let loc1 = normalize_boundary(loc1);
    match op {
        OverlayOp::Intersection => loc0 == Location::Interior && loc1 == Location::Interior,
        OverlayOp::Union => loc0 == Location::Interior || loc1 == Location::Interior,
        OverlayOp::Difference => loc0 == Location::Interior && loc1 != Location::Interior,
        OverlayOp::SymDifference => (loc0 == Location::Interior) != (loc1 == Location::Interior),
    }
}

/// `IsResultOfOp(label, op)` (spec.md §6): consults the Right-hand side of
/// each argument so shells come out oriented clockwise (spec.md §4.6).
pub fn is_result_of_op_label(label: &Label, op: OverlayOp) -> bool {
    is_result_of_op(label.get(0, Position::Right), label.get(1, Position::Right), op)
}

fn normalize_boundary(loc: Location) -> Location {
    if loc == Location::Boundary {
        Location::Interior
    } else {
        loc
    }
}

/// `Overlay(g0, g1, op) -> geometry` (spec.md §6). Result factory is taken
/// from `g0`'s precision model, per spec.md §6: "Result factory is taken
/// from g0."
pub fn overlay(g0: &Geometry, g1: &Geometry, op: OverlayOp, factory: &GeometryFactory) -> Result<Geometry> {
    if let Some(result) = disjoint_fast_path(g0, g1, op) {
        debug!("overlay: disjoint fast path for {:?}", op);
        return Ok(result);
    }

    debug!("overlay: computing self-nodes");
    let intersector = LineIntersector::new(factory.precision);
    let mut graph0 = GeometryGraph::new(0, g0);
    let mut graph1 = GeometryGraph::new(1, g1);
    graph0.compute_self_nodes(&intersector, false);
    graph1.compute_self_nodes(&intersector, false);

    debug!("overlay: computing cross-edge intersections");
    graph0.compute_edge_intersections(&mut graph1, &intersector);

    debug!("overlay: inserting unique edges");
    let mut edge_list = EdgeList::new();
    let mut split = Vec::new();
    graph0.compute_split_edges(&mut split);
    graph1.compute_split_edges(&mut split);
    for edge in split {
        edge_list.insert_edge(edge);
    }

    trace!("overlay: normalizing depths and deriving area labels");
    edge_list.normalize_and_derive_labels();

    debug!("overlay: replacing collapsed edges");
    edge_list.replace_collapsed_edges();

    debug!("overlay: building planar graph");
    let mut graph = PlanarGraph::build_from_edges(&edge_list);

    debug!("overlay: completing node and edge labels");
    complete_labels(&mut graph, g0, g1)?;

    debug!("overlay: marking and cancelling result edges");
    mark_result_edges(&mut graph, op);
    cancel_duplicate_result_edges(&mut graph);

    debug!("overlay: assembling result geometry");
    let polygons = builder::build_polygons(&graph);
    let lines = builder::build_lines(&edge_list, &polygons, op);
    let points = collect_result_points(&graph0, &graph1, g0, g1, &lines, &polygons, op);

    Ok(factory.build_geometry(polygons, lines, points))
}

/// Stages A-D of spec.md §4.5: star propagation, Sym merge, node-label
/// update, then `PointLocator`-driven completion of any node that is still
/// incomplete (present at a node touched by only one input).
fn complete_labels(graph: &mut PlanarGraph, g0: &Geometry, g1: &Geometry) -> Result<()> {
    let geometries = [g0, g1];
    let locator = PointLocator::new();

    graph.propagate_star_labels();
    graph.merge_sym_labels();
    graph.update_node_labels();

    for node_id in 0..graph.node_count() {
        for arg in 0..2 {
            if graph.node(node_id).label.is_empty(arg) {
                let coord = graph.node(node_id).coord;
                let loc = locator.locate(coord, geometries[arg]);
                graph.node_mut(node_id).label.set(arg, Position::On, loc);
                graph.apply_node_label_to_star(node_id);
            }
        }
    }

    // A second propagation round lets the just-completed nodes' values
    // flow to their neighbours' Left/Right sides.
    graph.propagate_star_labels();
    graph.merge_sym_labels();

    for node_id in 0..graph.node_count() {
        for arg in 0..2 {
            if graph.node(node_id).label.is_empty(arg) && !graph.node(node_id).is_isolated() {
                return Err(OverlayError::invariant(format!(
                    "node at ({:.6}, {:.6}) left incomplete for argument {arg} after label completion",
                    graph.node(node_id).coord.x,
                    graph.node(node_id).coord.y
                )));
            }
        }
    }
    Ok(())
}

/// Spec.md §4.6: a directed edge enters the result iff its label is an
/// area label, it is not an interior-area edge, and `IsResultOfOp` holds on
/// its Right-hand locations.
fn mark_result_edges(graph: &mut PlanarGraph, op: OverlayOp) {
    for id in 0..graph.directed_edge_count() {
        let label = graph.directed_edge(id).label;
        let in_result = label.is_any_area() && !is_interior_area_edge(&label) && is_result_of_op_label(&label, op);
        graph.directed_edge_mut(id).in_result = in_result;
    }
}

/// An edge that is fully interior to some argument's area on both sides
/// contributes no boundary to any result and is excluded regardless of
/// what `IsResultOfOp` would otherwise say (spec.md §4.6, glossary
/// "Interior area edge").
fn is_interior_area_edge(label: &Label) -> bool {
    (0..2).any(|arg| {
        label.is_area(arg)
            && label.get(arg, Position::Left) == Location::Interior
            && label.get(arg, Position::Right) == Location::Interior
    })
}

/// Spec.md §4.6 "Cancel duplicates": if both a directed edge and its Sym
/// were marked, the result does not contain that boundary (e.g. a shared
/// edge cancelled out of a difference).
fn cancel_duplicate_result_edges(graph: &mut PlanarGraph) {
    for id in 0..graph.directed_edge_count() {
        let sym = graph.directed_edge(id).sym;
        if graph.directed_edge(id).in_result && graph.directed_edge(sym).in_result {
            graph.directed_edge_mut(id).in_result = false;
            graph.directed_edge_mut(sym).in_result = false;
        }
    }
}

/// `PointBuilder` (spec.md §4.7): every input point whose location under
/// each argument satisfies `IsResultOfOp`, skipping points `IsCoveredByLA`
/// a result line or polygon.
fn collect_result_points(
    graph0: &GeometryGraph,
    graph1: &GeometryGraph,
    g0: &Geometry,
    g1: &Geometry,
    lines: &[crate::geom::LineString],
    polygons: &[crate::geom::Polygon],
    op: OverlayOp,
) -> Vec<crate::geom::Point> {
    let locator = PointLocator::new();
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for graph in [graph0, graph1] {
        for (coord, _label) in graph.points() {
            if !seen.insert((coord.x.to_bits(), coord.y.to_bits())) {
                continue;
            }
            let loc0 = locator.locate(*coord, g0);
            let loc1 = locator.locate(*coord, g1);
            if !is_result_of_op(loc0, loc1, op) {
                continue;
            }
            if builder::is_covered_by(*coord, lines, polygons, &locator) {
                continue;
            }
            out.push(crate::geom::Point(*coord));
        }
    }
    out
}

/// A disjoint-bounding-box or empty-input short circuit (spec.md §8 items
/// 2-3; SPEC_FULL.md §4's supplemented disjoint fast path). Returns `None`
/// when the geometries might interact and the full pipeline must run.
fn disjoint_fast_path(g0: &Geometry, g1: &Geometry, op: OverlayOp) -> Option<Geometry> {
    let disjoint = match (g0.bounding_rect(), g1.bounding_rect()) {
        (Some(a), Some(b)) => !a.intersects(&b),
        _ => true,
    };
    if !disjoint {
        return None;
    }
    Some(match op {
        OverlayOp::Union | OverlayOp::SymDifference => concat(g0, g1),
        OverlayOp::Intersection => empty_geometry(),
        OverlayOp::Difference => g0.clone(),
    })
}

fn concat(g0: &Geometry, g1: &Geometry) -> Geometry {
    let mut items = Vec::new();
    for g in [g0, g1] {
        if g.is_empty() {
            continue;
        }
        match g {
            Geometry::GeometryCollection(gc) => items.extend(gc.0.iter().cloned()),
            other => items.push(other.clone()),
        }
    }
    if items.len() == 1 {
        items.into_iter().next().unwrap()
    } else {
        Geometry::GeometryCollection(GeometryCollection(items))
    }
}

fn empty_geometry() -> Geometry {
    Geometry::GeometryCollection(GeometryCollection(Vec::new()))
}

impl Geometry {
    /// `Overlay(g, g, Union)` as a one-argument convenience (SPEC_FULL.md
    /// §4): validity repair / self-noding, matching the idempotence
    /// property of spec.md §8 item 2. Mirrors `geo`'s `BooleanOps` trait
    /// exposing `union` etc. as convenience methods over a shared core
    /// (see `other_examples/...bool_ops-mod.rs`).
    pub fn self_union(&self, factory: &GeometryFactory) -> Result<Geometry> {
        overlay(self, self, OverlayOp::Union, factory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{LineString, Point, Polygon};

    fn c(x: f64, y: f64) -> crate::coord::Coordinate {
        crate::coord::Coordinate::new(x, y)
    }

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Geometry {
        Geometry::Polygon(Polygon::new(
            LineString(vec![c(x0, y0), c(x1, y0), c(x1, y1), c(x0, y1), c(x0, y0)]),
            Vec::new(),
        ))
    }

    #[test]
    fn is_result_of_op_treats_boundary_as_interior() {
        assert!(is_result_of_op(Location::Boundary, Location::Exterior, OverlayOp::Union));
        assert!(!is_result_of_op(Location::Boundary, Location::Exterior, OverlayOp::Intersection));
    }

    #[test]
    fn disjoint_squares_union_is_a_collection_of_both() {
        let factory = GeometryFactory::default();
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = square(2.0, 2.0, 3.0, 3.0);
        let result = overlay(&a, &b, OverlayOp::Union, &factory).unwrap();
        match result {
            Geometry::GeometryCollection(gc) => assert_eq!(gc.0.len(), 2),
            Geometry::MultiPolygon(mp) => assert_eq!(mp.0.len(), 2),
            other => panic!("expected a collection of both squares, got {:?}", other),
        }
    }

    #[test]
    fn disjoint_squares_intersection_is_empty() {
        let factory = GeometryFactory::default();
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = square(2.0, 2.0, 3.0, 3.0);
        let result = overlay(&a, &b, OverlayOp::Intersection, &factory).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn point_in_polygon_s4() {
        let factory = GeometryFactory::default();
        let point = Geometry::Point(Point(c(5.0, 5.0)));
        let poly = square(0.0, 0.0, 10.0, 10.0);
        let result = overlay(&point, &poly, OverlayOp::Intersection, &factory).unwrap();
        match result {
            Geometry::Point(p) => assert_eq!(p.0, c(5.0, 5.0)),
            other => panic!("expected Point(5,5), got {:?}", other),
        }
    }
}
