// Copyright 2016 planar-overlay Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! The planar graph: nodes, directed edge stars, Sym pairing, and the
//! node/edge label propagation of spec.md §4.5 Stages A-C (component
//! "Planar graph assembly" of spec.md §2).
//!
//! Pointer cycles (Node -> DirectedEdgeStar -> DirectedEdge -> Sym -> ...)
//! are replaced with arena indices: [`NodeId`] and [`DirectedEdgeId`] index
//! into flat `Vec`s owned by [`PlanarGraph`], which itself lives no longer
//! than one `overlay()` call.

use std::collections::HashMap;

use crate::coord::Coordinate;
use crate::edge::{Edge, EdgeList};
use crate::label::Label;
use crate::location::{Location, Position};

pub type NodeId = usize;
pub type DirectedEdgeId = usize;

/// A half-edge: one traversal direction of an underlying [`Edge`].
#[derive(Debug, Clone)]
pub struct DirectedEdge {
    /// Index of this half-edge's underlying edge within the [`EdgeList`]
    /// the graph was built from.
    pub edge_index: usize,
    pub orig: NodeId,
    pub dest: NodeId,
    /// The half-edge traversing the same underlying edge in the opposite
    /// direction.
    pub sym: DirectedEdgeId,
    pub label: Label,
    pub in_result: bool,
    /// Coordinates from `orig` to `dest`, already oriented; duplicated from
    /// the owning `Edge` so ring assembly never needs to consult the
    /// `EdgeList` again (mirrors JTS's `DirectedEdge.getCoordinates()`).
    coords: Vec<Coordinate>,
    angle: f64,
}

impl DirectedEdge {
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coords
    }
}

/// A coordinate key with a [`Label`] and the cyclic, angle-sorted ordering
/// of its incident half-edges (the "DirectedEdgeStar").
#[derive(Debug, Clone)]
pub struct Node {
    pub coord: Coordinate,
    pub label: Label,
    /// Outgoing half-edge ids, sorted by angle once [`PlanarGraph::sort_stars`]
    /// runs.
    pub star: Vec<DirectedEdgeId>,
}

impl Node {
    pub fn is_isolated(&self) -> bool {
        self.star.len() < 2
    }
}

/// Scratch structure for exactly one `overlay()` call: owns every [`Node`]
/// and [`DirectedEdge`] built from a (deduplicated) [`EdgeList`].
#[derive(Debug, Default)]
pub struct PlanarGraph {
    nodes: Vec<Node>,
    node_index: HashMap<Coordinate, NodeId>,
    directed_edges: Vec<DirectedEdge>,
}

impl PlanarGraph {
    pub fn new() -> PlanarGraph {
        PlanarGraph {
            nodes: Vec::new(),
            node_index: HashMap::new(),
            directed_edges: Vec::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn directed_edge_count(&self) -> usize {
        self.directed_edges.len()
    }

    pub fn directed_edge(&self, id: DirectedEdgeId) -> &DirectedEdge {
        &self.directed_edges[id]
    }

    pub fn directed_edge_mut(&mut self, id: DirectedEdgeId) -> &mut DirectedEdge {
        &mut self.directed_edges[id]
    }

    fn get_or_create_node(&mut self, coord: Coordinate) -> NodeId {
        if let Some(&id) = self.node_index.get(&coord) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(Node {
            coord,
            label: Label::empty(),
            star: Vec::new(),
        });
        self.node_index.insert(coord, id);
        id
    }

    /// Populates the graph from a deduplicated [`EdgeList`]: every edge
    /// becomes a pair of symmetric [`DirectedEdge`]s, registered at their
    /// endpoint nodes.
    pub fn build_from_edges(edge_list: &EdgeList) -> PlanarGraph {
        let mut graph = PlanarGraph::new();
        for (edge_index, edge) in edge_list.edges().iter().enumerate() {
            graph.add_edge(edge_index, edge);
        }
        graph.sort_stars();
        graph
    }

    fn add_edge(&mut self, edge_index: usize, edge: &Edge) {
        let coords = edge.coordinates();
        let orig = self.get_or_create_node(coords[0]);
        let dest = self.get_or_create_node(*coords.last().unwrap());

        let angle_fwd = coords[0].angle_to(&coords[1]);
        let angle_bwd = coords[coords.len() - 1].angle_to(&coords[coords.len() - 2]);

        let fwd_id = self.directed_edges.len();
        let bwd_id = fwd_id + 1;

        let mut reversed = coords.to_vec();
        reversed.reverse();

        self.directed_edges.push(DirectedEdge {
            edge_index,
            orig,
            dest,
            sym: bwd_id,
            label: edge.label,
            in_result: false,
            coords: coords.to_vec(),
            angle: angle_fwd,
        });
        self.directed_edges.push(DirectedEdge {
            edge_index,
            orig: dest,
            dest: orig,
            sym: fwd_id,
            label: edge.label.flip(),
            in_result: false,
            coords: reversed,
            angle: angle_bwd,
        });

        self.nodes[orig].star.push(fwd_id);
        self.nodes[dest].star.push(bwd_id);
    }

    fn sort_stars(&mut self) {
        let angles: Vec<f64> = self.directed_edges.iter().map(|d| d.angle).collect();
        for node in &mut self.nodes {
            node.star
                .sort_by(|&a, &b| angles[a].partial_cmp(&angles[b]).unwrap());
        }
    }

    /// Stage A (spec.md §4.5): propagates each argument's known side
    /// location around every node's star. Grounded on JTS/GEOS's
    /// `EdgeEndStar.propagateSideLabels`, the same lineage `georust/geo`'s
    /// `relate` module descends from (see `DESIGN.md`).
    pub fn propagate_star_labels(&mut self) {
        for node_id in 0..self.nodes.len() {
            for arg in 0..2 {
                self.propagate_side_labels(node_id, arg);
            }
        }
    }

    fn propagate_side_labels(&mut self, node_id: NodeId, arg: usize) {
        let star = self.nodes[node_id].star.clone();
        if star.is_empty() {
            return;
        }

        let mut start_loc = Location::None;
        for &de_id in &star {
            let label = self.directed_edges[de_id].label;
            if label.is_area(arg) && !label.get(arg, Position::Right).is_none() {
                start_loc = label.get(arg, Position::Left);
            }
        }
        if start_loc.is_none() {
            return;
        }

        let mut curr_loc = start_loc;
        for &de_id in &star {
            let label = &mut self.directed_edges[de_id].label;
            if label.get(arg, Position::On).is_none() {
                label.set(arg, Position::On, curr_loc);
            }
            if !label.get(arg, Position::Left).is_none() {
                curr_loc = label.get(arg, Position::Left);
            } else {
                label.set(arg, Position::Left, curr_loc);
            }
            if !label.get(arg, Position::Right).is_none() {
                curr_loc = label.get(arg, Position::Right);
            } else {
                label.set(arg, Position::Right, curr_loc);
            }
        }
    }

    /// Stage B (spec.md §4.5): fills a half-edge's still-`None` argument
    /// from its `Sym`'s label (flipped, since Sym walks the edge backward).
    pub fn merge_sym_labels(&mut self) {
        for de_id in 0..self.directed_edges.len() {
            let sym = self.directed_edges[de_id].sym;
            for arg in 0..2 {
                if self.directed_edges[de_id].label.is_empty(arg) && !self.directed_edges[sym].label.is_empty(arg) {
                    let flipped = self.directed_edges[sym].label.arg(arg).flip();
                    *self.directed_edges[de_id].label.arg_mut(arg) = flipped;
                }
            }
        }
    }

    /// Stage C (spec.md §4.5): merges each node's own label with the `On`
    /// locations carried by its star.
    pub fn update_node_labels(&mut self) {
        for node_id in 0..self.nodes.len() {
            let star = self.nodes[node_id].star.clone();
            for &de_id in &star {
                for arg in 0..2 {
                    let on = self.directed_edges[de_id].label.get(arg, Position::On);
                    if !on.is_none() && self.nodes[node_id].label.get(arg, Position::On).is_none() {
                        self.nodes[node_id].label.set(arg, Position::On, on);
                    }
                }
            }
        }
    }

    /// Stage D's second half (spec.md §4.5): once an incomplete node's
    /// label has been filled in (by the caller, via `PointLocator`), push
    /// that value down onto every incident half-edge still missing it.
    pub fn apply_node_label_to_star(&mut self, node_id: NodeId) {
        let node_label = self.nodes[node_id].label;
        let star = self.nodes[node_id].star.clone();
        for de_id in star {
            for arg in 0..2 {
                if self.directed_edges[de_id].label.get(arg, Position::On).is_none() {
                    let loc = node_label.get(arg, Position::On);
                    if !loc.is_none() {
                        self.directed_edges[de_id].label.set(arg, Position::On, loc);
                    }
                }
            }
        }
    }
}
