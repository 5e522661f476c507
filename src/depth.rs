// Copyright 2016 planar-overlay Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Per-side, per-argument depth counters used to resolve stacked/collapsed
//! edges (spec.md §4.2).

use crate::label::Label;
use crate::location::{Location, Position};

const NULL_DEPTH: i32 = -1;

/// Left/Right depth counters for both input arguments.
///
/// A depth of `0` means exterior, `1` means interior. `NULL_DEPTH` (`-1`)
/// marks a side as not yet seeded.
#[derive(Debug, Clone, Copy)]
pub struct Depth {
    left: [i32; 2],
    right: [i32; 2],
    /// The Left/Right location an argument collapsed to, captured at
    /// `normalize()` time before the collapsing sides are zeroed out. Only
    /// meaningful once `delta(arg) == 0` after normalization.
    collapsed: [Location; 2],
}

impl Default for Depth {
    fn default() -> Self {
        Depth::new()
    }
}

impl Depth {
    pub fn new() -> Depth {
        Depth {
            left: [NULL_DEPTH; 2],
            right: [NULL_DEPTH; 2],
            collapsed: [Location::Exterior; 2],
        }
    }

    pub fn is_null(&self) -> bool {
        (0..2).all(|a| self.is_null_arg(a))
    }

    pub fn is_null_arg(&self, arg: usize) -> bool {
        self.left[arg] == NULL_DEPTH && self.right[arg] == NULL_DEPTH
    }

    fn location_depth(loc: Location) -> i32 {
        match loc {
            Location::Interior => 1,
            _ => 0,
        }
    }

    fn depth_to_location(d: i32) -> Location {
        if d <= 0 {
            Location::Exterior
        } else {
            Location::Interior
        }
    }

    /// Adds a label's side locations into the running counters for every
    /// area argument in `label`: seeds an unseeded side from the label
    /// rather than adding on top of it (JTS `Depth.add`), so the label that
    /// first seeds a side is not counted twice.
    pub fn add(&mut self, label: &Label) {
        for arg in 0..2 {
            if label.is_area(arg) {
                let l = Self::location_depth(label.get(arg, Position::Left));
                let r = Self::location_depth(label.get(arg, Position::Right));
                if self.is_null_arg(arg) {
                    self.left[arg] = l;
                    self.right[arg] = r;
                } else {
                    self.left[arg] += l;
                    self.right[arg] += r;
                }
            }
        }
    }

    /// Subtracts the per-argument minimum so the smaller side becomes `0`.
    ///
    /// Captures the collapse location first: if both sides already agree
    /// before subtracting (the argument has dimensionally collapsed), that
    /// shared depth is the edge's only remaining location. Computing
    /// `collapsed_location` from `left`/`right` after this loop would
    /// always see `0`/`0` and report `Exterior` regardless of whether the
    /// collapse was through an interior or exterior.
    pub fn normalize(&mut self) {
        for arg in 0..2 {
            if !self.is_null_arg(arg) {
                if self.left[arg] == self.right[arg] {
                    self.collapsed[arg] = Self::depth_to_location(self.left[arg]);
                }
                let m = self.left[arg].min(self.right[arg]);
                self.left[arg] -= m;
                self.right[arg] -= m;
            }
        }
    }

    pub fn delta(&self, arg: usize) -> i32 {
        (self.left[arg] - self.right[arg]).abs()
    }

    pub fn left(&self, arg: usize) -> i32 {
        self.left[arg]
    }

    pub fn right(&self, arg: usize) -> i32 {
        self.right[arg]
    }

    /// After normalization, derives the Left/Right location for `arg`: the
    /// area-edge label rule of spec.md §4.2's "else" branch.
    pub fn area_locations(&self, arg: usize) -> (Location, Location) {
        (
            Self::depth_to_location(self.left[arg]),
            Self::depth_to_location(self.right[arg]),
        )
    }

    /// The location an argument collapsed to (`delta(arg) == 0`), captured
    /// by `normalize()` before the collapsing depth was zeroed out.
    pub fn collapsed_location(&self, arg: usize) -> Location {
        self.collapsed[arg]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::GeometryLabel;

    #[test]
    fn normalize_collapses_equal_sides() {
        let mut d = Depth::new();
        let label = Label::single(0, GeometryLabel::area(Location::Interior, Location::None, Location::Interior));
        d.add(&label);
        d.add(&label);
        d.normalize();
        assert_eq!(d.delta(0), 0);
        assert_eq!(d.collapsed_location(0), Location::Interior);
    }

    #[test]
    fn normalize_keeps_nonzero_delta() {
        let mut d = Depth::new();
        let label = Label::single(0, GeometryLabel::area(Location::Interior, Location::None, Location::Exterior));
        d.add(&label);
        d.normalize();
        assert_eq!(d.delta(0), 1);
        let (l, r) = d.area_locations(0);
        assert_eq!(l, Location::Interior);
        assert_eq!(r, Location::Exterior);
    }
}
