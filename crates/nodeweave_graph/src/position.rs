// SPDX-License-Identifier: MIT OR Apache-2.0
//! Relative positioning.
//!
//! A [`Position`] is resolved once, when it is applied to a node, against
//! the current location and predicted size of its reference. The resulting
//! location is a plain value: later changes to the reference do not move
//! the node.

use crate::error::LayoutError;
use crate::node::NodeId;
use crate::tree::NodeTree;
use egui::{pos2, Pos2};

/// Where to put a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Absolute location
    Location(Pos2),
    /// Under the reference, left edges aligned
    Below {
        /// Node to measure from
        reference: NodeId,
        /// Extra gap under the reference
        distance: f32,
    },
    /// Right of the reference, top edges aligned
    RightOf {
        /// Node to measure from
        reference: NodeId,
        /// Extra gap after the reference
        distance: f32,
    },
}

/// Absolute location
pub fn location(x: f32, y: f32) -> Position {
    Position::Location(pos2(x, y))
}

/// Directly under `reference`
pub fn below(reference: impl Into<NodeId>) -> Position {
    Position::Below {
        reference: reference.into(),
        distance: 0.0,
    }
}

/// Directly right of `reference`
pub fn right_of(reference: impl Into<NodeId>) -> Position {
    Position::RightOf {
        reference: reference.into(),
        distance: 0.0,
    }
}

impl Position {
    /// Set the gap to the reference; absolute locations are unchanged
    pub fn with_distance(self, distance: f32) -> Self {
        match self {
            Self::Location(_) => self,
            Self::Below { reference, .. } => Self::Below { reference, distance },
            Self::RightOf { reference, .. } => Self::RightOf { reference, distance },
        }
    }

    /// Compute the location this position designates in `tree`
    pub fn resolve(&self, tree: &NodeTree) -> Result<Pos2, LayoutError> {
        match *self {
            Self::Location(location) => Ok(location),
            Self::Below { reference, distance } => {
                let origin = tree.location(reference)?;
                let height = tree.compute_height(reference)?;
                Ok(pos2(origin.x, origin.y - height - distance))
            }
            Self::RightOf { reference, distance } => {
                let origin = tree.location(reference)?;
                let width = tree.compute_width(reference)?;
                Ok(pos2(origin.x + width + distance, origin.y))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::TypedNode;
    use crate::nodes::{Math, MixRgb};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_right_of_then_below() {
        let mut tree = NodeTree::new("Positions");
        let a = tree.add::<Math>();
        let b = tree.add::<Math>();
        let c = tree.add::<Math>();

        tree.set_position(a.id(), location(0.0, 0.0)).unwrap();
        tree.set_position(b.id(), right_of(a).with_distance(50.0)).unwrap();
        tree.set_position(c.id(), below(b).with_distance(30.0)).unwrap();

        let b_loc = tree.location(b.id()).unwrap();
        let c_loc = tree.location(c.id()).unwrap();
        assert_eq!(b_loc, pos2(140.0 + 50.0, 0.0));
        assert!(approx(b_loc.y - tree.compute_height(b.id()).unwrap() - 30.0, c_loc.y));
        // math: header, padding, one output, two option rows, two inputs
        assert!(approx(c_loc.y, -151.0 - 30.0), "{c_loc:?}");
        assert_eq!(c_loc.x, b_loc.x);
    }

    #[test]
    fn test_resolution_is_one_shot() {
        let mut tree = NodeTree::new("Positions");
        let a = tree.add::<MixRgb>();
        let b = tree.add::<MixRgb>();
        tree.set_position(b.id(), right_of(a)).unwrap();
        let before = tree.location(b.id()).unwrap();

        tree.set_location(a.id(), pos2(500.0, 500.0)).unwrap();
        assert_eq!(tree.location(b.id()).unwrap(), before);
    }

    #[test]
    fn test_distance_on_location_is_ignored() {
        assert_eq!(location(1.0, 2.0).with_distance(10.0), location(1.0, 2.0));
    }

    #[test]
    fn test_foreign_reference_fails() {
        let mut other = NodeTree::new("Other");
        let foreign = other.add::<Math>();
        let mut tree = NodeTree::new("Positions");
        let node = tree.add::<Math>();
        assert!(tree.set_position(node.id(), right_of(foreign)).is_err());
    }
}
