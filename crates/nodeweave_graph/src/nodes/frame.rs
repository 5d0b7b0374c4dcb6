// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame container.

use super::set_flag;
use crate::catalog;
use crate::error::{GraphError, LayoutError};
use crate::layout::{NodeShape, Sizer};
use crate::node::{typed_node, NodeId, TypedNode};
use crate::tree::NodeTree;
use egui::{pos2, Rect};

typed_node!(
    /// Frame grouping other nodes; sized from its children
    Frame => catalog::FRAME
);

impl Frame {
    /// Shrink the frame to its children when drawn
    pub fn set_shrink(self, tree: &mut NodeTree, shrink: bool) -> Result<Self, GraphError> {
        set_flag(tree, self.id(), "shrink", shrink)?;
        Ok(self)
    }

    /// Put `child` inside this frame
    pub fn add_child(self, tree: &mut NodeTree, child: impl Into<NodeId>) -> Result<Self, GraphError> {
        tree.set_parent(child.into(), self.id())?;
        Ok(self)
    }

    /// Children in registration order
    pub fn children(self, tree: &NodeTree) -> Result<&[NodeId], GraphError> {
        tree.children(self.id())
    }
}

/// Bounding box of the children, grown by the frame margin.
///
/// Child rectangles hang down from their locations (y grows up), so a child
/// at `(x, y)` spans `x..x + width` and `y - height..y`.
fn children_bounds(sizer: &mut Sizer<'_>, frame: NodeId) -> Result<Option<Rect>, LayoutError> {
    let tree = sizer.tree();
    let children = tree.children(frame)?;
    if children.is_empty() {
        return Ok(None);
    }

    let mut bounds = Rect::NOTHING;
    for &child in children {
        let location = tree.location(child)?;
        let width = sizer.width(child)?;
        let height = sizer.height(child)?;
        bounds = bounds.union(Rect::from_min_max(
            pos2(location.x, location.y - height),
            pos2(location.x + width, location.y),
        ));
    }
    Ok(Some(bounds.expand(sizer.metrics().frame_margin())))
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct FrameShape;

impl NodeShape for FrameShape {
    fn name(&self) -> &'static str {
        "Frame"
    }

    fn contains_children(&self) -> bool {
        true
    }

    fn width(&self, sizer: &mut Sizer<'_>, node: NodeId) -> Result<f32, LayoutError> {
        match children_bounds(sizer, node)? {
            Some(bounds) => Ok(bounds.width()),
            None => sizer.stored_width(node),
        }
    }

    fn height(&self, sizer: &mut Sizer<'_>, node: NodeId) -> Result<f32, LayoutError> {
        match children_bounds(sizer, node)? {
            Some(bounds) => Ok(bounds.height()),
            None => sizer.stored_height(node),
        }
    }
}
