// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node handles.
//!
//! A [`NodeId`] names one vertex of one tree. Typed handles such as
//! [`crate::nodes::MixRgb`] wrap a `NodeId` and add socket accessors and
//! parameter setters for their host type; everything generic (name, label,
//! location, parent, position) is provided by [`TypedNode`].

use crate::document::{DocumentId, VertexId};
use crate::error::{GraphError, LayoutError};
use crate::position::Position;
use crate::socket::{Socket, SocketDirection, SocketSlot};
use crate::tree::NodeTree;
use egui::Pos2;
use std::borrow::Cow;
use std::fmt;

/// Handle to a node of a [`NodeTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    tree: DocumentId,
    vertex: VertexId,
}

impl NodeId {
    pub(crate) fn new(tree: DocumentId, vertex: VertexId) -> Self {
        Self { tree, vertex }
    }

    /// Tree the node was created in
    pub fn tree(self) -> DocumentId {
        self.tree
    }

    /// Underlying host vertex
    pub fn vertex(self) -> VertexId {
        self.vertex
    }

    /// Input socket looked up by name
    pub fn input_by_name(self, name: impl Into<Cow<'static, str>>) -> Socket {
        Socket::new(self, SocketDirection::Input, SocketSlot::Name(name.into()))
    }

    /// Input socket looked up by position
    pub fn input_by_index(self, index: usize) -> Socket {
        Socket::new(self, SocketDirection::Input, SocketSlot::Index(index))
    }

    /// Output socket looked up by name
    pub fn output_by_name(self, name: impl Into<Cow<'static, str>>) -> Socket {
        Socket::new(self, SocketDirection::Output, SocketSlot::Name(name.into()))
    }

    /// Output socket looked up by position
    pub fn output_by_index(self, index: usize) -> Socket {
        Socket::new(self, SocketDirection::Output, SocketSlot::Index(index))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.vertex, self.tree)
    }
}

/// A handle bound to one host node type.
///
/// The provided methods take the tree explicitly and return the handle so
/// construction reads as a chain:
///
/// ```ignore
/// let mix = tree
///     .add::<MixRgb>()
///     .set_label(&mut tree, "Reset direction")?
///     .set_position(&mut tree, right_of(noise).with_distance(50.0))?;
/// ```
pub trait TypedNode: Copy + Into<NodeId> {
    /// Host type tag this handle wraps
    const TYPE_TAG: &'static str;

    /// Wrap a node without checking its type
    fn from_id(id: NodeId) -> Self;

    /// Underlying node
    fn id(self) -> NodeId {
        self.into()
    }

    /// Create a node of this type in `tree`
    fn create(tree: &mut NodeTree) -> Self {
        tree.add::<Self>()
    }

    /// Set the unique name (the host may add a numeric suffix)
    fn set_name(self, tree: &mut NodeTree, name: &str) -> Result<Self, GraphError> {
        tree.set_name(self.id(), name)?;
        Ok(self)
    }

    /// Set the display label
    fn set_label(self, tree: &mut NodeTree, label: &str) -> Result<Self, GraphError> {
        tree.set_label(self.id(), label)?;
        Ok(self)
    }

    /// Set the location directly
    fn set_location(self, tree: &mut NodeTree, location: Pos2) -> Result<Self, GraphError> {
        tree.set_location(self.id(), location)?;
        Ok(self)
    }

    /// Resolve `position` now and move the node there
    fn set_position(self, tree: &mut NodeTree, position: Position) -> Result<Self, LayoutError> {
        tree.set_position(self.id(), position)?;
        Ok(self)
    }

    /// Attach the node to `parent`
    fn set_parent(self, tree: &mut NodeTree, parent: impl Into<NodeId>) -> Result<Self, GraphError> {
        tree.set_parent(self.id(), parent.into())?;
        Ok(self)
    }

    /// Input socket looked up by name
    fn input_by_name(self, name: impl Into<Cow<'static, str>>) -> Socket {
        self.id().input_by_name(name)
    }

    /// Input socket looked up by position
    fn input_by_index(self, index: usize) -> Socket {
        self.id().input_by_index(index)
    }

    /// Output socket looked up by name
    fn output_by_name(self, name: impl Into<Cow<'static, str>>) -> Socket {
        self.id().output_by_name(name)
    }

    /// Output socket looked up by position
    fn output_by_index(self, index: usize) -> Socket {
        self.id().output_by_index(index)
    }
}

/// Declare a typed handle for a host node type
macro_rules! typed_node {
    ($(#[$meta:meta])* $name:ident => $tag:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) $crate::node::NodeId);

        impl From<$name> for $crate::node::NodeId {
            fn from(node: $name) -> Self {
                node.0
            }
        }

        impl $crate::node::TypedNode for $name {
            const TYPE_TAG: &'static str = $tag;

            fn from_id(id: $crate::node::NodeId) -> Self {
                Self(id)
            }
        }
    };
}

pub(crate) use typed_node;
