// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for tree construction, linking and layout.

use crate::document::DocumentId;
use crate::node::NodeId;
use crate::socket::{SocketDirection, SocketSlot, SocketType};

/// Error when building or editing a node tree
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Node was created in another tree
    #[error("Node {node} belongs to another tree than {tree}")]
    ForeignNode {
        /// Offending node
        node: NodeId,
        /// Tree the operation ran against
        tree: DocumentId,
    },

    /// Socket lookup failed
    #[error("No {direction} socket {slot} on node {node}")]
    SocketNotFound {
        /// Node searched
        node: NodeId,
        /// Direction searched
        direction: SocketDirection,
        /// Requested slot
        slot: SocketSlot,
    },

    /// Node already lives in another frame
    #[error("Node {node} is already inside frame {parent}")]
    AlreadyParented {
        /// Child node
        node: NodeId,
        /// Its current frame
        parent: NodeId,
    },

    /// Parenting would make a node its own ancestor
    #[error("Parenting {node} under {parent} would create a containment cycle")]
    ContainmentCycle {
        /// Child node
        node: NodeId,
        /// Requested parent
        parent: NodeId,
    },

    /// Interface name declared twice
    #[error("Group {direction} {name:?} is already declared")]
    DuplicateInterfaceSocket {
        /// Interface side
        direction: SocketDirection,
        /// Socket name
        name: String,
    },

    /// Default value does not fit the socket
    #[error("Value of type {got:?} does not fit a {expected:?} socket")]
    ValueTypeMismatch {
        /// Socket type
        expected: SocketType,
        /// Value type
        got: SocketType,
    },

    /// Handle type does not match the node's host type
    #[error("Node {node} is a {found}, not a {expected}")]
    TypeMismatch {
        /// Node being cast
        node: NodeId,
        /// Tag of the requested handle
        expected: &'static str,
        /// Tag of the node
        found: String,
    },

    /// Group reference pointing at its own tree
    #[error("Tree {0} cannot reference itself as a group")]
    RecursiveGroup(DocumentId),
}

/// Error when linking two sockets
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LinkError {
    /// One side of the link does not resolve
    #[error("Invalid link: {0}")]
    Unresolved(#[from] GraphError),

    /// Socket passed on the wrong side of the link
    #[error("Invalid link: socket of node {node} is not an {expected}")]
    WrongDirection {
        /// Node owning the socket
        node: NodeId,
        /// Direction required at that side
        expected: SocketDirection,
    },

    /// Socket types cannot be converted
    #[error("Invalid link: cannot connect {from:?} output to {to:?} input")]
    IncompatibleSockets {
        /// Output type
        from: SocketType,
        /// Input type
        to: SocketType,
    },
}

/// Error when computing sizes or positions
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// Referenced node is missing or foreign
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A frame was reached again while it was being sized
    #[error("Frame {0} contains itself")]
    ContainmentCycle(NodeId),
}

/// Error when loading layout metrics
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// RON parse failure
    #[error("Failed to parse layout metrics: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// RON serialization failure
    #[error("Failed to serialize layout metrics: {0}")]
    Serialize(#[from] ron::Error),

    /// Widget unit is unusable
    #[error("Widget unit must be positive and finite, got {0}")]
    InvalidWidgetUnit(f32),
}
