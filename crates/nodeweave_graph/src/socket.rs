// SPDX-License-Identifier: MIT OR Apache-2.0
//! Socket types, values and socket views.
//!
//! A [`Socket`] is not stored anywhere: it is a projection of a live node
//! (node handle + direction + slot) that is resolved against the tree when
//! it is linked or written to.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Socket direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketDirection {
    /// Input socket
    Input,
    /// Output socket
    Output,
}

impl fmt::Display for SocketDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Output => f.write_str("output"),
        }
    }
}

/// Data type carried by a socket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketType {
    /// Scalar value
    Float,
    /// 3D vector
    Vector,
    /// RGBA color
    Color,
    /// Shader closure
    Shader,
}

impl SocketType {
    /// Host identifier used when declaring interface sockets
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Float => "NodeSocketFloat",
            Self::Vector => "NodeSocketVector",
            Self::Color => "NodeSocketColor",
            Self::Shader => "NodeSocketShader",
        }
    }

    /// Check if an output of this type can feed an input of `other`
    pub fn can_connect_to(&self, other: &SocketType) -> bool {
        match (self, other) {
            (Self::Shader, Self::Shader) => true,
            // Closures never convert to or from data
            (Self::Shader, _) | (_, Self::Shader) => false,
            // Float, vector and color convert implicitly
            _ => true,
        }
    }
}

/// Value stored as a socket default
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SocketValue {
    /// Scalar
    Float(f32),
    /// 3D vector
    Vector([f32; 3]),
    /// RGBA color
    Color([f32; 4]),
}

impl SocketValue {
    /// Get the socket type for this value
    pub fn socket_type(&self) -> SocketType {
        match self {
            Self::Float(_) => SocketType::Float,
            Self::Vector(_) => SocketType::Vector,
            Self::Color(_) => SocketType::Color,
        }
    }
}

/// How a socket is looked up on its node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SocketSlot {
    /// First socket with this name
    Name(Cow<'static, str>),
    /// Socket at this position
    Index(usize),
}

impl fmt::Display for SocketSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name:?}"),
            Self::Index(index) => write!(f, "#{index}"),
        }
    }
}

/// A view on one input or output of a node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Socket {
    node: NodeId,
    direction: SocketDirection,
    slot: SocketSlot,
}

impl Socket {
    /// Create a socket view
    pub fn new(node: NodeId, direction: SocketDirection, slot: SocketSlot) -> Self {
        Self {
            node,
            direction,
            slot,
        }
    }

    /// Node owning the socket
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Socket direction
    pub fn direction(&self) -> SocketDirection {
        self.direction
    }

    /// Lookup slot
    pub fn slot(&self) -> &SocketSlot {
        &self.slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_sockets_only_connect_to_shaders() {
        assert!(SocketType::Shader.can_connect_to(&SocketType::Shader));
        assert!(!SocketType::Shader.can_connect_to(&SocketType::Color));
        assert!(!SocketType::Float.can_connect_to(&SocketType::Shader));
    }

    #[test]
    fn test_data_sockets_convert() {
        assert!(SocketType::Color.can_connect_to(&SocketType::Float));
        assert!(SocketType::Float.can_connect_to(&SocketType::Vector));
        assert!(SocketType::Vector.can_connect_to(&SocketType::Color));
    }

    #[test]
    fn test_slot_display() {
        assert_eq!(SocketSlot::Name("Fac".into()).to_string(), "\"Fac\"");
        assert_eq!(SocketSlot::Index(1).to_string(), "#1");
    }
}
