// SPDX-License-Identifier: MIT OR Apache-2.0
//! Input nodes.

use super::{set_default, set_flag};
use crate::error::GraphError;
use crate::node::{typed_node, TypedNode};
use crate::socket::{Socket, SocketValue};
use crate::tree::NodeTree;

typed_node!(
    /// Texture coordinate spaces of the shaded point
    TextureCoordinate => "ShaderNodeTexCoord"
);

impl TextureCoordinate {
    /// Use coordinates of the instancer when instanced
    pub fn set_from_instancer(self, tree: &mut NodeTree, from_instancer: bool) -> Result<Self, GraphError> {
        set_flag(tree, self.id(), "from_dupli", from_instancer)?;
        Ok(self)
    }

    /// Generated coordinates
    pub fn generated_output(self) -> Socket {
        self.output_by_name("Generated")
    }

    /// Object space coordinates
    pub fn object_output(self) -> Socket {
        self.output_by_name("Object")
    }

    /// UV map coordinates
    pub fn uv_output(self) -> Socket {
        self.output_by_name("UV")
    }
}

typed_node!(
    /// Per-object information
    ObjectInfo => "ShaderNodeObjectInfo"
);

impl ObjectInfo {
    /// Object location
    pub fn location_output(self) -> Socket {
        self.output_by_name("Location")
    }

    /// Random value per object
    pub fn random_output(self) -> Socket {
        self.output_by_name("Random")
    }
}

typed_node!(
    /// Constant scalar
    Value => "ShaderNodeValue"
);

impl Value {
    /// Set the constant
    pub fn set_value(self, tree: &mut NodeTree, value: f32) -> Result<Self, GraphError> {
        set_default(tree, self.value_output(), SocketValue::Float(value))?;
        Ok(self)
    }

    /// The constant
    pub fn value_output(self) -> Socket {
        self.output_by_name("Value")
    }
}
