// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shader closures and material output.
//!
//! These host types have no dedicated layout and size as plain nodes.

use super::set_default;
use crate::error::GraphError;
use crate::node::{typed_node, TypedNode};
use crate::socket::{Socket, SocketValue};
use crate::tree::NodeTree;

typed_node!(
    /// Lambertian diffuse closure
    BsdfDiffuse => "ShaderNodeBsdfDiffuse"
);

impl BsdfDiffuse {
    /// Set the color used when unlinked
    pub fn set_color(self, tree: &mut NodeTree, color: [f32; 4]) -> Result<Self, GraphError> {
        set_default(tree, self.color_input(), SocketValue::Color(color))?;
        Ok(self)
    }

    /// Surface color
    pub fn color_input(self) -> Socket {
        self.input_by_name("Color")
    }

    /// Closure
    pub fn bsdf_output(self) -> Socket {
        self.output_by_name("BSDF")
    }
}

typed_node!(
    /// Material output
    MaterialOutput => "ShaderNodeOutputMaterial"
);

impl MaterialOutput {
    /// Surface closure
    pub fn surface_input(self) -> Socket {
        self.input_by_name("Surface")
    }

    /// Volume closure
    pub fn volume_input(self) -> Socket {
        self.input_by_name("Volume")
    }

    /// Displacement height
    pub fn displacement_input(self) -> Socket {
        self.input_by_name("Displacement")
    }
}
