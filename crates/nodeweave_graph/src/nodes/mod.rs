// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typed node handles and their layout variants.
//!
//! Each host type the engine knows about gets a `Copy` handle with
//! distinctly named socket accessors and parameter setters, and a
//! [`NodeShape`] registered under its type tag.

/// Declare a host enum property with its identifiers
macro_rules! host_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $id:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Host identifier
            pub fn identifier(&self) -> &'static str {
                match self {
                    $(Self::$variant => $id),+
                }
            }
        }
    };
}

mod color;
mod converter;
mod frame;
mod input;
mod routing;
mod shader;
mod texture;

pub use color::{BlendType, ColorRamp, HandleType, Interpolation, MixRgb, RgbCurve};
pub use converter::{CombineXyz, Math, MathOperation, SeparateRgb, SeparateXyz};
pub use frame::Frame;
pub use input::{ObjectInfo, TextureCoordinate, Value};
pub use routing::{GroupInput, GroupNode, GroupOutput, Reroute};
pub use shader::{BsdfDiffuse, MaterialOutput};
pub use texture::{GradientTexture, GradientType, MusgraveTexture, MusgraveType, NoiseTexture, VoronoiColoring, VoronoiTexture};

use crate::catalog;
use crate::document::PropertyValue;
use crate::error::GraphError;
use crate::layout::{LayoutMetrics, NodeShape};
use crate::node::NodeId;
use crate::registry::NodeRegistry;
use crate::socket::{Socket, SocketValue};
use crate::tree::NodeTree;

/// Variant whose options area is a fixed number of rows
#[derive(Debug, Clone, Copy)]
pub(crate) struct OptionRows {
    name: &'static str,
    rows: f32,
}

impl OptionRows {
    pub(crate) const fn new(name: &'static str, rows: f32) -> Self {
        Self { name, rows }
    }
}

impl NodeShape for OptionRows {
    fn name(&self) -> &'static str {
        self.name
    }

    fn buttons_y_space(&self, metrics: &LayoutMetrics) -> f32 {
        self.rows * metrics.node_dy()
    }
}

/// Write an unlinked socket value
fn set_default(tree: &mut NodeTree, socket: Socket, value: SocketValue) -> Result<(), GraphError> {
    tree.set_default_value(&socket, value)
}

/// Write an enum property
fn set_enum(tree: &mut NodeTree, node: NodeId, key: &str, identifier: &str) -> Result<(), GraphError> {
    tree.set_property(node, key, PropertyValue::Enum(identifier.to_string()))
}

/// Write a flag property
fn set_flag(tree: &mut NodeTree, node: NodeId, key: &str, value: bool) -> Result<(), GraphError> {
    tree.set_property(node, key, PropertyValue::Bool(value))
}

/// Register every built-in variant
pub(crate) fn register_builtin(registry: &mut NodeRegistry) {
    // ========================================================================
    // Layout and routing
    // ========================================================================

    registry.register(catalog::FRAME, frame::FrameShape);
    registry.register(catalog::REROUTE, OptionRows::new("Reroute", 0.0));
    registry.register(catalog::GROUP_INPUT, OptionRows::new("GroupInput", 0.0));
    registry.register(catalog::GROUP_OUTPUT, OptionRows::new("GroupOutput", 0.0));
    // Node tree selector
    registry.register(catalog::GROUP, OptionRows::new("GroupNode", 1.0));

    // ========================================================================
    // Inputs
    // ========================================================================

    registry.register("ShaderNodeTexCoord", OptionRows::new("TextureCoordinate", 0.0));
    registry.register("ShaderNodeObjectInfo", OptionRows::new("ObjectInfo", 0.0));
    registry.register("ShaderNodeValue", OptionRows::new("Value", 0.0));

    // ========================================================================
    // Textures
    // ========================================================================

    registry.register("ShaderNodeTexNoise", OptionRows::new("NoiseTexture", 0.0));
    registry.register("ShaderNodeTexGradient", OptionRows::new("GradientTexture", 1.0));
    registry.register("ShaderNodeTexMusgrave", OptionRows::new("MusgraveTexture", 1.0));
    registry.register("ShaderNodeTexVoronoi", OptionRows::new("VoronoiTexture", 1.0));

    // ========================================================================
    // Color
    // ========================================================================

    // Blend type and clamp
    registry.register("ShaderNodeMixRGB", OptionRows::new("MixRgb", 2.0));
    registry.register("ShaderNodeValToRGB", color::ColorRampShape);
    registry.register("ShaderNodeRGBCurve", color::RgbCurveShape);

    // ========================================================================
    // Converters
    // ========================================================================

    registry.register("ShaderNodeMath", converter::MathShape);
    registry.register("ShaderNodeSeparateRGB", OptionRows::new("SeparateRgb", 0.0));
    registry.register("ShaderNodeSeparateXYZ", OptionRows::new("SeparateXyz", 0.0));
    registry.register("ShaderNodeCombineXYZ", OptionRows::new("CombineXyz", 0.0));
}
