// SPDX-License-Identifier: MIT OR Apache-2.0
//! Procedural textures.

use super::{set_default, set_enum};
use crate::error::GraphError;
use crate::node::{typed_node, TypedNode};
use crate::socket::{Socket, SocketValue};
use crate::tree::NodeTree;

host_enum!(
    /// Gradient profile
    GradientType {
        /// Left to right ramp
        Linear => "LINEAR",
        /// Squared ramp
        Quadratic => "QUADRATIC",
        /// Smoothstep ramp
        Easing => "EASING",
        /// Diagonal ramp
        Diagonal => "DIAGONAL",
        /// Distance from the origin
        Spherical => "SPHERICAL",
        /// Squared distance from the origin
        QuadraticSphere => "QUADRATIC_SPHERE",
        /// Angle around the Z axis
        Radial => "RADIAL",
    }
);

host_enum!(
    /// Musgrave fractal type
    MusgraveType {
        /// Multiplicative fractal
        Multifractal => "MULTIFRACTAL",
        /// Ridged multifractal
        RidgedMultifractal => "RIDGED_MULTIFRACTAL",
        /// Hybrid additive and multiplicative
        HybridMultifractal => "HYBRID_MULTIFRACTAL",
        /// Fractional Brownian motion
        Fbm => "FBM",
        /// Heterogeneous terrain
        HeteroTerrain => "HETERO_TERRAIN",
    }
);

host_enum!(
    /// Voronoi output coloring
    VoronoiColoring {
        /// Distance to the nearest point
        Intensity => "INTENSITY",
        /// Random color per cell
        Cells => "CELLS",
    }
);

typed_node!(
    /// Perlin noise
    NoiseTexture => "ShaderNodeTexNoise"
);

impl NoiseTexture {
    /// Set the noise scale
    pub fn set_scale(self, tree: &mut NodeTree, scale: f32) -> Result<Self, GraphError> {
        set_default(tree, self.scale_input(), SocketValue::Float(scale))?;
        Ok(self)
    }

    /// Set the number of octaves
    pub fn set_detail(self, tree: &mut NodeTree, detail: f32) -> Result<Self, GraphError> {
        set_default(tree, self.input_by_name("Detail"), SocketValue::Float(detail))?;
        Ok(self)
    }

    /// Set the domain warping amount
    pub fn set_distortion(self, tree: &mut NodeTree, distortion: f32) -> Result<Self, GraphError> {
        set_default(tree, self.input_by_name("Distortion"), SocketValue::Float(distortion))?;
        Ok(self)
    }

    /// Sampling coordinates
    pub fn vector_input(self) -> Socket {
        self.input_by_name("Vector")
    }

    /// Noise scale
    pub fn scale_input(self) -> Socket {
        self.input_by_name("Scale")
    }

    /// Noise color
    pub fn color_output(self) -> Socket {
        self.output_by_name("Color")
    }

    /// Noise intensity
    pub fn mix_factor_output(self) -> Socket {
        self.output_by_name("Fac")
    }
}

typed_node!(
    /// Gradient ramp
    GradientTexture => "ShaderNodeTexGradient"
);

impl GradientTexture {
    /// Set the gradient profile
    pub fn set_type(self, tree: &mut NodeTree, gradient_type: GradientType) -> Result<Self, GraphError> {
        set_enum(tree, self.id(), "gradient_type", gradient_type.identifier())?;
        Ok(self)
    }

    /// Sampling coordinates
    pub fn vector_input(self) -> Socket {
        self.input_by_name("Vector")
    }

    /// Gradient color
    pub fn color_output(self) -> Socket {
        self.output_by_name("Color")
    }

    /// Gradient intensity
    pub fn mix_factor_output(self) -> Socket {
        self.output_by_name("Fac")
    }
}

typed_node!(
    /// Musgrave fractal
    MusgraveTexture => "ShaderNodeTexMusgrave"
);

impl MusgraveTexture {
    /// Set the fractal type
    pub fn set_type(self, tree: &mut NodeTree, musgrave_type: MusgraveType) -> Result<Self, GraphError> {
        set_enum(tree, self.id(), "musgrave_type", musgrave_type.identifier())?;
        Ok(self)
    }

    fn set_float(self, tree: &mut NodeTree, input: &'static str, value: f32) -> Result<Self, GraphError> {
        set_default(tree, self.input_by_name(input), SocketValue::Float(value))?;
        Ok(self)
    }

    /// Set the fractal scale
    pub fn set_scale(self, tree: &mut NodeTree, scale: f32) -> Result<Self, GraphError> {
        self.set_float(tree, "Scale", scale)
    }

    /// Set the number of octaves
    pub fn set_detail(self, tree: &mut NodeTree, detail: f32) -> Result<Self, GraphError> {
        self.set_float(tree, "Detail", detail)
    }

    /// Set the fractal dimension
    pub fn set_dimension(self, tree: &mut NodeTree, dimension: f32) -> Result<Self, GraphError> {
        self.set_float(tree, "Dimension", dimension)
    }

    /// Set the gap between octaves
    pub fn set_lacunarity(self, tree: &mut NodeTree, lacunarity: f32) -> Result<Self, GraphError> {
        self.set_float(tree, "Lacunarity", lacunarity)
    }

    /// Set the fractal offset
    pub fn set_offset(self, tree: &mut NodeTree, offset: f32) -> Result<Self, GraphError> {
        self.set_float(tree, "Offset", offset)
    }

    /// Set the fractal gain
    pub fn set_gain(self, tree: &mut NodeTree, gain: f32) -> Result<Self, GraphError> {
        self.set_float(tree, "Gain", gain)
    }

    /// Sampling coordinates
    pub fn vector_input(self) -> Socket {
        self.input_by_name("Vector")
    }

    /// Fractal scale
    pub fn scale_input(self) -> Socket {
        self.input_by_name("Scale")
    }

    /// Fractal color
    pub fn color_output(self) -> Socket {
        self.output_by_name("Color")
    }

    /// Fractal intensity
    pub fn mix_factor_output(self) -> Socket {
        self.output_by_name("Fac")
    }
}

typed_node!(
    /// Worley noise
    VoronoiTexture => "ShaderNodeTexVoronoi"
);

impl VoronoiTexture {
    /// Set the output coloring
    pub fn set_coloring(self, tree: &mut NodeTree, coloring: VoronoiColoring) -> Result<Self, GraphError> {
        set_enum(tree, self.id(), "coloring", coloring.identifier())?;
        Ok(self)
    }

    /// Set the cell scale
    pub fn set_scale(self, tree: &mut NodeTree, scale: f32) -> Result<Self, GraphError> {
        set_default(tree, self.scale_input(), SocketValue::Float(scale))?;
        Ok(self)
    }

    /// Sampling coordinates
    pub fn vector_input(self) -> Socket {
        self.input_by_name("Vector")
    }

    /// Cell scale
    pub fn scale_input(self) -> Socket {
        self.input_by_name("Scale")
    }

    /// Cell color
    pub fn color_output(self) -> Socket {
        self.output_by_name("Color")
    }

    /// Distance to the nearest point
    pub fn mix_factor_output(self) -> Socket {
        self.output_by_name("Fac")
    }
}
