// SPDX-License-Identifier: MIT OR Apache-2.0
//! Color operations.

use super::{set_default, set_enum, set_flag};
use crate::document::{ColorRampData, ColorStop, CurveData, CurvePoint, PropertyValue};
use crate::error::{GraphError, LayoutError};
use crate::layout::{LayoutMetrics, NodeShape, Sizer};
use crate::node::{typed_node, NodeId, TypedNode};
use crate::socket::{Socket, SocketValue};
use crate::tree::NodeTree;

host_enum!(
    /// Blending mode of a mix node
    BlendType {
        /// Linear interpolation
        Mix => "MIX",
        /// Per-channel minimum
        Darken => "DARKEN",
        /// Product
        Multiply => "MULTIPLY",
        /// Color burn
        Burn => "BURN",
        /// Per-channel maximum
        Lighten => "LIGHTEN",
        /// Inverted product of inverses
        Screen => "SCREEN",
        /// Color dodge
        Dodge => "DODGE",
        /// Sum
        Add => "ADD",
        /// Multiply or screen depending on the base
        Overlay => "OVERLAY",
        /// Soft light
        SoftLight => "SOFT_LIGHT",
        /// Linear light
        LinearLight => "LINEAR_LIGHT",
        /// Absolute difference
        Difference => "DIFFERENCE",
        /// Difference
        Subtract => "SUBTRACT",
        /// Quotient
        Divide => "DIVIDE",
        /// Hue of the second color
        Hue => "HUE",
        /// Saturation of the second color
        Saturation => "SATURATION",
        /// Hue and saturation of the second color
        Color => "COLOR",
        /// Value of the second color
        Value => "VALUE",
    }
);

host_enum!(
    /// Interpolation between color ramp stops
    Interpolation {
        /// Smooth ease in and out
        Ease => "EASE",
        /// Cardinal spline
        Cardinal => "CARDINAL",
        /// Straight segments
        Linear => "LINEAR",
        /// B-spline
        BSpline => "B_SPLINE",
        /// Hold until the next stop
        Constant => "CONSTANT",
    }
);

host_enum!(
    /// Handle of a curve control point
    HandleType {
        /// Smooth handle
        Auto => "AUTO",
        /// Smooth handle without overshoot
        AutoClamped => "AUTO_CLAMPED",
        /// Sharp corner
        Vector => "VECTOR",
    }
);

typed_node!(
    /// Blend two colors
    MixRgb => "ShaderNodeMixRGB"
);

impl MixRgb {
    /// Set the blending mode
    pub fn set_blend_type(self, tree: &mut NodeTree, blend_type: BlendType) -> Result<Self, GraphError> {
        set_enum(tree, self.id(), "blend_type", blend_type.identifier())?;
        Ok(self)
    }

    /// Clamp the result to `[0, 1]`
    pub fn set_use_clamp(self, tree: &mut NodeTree, use_clamp: bool) -> Result<Self, GraphError> {
        set_flag(tree, self.id(), "use_clamp", use_clamp)?;
        Ok(self)
    }

    /// Set the blend factor
    pub fn set_mix_factor(self, tree: &mut NodeTree, factor: f32) -> Result<Self, GraphError> {
        set_default(tree, self.mix_factor_input(), SocketValue::Float(factor))?;
        Ok(self)
    }

    /// Set the base color
    pub fn set_first_color(self, tree: &mut NodeTree, color: [f32; 4]) -> Result<Self, GraphError> {
        set_default(tree, self.first_color_input(), SocketValue::Color(color))?;
        Ok(self)
    }

    /// Set the blended color
    pub fn set_second_color(self, tree: &mut NodeTree, color: [f32; 4]) -> Result<Self, GraphError> {
        set_default(tree, self.second_color_input(), SocketValue::Color(color))?;
        Ok(self)
    }

    /// Blend factor
    pub fn mix_factor_input(self) -> Socket {
        self.input_by_name("Fac")
    }

    /// Base color
    pub fn first_color_input(self) -> Socket {
        self.input_by_name("Color1")
    }

    /// Blended color
    pub fn second_color_input(self) -> Socket {
        self.input_by_name("Color2")
    }

    /// Result
    pub fn color_output(self) -> Socket {
        self.output_by_name("Color")
    }
}

typed_node!(
    /// Map a factor through a color gradient
    ColorRamp => "ShaderNodeValToRGB"
);

impl ColorRamp {
    /// Set the interpolation between stops
    pub fn set_interpolation(self, tree: &mut NodeTree, interpolation: Interpolation) -> Result<Self, GraphError> {
        set_enum(tree, self.id(), "interpolation", interpolation.identifier())?;
        Ok(self)
    }

    /// Set the factor used when unlinked
    pub fn set_mix_factor(self, tree: &mut NodeTree, factor: f32) -> Result<Self, GraphError> {
        set_default(tree, self.mix_factor_input(), SocketValue::Float(factor))?;
        Ok(self)
    }

    /// Add a stop.
    ///
    /// A new ramp holds a black and a white stop; the first call drops the
    /// black one and moves the white one, so a ramp ends up with exactly
    /// the stops added.
    pub fn add_stop(self, tree: &mut NodeTree, position: f32, color: [f32; 4]) -> Result<Self, GraphError> {
        let stop = ColorStop { position, color };
        match tree.property_mut(self.id(), "color_ramp")? {
            Some(PropertyValue::ColorRamp(ramp)) => {
                if ramp.edits == 0 && !ramp.stops.is_empty() {
                    ramp.stops.remove(0);
                }
                match ramp.stops.first_mut() {
                    Some(first) if ramp.edits == 0 => *first = stop,
                    _ => ramp.stops.push(stop),
                }
                ramp.edits += 1;
            }
            _ => {
                let ramp = ColorRampData {
                    stops: vec![stop],
                    edits: 1,
                };
                tree.set_property(self.id(), "color_ramp", PropertyValue::ColorRamp(ramp))?;
            }
        }
        Ok(self)
    }

    /// Stops in insertion order
    pub fn stops(self, tree: &NodeTree) -> Result<Vec<ColorStop>, GraphError> {
        match tree.property(self.id(), "color_ramp")? {
            Some(PropertyValue::ColorRamp(ramp)) => Ok(ramp.stops.clone()),
            _ => Ok(Vec::new()),
        }
    }

    /// Input factor
    pub fn mix_factor_input(self) -> Socket {
        self.input_by_name("Fac")
    }

    /// Mapped color
    pub fn color_output(self) -> Socket {
        self.output_by_name("Color")
    }

    /// Mapped alpha
    pub fn alpha_output(self) -> Socket {
        self.output_by_name("Alpha")
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ColorRampShape;

impl NodeShape for ColorRampShape {
    fn name(&self) -> &'static str {
        "ColorRamp"
    }

    fn width(&self, sizer: &mut Sizer<'_>, node: NodeId) -> Result<f32, LayoutError> {
        Ok(sizer.stored_width(node)?.max(sizer.metrics().color_ramp_width()))
    }

    // Large color band template: toolbar, band, position and color rows
    fn buttons_y_space(&self, metrics: &LayoutMetrics) -> f32 {
        metrics.template_space()
            + metrics.node_dy()
            + metrics.color_band_padding()
            + metrics.node_dy()
            + metrics.color_band_edit_rows()
    }
}

typed_node!(
    /// Remap colors through curves
    RgbCurve => "ShaderNodeRGBCurve"
);

impl RgbCurve {
    /// Set the blend factor with the input color
    pub fn set_mix_factor(self, tree: &mut NodeTree, factor: f32) -> Result<Self, GraphError> {
        set_default(tree, self.input_by_name("Fac"), SocketValue::Float(factor))?;
        Ok(self)
    }

    /// Set the color used when unlinked
    pub fn set_color(self, tree: &mut NodeTree, color: [f32; 4]) -> Result<Self, GraphError> {
        set_default(tree, self.color_input(), SocketValue::Color(color))?;
        Ok(self)
    }

    /// Add a point to the combined curve.
    ///
    /// The curve starts with two end points; the first two calls move
    /// them, later calls insert new points.
    pub fn add_control_point(
        self,
        tree: &mut NodeTree,
        location: [f32; 2],
        handle_type: HandleType,
    ) -> Result<Self, GraphError> {
        let point = CurvePoint {
            location,
            handle_type: handle_type.identifier().to_string(),
        };
        match tree.property_mut(self.id(), "mapping")? {
            Some(PropertyValue::Curve(curve)) => {
                let edits = curve.edits;
                match curve.points.get_mut(edits) {
                    Some(existing) if edits < 2 => *existing = point,
                    _ => curve.points.push(point),
                }
                curve.edits += 1;
            }
            _ => {
                let curve = CurveData {
                    points: vec![point],
                    edits: 1,
                };
                tree.set_property(self.id(), "mapping", PropertyValue::Curve(curve))?;
            }
        }
        Ok(self)
    }

    /// Control points of the combined curve
    pub fn control_points(self, tree: &NodeTree) -> Result<Vec<CurvePoint>, GraphError> {
        match tree.property(self.id(), "mapping")? {
            Some(PropertyValue::Curve(curve)) => Ok(curve.points.clone()),
            _ => Ok(Vec::new()),
        }
    }

    /// Color to remap
    pub fn color_input(self) -> Socket {
        self.input_by_name("Color")
    }

    /// Remapped color
    pub fn color_output(self) -> Socket {
        self.output_by_name("Color")
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct RgbCurveShape;

impl NodeShape for RgbCurveShape {
    fn name(&self) -> &'static str {
        "RgbCurve"
    }

    // Channel buttons, curve canvas and point sliders, each followed by
    // the template spacing
    fn buttons_y_space(&self, metrics: &LayoutMetrics) -> f32 {
        let spacing = metrics.template_space();
        (metrics.node_dy() + spacing) + (metrics.curve_height() + spacing) + (metrics.node_dy() + spacing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_mix_parameters() {
        let mut tree = NodeTree::new("Color");
        let mix = tree
            .add::<MixRgb>()
            .set_blend_type(&mut tree, BlendType::Subtract)
            .and_then(|m| m.set_mix_factor(&mut tree, 1.0))
            .and_then(|m| m.set_second_color(&mut tree, [0.5, 0.5, 0.5, 1.0]))
            .unwrap();

        assert_eq!(
            tree.property(mix.id(), "blend_type").unwrap(),
            Some(&PropertyValue::Enum("SUBTRACT".to_string()))
        );
        assert_eq!(
            tree.default_value(&mix.second_color_input()).unwrap(),
            Some(SocketValue::Color([0.5, 0.5, 0.5, 1.0]))
        );
        assert!(approx(tree.compute_height(mix.id()).unwrap(), 162.0));
    }

    #[test]
    fn test_first_stop_replaces_defaults() {
        let mut tree = NodeTree::new("Color");
        let ramp = tree.add::<ColorRamp>();
        assert_eq!(ramp.stops(&tree).unwrap().len(), 2);

        ramp.add_stop(&mut tree, 0.086, [1.0; 4]).unwrap();
        let stops = ramp.stops(&tree).unwrap();
        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].position, 0.086);

        ramp.add_stop(&mut tree, 0.141, [0.0, 0.0, 0.0, 1.0]).unwrap();
        let stops = ramp.stops(&tree).unwrap();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[1].position, 0.141);
    }

    #[test]
    fn test_color_ramp_size() {
        let mut tree = NodeTree::new("Color");
        let ramp = tree.add::<ColorRamp>();
        assert_eq!(ColorRampShape.buttons_y_space(tree.metrics()), 112.0);
        // two outputs, band template, one input
        assert!(approx(tree.compute_height(ramp.id()).unwrap(), 213.0));

        assert_eq!(tree.compute_width(ramp.id()).unwrap(), 240.0);
        tree.document_mut()
            .vertex_mut(ramp.id().vertex())
            .unwrap()
            .set_width(100.0);
        assert_eq!(tree.compute_width(ramp.id()).unwrap(), 200.0);
    }

    #[test]
    fn test_curve_points() {
        let mut tree = NodeTree::new("Color");
        let curve = tree
            .add::<RgbCurve>()
            .add_control_point(&mut tree, [0.0, 0.1], HandleType::Auto)
            .and_then(|c| c.add_control_point(&mut tree, [1.0, 0.9], HandleType::Auto))
            .and_then(|c| c.add_control_point(&mut tree, [0.5, 0.4], HandleType::Vector))
            .unwrap();

        let points = curve.control_points(&tree).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].location, [0.0, 0.1]);
        assert_eq!(points[1].location, [1.0, 0.9]);
        assert_eq!(points[2].handle_type, "VECTOR");

        assert_eq!(RgbCurveShape.buttons_y_space(tree.metrics()), 215.0);
        // one output, curve editor, two inputs
        assert!(approx(tree.compute_height(curve.id()).unwrap(), 316.0));
    }
}
