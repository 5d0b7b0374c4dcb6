// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host type catalog.
//!
//! What the host knows about each vertex type it can allocate: display
//! name, default size and default sockets. This is host knowledge, not
//! engine dispatch; layout behaviour lives in [`crate::registry`].

use crate::document::{ColorRampData, ColorStop, CurveData, CurvePoint, PropertyValue, SocketRecord};
use crate::socket::{SocketType, SocketValue};

/// Default width of a node the host has no preset for
pub const DEFAULT_NODE_WIDTH: f32 = 140.0;

/// Default height stored on every vertex
pub const DEFAULT_NODE_HEIGHT: f32 = 100.0;

const TEXTURE_NODE_WIDTH: f32 = 150.0;
const LARGE_NODE_WIDTH: f32 = 240.0;
const REROUTE_WIDTH: f32 = 16.0;

/// Frame container
pub const FRAME: &str = "NodeFrame";
/// Reroute dot
pub const REROUTE: &str = "NodeReroute";
/// Group input boundary
pub const GROUP_INPUT: &str = "NodeGroupInput";
/// Group output boundary
pub const GROUP_OUTPUT: &str = "NodeGroupOutput";
/// Group reference
pub const GROUP: &str = "ShaderNodeGroup";

/// Default vertex layout for a host type
#[derive(Debug, Clone)]
pub(crate) struct VertexTemplate {
    pub display_name: &'static str,
    pub width: f32,
    pub height: f32,
    pub inputs: Vec<SocketRecord>,
    pub outputs: Vec<SocketRecord>,
    pub properties: Vec<(&'static str, PropertyValue)>,
}

impl VertexTemplate {
    fn new(display_name: &'static str, width: f32) -> Self {
        Self {
            display_name,
            width,
            height: DEFAULT_NODE_HEIGHT,
            inputs: Vec::new(),
            outputs: Vec::new(),
            properties: Vec::new(),
        }
    }

    fn inputs(mut self, inputs: Vec<SocketRecord>) -> Self {
        self.inputs = inputs;
        self
    }

    fn outputs(mut self, outputs: Vec<SocketRecord>) -> Self {
        self.outputs = outputs;
        self
    }

    fn property(mut self, key: &'static str, value: PropertyValue) -> Self {
        self.properties.push((key, value));
        self
    }
}

fn float(name: &str, value: f32) -> SocketRecord {
    SocketRecord::new(name, SocketType::Float).with_default(SocketValue::Float(value))
}

fn vector(name: &str) -> SocketRecord {
    SocketRecord::new(name, SocketType::Vector).with_default(SocketValue::Vector([0.0; 3]))
}

fn color(name: &str, value: [f32; 4]) -> SocketRecord {
    SocketRecord::new(name, SocketType::Color).with_default(SocketValue::Color(value))
}

fn shader(name: &str) -> SocketRecord {
    SocketRecord::new(name, SocketType::Shader)
}

fn enum_property(identifier: &str) -> PropertyValue {
    PropertyValue::Enum(identifier.to_string())
}

const GREY: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
const LIGHT_GREY: [f32; 4] = [0.8, 0.8, 0.8, 1.0];
const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Look up the template for a host type.
///
/// Unknown types get a socket-less vertex of default size, so allocation
/// never fails.
pub(crate) fn template(type_tag: &str) -> VertexTemplate {
    match type_tag {
        FRAME => VertexTemplate::new("Frame", 150.0).property("shrink", PropertyValue::Bool(true)),
        REROUTE => VertexTemplate::new("Reroute", REROUTE_WIDTH)
            .inputs(vec![color("Input", WHITE)])
            .outputs(vec![color("Output", WHITE)]),
        // Boundary sockets come from the document interface
        GROUP_INPUT => VertexTemplate::new("Group Input", DEFAULT_NODE_WIDTH),
        GROUP_OUTPUT => VertexTemplate::new("Group Output", DEFAULT_NODE_WIDTH),
        GROUP => VertexTemplate::new("Group", DEFAULT_NODE_WIDTH),
        "ShaderNodeTexCoord" => VertexTemplate::new("Texture Coordinate", DEFAULT_NODE_WIDTH)
            .outputs(
                ["Generated", "Normal", "UV", "Object", "Camera", "Window", "Reflection"]
                    .into_iter()
                    .map(vector)
                    .collect(),
            )
            .property("from_dupli", PropertyValue::Bool(false)),
        "ShaderNodeObjectInfo" => VertexTemplate::new("Object Info", DEFAULT_NODE_WIDTH).outputs(vec![
            vector("Location"),
            float("Object Index", 0.0),
            float("Material Index", 0.0),
            float("Random", 0.0),
        ]),
        "ShaderNodeValue" => {
            VertexTemplate::new("Value", DEFAULT_NODE_WIDTH).outputs(vec![float("Value", 0.5)])
        }
        "ShaderNodeMixRGB" => VertexTemplate::new("Mix", DEFAULT_NODE_WIDTH)
            .inputs(vec![float("Fac", 0.5), color("Color1", GREY), color("Color2", GREY)])
            .outputs(vec![color("Color", BLACK)])
            .property("blend_type", enum_property("MIX"))
            .property("use_clamp", PropertyValue::Bool(false)),
        "ShaderNodeTexNoise" => VertexTemplate::new("Noise Texture", TEXTURE_NODE_WIDTH)
            .inputs(vec![
                vector("Vector"),
                float("Scale", 5.0),
                float("Detail", 2.0),
                float("Distortion", 0.0),
            ])
            .outputs(vec![color("Color", BLACK), float("Fac", 0.0)]),
        "ShaderNodeTexGradient" => VertexTemplate::new("Gradient Texture", TEXTURE_NODE_WIDTH)
            .inputs(vec![vector("Vector")])
            .outputs(vec![color("Color", BLACK), float("Fac", 0.0)])
            .property("gradient_type", enum_property("LINEAR")),
        "ShaderNodeTexMusgrave" => VertexTemplate::new("Musgrave Texture", TEXTURE_NODE_WIDTH)
            .inputs(vec![
                vector("Vector"),
                float("Scale", 5.0),
                float("Detail", 2.0),
                float("Dimension", 2.0),
                float("Lacunarity", 1.0),
                float("Offset", 0.0),
                float("Gain", 1.0),
            ])
            .outputs(vec![color("Color", BLACK), float("Fac", 0.0)])
            .property("musgrave_type", enum_property("FBM")),
        "ShaderNodeTexVoronoi" => VertexTemplate::new("Voronoi Texture", TEXTURE_NODE_WIDTH)
            .inputs(vec![vector("Vector"), float("Scale", 5.0)])
            .outputs(vec![color("Color", BLACK), float("Fac", 0.0)])
            .property("coloring", enum_property("INTENSITY")),
        "ShaderNodeValToRGB" => VertexTemplate::new("ColorRamp", LARGE_NODE_WIDTH)
            .inputs(vec![float("Fac", 0.5)])
            .outputs(vec![color("Color", BLACK), float("Alpha", 0.0)])
            .property("interpolation", enum_property("LINEAR"))
            .property(
                "color_ramp",
                PropertyValue::ColorRamp(ColorRampData {
                    stops: vec![
                        ColorStop {
                            position: 0.0,
                            color: BLACK,
                        },
                        ColorStop {
                            position: 1.0,
                            color: WHITE,
                        },
                    ],
                    edits: 0,
                }),
            ),
        "ShaderNodeRGBCurve" => VertexTemplate::new("RGB Curves", LARGE_NODE_WIDTH)
            .inputs(vec![float("Fac", 1.0), color("Color", WHITE)])
            .outputs(vec![color("Color", BLACK)])
            .property(
                "mapping",
                PropertyValue::Curve(CurveData {
                    points: vec![
                        CurvePoint {
                            location: [0.0, 0.0],
                            handle_type: "AUTO".to_string(),
                        },
                        CurvePoint {
                            location: [1.0, 1.0],
                            handle_type: "AUTO".to_string(),
                        },
                    ],
                    edits: 0,
                }),
            ),
        "ShaderNodeMath" => VertexTemplate::new("Math", DEFAULT_NODE_WIDTH)
            .inputs(vec![float("Value", 0.5), float("Value", 0.5)])
            .outputs(vec![float("Value", 0.0)])
            .property("operation", enum_property("ADD"))
            .property("use_clamp", PropertyValue::Bool(false)),
        "ShaderNodeSeparateRGB" => VertexTemplate::new("Separate RGB", DEFAULT_NODE_WIDTH)
            .inputs(vec![color("Image", LIGHT_GREY)])
            .outputs(vec![float("R", 0.0), float("G", 0.0), float("B", 0.0)]),
        "ShaderNodeSeparateXYZ" => VertexTemplate::new("Separate XYZ", DEFAULT_NODE_WIDTH)
            .inputs(vec![vector("Vector")])
            .outputs(vec![float("X", 0.0), float("Y", 0.0), float("Z", 0.0)]),
        "ShaderNodeCombineXYZ" => VertexTemplate::new("Combine XYZ", DEFAULT_NODE_WIDTH)
            .inputs(vec![float("X", 0.0), float("Y", 0.0), float("Z", 0.0)])
            .outputs(vec![vector("Vector")]),
        "ShaderNodeBsdfDiffuse" => VertexTemplate::new("Diffuse BSDF", TEXTURE_NODE_WIDTH)
            .inputs(vec![color("Color", LIGHT_GREY), float("Roughness", 0.0), vector("Normal")])
            .outputs(vec![shader("BSDF")]),
        "ShaderNodeOutputMaterial" => VertexTemplate::new("Material Output", DEFAULT_NODE_WIDTH)
            .inputs(vec![shader("Surface"), shader("Volume"), float("Displacement", 0.0)]),
        _ => VertexTemplate::new("Node", DEFAULT_NODE_WIDTH),
    }
}
