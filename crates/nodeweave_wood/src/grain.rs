// SPDX-License-Identifier: MIT OR Apache-2.0
//! Growth ring pattern.
//!
//! Coordinates are stretched along the length axis, bent by two layers of
//! noise, then turned into concentric rings whose spacing is jittered by
//! more noise.

use crate::{GroupBuilder, WoodError, SPACING, TEXTURE_COORDINATES};
use nodeweave_graph::nodes::{
    BlendType, ColorRamp, Frame, GradientTexture, GradientType, GroupInput, GroupOutput, HandleType,
    Math, MathOperation, MixRgb, NoiseTexture, Reroute, RgbCurve,
};
use nodeweave_graph::{below, pos2, right_of, Group, NodeTree, Socket, TypedNode};

/// Output carrying the ring mask
pub const GRAIN_PATTERN: &str = "Grain pattern";
/// Output carrying the distorted coordinates
pub const COORDINATES: &str = "Coordinates";

const GREY: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

/// Base grain: distorted coordinates and growth rings
#[derive(Debug, Clone, Copy, Default)]
pub struct GrainPattern;

impl GroupBuilder for GrainPattern {
    fn name(&self) -> &str {
        "Wood grain base"
    }

    fn build(&self) -> Result<Group, WoodError> {
        let mut group = Group::new(self.name());
        group
            .set_vector_input(TEXTURE_COORDINATES, [0.0; 3])?
            .set_float_input("Tree bend radius", 0.5)?
            .set_float_input("Tree bend diversity", 0.2)?
            .set_float_input("Additional bend radius", 0.09)?
            .set_float_input("Additional bend diversity", 3.0)?
            .set_float_input("Growth rings amount", 100.0)?
            .set_float_input("Growth rings distort", 0.65)?
            .set_float_input("Growth rings distort 2", 0.04)?
            .set_color_input("Length axis", [0.0, 1.0, 1.0, 1.0])?;
        group
            .set_color_output(GRAIN_PATTERN, [0.0; 4])?
            .set_vector_output(COORDINATES, [0.0; 3])?;

        let tree = group.tree_mut();
        let input = tree.add::<GroupInput>().set_location(tree, pos2(0.0, 0.0))?;

        let extended = tree
            .add::<MixRgb>()
            .set_label(tree, "Extend length axis to infinity")?
            .set_position(tree, right_of(input).with_distance(2.0 * SPACING))?
            .set_blend_type(tree, BlendType::Multiply)?
            .set_mix_factor(tree, 1.0)?;
        tree.link(&input.output(TEXTURE_COORDINATES), &extended.first_color_input())?;
        tree.link(&input.output("Length axis"), &extended.second_color_input())?;

        let (frame, distorted) = distortion(tree, input, extended)?;
        tree.add::<Reroute>()
            .set_position(tree, below(frame).with_distance(SPACING))?;

        let (frame, textures) = textures(tree, input, &distorted, frame)?;
        let (frame, rings) = rings(tree, input, &textures, frame)?;

        let output = tree
            .add::<GroupOutput>()
            .set_position(tree, right_of(frame).with_distance(2.0 * SPACING))?;
        tree.link(&rings, &output.input(GRAIN_PATTERN))?;
        tree.link(&distorted, &output.input(COORDINATES))?;

        Ok(group)
    }
}

/// Bend the stretched coordinates with a coarse and a fine noise
fn distortion(tree: &mut NodeTree, input: GroupInput, extended: MixRgb) -> Result<(Frame, Socket), WoodError> {
    let frame = tree
        .add::<Frame>()
        .set_position(tree, right_of(extended).with_distance(SPACING))?
        .set_label(tree, "Distortion")?
        .set_shrink(tree, true)?;

    let coarse = tree
        .add::<NoiseTexture>()
        .set_parent(tree, frame)?
        .set_location(tree, pos2(SPACING, 0.0))?
        .set_detail(tree, 2.0)?
        .set_distortion(tree, 0.0)?;
    tree.link(&input.output(TEXTURE_COORDINATES), &coarse.vector_input())?;
    tree.link(&input.output("Tree bend diversity"), &coarse.scale_input())?;

    let fine = tree
        .add::<NoiseTexture>()
        .set_parent(tree, frame)?
        .set_position(tree, below(coarse).with_distance(SPACING))?
        .set_detail(tree, 2.0)?
        .set_distortion(tree, 0.0)?;
    tree.link(&input.output(TEXTURE_COORDINATES), &fine.vector_input())?;
    tree.link(&input.output("Additional bend diversity"), &fine.scale_input())?;

    // Noise is centered on grey; subtracting it lets the bend go both ways
    let reset_coarse = recenter(tree, frame, coarse)?;
    let reset_fine = recenter(tree, frame, fine)?;

    let add_coarse = tree
        .add::<MixRgb>()
        .set_label(tree, "Add distortion")?
        .set_parent(tree, frame)?
        .set_position(tree, right_of(reset_coarse).with_distance(SPACING))?
        .set_blend_type(tree, BlendType::Add)?;
    tree.link(&input.output("Tree bend radius"), &add_coarse.mix_factor_input())?;
    tree.link(&extended.color_output(), &add_coarse.first_color_input())?;
    tree.link(&reset_coarse.color_output(), &add_coarse.second_color_input())?;

    let add_fine = tree
        .add::<MixRgb>()
        .set_label(tree, "Add smaller distortion")?
        .set_parent(tree, frame)?
        .set_position(tree, right_of(reset_fine).with_distance(SPACING))?
        .set_blend_type(tree, BlendType::Add)?;
    tree.link(&input.output("Additional bend radius"), &add_fine.mix_factor_input())?;
    tree.link(&add_coarse.color_output(), &add_fine.first_color_input())?;
    tree.link(&reset_fine.color_output(), &add_fine.second_color_input())?;

    Ok((frame, add_fine.color_output()))
}

fn recenter(tree: &mut NodeTree, frame: Frame, noise: NoiseTexture) -> Result<MixRgb, WoodError> {
    let reset = tree
        .add::<MixRgb>()
        .set_label(tree, "Reset direction")?
        .set_parent(tree, frame)?
        .set_position(tree, right_of(noise).with_distance(SPACING))?
        .set_blend_type(tree, BlendType::Subtract)?
        .set_mix_factor(tree, 1.0)?
        .set_second_color(tree, GREY)?;
    tree.link(&noise.color_output(), &reset.first_color_input())?;
    Ok(reset)
}

/// Spherical gradient overlaid with two noise layers
fn textures(
    tree: &mut NodeTree,
    input: GroupInput,
    coordinates: &Socket,
    previous: Frame,
) -> Result<(Frame, Socket), WoodError> {
    let frame = tree
        .add::<Frame>()
        .set_position(tree, right_of(previous).with_distance(SPACING))?
        .set_label(tree, "Textures")?
        .set_shrink(tree, true)?;

    let gradient = tree
        .add::<GradientTexture>()
        .set_parent(tree, frame)?
        .set_location(tree, pos2(SPACING, 0.0))?
        .set_type(tree, GradientType::Spherical)?;
    tree.link(coordinates, &gradient.vector_input())?;

    let first_noise = tree
        .add::<NoiseTexture>()
        .set_parent(tree, frame)?
        .set_position(tree, below(gradient).with_distance(SPACING))?
        .set_scale(tree, 0.5)?
        .set_detail(tree, 16.0)?
        .set_distortion(tree, 9.5)?;
    tree.link(coordinates, &first_noise.vector_input())?;

    let second_noise = tree
        .add::<NoiseTexture>()
        .set_parent(tree, frame)?
        .set_position(tree, below(first_noise).with_distance(SPACING))?
        .set_scale(tree, 500.0)?
        .set_detail(tree, 18.0)?
        .set_distortion(tree, 8.0)?;
    tree.link(coordinates, &second_noise.vector_input())?;

    let ramp = tree
        .add::<ColorRamp>()
        .set_parent(tree, frame)?
        .set_position(tree, right_of(second_noise).with_distance(SPACING))?
        .add_stop(tree, 0.456, [0.0, 0.0, 0.0, 1.0])?
        .add_stop(tree, 1.0, [1.0, 1.0, 1.0, 1.0])?;
    tree.link(&second_noise.color_output(), &ramp.mix_factor_input())?;

    let overlay_first = tree
        .add::<MixRgb>()
        .set_parent(tree, frame)?
        .set_position(tree, right_of(first_noise).with_distance(SPACING))?
        .set_blend_type(tree, BlendType::Overlay)?;
    tree.link(&input.output("Growth rings distort"), &overlay_first.mix_factor_input())?;
    tree.link(&gradient.color_output(), &overlay_first.first_color_input())?;
    tree.link(&first_noise.color_output(), &overlay_first.second_color_input())?;

    let overlay_second = tree
        .add::<MixRgb>()
        .set_parent(tree, frame)?
        .set_position(tree, right_of(ramp).with_distance(SPACING))?
        .set_blend_type(tree, BlendType::Overlay)?;
    tree.link(&input.output("Growth rings distort 2"), &overlay_second.mix_factor_input())?;
    tree.link(&overlay_first.color_output(), &overlay_second.first_color_input())?;
    tree.link(&ramp.color_output(), &overlay_second.second_color_input())?;

    Ok((frame, overlay_second.color_output()))
}

/// Slice the texture into rings and soften their edges
fn rings(
    tree: &mut NodeTree,
    input: GroupInput,
    textures: &Socket,
    previous: Frame,
) -> Result<(Frame, Socket), WoodError> {
    let frame = tree
        .add::<Frame>()
        .set_position(tree, right_of(previous).with_distance(SPACING))?
        .set_label(tree, "Rings")?
        .set_shrink(tree, true)?;

    let mut density = tree
        .add::<RgbCurve>()
        .set_label(tree, "Rings density")?
        .set_parent(tree, frame)?
        .set_location(tree, pos2(SPACING, 0.0))?;
    for point in [[0.0, 0.0], [0.309, 0.462], [0.886, 0.831], [1.0, 1.0]] {
        density = density.add_control_point(tree, point, HandleType::Auto)?;
    }
    tree.link(textures, &density.color_input())?;

    let count = tree
        .add::<Math>()
        .set_label(tree, "Rings count")?
        .set_parent(tree, frame)?
        .set_position(tree, below(density).with_distance(SPACING))?
        .set_operation(tree, MathOperation::Divide)?
        .set_first_value(tree, 1.0)?;
    tree.link(&input.output("Growth rings amount"), &count.second_value_input())?;

    let make_rings = tree
        .add::<Math>()
        .set_label(tree, "Make rings")?
        .set_parent(tree, frame)?
        .set_position(tree, right_of(density).with_distance(SPACING))?
        .set_operation(tree, MathOperation::Modulo)?;
    tree.link(&density.color_output(), &make_rings.first_value_input())?;
    tree.link(&count.value_output(), &make_rings.second_value_input())?;

    let restore = tree
        .add::<Math>()
        .set_label(tree, "Restore brightness")?
        .set_parent(tree, frame)?
        .set_position(tree, right_of(make_rings).with_distance(SPACING))?
        .set_operation(tree, MathOperation::Divide)?;
    tree.link(&make_rings.value_output(), &restore.first_value_input())?;
    tree.link(&count.value_output(), &restore.second_value_input())?;

    let soften = tree
        .add::<RgbCurve>()
        .set_label(tree, "Softest transition")?
        .set_parent(tree, frame)?
        .set_position(tree, right_of(restore).with_distance(SPACING))?
        .add_control_point(tree, [0.0, 0.0], HandleType::Auto)?
        .add_control_point(tree, [0.923, 1.0], HandleType::Vector)?
        .add_control_point(tree, [1.0, 0.0], HandleType::Auto)?;
    tree.link(&restore.value_output(), &soften.color_input())?;

    Ok((frame, soften.color_output()))
}
