// SPDX-License-Identifier: MIT OR Apache-2.0
//! Longitudinal cells: support fibres, axial parenchyma and vessels.
//!
//! All three squash the texture coordinates along the grain before
//! sampling a texture, which stretches the texture into long streaks.

use crate::{GroupBuilder, WoodError, SPACING, TEXTURE_COORDINATES};
use nodeweave_graph::nodes::{
    BlendType, ColorRamp, GroupInput, GroupOutput, MixRgb, MusgraveTexture, MusgraveType, NoiseTexture,
    VoronoiColoring, VoronoiTexture,
};
use nodeweave_graph::{pos2, right_of, Group, NodeId, NodeTree, Socket, TypedNode};

/// Output every fibre group publishes
pub const COLOR: &str = "Color";

/// Scale coordinates channel-wise: `first * second` at full strength
fn scale(
    tree: &mut NodeTree,
    label: &str,
    after: impl Into<NodeId>,
    coordinates: &Socket,
    factor: &Socket,
) -> Result<MixRgb, WoodError> {
    let scale = tree
        .add::<MixRgb>()
        .set_label(tree, label)?
        .set_position(tree, right_of(after).with_distance(SPACING))?
        .set_blend_type(tree, BlendType::Multiply)?
        .set_mix_factor(tree, 1.0)?;
    tree.link(coordinates, &scale.first_color_input())?;
    tree.link(factor, &scale.second_color_input())?;
    Ok(scale)
}

/// Blend the two input colors by `factor`
fn two_tone(tree: &mut NodeTree, input: GroupInput, after: impl Into<NodeId>, factor: &Socket) -> Result<MixRgb, WoodError> {
    let mix = tree
        .add::<MixRgb>()
        .set_position(tree, right_of(after).with_distance(SPACING))?
        .set_blend_type(tree, BlendType::Mix)?;
    tree.link(factor, &mix.mix_factor_input())?;
    tree.link(&input.output("Color1"), &mix.first_color_input())?;
    tree.link(&input.output("Color2"), &mix.second_color_input())?;
    Ok(mix)
}

fn finish(tree: &mut NodeTree, after: impl Into<NodeId>, color: &Socket) -> Result<(), WoodError> {
    let output = tree
        .add::<GroupOutput>()
        .set_position(tree, right_of(after).with_distance(SPACING))?;
    tree.link(color, &output.input(COLOR))?;
    Ok(())
}

/// Dark background of fine, dense fibres
#[derive(Debug, Clone, Copy, Default)]
pub struct SupportFibres;

impl GroupBuilder for SupportFibres {
    fn name(&self) -> &str {
        "Support fibres"
    }

    fn build(&self) -> Result<Group, WoodError> {
        let mut group = Group::new(self.name());
        group
            .set_vector_input(TEXTURE_COORDINATES, [0.0; 3])?
            .set_color_input("Color1", [0.413, 0.165, 0.038, 1.0])?
            .set_color_input("Color2", [0.546, 0.216, 0.048, 1.0])?
            .set_color_input("Length scale", [0.05, 1.0, 1.0, 1.0])?
            .set_color_input("Depth scale", [1.0, 1.0, 0.5, 1.0])?
            .set_float_input("Fractal texture scale", 2000.0)?
            .set_color_output(COLOR, [0.0; 4])?;

        let tree = group.tree_mut();
        let input = tree.add::<GroupInput>().set_location(tree, pos2(0.0, 0.0))?;

        let length = scale(
            tree,
            "Scale length",
            input,
            &input.output(TEXTURE_COORDINATES),
            &input.output("Length scale"),
        )?;
        let depth = scale(tree, "Scale depth", length, &length.color_output(), &input.output("Depth scale"))?;

        let musgrave = tree
            .add::<MusgraveTexture>()
            .set_position(tree, right_of(depth).with_distance(SPACING))?
            .set_type(tree, MusgraveType::Fbm)?
            .set_detail(tree, 3.0)?
            .set_dimension(tree, 2.0)?
            .set_lacunarity(tree, 1.0)?
            .set_offset(tree, 0.0)?
            .set_gain(tree, 1.0)?;
        tree.link(&depth.color_output(), &musgrave.vector_input())?;
        tree.link(&input.output("Fractal texture scale"), &musgrave.scale_input())?;

        let mix = two_tone(tree, input, musgrave, &musgrave.mix_factor_output())?;
        finish(tree, mix, &mix.color_output())?;
        Ok(group)
    }
}

/// Lighter storage cells running along the grain
#[derive(Debug, Clone, Copy, Default)]
pub struct AxialParenchyma;

impl GroupBuilder for AxialParenchyma {
    fn name(&self) -> &str {
        "Axial parenchyma"
    }

    fn build(&self) -> Result<Group, WoodError> {
        let mut group = Group::new(self.name());
        group
            .set_vector_input(TEXTURE_COORDINATES, [0.0; 3])?
            .set_color_input("Color1", [0.694, 0.275, 0.061, 1.0])?
            .set_color_input("Color2", [0.831, 0.546, 0.238, 1.0])?
            .set_color_input("Length scale", [0.1, 1.0, 1.0, 1.0])?
            .set_float_input("Noise scale", 200.0)?
            .set_color_output(COLOR, [0.0; 4])?;

        let tree = group.tree_mut();
        let input = tree.add::<GroupInput>().set_location(tree, pos2(0.0, 0.0))?;

        let length = scale(
            tree,
            "Scale length",
            input,
            &input.output(TEXTURE_COORDINATES),
            &input.output("Length scale"),
        )?;

        let noise = tree
            .add::<NoiseTexture>()
            .set_position(tree, right_of(length).with_distance(SPACING))?
            .set_detail(tree, 5.0)?
            .set_distortion(tree, 5.0)?;
        tree.link(&length.color_output(), &noise.vector_input())?;
        tree.link(&input.output("Noise scale"), &noise.scale_input())?;

        let mix = two_tone(tree, input, noise, &noise.mix_factor_output())?;
        finish(tree, mix, &mix.color_output())?;
        Ok(group)
    }
}

/// Pores cut lengthwise; white where a vessel is
#[derive(Debug, Clone, Copy, Default)]
pub struct LongGrainVessels;

impl GroupBuilder for LongGrainVessels {
    fn name(&self) -> &str {
        "Long grain vessels"
    }

    fn build(&self) -> Result<Group, WoodError> {
        let mut group = Group::new(self.name());
        group
            .set_vector_input(TEXTURE_COORDINATES, [0.0; 3])?
            .set_color_input("Length scale", [0.025, 1.0, 1.0, 1.0])?
            .set_float_input("Intensity", 3000.0)?
            .set_color_output(COLOR, [0.0; 4])?;

        let tree = group.tree_mut();
        let input = tree.add::<GroupInput>().set_location(tree, pos2(0.0, 0.0))?;

        let length = scale(
            tree,
            "Scale length",
            input,
            &input.output(TEXTURE_COORDINATES),
            &input.output("Length scale"),
        )?;

        let voronoi = tree
            .add::<VoronoiTexture>()
            .set_position(tree, right_of(length).with_distance(SPACING))?
            .set_coloring(tree, VoronoiColoring::Intensity)?;
        tree.link(&length.color_output(), &voronoi.vector_input())?;
        tree.link(&input.output("Intensity"), &voronoi.scale_input())?;

        // Only the cell centers survive the ramp
        let select = tree
            .add::<ColorRamp>()
            .set_label(tree, "Select vessels")?
            .set_position(tree, right_of(voronoi).with_distance(SPACING))?
            .add_stop(tree, 0.086, [1.0, 1.0, 1.0, 1.0])?
            .add_stop(tree, 0.141, [0.0, 0.0, 0.0, 1.0])?;
        tree.link(&voronoi.mix_factor_output(), &select.mix_factor_input())?;

        finish(tree, select, &select.color_output())?;
        Ok(group)
    }
}
