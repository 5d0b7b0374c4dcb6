// SPDX-License-Identifier: MIT OR Apache-2.0
//! Medullary rays.
//!
//! Rays run outwards from the pith. The group measures the angle around
//! the length axis, keeps the angles close to a multiple of the ray spacing
//! and breaks the resulting spokes up with a fractal.

use crate::{GroupBuilder, WoodError, SPACING, TEXTURE_COORDINATES};
use nodeweave_graph::nodes::{
    BlendType, CombineXyz, Frame, GradientTexture, GradientType, GroupInput, GroupOutput, Math, MathOperation,
    MixRgb, MusgraveTexture, MusgraveType, NoiseTexture, SeparateXyz, Value,
};
use nodeweave_graph::{below, pos2, right_of, Group, NodeId, NodeTree, Socket, TypedNode};
use std::f32::consts::PI;

/// Output carrying the ray mask
pub const COLOR: &str = "Color";

/// Radial spokes around the length axis
#[derive(Debug, Clone, Copy, Default)]
pub struct Rays;

impl GroupBuilder for Rays {
    fn name(&self) -> &str {
        "Rays"
    }

    fn build(&self) -> Result<Group, WoodError> {
        let mut group = Group::new(self.name());
        group
            .set_vector_input(TEXTURE_COORDINATES, [0.0; 3])?
            .set_float_input("Count", 50.0)?
            .set_float_input("Thickness", 0.005)?
            .set_float_input("Distortion factor", 0.5)?
            .set_float_input("Distortion scale", 0.6)?
            .set_color_output(COLOR, [0.0; 4])?;

        let tree = group.tree_mut();
        let input = tree.add::<GroupInput>().set_location(tree, pos2(0.0, 0.0))?;

        let (frame, distorted) = distortion(tree, input)?;
        let (separate, angle) = angle(tree, &distorted, frame)?;
        let (frame, is_ray) = select_rays(tree, input, &angle, separate)?;
        let (frame, rays) = cut_rays(tree, &distorted, &is_ray, frame)?;

        let output = tree
            .add::<GroupOutput>()
            .set_position(tree, right_of(frame).with_distance(SPACING))?;
        tree.link(&rays, &output.input(COLOR))?;

        Ok(group)
    }
}

fn distortion(tree: &mut NodeTree, input: GroupInput) -> Result<(Frame, Socket), WoodError> {
    let frame = tree
        .add::<Frame>()
        .set_position(tree, right_of(input).with_distance(SPACING))?
        .set_label(tree, "Distortion")?
        .set_shrink(tree, true)?;

    let noise = tree
        .add::<NoiseTexture>()
        .set_parent(tree, frame)?
        .set_location(tree, pos2(SPACING, 0.0))?
        .set_detail(tree, 16.0)?
        .set_distortion(tree, 2.1)?;
    tree.link(&input.output(TEXTURE_COORDINATES), &noise.vector_input())?;
    tree.link(&input.output("Distortion scale"), &noise.scale_input())?;

    let reset = tree
        .add::<MixRgb>()
        .set_label(tree, "Reset direction")?
        .set_parent(tree, frame)?
        .set_position(tree, right_of(noise).with_distance(SPACING))?
        .set_blend_type(tree, BlendType::Subtract)?
        .set_mix_factor(tree, 1.0)?
        .set_second_color(tree, [0.5, 0.5, 0.5, 1.0])?;
    tree.link(&noise.color_output(), &reset.first_color_input())?;

    let add = tree
        .add::<MixRgb>()
        .set_label(tree, "Add distortion")?
        .set_parent(tree, frame)?
        .set_position(tree, right_of(reset).with_distance(SPACING))?
        .set_blend_type(tree, BlendType::Add)?;
    tree.link(&input.output("Distortion factor"), &add.mix_factor_input())?;
    tree.link(&input.output(TEXTURE_COORDINATES), &add.first_color_input())?;
    tree.link(&reset.color_output(), &add.second_color_input())?;

    Ok((frame, add.color_output()))
}

/// Angle around the x axis, from a radial gradient on swapped axes
fn angle(tree: &mut NodeTree, coordinates: &Socket, above: Frame) -> Result<(SeparateXyz, Socket), WoodError> {
    let separate = tree
        .add::<SeparateXyz>()
        .set_position(tree, below(above).with_distance(SPACING))?;
    tree.link(coordinates, &separate.vector_input())?;

    // Radial gradients turn around z; swap x and z
    let combine = tree
        .add::<CombineXyz>()
        .set_position(tree, right_of(separate).with_distance(SPACING))?;
    tree.link(&separate.x_output(), &combine.z_input())?;
    tree.link(&separate.y_output(), &combine.y_input())?;
    tree.link(&separate.z_output(), &combine.x_input())?;

    let gradient = tree
        .add::<GradientTexture>()
        .set_label(tree, "angle")?
        .set_position(tree, right_of(combine).with_distance(SPACING))?
        .set_type(tree, GradientType::Radial)?;
    tree.link(&combine.vector_output(), &gradient.vector_input())?;

    Ok((separate, gradient.color_output()))
}

/// Math node inside `frame`, right of `after` or at the frame origin
fn step(
    tree: &mut NodeTree,
    frame: Frame,
    label: Option<&str>,
    after: Option<Math>,
    operation: MathOperation,
) -> Result<Math, WoodError> {
    let math = tree.add::<Math>().set_parent(tree, frame)?;
    if let Some(label) = label {
        math.set_label(tree, label)?;
    }
    let math = match after {
        Some(after) => math.set_position(tree, right_of(after).with_distance(SPACING))?,
        None => math.set_location(tree, pos2(SPACING, 0.0))?,
    };
    Ok(math.set_operation(tree, operation)?)
}

/// 1 where the angle is within `Thickness` of a ray
fn select_rays(
    tree: &mut NodeTree,
    input: GroupInput,
    angle: &Socket,
    above: impl Into<NodeId>,
) -> Result<(Frame, Socket), WoodError> {
    let frame = tree
        .add::<Frame>()
        .set_position(tree, below(above).with_distance(SPACING))?
        .set_label(tree, "Is ray ?")?
        .set_shrink(tree, true)?;

    let delta = step(tree, frame, Some("Ray delta"), None, MathOperation::Divide)?.set_first_value(tree, 1.0)?;
    tree.link(&input.output("Count"), &delta.second_value_input())?;

    let quotient = step(tree, frame, Some("Angle quotient"), Some(delta), MathOperation::Divide)?;
    tree.link(angle, &quotient.first_value_input())?;
    tree.link(&delta.value_output(), &quotient.second_value_input())?;

    let nearest = step(tree, frame, Some("Nearest int"), Some(quotient), MathOperation::Round)?;
    tree.link(&quotient.value_output(), &nearest.first_value_input())?;

    let distance = step(tree, frame, Some("Nearest int dist."), Some(nearest), MathOperation::Subtract)?;
    tree.link(&quotient.value_output(), &distance.first_value_input())?;
    tree.link(&nearest.value_output(), &distance.second_value_input())?;

    let absolute = step(
        tree,
        frame,
        Some("Nearest int absolute dist."),
        Some(distance),
        MathOperation::Absolute,
    )?;
    tree.link(&distance.value_output(), &absolute.first_value_input())?;

    let is_ray = step(tree, frame, Some("Is ray ?"), Some(absolute), MathOperation::LessThan)?;
    tree.link(&absolute.value_output(), &is_ray.first_value_input())?;
    tree.link(&input.output("Thickness"), &is_ray.second_value_input())?;

    Ok((frame, is_ray.value_output()))
}

/// Mask the spokes with a fractal so rays come in short pieces
fn cut_rays(
    tree: &mut NodeTree,
    coordinates: &Socket,
    is_ray: &Socket,
    above: Frame,
) -> Result<(Frame, Socket), WoodError> {
    let frame = tree
        .add::<Frame>()
        .set_position(tree, below(above).with_distance(SPACING))?
        .set_label(tree, "Cut rays")?
        .set_shrink(tree, true)?;

    let musgrave = tree
        .add::<MusgraveTexture>()
        .set_parent(tree, frame)?
        .set_location(tree, pos2(SPACING, 0.0))?
        .set_type(tree, MusgraveType::Fbm)?
        .set_scale(tree, 50.0)?
        .set_detail(tree, 2.0)?
        .set_dimension(tree, 2.0)?
        .set_lacunarity(tree, 1.0)?
        .set_offset(tree, 0.0)?
        .set_gain(tree, 1.0)?;
    tree.link(coordinates, &musgrave.vector_input())?;

    let mix = tree
        .add::<MixRgb>()
        .set_parent(tree, frame)?
        .set_position(tree, right_of(musgrave).with_distance(SPACING))?
        .set_blend_type(tree, BlendType::Mix)?
        .set_second_color(tree, [0.0, 0.0, 0.0, 1.0])?;
    tree.link(&musgrave.mix_factor_output(), &mix.mix_factor_input())?;
    tree.link(is_ray, &mix.first_color_input())?;

    Ok((frame, mix.color_output()))
}

/// Angle around the z axis in `[0, 1]`, spelled out in math nodes.
///
/// Computes `atan2(y, x) = 2 atan((sqrt(x² + y²) - x) / y)` and maps it from
/// `[-π, π]`. Matches what a radial gradient outputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Angle;

impl GroupBuilder for Angle {
    fn name(&self) -> &str {
        "Angle"
    }

    fn build(&self) -> Result<Group, WoodError> {
        let mut group = Group::new(self.name());
        group
            .set_vector_input(TEXTURE_COORDINATES, [0.0; 3])?
            .set_color_output(COLOR, [0.0; 4])?;

        let tree = group.tree_mut();
        let input = tree.add::<GroupInput>().set_location(tree, pos2(0.0, 0.0))?;

        let xy = tree
            .add::<SeparateXyz>()
            .set_position(tree, right_of(input).with_distance(SPACING))?;
        tree.link(&input.output(TEXTURE_COORDINATES), &xy.vector_input())?;

        let frame = tree
            .add::<Frame>()
            .set_position(tree, right_of(xy).with_distance(SPACING))?
            .set_label(tree, "atan2(y, x)=2 arctan((sqrt(x^2+y^2)-x)/y)")?
            .set_shrink(tree, true)?;

        let x_square = step(tree, frame, None, None, MathOperation::Power)?.set_second_value(tree, 2.0)?;
        tree.link(&xy.x_output(), &x_square.first_value_input())?;

        let y_square = tree
            .add::<Math>()
            .set_parent(tree, frame)?
            .set_position(tree, below(x_square).with_distance(SPACING))?
            .set_operation(tree, MathOperation::Power)?
            .set_second_value(tree, 2.0)?;
        tree.link(&xy.y_output(), &y_square.first_value_input())?;

        let sum = step(tree, frame, None, Some(x_square), MathOperation::Add)?;
        tree.link(&x_square.value_output(), &sum.first_value_input())?;
        tree.link(&y_square.value_output(), &sum.second_value_input())?;

        let root = step(tree, frame, None, Some(sum), MathOperation::Power)?.set_second_value(tree, 0.5)?;
        tree.link(&sum.value_output(), &root.first_value_input())?;

        let minus_x = step(tree, frame, None, Some(root), MathOperation::Subtract)?;
        tree.link(&root.value_output(), &minus_x.first_value_input())?;
        tree.link(&xy.x_output(), &minus_x.second_value_input())?;

        let over_y = step(tree, frame, None, Some(minus_x), MathOperation::Divide)?;
        tree.link(&minus_x.value_output(), &over_y.first_value_input())?;
        tree.link(&xy.y_output(), &over_y.second_value_input())?;

        let arctan = step(tree, frame, None, Some(over_y), MathOperation::Arctangent)?;
        tree.link(&over_y.value_output(), &arctan.first_value_input())?;

        let doubled = step(tree, frame, None, Some(arctan), MathOperation::Multiply)?.set_first_value(tree, 2.0)?;
        tree.link(&arctan.value_output(), &doubled.second_value_input())?;

        let shifted = tree
            .add::<Math>()
            .set_label(tree, "Start from 0")?
            .set_position(tree, right_of(frame).with_distance(SPACING))?
            .set_operation(tree, MathOperation::Add)?;
        let pi = tree
            .add::<Value>()
            .set_label(tree, "PI")?
            .set_position(tree, below(shifted).with_distance(SPACING))?
            .set_value(tree, PI)?;
        tree.link(&doubled.value_output(), &shifted.first_value_input())?;
        tree.link(&pi.value_output(), &shifted.second_value_input())?;

        let two_pi = tree
            .add::<Math>()
            .set_label(tree, "2PI")?
            .set_position(tree, right_of(pi).with_distance(SPACING))?
            .set_operation(tree, MathOperation::Multiply)?
            .set_first_value(tree, 2.0)?;
        tree.link(&pi.value_output(), &two_pi.second_value_input())?;

        let normalized = tree
            .add::<Math>()
            .set_label(tree, "End to 1")?
            .set_position(tree, right_of(shifted).with_distance(SPACING))?
            .set_operation(tree, MathOperation::Divide)?;
        tree.link(&shifted.value_output(), &normalized.first_value_input())?;
        tree.link(&two_pi.value_output(), &normalized.second_value_input())?;

        let output = tree
            .add::<GroupOutput>()
            .set_position(tree, right_of(normalized).with_distance(SPACING))?;
        tree.link(&normalized.value_output(), &output.input(COLOR))?;

        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<T: TypedNode>(tree: &NodeTree) -> Vec<T> {
        tree.nodes()
            .filter(|n| tree.type_tag(*n) == Ok(T::TYPE_TAG))
            .map(T::from_id)
            .collect()
    }

    #[test]
    fn test_rays_stack_below_distortion() {
        crate::init_logging();
        let group = Rays.build().unwrap();
        let tree = group.tree();

        let frames = find::<Frame>(tree);
        let distortion = frames[0];
        assert_eq!(tree.location(distortion.id()).unwrap(), pos2(190.0, 0.0));
        // two mixes of 162 hanging from y = 0, plus the margin on both sides
        assert_eq!(tree.compute_height(distortion.id()).unwrap(), 222.0);

        let separate = find::<SeparateXyz>(tree)[0];
        assert_eq!(tree.location(separate.id()).unwrap(), pos2(190.0, -272.0));

        // separate xyz is 112 high
        let is_ray = frames[1];
        assert_eq!(tree.label(is_ray.id()).unwrap(), "Is ray ?");
        assert_eq!(tree.location(is_ray.id()).unwrap(), pos2(190.0, -434.0));
        assert_eq!(is_ray.children(tree).unwrap().len(), 6);

        let cut = frames[2];
        let output = find::<GroupOutput>(tree)[0];
        let cut_location = tree.location(cut.id()).unwrap();
        assert_eq!(
            tree.location(output.id()).unwrap(),
            pos2(cut_location.x + tree.compute_width(cut.id()).unwrap() + SPACING, cut_location.y)
        );
    }

    #[test]
    fn test_rays_swap_axes_for_the_gradient() {
        let group = Rays.build().unwrap();
        let tree = group.tree();
        let separate = find::<SeparateXyz>(tree)[0];
        let combine = find::<CombineXyz>(tree)[0];

        let mut swaps: Vec<_> = tree
            .links()
            .filter(|l| l.from == separate.id() && l.to == combine.id())
            .map(|l| (l.from_socket, l.to_socket))
            .collect();
        swaps.sort_unstable();
        assert_eq!(swaps, vec![(0, 2), (1, 1), (2, 0)]);
    }

    #[test]
    fn test_angle_group() {
        let group = Angle.build().unwrap();
        let tree = group.tree();
        assert_eq!(tree.node_count(), 16);

        let frame = find::<Frame>(tree)[0];
        assert_eq!(frame.children(tree).unwrap().len(), 8);

        let pi = find::<Value>(tree)[0];
        assert_eq!(tree.label(pi.id()).unwrap(), "PI");

        let output = find::<GroupOutput>(tree)[0];
        assert_eq!(tree.links().filter(|l| l.to == output.id()).count(), 1);
    }
}
