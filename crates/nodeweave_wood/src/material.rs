// SPDX-License-Identifier: MIT OR Apache-2.0
//! Wood material composition.

use crate::fibres::COLOR;
use crate::grain::GRAIN_PATTERN;
use crate::{AxialParenchyma, GrainPattern, GroupBuilder, LongGrainVessels, Rays, SupportFibres, WoodError, SPACING};
use nodeweave_graph::nodes::{BlendType, BsdfDiffuse, ColorRamp, GroupNode, MaterialOutput, MixRgb};
use nodeweave_graph::{below, location, right_of, Group, NodeTree, Position, TypedNode};
use std::fmt;

/// Nodes added by [`DiffuseColorBuilder::build`]
#[derive(Debug, Clone)]
pub struct DiffuseColor {
    /// Built groups: grain, support fibres, axial parenchyma, vessels, rays
    pub groups: Vec<Group>,
    /// Group instances in the material tree, same order as `groups`
    pub instances: Vec<GroupNode>,
    /// Final mix carrying the diffuse color
    pub color: MixRgb,
}

/// Stacks the wood groups in a column and mixes them into one color.
///
/// The grain drives a ramp whose alpha blends the fibres with the
/// parenchyma; vessels and rays then paint their own colors on top.
pub struct DiffuseColorBuilder {
    grain: Box<dyn GroupBuilder>,
    support_fibres: Box<dyn GroupBuilder>,
    axial_parenchyma: Box<dyn GroupBuilder>,
    vessels: Box<dyn GroupBuilder>,
    rays: Box<dyn GroupBuilder>,
}

impl Default for DiffuseColorBuilder {
    fn default() -> Self {
        Self::new(
            Box::new(GrainPattern),
            Box::new(SupportFibres),
            Box::new(AxialParenchyma),
            Box::new(LongGrainVessels),
            Box::new(Rays),
        )
    }
}

impl fmt::Debug for DiffuseColorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiffuseColorBuilder")
            .field("grain", &self.grain.name())
            .field("support_fibres", &self.support_fibres.name())
            .field("axial_parenchyma", &self.axial_parenchyma.name())
            .field("vessels", &self.vessels.name())
            .field("rays", &self.rays.name())
            .finish()
    }
}

impl DiffuseColorBuilder {
    /// Compose from custom recipes
    pub fn new(
        grain: Box<dyn GroupBuilder>,
        support_fibres: Box<dyn GroupBuilder>,
        axial_parenchyma: Box<dyn GroupBuilder>,
        vessels: Box<dyn GroupBuilder>,
        rays: Box<dyn GroupBuilder>,
    ) -> Self {
        Self {
            grain,
            support_fibres,
            axial_parenchyma,
            vessels,
            rays,
        }
    }

    /// Build the groups, instantiate them at `position` and mix them
    pub fn build(&self, tree: &mut NodeTree, position: Position) -> Result<DiffuseColor, WoodError> {
        let recipes = [
            &self.grain,
            &self.support_fibres,
            &self.axial_parenchyma,
            &self.vessels,
            &self.rays,
        ];
        let mut groups = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            let group = recipe.build()?;
            tracing::debug!(group = group.name(), nodes = group.tree().node_count(), "built group");
            groups.push(group);
        }

        let grain = instantiate(tree, &groups[0], position)?;
        let support_fibres = instantiate(tree, &groups[1], below(grain).with_distance(SPACING))?;
        let axial_parenchyma = instantiate(tree, &groups[2], below(support_fibres).with_distance(SPACING))?;
        let vessels = instantiate(tree, &groups[3], below(axial_parenchyma).with_distance(SPACING))?;
        let rays = instantiate(tree, &groups[4], below(vessels).with_distance(SPACING))?;

        let ramp = tree
            .add::<ColorRamp>()
            .set_position(tree, right_of(grain).with_distance(SPACING))?
            .add_stop(tree, 0.0, [1.0, 1.0, 1.0, 0.0])?
            .add_stop(tree, 0.659, [0.0, 0.0, 0.0, 1.0])?;
        tree.link(&grain.output(GRAIN_PATTERN), &ramp.mix_factor_input())?;

        let fibres = tree
            .add::<MixRgb>()
            .set_position(tree, right_of(support_fibres).with_distance(3.0 * SPACING))?
            .set_blend_type(tree, BlendType::Mix)?;
        tree.link(&ramp.alpha_output(), &fibres.mix_factor_input())?;
        tree.link(&support_fibres.output(COLOR), &fibres.first_color_input())?;
        tree.link(&axial_parenchyma.output(COLOR), &fibres.second_color_input())?;

        let with_vessels = tree
            .add::<MixRgb>()
            .set_position(tree, right_of(fibres).with_distance(SPACING))?
            .set_blend_type(tree, BlendType::Mix)?
            .set_second_color(tree, [0.494, 0.196, 0.044, 1.0])?;
        tree.link(&vessels.output(COLOR), &with_vessels.mix_factor_input())?;
        tree.link(&fibres.color_output(), &with_vessels.first_color_input())?;

        let with_rays = tree
            .add::<MixRgb>()
            .set_position(tree, right_of(with_vessels).with_distance(SPACING))?
            .set_blend_type(tree, BlendType::Mix)?
            .set_second_color(tree, [0.651, 0.429, 0.189, 1.0])?;
        tree.link(&rays.output(COLOR), &with_rays.mix_factor_input())?;
        tree.link(&with_vessels.color_output(), &with_rays.first_color_input())?;

        Ok(DiffuseColor {
            groups,
            instances: vec![grain, support_fibres, axial_parenchyma, vessels, rays],
            color: with_rays,
        })
    }
}

fn instantiate(tree: &mut NodeTree, group: &Group, position: Position) -> Result<GroupNode, WoodError> {
    let instance = tree
        .add::<GroupNode>()
        .set_position(tree, position)?
        .set_node_tree(tree, group)?;
    Ok(instance)
}

/// Complete wood material: diffuse color into a diffuse BSDF and the output
pub fn wood_material(name: &str) -> Result<(NodeTree, DiffuseColor), WoodError> {
    let mut tree = NodeTree::new(name);
    let diffuse = DiffuseColorBuilder::default().build(&mut tree, location(0.0, 0.0))?;

    let bsdf = tree
        .add::<BsdfDiffuse>()
        .set_position(&mut tree, right_of(diffuse.color).with_distance(SPACING))?;
    tree.link(&diffuse.color.color_output(), &bsdf.color_input())?;

    let output = tree
        .add::<MaterialOutput>()
        .set_position(&mut tree, right_of(bsdf).with_distance(SPACING))?;
    tree.link(&bsdf.bsdf_output(), &output.surface_input())?;

    tracing::info!(material = name, nodes = tree.node_count(), links = tree.links().count(), "built wood material");
    Ok((tree, diffuse))
}
