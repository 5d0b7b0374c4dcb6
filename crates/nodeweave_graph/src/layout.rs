// SPDX-License-Identifier: MIT OR Apache-2.0
//! Render-free size prediction.
//!
//! The host only knows how tall a node is after drawing it. The functions
//! here replay the host's node drawing arithmetic from the vertex state
//! (collapsed flag, visible sockets, option rows) so that layout can be
//! decided while the tree is being built.
//!
//! Every pixel constant is derived from [`LayoutMetrics::widget_unit`].

use crate::document::Vertex;
use crate::error::{ConfigError, LayoutError};
use crate::node::NodeId;
use crate::socket::SocketDirection;
use crate::tree::NodeTree;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Widget unit of the host at 100% interface scale
pub const DEFAULT_WIDGET_UNIT: f32 = 20.0;

/// Collapsed nodes grow once more sockets than this are visible
pub const COLLAPSED_SOCKET_THRESHOLD: usize = 4;

/// Host drawing metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    /// Base pixel metric all other constants derive from
    pub widget_unit: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            widget_unit: DEFAULT_WIDGET_UNIT,
        }
    }
}

impl LayoutMetrics {
    /// Create metrics for a given widget unit
    pub fn new(widget_unit: f32) -> Result<Self, ConfigError> {
        let metrics = Self { widget_unit };
        metrics.validate()?;
        Ok(metrics)
    }

    /// Load metrics from RON; missing fields keep their defaults
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let metrics: Self = ron::from_str(source)?;
        metrics.validate()?;
        Ok(metrics)
    }

    /// Write metrics as pretty RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.widget_unit.is_finite() && self.widget_unit > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidWidgetUnit(self.widget_unit))
        }
    }

    /// Height of a node row (header, socket, button)
    pub fn node_dy(&self) -> f32 {
        self.widget_unit
    }

    /// Half row, rounded down like the host's integer division
    pub fn node_dys(&self) -> f32 {
        (self.widget_unit / 2.0).floor()
    }

    /// Spacing between socket rows
    pub fn node_sockdy(&self) -> f32 {
        0.08 * self.widget_unit
    }

    /// Radius of a collapsed node
    pub fn hidden_radius(&self) -> f32 {
        0.75 * self.widget_unit
    }

    /// Collapsed radius growth per socket beyond the threshold
    pub fn hidden_socket_growth(&self) -> f32 {
        0.25 * self.widget_unit
    }

    /// Margin a frame keeps around its children
    pub fn frame_margin(&self) -> f32 {
        1.5 * self.widget_unit
    }

    /// Gap between template rows inside the options area
    pub fn template_space(&self) -> f32 {
        0.25 * self.widget_unit
    }

    /// Minimum width of a color ramp template
    pub fn color_ramp_width(&self) -> f32 {
        10.0 * self.widget_unit
    }

    /// Padding under the color band toolbar
    pub fn color_band_padding(&self) -> f32 {
        0.1 * self.widget_unit
    }

    /// Position and color rows of the large color band layout
    pub fn color_band_edit_rows(&self) -> f32 {
        3.25 * self.widget_unit
    }

    /// Height of a curve editing canvas
    pub fn curve_height(&self) -> f32 {
        8.0 * self.widget_unit
    }
}

/// Per-variant layout behaviour.
///
/// Variants only override what differs from a plain node: most add option
/// rows through [`NodeShape::buttons_y_space`], frames replace both sizes.
pub trait NodeShape: fmt::Debug + Send + Sync {
    /// Variant name used in logs
    fn name(&self) -> &'static str;

    /// Whether parenting to this node registers the child
    fn contains_children(&self) -> bool {
        false
    }

    /// Vertical space taken by the options area
    fn buttons_y_space(&self, _metrics: &LayoutMetrics) -> f32 {
        0.0
    }

    /// Predicted drawn width
    fn width(&self, sizer: &mut Sizer<'_>, node: NodeId) -> Result<f32, LayoutError> {
        sizer.stored_width(node)
    }

    /// Predicted drawn height, measured down from the node location
    fn height(&self, sizer: &mut Sizer<'_>, node: NodeId) -> Result<f32, LayoutError> {
        sizer.stacked_height(node, self.buttons_y_space(sizer.metrics()))
    }
}

/// Size computation context.
///
/// Sizes are never cached: each query walks the current tree. The sizer
/// keeps the chain of nodes being sized so that a frame reached again
/// through its own children fails instead of recursing forever.
#[derive(Debug)]
pub struct Sizer<'t> {
    tree: &'t NodeTree,
    active: Vec<NodeId>,
}

impl<'t> Sizer<'t> {
    /// Create a sizer over `tree`
    pub fn new(tree: &'t NodeTree) -> Self {
        Self {
            tree,
            active: Vec::new(),
        }
    }

    /// Tree being measured
    pub fn tree(&self) -> &'t NodeTree {
        self.tree
    }

    /// Metrics of the tree
    pub fn metrics(&self) -> &'t LayoutMetrics {
        self.tree.metrics()
    }

    /// Predicted width of `node`
    pub fn width(&mut self, node: NodeId) -> Result<f32, LayoutError> {
        let tree = self.tree;
        let shape = tree.shape(node)?;
        self.enter(node)?;
        let width = shape.width(self, node);
        self.active.pop();
        width
    }

    /// Predicted height of `node`
    pub fn height(&mut self, node: NodeId) -> Result<f32, LayoutError> {
        let tree = self.tree;
        let shape = tree.shape(node)?;
        self.enter(node)?;
        let height = shape.height(self, node);
        self.active.pop();
        height
    }

    fn enter(&mut self, node: NodeId) -> Result<(), LayoutError> {
        if self.active.contains(&node) {
            return Err(LayoutError::ContainmentCycle(node));
        }
        self.active.push(node);
        Ok(())
    }

    /// Width stored on the vertex
    pub fn stored_width(&self, node: NodeId) -> Result<f32, LayoutError> {
        Ok(self.tree.vertex(node)?.width)
    }

    /// Height stored on the vertex
    pub fn stored_height(&self, node: NodeId) -> Result<f32, LayoutError> {
        Ok(self.tree.vertex(node)?.height)
    }

    /// Height of a regular node with `buttons_y_space` of option rows.
    ///
    /// Falls back to the stored height if the arithmetic does not produce
    /// a finite value.
    pub fn stacked_height(&self, node: NodeId, buttons_y_space: f32) -> Result<f32, LayoutError> {
        let vertex = self.tree.vertex(node)?;
        let metrics = self.metrics();
        let height = if vertex.collapsed {
            collapsed_height(vertex, metrics)
        } else {
            expanded_height(vertex, buttons_y_space, metrics)
        };

        if height.is_finite() {
            tracing::trace!(%node, height, "predicted node height");
            Ok(height)
        } else {
            tracing::warn!(%node, "node height is not computable, using stored height");
            Ok(vertex.height)
        }
    }
}

/// Lower a socket column by one row per visible socket.
///
/// Rows are snapped to whole pixels (truncating toward zero) before the
/// inter-socket spacing is applied; an empty column still nudges the
/// cursor back up by the spacing, as the host does.
fn socket_rows(mut dy: f32, visible: usize, metrics: &LayoutMetrics) -> f32 {
    if visible == 0 {
        return dy + metrics.node_sockdy();
    }
    for row in 0..visible {
        if row > 0 {
            dy -= metrics.node_sockdy();
        }
        dy = (dy - metrics.node_dy()).trunc();
    }
    dy
}

/// Height of an expanded node, from its location down to its bottom edge.
///
/// Top to bottom: header row, a little padding if the node has outputs,
/// visible outputs, the options area, visible inputs, closing padding.
pub fn expanded_height(vertex: &Vertex, buttons_y_space: f32, metrics: &LayoutMetrics) -> f32 {
    let top = vertex.location[1];
    let mut dy = top;

    dy -= metrics.node_dy();

    if !vertex.outputs.is_empty() {
        dy -= (metrics.node_dys() / 2.0).floor();
    }
    dy = socket_rows(dy, vertex.visible_sockets(SocketDirection::Output), metrics);

    if buttons_y_space > 0.0 {
        dy -= (metrics.node_dys() / 2.0).floor();
        dy -= buttons_y_space;
        dy -= (metrics.node_dys() / 2.0).floor();
    }

    dy = socket_rows(dy, vertex.visible_sockets(SocketDirection::Input), metrics);

    let has_options_or_preview = vertex.show_options || vertex.show_preview;
    if !vertex.inputs.is_empty() || !has_options_or_preview {
        dy -= metrics.node_dys() / 2.0;
    }

    top - dy
}

/// Height of a collapsed node below its location.
///
/// The collapsed body is a pill of `2 * radius` whose top sits
/// `radius - node_dy / 2` above the location.
pub fn collapsed_height(vertex: &Vertex, metrics: &LayoutMetrics) -> f32 {
    let visible = vertex
        .visible_sockets(SocketDirection::Input)
        .max(vertex.visible_sockets(SocketDirection::Output));

    let mut radius = metrics.hidden_radius();
    if visible > COLLAPSED_SOCKET_THRESHOLD {
        radius += metrics.hidden_socket_growth() * (visible - COLLAPSED_SOCKET_THRESHOLD) as f32;
    }
    radius + 0.5 * metrics.node_dy()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn vertex(type_tag: &str) -> Document {
        let mut doc = Document::new("Layout");
        doc.allocate(type_tag);
        doc
    }

    #[test]
    fn test_default_metrics() {
        let metrics = LayoutMetrics::default();
        assert_eq!(metrics.node_dy(), 20.0);
        assert_eq!(metrics.node_dys(), 10.0);
        assert!(approx(metrics.node_sockdy(), 1.6));
        assert_eq!(metrics.hidden_radius(), 15.0);
        assert_eq!(metrics.frame_margin(), 30.0);
        assert_eq!(metrics.template_space(), 5.0);
        assert_eq!(metrics.color_ramp_width(), 200.0);
        assert!(approx(metrics.color_band_padding(), 2.0));
        assert_eq!(metrics.color_band_edit_rows(), 65.0);
        assert_eq!(metrics.curve_height(), 160.0);
    }

    #[test]
    fn test_metrics_from_ron() {
        let metrics = LayoutMetrics::from_ron("(widget_unit: 40.0)").unwrap();
        assert_eq!(metrics.frame_margin(), 60.0);

        assert!(matches!(
            LayoutMetrics::from_ron("(widget_unit: -1.0)"),
            Err(ConfigError::InvalidWidgetUnit(_))
        ));
        assert!(matches!(LayoutMetrics::from_ron("(widget_unit: "), Err(ConfigError::Parse(_))));

        let ron = LayoutMetrics::default().to_ron().unwrap();
        assert_eq!(LayoutMetrics::from_ron(&ron).unwrap(), LayoutMetrics::default());
    }

    #[test]
    fn test_mix_height() {
        // header 20, padding 5, one output, 40 of options, three inputs
        let doc = vertex("ShaderNodeMixRGB");
        let height = expanded_height(&doc.vertices()[0], 40.0, &LayoutMetrics::default());
        assert!(approx(height, 162.0), "{height}");
    }

    #[test]
    fn test_bare_node_height() {
        let doc = vertex("SomethingUnknown");
        let height = expanded_height(&doc.vertices()[0], 0.0, &LayoutMetrics::default());
        assert!(approx(height, 16.8), "{height}");
    }

    #[test]
    fn test_closing_padding_without_options() {
        let mut doc = vertex("ShaderNodeValue");
        let metrics = LayoutMetrics::default();
        let with_options = expanded_height(&doc.vertices()[0], 0.0, &metrics);
        doc.vertex_mut(crate::document::VertexId(0)).unwrap().set_show_options(false);
        let without_options = expanded_height(&doc.vertices()[0], 0.0, &metrics);
        assert!(approx(without_options - with_options, 5.0));
    }

    #[test]
    fn test_hidden_sockets_shrink_the_node() {
        let mut doc = vertex("ShaderNodeSeparateXYZ");
        let metrics = LayoutMetrics::default();
        let full = expanded_height(&doc.vertices()[0], 0.0, &metrics);
        doc.vertex_mut(crate::document::VertexId(0))
            .unwrap()
            .set_socket_hidden(SocketDirection::Output, &crate::socket::SocketSlot::Index(2), true);
        let reduced = expanded_height(&doc.vertices()[0], 0.0, &metrics);
        assert!(approx(full - reduced, 21.0), "{full} {reduced}");
    }

    #[test]
    fn test_collapsed_height_grows_past_threshold() {
        let mut doc = vertex("ShaderNodeTexCoord");
        let metrics = LayoutMetrics::default();
        // seven outputs: radius 15 + 3 * 5
        assert!(approx(collapsed_height(&doc.vertices()[0], &metrics), 40.0));

        let vertex = doc.vertex_mut(crate::document::VertexId(0)).unwrap();
        for index in 0..5 {
            vertex.set_socket_hidden(SocketDirection::Output, &crate::socket::SocketSlot::Index(index), true);
        }
        assert!(approx(collapsed_height(&doc.vertices()[0], &metrics), 25.0));
    }

    #[test]
    fn test_non_finite_height_uses_stored_height() {
        let mut tree = crate::tree::NodeTree::new("Layout");
        let node = tree.create("ShaderNodeValue");
        tree.document_mut()
            .vertex_mut(node.vertex())
            .unwrap()
            .set_height(123.0);

        tree.set_location(node, egui::pos2(0.0, f32::INFINITY)).unwrap();
        assert_eq!(tree.compute_height(node), Ok(123.0));

        tree.set_location(node, egui::pos2(0.0, 0.0)).unwrap();
        assert!(approx(tree.compute_height(node).unwrap(), 43.4));
    }
}
