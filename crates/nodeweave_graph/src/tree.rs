// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node tree: the engine's view over a host document.
//!
//! [`NodeTree`] owns a [`Document`] and keeps, next to every vertex, the
//! layout variant it was dispatched to and (for frames) the ordered list
//! of registered children. All construction goes through it: creating
//! nodes, linking sockets, parenting and positioning.

use crate::document::{Document, DocumentId, PropertyValue, Vertex, VertexId};
use crate::error::{GraphError, LayoutError, LinkError};
use crate::layout::{LayoutMetrics, NodeShape, Sizer};
use crate::node::{NodeId, TypedNode};
use crate::position::Position;
use crate::registry::NodeRegistry;
use crate::socket::{Socket, SocketDirection, SocketType, SocketValue};
use egui::{Pos2, Vec2};
use std::sync::Arc;

/// Engine-side state of one vertex
#[derive(Debug, Clone)]
struct NodeEntry {
    shape: Arc<dyn NodeShape>,
    /// Registered children, in registration order
    children: Vec<NodeId>,
}

/// A directed link from an output to an input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link {
    /// Source node
    pub from: NodeId,
    /// Output index on the source
    pub from_socket: usize,
    /// Target node
    pub to: NodeId,
    /// Input index on the target
    pub to_socket: usize,
}

/// A node tree under construction.
///
/// Cloning yields a separate tree with its own ID; node IDs from the
/// original do not resolve in the copy.
#[derive(Debug)]
pub struct NodeTree {
    document: Document,
    entries: Vec<NodeEntry>,
    registry: Arc<NodeRegistry>,
    metrics: LayoutMetrics,
}

impl Clone for NodeTree {
    fn clone(&self) -> Self {
        let mut document = self.document.clone();
        document.renew_id();
        let id = document.id();
        let entries = self
            .entries
            .iter()
            .map(|entry| NodeEntry {
                shape: Arc::clone(&entry.shape),
                children: entry.children.iter().map(|c| NodeId::new(id, c.vertex())).collect(),
            })
            .collect();
        Self {
            document,
            entries,
            registry: Arc::clone(&self.registry),
            metrics: self.metrics,
        }
    }
}

impl NodeTree {
    /// Create an empty shader tree with default metrics
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_registry(name, Arc::new(NodeRegistry::shader()), LayoutMetrics::default())
    }

    /// Create an empty tree dispatching through `registry`
    pub fn with_registry(name: impl Into<String>, registry: Arc<NodeRegistry>, metrics: LayoutMetrics) -> Self {
        Self {
            document: Document::new(name),
            entries: Vec::new(),
            registry,
            metrics,
        }
    }

    /// Tree ID (the ID of the underlying document)
    pub fn id(&self) -> DocumentId {
        self.document.id()
    }

    /// Tree name
    pub fn name(&self) -> &str {
        self.document.name()
    }

    /// Underlying host document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable host document, for display tweaks such as widths or hidden sockets
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Layout metrics used for size prediction
    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    /// Registry used to dispatch new nodes
    pub fn registry(&self) -> &Arc<NodeRegistry> {
        &self.registry
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.entries.len()
    }

    /// All nodes in creation order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.document.vertices().iter().map(|v| NodeId::new(self.id(), v.id()))
    }

    /// Whether `node` belongs to this tree
    pub fn contains(&self, node: NodeId) -> bool {
        self.check(node).is_ok()
    }

    fn check(&self, node: NodeId) -> Result<(), GraphError> {
        if node.tree() != self.id() {
            return Err(GraphError::ForeignNode { node, tree: self.id() });
        }
        if node.vertex().index() >= self.entries.len() {
            return Err(GraphError::NodeNotFound(node));
        }
        Ok(())
    }

    fn node_id(&self, vertex: VertexId) -> NodeId {
        NodeId::new(self.id(), vertex)
    }

    // Node creation

    /// Create a node of host type `type_tag`.
    ///
    /// Tags without a registered variant still allocate a vertex and behave
    /// as plain nodes.
    pub fn create(&mut self, type_tag: &str) -> NodeId {
        let vertex = self.document.allocate(type_tag);
        let shape = self.registry.resolve(type_tag);
        if !self.registry.is_registered(type_tag) {
            tracing::debug!(type_tag, "no variant registered, using generic node");
        }

        let node = self.node_id(vertex);
        tracing::debug!(%node, type_tag, variant = shape.name(), "created node");
        self.entries.push(NodeEntry {
            shape,
            children: Vec::new(),
        });
        node
    }

    /// Create a node through its typed handle
    pub fn add<T: TypedNode>(&mut self) -> T {
        T::from_id(self.create(T::TYPE_TAG))
    }

    /// Reinterpret `node` as a typed handle, checking its host type
    pub fn cast<T: TypedNode>(&self, node: NodeId) -> Result<T, GraphError> {
        let found = self.type_tag(node)?;
        if found != T::TYPE_TAG {
            return Err(GraphError::TypeMismatch {
                node,
                expected: T::TYPE_TAG,
                found: found.to_string(),
            });
        }
        Ok(T::from_id(node))
    }

    /// Host type tag of a node
    pub fn type_tag(&self, node: NodeId) -> Result<&str, GraphError> {
        Ok(self.vertex(node)?.type_tag())
    }

    /// Name of the layout variant a node was dispatched to
    pub fn variant_name(&self, node: NodeId) -> Result<&'static str, GraphError> {
        Ok(self.shape(node)?.name())
    }

    pub(crate) fn vertex(&self, node: NodeId) -> Result<&Vertex, GraphError> {
        self.check(node)?;
        self.document.vertex(node.vertex()).ok_or(GraphError::NodeNotFound(node))
    }

    pub(crate) fn vertex_mut(&mut self, node: NodeId) -> Result<&mut Vertex, GraphError> {
        self.check(node)?;
        self.document
            .vertex_mut(node.vertex())
            .ok_or(GraphError::NodeNotFound(node))
    }

    pub(crate) fn shape(&self, node: NodeId) -> Result<&Arc<dyn NodeShape>, GraphError> {
        self.check(node)?;
        Ok(&self.entries[node.vertex().index()].shape)
    }

    // Naming and geometry

    /// Rename a node; returns the name the host settled on
    pub fn set_name(&mut self, node: NodeId, name: &str) -> Result<&str, GraphError> {
        self.check(node)?;
        self.document
            .rename(node.vertex(), name)
            .ok_or(GraphError::NodeNotFound(node))
    }

    /// Unique name of a node
    pub fn node_name(&self, node: NodeId) -> Result<&str, GraphError> {
        Ok(self.vertex(node)?.name())
    }

    /// Set the display label
    pub fn set_label(&mut self, node: NodeId, label: &str) -> Result<(), GraphError> {
        self.vertex_mut(node)?.label = label.to_string();
        Ok(())
    }

    /// Display label
    pub fn label(&self, node: NodeId) -> Result<&str, GraphError> {
        Ok(self.vertex(node)?.label())
    }

    /// Move a node, in its parent's coordinates
    pub fn set_location(&mut self, node: NodeId, location: Pos2) -> Result<(), GraphError> {
        self.vertex_mut(node)?.location = [location.x, location.y];
        Ok(())
    }

    /// Location in the parent's coordinates
    pub fn location(&self, node: NodeId) -> Result<Pos2, GraphError> {
        Ok(self.vertex(node)?.location())
    }

    /// Location in tree coordinates, summing the parent chain
    pub fn absolute_location(&self, node: NodeId) -> Result<Pos2, GraphError> {
        let mut vertex = self.vertex(node)?;
        let mut location = vertex.location();
        // Parent chains are acyclic; the bound only stops a corrupted document
        for _ in 0..self.entries.len() {
            let Some(parent) = vertex.parent() else {
                break;
            };
            vertex = self.vertex(self.node_id(parent))?;
            location += vertex.location().to_vec2();
        }
        Ok(location)
    }

    /// Width and height stored on the vertex
    pub fn explicit_size(&self, node: NodeId) -> Result<Vec2, GraphError> {
        Ok(self.vertex(node)?.size())
    }

    /// Resolve `position` against the current tree and move `node` there
    pub fn set_position(&mut self, node: NodeId, position: Position) -> Result<Pos2, LayoutError> {
        self.check(node)?;
        let location = position.resolve(self)?;
        self.set_location(node, location)?;
        tracing::debug!(%node, x = location.x, y = location.y, "positioned node");
        Ok(location)
    }

    /// Predicted drawn width
    pub fn compute_width(&self, node: NodeId) -> Result<f32, LayoutError> {
        Sizer::new(self).width(node)
    }

    /// Predicted drawn height, measured down from the location
    pub fn compute_height(&self, node: NodeId) -> Result<f32, LayoutError> {
        Sizer::new(self).height(node)
    }

    // Containment

    /// Attach `node` to `parent`.
    ///
    /// Every parent records the back-reference; only frames also register
    /// the node as a child. A node stays in the first frame it joins.
    pub fn set_parent(&mut self, node: NodeId, parent: NodeId) -> Result<(), GraphError> {
        self.check(node)?;
        self.check(parent)?;

        match self.vertex(node)?.parent() {
            Some(current) if current == parent.vertex() => return Ok(()),
            Some(current) => {
                return Err(GraphError::AlreadyParented {
                    node,
                    parent: self.node_id(current),
                })
            }
            None => {}
        }

        let mut ancestor = Some(parent);
        while let Some(candidate) = ancestor {
            if candidate == node {
                return Err(GraphError::ContainmentCycle { node, parent });
            }
            ancestor = self.parent(candidate)?;
        }

        self.vertex_mut(node)?.parent = Some(parent.vertex());
        let entry = &mut self.entries[parent.vertex().index()];
        if entry.shape.contains_children() {
            entry.children.push(node);
        }
        tracing::debug!(%node, %parent, "parented node");
        Ok(())
    }

    /// Parent of a node
    pub fn parent(&self, node: NodeId) -> Result<Option<NodeId>, GraphError> {
        Ok(self.vertex(node)?.parent().map(|p| self.node_id(p)))
    }

    /// Registered children of a frame, in registration order
    pub fn children(&self, node: NodeId) -> Result<&[NodeId], GraphError> {
        self.check(node)?;
        Ok(&self.entries[node.vertex().index()].children)
    }

    /// Whether a node derives its size from children
    pub fn is_frame(&self, node: NodeId) -> Result<bool, GraphError> {
        Ok(self.shape(node)?.contains_children())
    }

    // Sockets and links

    /// Resolve a socket view to its index and type
    pub fn resolve_socket(&self, socket: &Socket) -> Result<(usize, SocketType), GraphError> {
        let node = socket.node();
        self.vertex(node)?
            .socket(socket.direction(), socket.slot())
            .map(|(index, record)| (index, record.socket_type))
            .ok_or_else(|| GraphError::SocketNotFound {
                node,
                direction: socket.direction(),
                slot: socket.slot().clone(),
            })
    }

    /// Write the value a socket uses when unlinked
    pub fn set_default_value(&mut self, socket: &Socket, value: SocketValue) -> Result<(), GraphError> {
        let (index, socket_type) = self.resolve_socket(socket)?;
        if socket_type != value.socket_type() {
            return Err(GraphError::ValueTypeMismatch {
                expected: socket_type,
                got: value.socket_type(),
            });
        }

        let vertex = self.vertex_mut(socket.node())?;
        let records = match socket.direction() {
            SocketDirection::Input => &mut vertex.inputs,
            SocketDirection::Output => &mut vertex.outputs,
        };
        records[index].default_value = Some(value);
        Ok(())
    }

    /// Value a socket uses when unlinked
    pub fn default_value(&self, socket: &Socket) -> Result<Option<SocketValue>, GraphError> {
        let (index, _) = self.resolve_socket(socket)?;
        Ok(self.vertex(socket.node())?.sockets(socket.direction())[index].default_value)
    }

    /// Socket names on one side of a node, in order
    pub fn socket_names(&self, node: NodeId, direction: SocketDirection) -> Result<Vec<&str>, GraphError> {
        Ok(self
            .vertex(node)?
            .sockets(direction)
            .iter()
            .map(|s| s.name.as_str())
            .collect())
    }

    /// Connect an output to an input of this tree.
    ///
    /// An input takes a single link: linking into an input that is already
    /// fed replaces the previous link.
    pub fn link(&mut self, output: &Socket, input: &Socket) -> Result<Link, LinkError> {
        if output.direction() != SocketDirection::Output {
            return Err(LinkError::WrongDirection {
                node: output.node(),
                expected: SocketDirection::Output,
            });
        }
        if input.direction() != SocketDirection::Input {
            return Err(LinkError::WrongDirection {
                node: input.node(),
                expected: SocketDirection::Input,
            });
        }

        let (from_socket, from_type) = self.resolve_socket(output)?;
        let (to_socket, to_type) = self.resolve_socket(input)?;
        if !from_type.can_connect_to(&to_type) {
            return Err(LinkError::IncompatibleSockets {
                from: from_type,
                to: to_type,
            });
        }

        let link = Link {
            from: output.node(),
            from_socket,
            to: input.node(),
            to_socket,
        };
        let replaced = self
            .document
            .connect(link.from.vertex(), from_socket, link.to.vertex(), to_socket);
        if let Some(old) = replaced {
            tracing::debug!(to = %link.to, to_socket, old_from = %old.from, "replaced existing link");
        }
        tracing::trace!(from = %link.from, from_socket, to = %link.to, to_socket, "linked");
        Ok(link)
    }

    /// All links, in creation order
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        self.document.links().iter().map(|l| Link {
            from: self.node_id(l.from),
            from_socket: l.from_socket,
            to: self.node_id(l.to),
            to_socket: l.to_socket,
        })
    }

    // Properties

    /// Host property of a node
    pub fn property(&self, node: NodeId, key: &str) -> Result<Option<&PropertyValue>, GraphError> {
        Ok(self.vertex(node)?.property(key))
    }

    pub(crate) fn set_property(&mut self, node: NodeId, key: &str, value: PropertyValue) -> Result<(), GraphError> {
        self.vertex_mut(node)?.properties.insert(key.to_string(), value);
        Ok(())
    }

    pub(crate) fn property_mut(&mut self, node: NodeId, key: &str) -> Result<Option<&mut PropertyValue>, GraphError> {
        Ok(self.vertex_mut(node)?.properties.get_mut(key))
    }

    /// Point a group reference node at `subgraph`, copying its interface
    pub(crate) fn assign_subgraph(&mut self, node: NodeId, subgraph: &Document) -> Result<(), GraphError> {
        self.check(node)?;
        if subgraph.id() == self.id() || subgraph.references(self.id()) {
            return Err(GraphError::RecursiveGroup(self.id()));
        }
        if !self.document.assign_subgraph(node.vertex(), subgraph) {
            return Err(GraphError::NodeNotFound(node));
        }
        tracing::debug!(%node, subgraph = subgraph.name(), "assigned group tree");
        Ok(())
    }

    /// Export the underlying document as pretty RON
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        self.document.to_ron()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{BsdfDiffuse, Frame, Math, MaterialOutput, MixRgb, Value};
    use crate::position::{location, right_of};
    use egui::pos2;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn test_frame_bounding_box() {
        init_logging();
        let mut tree = NodeTree::new("Frames");
        let frame = tree.add::<Frame>();
        for x in [10.0, 50.0, 90.0] {
            let child = tree.add::<Value>();
            tree.set_parent(child.id(), frame.id()).unwrap();
            tree.set_location(child.id(), pos2(x, 0.0)).unwrap();
            tree.document_mut()
                .vertex_mut(child.id().vertex())
                .unwrap()
                .set_width(20.0);
        }

        let margin = tree.metrics().frame_margin();
        let width = tree.compute_width(frame.id()).unwrap();
        assert!(approx(width, (90.0 + 20.0 + margin) - (10.0 - margin)), "{width}");
        assert!(approx(width, 160.0));
    }

    #[test]
    fn test_empty_frame_uses_stored_size() {
        let mut tree = NodeTree::new("Frames");
        let frame = tree.add::<Frame>();
        let size = tree.explicit_size(frame.id()).unwrap();
        assert_eq!(tree.compute_width(frame.id()).unwrap(), size.x);
        assert_eq!(tree.compute_height(frame.id()).unwrap(), size.y);
    }

    #[test]
    fn test_frame_height_spans_children() {
        let mut tree = NodeTree::new("Frames");
        let frame = tree.add::<Frame>();
        let top = tree.add::<Math>();
        let bottom = tree.add::<Math>();
        for node in [top.id(), bottom.id()] {
            tree.set_parent(node, frame.id()).unwrap();
        }
        tree.set_location(top.id(), pos2(0.0, 0.0)).unwrap();
        tree.set_location(bottom.id(), pos2(0.0, -200.0)).unwrap();

        // top edge at 0 + margin, bottom edge at -200 - 151 - margin
        let height = tree.compute_height(frame.id()).unwrap();
        assert!(approx(height, 200.0 + 151.0 + 60.0), "{height}");
    }

    #[test]
    fn test_unknown_tag_falls_back_to_generic_node() {
        let mut tree = NodeTree::new("Unknown");
        let node = tree.create("ShaderNodeFromTheFuture");
        assert_eq!(tree.variant_name(node).unwrap(), "Node");
        assert_eq!(tree.type_tag(node).unwrap(), "ShaderNodeFromTheFuture");
        assert!(approx(tree.compute_height(node).unwrap(), 16.8));
        assert_eq!(tree.compute_width(node).unwrap(), crate::catalog::DEFAULT_NODE_WIDTH);
    }

    #[test]
    fn test_cast_checks_type() {
        let mut tree = NodeTree::new("Cast");
        let node = tree.create("ShaderNodeMath");
        assert!(tree.cast::<Math>(node).is_ok());
        assert!(matches!(tree.cast::<MixRgb>(node), Err(GraphError::TypeMismatch { .. })));
    }

    #[test]
    fn test_link_across_trees_fails() {
        let mut other = NodeTree::new("Other");
        let foreign = other.add::<Value>();
        let mut tree = NodeTree::new("Tree");
        let math = tree.add::<Math>();

        let result = tree.link(&foreign.value_output(), &math.first_value_input());
        assert!(matches!(
            result,
            Err(LinkError::Unresolved(GraphError::ForeignNode { .. }))
        ));
        assert_eq!(tree.links().count(), 0);
    }

    #[test]
    fn test_clone_rejects_nodes_of_the_original() {
        let mut tree = NodeTree::new("Tree");
        let value = tree.add::<Value>();
        let mut copy = tree.clone();
        assert_ne!(copy.id(), tree.id());
        assert!(!copy.contains(value.id()));
        assert_eq!(copy.node_count(), 1);

        let math = copy.add::<Math>();
        let result = copy.link(&value.value_output(), &math.first_value_input());
        assert!(matches!(
            result,
            Err(LinkError::Unresolved(GraphError::ForeignNode { .. }))
        ));
        let result = tree.link(&value.value_output(), &math.first_value_input());
        assert!(matches!(
            result,
            Err(LinkError::Unresolved(GraphError::ForeignNode { .. }))
        ));
        assert_eq!(copy.links().count(), 0);
        assert_eq!(tree.links().count(), 0);
    }

    #[test]
    fn test_clone_keeps_frame_children_in_the_copy() {
        let mut tree = NodeTree::new("Tree");
        let frame = tree.add::<Frame>();
        let math = tree.add::<Math>();
        tree.set_parent(math.id(), frame.id()).unwrap();

        let copy = tree.clone();
        let children = copy.children(copy.nodes().next().unwrap()).unwrap();
        assert_eq!(children.len(), 1);
        assert!(copy.contains(children[0]));
        assert_eq!(children[0].vertex(), math.id().vertex());
    }

    #[test]
    fn test_link_checks_direction_and_names() {
        let mut tree = NodeTree::new("Tree");
        let a = tree.add::<Math>();
        let b = tree.add::<Math>();

        let result = tree.link(&a.first_value_input(), &b.first_value_input());
        assert!(matches!(result, Err(LinkError::WrongDirection { .. })));

        let result = tree.link(&a.value_output(), &b.input_by_name("Nope"));
        assert!(matches!(
            result,
            Err(LinkError::Unresolved(GraphError::SocketNotFound { .. }))
        ));
    }

    #[test]
    fn test_shader_only_links_to_shader() {
        let mut tree = NodeTree::new("Material");
        let diffuse = tree.add::<BsdfDiffuse>();
        let output = tree.add::<MaterialOutput>();
        let math = tree.add::<Math>();

        assert!(tree.link(&diffuse.bsdf_output(), &output.surface_input()).is_ok());
        assert!(matches!(
            tree.link(&math.value_output(), &output.surface_input()),
            Err(LinkError::IncompatibleSockets { .. })
        ));
        assert!(matches!(
            tree.link(&diffuse.bsdf_output(), &math.first_value_input()),
            Err(LinkError::IncompatibleSockets { .. })
        ));
    }

    #[test]
    fn test_relinking_an_input_replaces_the_link() {
        let mut tree = NodeTree::new("Tree");
        let a = tree.add::<Value>();
        let b = tree.add::<Value>();
        let math = tree.add::<Math>();

        tree.link(&a.value_output(), &math.second_value_input()).unwrap();
        tree.link(&b.value_output(), &math.second_value_input()).unwrap();

        let links: Vec<_> = tree.links().collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].from, b.id());
        assert_eq!(links[0].to_socket, 1);
    }

    #[test]
    fn test_default_value_type_is_checked() {
        let mut tree = NodeTree::new("Tree");
        let mix = tree.add::<MixRgb>();
        let fac = mix.mix_factor_input();
        tree.set_default_value(&fac, SocketValue::Float(0.25)).unwrap();
        assert_eq!(tree.default_value(&fac).unwrap(), Some(SocketValue::Float(0.25)));
        assert!(matches!(
            tree.set_default_value(&fac, SocketValue::Color([1.0; 4])),
            Err(GraphError::ValueTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_parenting_rules() {
        let mut tree = NodeTree::new("Frames");
        let outer = tree.add::<Frame>();
        let inner = tree.add::<Frame>();
        let other = tree.add::<Frame>();
        let value = tree.add::<Value>();

        tree.set_parent(inner.id(), outer.id()).unwrap();
        tree.set_parent(value.id(), inner.id()).unwrap();
        // Same parent again is a no-op
        tree.set_parent(value.id(), inner.id()).unwrap();
        assert_eq!(tree.children(inner.id()).unwrap(), &[value.id()]);

        assert!(matches!(
            tree.set_parent(value.id(), other.id()),
            Err(GraphError::AlreadyParented { .. })
        ));
        assert!(matches!(
            tree.set_parent(outer.id(), value.id()),
            Err(GraphError::ContainmentCycle { .. })
        ));
        assert!(matches!(
            tree.set_parent(outer.id(), outer.id()),
            Err(GraphError::ContainmentCycle { .. })
        ));
    }

    #[test]
    fn test_non_frame_parent_keeps_back_reference_only() {
        let mut tree = NodeTree::new("Tree");
        let math = tree.add::<Math>();
        let value = tree.add::<Value>();
        tree.set_parent(value.id(), math.id()).unwrap();
        assert_eq!(tree.parent(value.id()).unwrap(), Some(math.id()));
        assert!(tree.children(math.id()).unwrap().is_empty());
        assert!(!tree.is_frame(math.id()).unwrap());
    }

    #[test]
    fn test_sizing_guards_against_cycles() {
        let mut tree = NodeTree::new("Frames");
        let a = tree.add::<Frame>();
        let b = tree.add::<Frame>();
        tree.set_parent(b.id(), a.id()).unwrap();
        // Parenting refuses cycles, so corrupt the child list directly
        tree.entries[b.id().vertex().index()].children.push(a.id());

        assert!(matches!(
            tree.compute_width(a.id()),
            Err(LayoutError::ContainmentCycle(_))
        ));
        assert!(matches!(
            tree.compute_height(b.id()),
            Err(LayoutError::ContainmentCycle(_))
        ));
    }

    #[test]
    fn test_absolute_location_sums_parents() {
        let mut tree = NodeTree::new("Frames");
        let frame = tree.add::<Frame>();
        let value = tree.add::<Value>();
        tree.set_location(frame.id(), pos2(100.0, -50.0)).unwrap();
        tree.set_parent(value.id(), frame.id()).unwrap();
        tree.set_location(value.id(), pos2(50.0, 0.0)).unwrap();

        assert_eq!(tree.location(value.id()).unwrap(), pos2(50.0, 0.0));
        assert_eq!(tree.absolute_location(value.id()).unwrap(), pos2(150.0, -50.0));
    }

    #[test]
    fn test_frame_growth_is_idempotent() {
        let mut tree = NodeTree::new("Frames");
        let frame = tree.add::<Frame>();
        let child = tree.add::<Math>();
        tree.set_parent(child.id(), frame.id()).unwrap();
        tree.set_location(child.id(), pos2(50.0, 0.0)).unwrap();

        let first = tree.add::<Value>();
        let before = tree.set_position(first.id(), right_of(frame)).unwrap();

        tree.set_parent(child.id(), frame.id()).unwrap();
        let second = tree.add::<Value>();
        let after = tree.set_position(second.id(), right_of(frame)).unwrap();
        assert_eq!(before, after);
        assert_eq!(tree.children(frame.id()).unwrap().len(), 1);
    }

    fn build(tree: &mut NodeTree) {
        let value = tree.add::<Value>();
        tree.set_position(value.id(), location(0.0, 0.0)).unwrap();
        let frame = tree.add::<Frame>();
        tree.set_position(frame.id(), right_of(value).with_distance(50.0)).unwrap();
        let math = tree.add::<Math>();
        tree.set_parent(math.id(), frame.id()).unwrap();
        tree.set_location(math.id(), pos2(50.0, 0.0)).unwrap();
        let mix = tree.add::<MixRgb>();
        tree.set_position(mix.id(), right_of(frame).with_distance(50.0)).unwrap();
        tree.link(&value.value_output(), &math.first_value_input()).unwrap();
        tree.link(&math.value_output(), &mix.mix_factor_input()).unwrap();
    }

    fn snapshot(tree: &NodeTree) -> Vec<(String, [f32; 2], Vec<(u32, usize, u32, usize)>)> {
        let links: Vec<_> = tree
            .links()
            .map(|l| (l.from.vertex().0, l.from_socket, l.to.vertex().0, l.to_socket))
            .collect();
        tree.document()
            .vertices()
            .iter()
            .map(|v| {
                let loc = v.location();
                (v.type_tag().to_string(), [loc.x, loc.y], links.clone())
            })
            .collect()
    }

    #[test]
    fn test_construction_is_deterministic() {
        let mut first = NodeTree::new("Run");
        let mut second = NodeTree::new("Run");
        build(&mut first);
        build(&mut second);
        assert_ne!(first.id(), second.id());
        assert_eq!(snapshot(&first), snapshot(&second));
    }
}
