// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host document substrate.
//!
//! A [`Document`] stands in for the host application's node-tree datablock.
//! It allocates vertices of a host type, stores their geometry, sockets and
//! properties, records links, and holds the published interface of a
//! reusable group. The engine in [`crate::tree`] drives it; callers read it
//! and may tweak display state (widths, hidden sockets, collapsed flag) the
//! way a user would in the host editor.

use crate::catalog;
use crate::socket::{SocketDirection, SocketSlot, SocketType, SocketValue};
use egui::{pos2, vec2, Pos2, Vec2};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    /// Create a new random document ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Index of a vertex inside its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u32);

impl VertexId {
    /// Position in the document's vertex list
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A socket as stored by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocketRecord {
    /// Socket name (not necessarily unique on a node)
    pub name: String,
    /// Data type
    pub socket_type: SocketType,
    /// Default value used when unlinked
    pub default_value: Option<SocketValue>,
    /// Hidden by the user
    pub hidden: bool,
}

impl SocketRecord {
    /// Create a visible socket without a default
    pub fn new(name: impl Into<String>, socket_type: SocketType) -> Self {
        Self {
            name: name.into(),
            socket_type,
            default_value: None,
            hidden: false,
        }
    }

    /// Set the default value
    pub fn with_default(mut self, value: SocketValue) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// One stop of a color ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Position in `[0, 1]`
    pub position: f32,
    /// RGBA color
    pub color: [f32; 4],
}

/// Color ramp element list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRampData {
    /// Stops in insertion order
    pub stops: Vec<ColorStop>,
    /// Number of stops written by the caller
    pub edits: usize,
}

/// One control point of a curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Point location
    pub location: [f32; 2],
    /// Host handle identifier
    pub handle_type: String,
}

/// Combined curve of an RGB curve mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveData {
    /// Control points in insertion order
    pub points: Vec<CurvePoint>,
    /// Number of points written by the caller
    pub edits: usize,
}

/// Node property stored by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// Boolean flag
    Bool(bool),
    /// Scalar
    Float(f32),
    /// Enum identifier
    Enum(String),
    /// Color ramp elements
    ColorRamp(ColorRampData),
    /// Curve mapping
    Curve(CurveData),
}

/// A vertex of the host graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub(crate) id: VertexId,
    pub(crate) type_tag: String,
    pub(crate) name: String,
    pub(crate) label: String,
    pub(crate) location: [f32; 2],
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) collapsed: bool,
    pub(crate) show_options: bool,
    pub(crate) show_preview: bool,
    pub(crate) inputs: Vec<SocketRecord>,
    pub(crate) outputs: Vec<SocketRecord>,
    pub(crate) parent: Option<VertexId>,
    pub(crate) properties: IndexMap<String, PropertyValue>,
    pub(crate) subgraph: Option<DocumentId>,
}

impl Vertex {
    /// Vertex ID
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Host type tag
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Unique name inside the document
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Location (local to the parent frame, if any)
    pub fn location(&self) -> Pos2 {
        pos2(self.location[0], self.location[1])
    }

    /// Stored width and height
    pub fn size(&self) -> Vec2 {
        vec2(self.width, self.height)
    }

    /// Whether the node is drawn collapsed
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Whether the options area is shown
    pub fn shows_options(&self) -> bool {
        self.show_options
    }

    /// Whether the preview area is shown
    pub fn shows_preview(&self) -> bool {
        self.show_preview
    }

    /// Input sockets
    pub fn inputs(&self) -> &[SocketRecord] {
        &self.inputs
    }

    /// Output sockets
    pub fn outputs(&self) -> &[SocketRecord] {
        &self.outputs
    }

    /// Sockets on one side
    pub fn sockets(&self, direction: SocketDirection) -> &[SocketRecord] {
        match direction {
            SocketDirection::Input => &self.inputs,
            SocketDirection::Output => &self.outputs,
        }
    }

    /// Number of sockets on one side that are drawn
    pub fn visible_sockets(&self, direction: SocketDirection) -> usize {
        self.sockets(direction).iter().filter(|s| !s.hidden).count()
    }

    /// Resolve a slot to its index and record
    pub fn socket(&self, direction: SocketDirection, slot: &SocketSlot) -> Option<(usize, &SocketRecord)> {
        let sockets = self.sockets(direction);
        match slot {
            SocketSlot::Name(name) => sockets.iter().enumerate().find(|(_, s)| s.name == *name),
            SocketSlot::Index(index) => sockets.get(*index).map(|s| (*index, s)),
        }
    }

    /// Parent vertex
    pub fn parent(&self) -> Option<VertexId> {
        self.parent
    }

    /// Named property
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Referenced subgraph, for group reference vertices
    pub fn subgraph(&self) -> Option<DocumentId> {
        self.subgraph
    }

    /// Set the stored width
    pub fn set_width(&mut self, width: f32) -> &mut Self {
        self.width = width;
        self
    }

    /// Set the stored height
    pub fn set_height(&mut self, height: f32) -> &mut Self {
        self.height = height;
        self
    }

    /// Collapse or expand the node
    pub fn set_collapsed(&mut self, collapsed: bool) -> &mut Self {
        self.collapsed = collapsed;
        self
    }

    /// Show or hide the options area
    pub fn set_show_options(&mut self, show: bool) -> &mut Self {
        self.show_options = show;
        self
    }

    /// Show or hide the preview area
    pub fn set_show_preview(&mut self, show: bool) -> &mut Self {
        self.show_preview = show;
        self
    }

    /// Hide or reveal a socket; returns false if the slot does not resolve
    pub fn set_socket_hidden(&mut self, direction: SocketDirection, slot: &SocketSlot, hidden: bool) -> bool {
        let Some((index, _)) = self.socket(direction, slot) else {
            return false;
        };
        let sockets = match direction {
            SocketDirection::Input => &mut self.inputs,
            SocketDirection::Output => &mut self.outputs,
        };
        sockets[index].hidden = hidden;
        true
    }
}

/// A link between an output and an input, by socket index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Source vertex
    pub from: VertexId,
    /// Output index on the source
    pub from_socket: usize,
    /// Target vertex
    pub to: VertexId,
    /// Input index on the target
    pub to_socket: usize,
}

/// A declared group socket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceSocket {
    /// Socket name
    pub name: String,
    /// Data type
    pub socket_type: SocketType,
    /// Default value
    pub default_value: SocketValue,
}

impl InterfaceSocket {
    fn record(&self) -> SocketRecord {
        SocketRecord::new(self.name.clone(), self.socket_type).with_default(self.default_value)
    }
}

/// Published inputs and outputs of a document used as a group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    /// Declared inputs, in declaration order
    pub inputs: IndexMap<String, InterfaceSocket>,
    /// Declared outputs, in declaration order
    pub outputs: IndexMap<String, InterfaceSocket>,
}

impl Interface {
    /// Declared sockets on one side
    pub fn sockets(&self, direction: SocketDirection) -> &IndexMap<String, InterfaceSocket> {
        match direction {
            SocketDirection::Input => &self.inputs,
            SocketDirection::Output => &self.outputs,
        }
    }
}

/// A host node-tree document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    name: String,
    vertices: Vec<Vertex>,
    links: Vec<LinkRecord>,
    interface: Interface,
    /// Documents reachable through group references, direct or nested
    #[serde(default)]
    references: IndexSet<DocumentId>,
}

impl Document {
    /// Create an empty document
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: DocumentId::new(),
            name: name.into(),
            vertices: Vec::new(),
            links: Vec::new(),
            interface: Interface::default(),
            references: IndexSet::new(),
        }
    }

    /// Document ID
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Give the document a new identity, as a copy of it is a new datablock
    pub(crate) fn renew_id(&mut self) {
        self.id = DocumentId::new();
    }

    /// Whether a group reference inside this document leads to `id`
    pub fn references(&self, id: DocumentId) -> bool {
        self.references.contains(&id)
    }

    /// Document name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All vertices in allocation order
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Get a vertex
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    /// Get a mutable vertex
    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.get_mut(id.index())
    }

    /// All links
    pub fn links(&self) -> &[LinkRecord] {
        &self.links
    }

    /// Published interface
    pub fn interface(&self) -> &Interface {
        &self.interface
    }

    /// Export the document as pretty RON
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Allocate a new vertex of a host type
    pub(crate) fn allocate(&mut self, type_tag: &str) -> VertexId {
        let template = catalog::template(type_tag);
        let id = VertexId(self.vertices.len() as u32);
        let name = self.unique_name(template.display_name, None);

        let mut vertex = Vertex {
            id,
            type_tag: type_tag.to_string(),
            name,
            label: String::new(),
            location: [0.0, 0.0],
            width: template.width,
            height: template.height,
            collapsed: false,
            show_options: true,
            show_preview: false,
            inputs: template.inputs,
            outputs: template.outputs,
            parent: None,
            properties: template
                .properties
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
            subgraph: None,
        };

        // Boundary vertices mirror the interface declared so far
        match type_tag {
            catalog::GROUP_INPUT => {
                vertex.outputs = self.interface.inputs.values().map(InterfaceSocket::record).collect();
            }
            catalog::GROUP_OUTPUT => {
                vertex.inputs = self.interface.outputs.values().map(InterfaceSocket::record).collect();
            }
            _ => {}
        }

        self.vertices.push(vertex);
        id
    }

    /// Rename a vertex, keeping names unique
    pub(crate) fn rename(&mut self, id: VertexId, name: &str) -> Option<&str> {
        let unique = self.unique_name(name, Some(id));
        let vertex = self.vertices.get_mut(id.index())?;
        vertex.name = unique;
        Some(&vertex.name)
    }

    fn unique_name(&self, base: &str, exclude: Option<VertexId>) -> String {
        let taken = |candidate: &str| {
            self.vertices
                .iter()
                .any(|v| Some(v.id) != exclude && v.name == candidate)
        };
        if !taken(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{base}.{n:03}"))
            .find(|candidate| !taken(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    /// Connect output `from_socket` of `from` to input `to_socket` of `to`.
    ///
    /// An input holds a single link: an existing link into the same input
    /// is replaced and returned.
    pub(crate) fn connect(
        &mut self,
        from: VertexId,
        from_socket: usize,
        to: VertexId,
        to_socket: usize,
    ) -> Option<LinkRecord> {
        let link = LinkRecord {
            from,
            from_socket,
            to,
            to_socket,
        };
        let existing = self
            .links
            .iter()
            .position(|l| l.to == to && l.to_socket == to_socket);
        match existing {
            Some(index) => Some(std::mem::replace(&mut self.links[index], link)),
            None => {
                self.links.push(link);
                None
            }
        }
    }

    /// Declare a group socket; returns false if the name is taken.
    ///
    /// Existing boundary vertices receive the new socket immediately.
    pub(crate) fn declare(&mut self, direction: SocketDirection, socket: InterfaceSocket) -> bool {
        let declared = match direction {
            SocketDirection::Input => &mut self.interface.inputs,
            SocketDirection::Output => &mut self.interface.outputs,
        };
        if declared.contains_key(&socket.name) {
            return false;
        }

        let record = socket.record();
        declared.insert(socket.name.clone(), socket);

        let (boundary_tag, side) = match direction {
            SocketDirection::Input => (catalog::GROUP_INPUT, SocketDirection::Output),
            SocketDirection::Output => (catalog::GROUP_OUTPUT, SocketDirection::Input),
        };
        for vertex in self.vertices.iter_mut().filter(|v| v.type_tag == boundary_tag) {
            match side {
                SocketDirection::Input => vertex.inputs.push(record.clone()),
                SocketDirection::Output => vertex.outputs.push(record.clone()),
            }
        }
        true
    }

    /// Point a group reference vertex at `subgraph` and copy its interface.
    ///
    /// Links into sockets that no longer exist are dropped.
    pub(crate) fn assign_subgraph(&mut self, id: VertexId, subgraph: &Document) -> bool {
        let Some(vertex) = self.vertices.get_mut(id.index()) else {
            return false;
        };
        vertex.subgraph = Some(subgraph.id);
        self.references.insert(subgraph.id);
        self.references.extend(subgraph.references.iter().copied());
        vertex.inputs = subgraph.interface.inputs.values().map(InterfaceSocket::record).collect();
        vertex.outputs = subgraph.interface.outputs.values().map(InterfaceSocket::record).collect();

        let (input_count, output_count) = (vertex.inputs.len(), vertex.outputs.len());
        self.links.retain(|l| {
            !(l.to == id && l.to_socket >= input_count) && !(l.from == id && l.from_socket >= output_count)
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_made_unique() {
        let mut doc = Document::new("Test");
        let a = doc.allocate("ShaderNodeMath");
        let b = doc.allocate("ShaderNodeMath");
        let c = doc.allocate("ShaderNodeMath");
        assert_eq!(doc.vertex(a).unwrap().name(), "Math");
        assert_eq!(doc.vertex(b).unwrap().name(), "Math.001");
        assert_eq!(doc.vertex(c).unwrap().name(), "Math.002");

        assert_eq!(doc.rename(c, "Math"), Some("Math.002"));
        assert_eq!(doc.rename(a, "Math"), Some("Math"));
    }

    #[test]
    fn test_connect_replaces_link_into_same_input() {
        let mut doc = Document::new("Test");
        let a = doc.allocate("ShaderNodeValue");
        let b = doc.allocate("ShaderNodeValue");
        let math = doc.allocate("ShaderNodeMath");

        assert_eq!(doc.connect(a, 0, math, 0), None);
        let replaced = doc.connect(b, 0, math, 0);
        assert_eq!(replaced.map(|l| l.from), Some(a));
        assert_eq!(doc.links().len(), 1);
        assert_eq!(doc.links()[0].from, b);
    }

    #[test]
    fn test_declare_updates_boundary_vertices() {
        let mut doc = Document::new("Group");
        let input = doc.allocate(catalog::GROUP_INPUT);
        assert!(doc.declare(
            SocketDirection::Input,
            InterfaceSocket {
                name: "Scale".to_string(),
                socket_type: SocketType::Float,
                default_value: SocketValue::Float(2.0),
            },
        ));
        let output = doc.allocate(catalog::GROUP_OUTPUT);

        assert_eq!(doc.vertex(input).unwrap().outputs().len(), 1);
        assert_eq!(doc.vertex(input).unwrap().outputs()[0].name, "Scale");
        assert!(doc.vertex(output).unwrap().inputs().is_empty());

        assert!(!doc.declare(
            SocketDirection::Input,
            InterfaceSocket {
                name: "Scale".to_string(),
                socket_type: SocketType::Float,
                default_value: SocketValue::Float(1.0),
            },
        ));
    }

    #[test]
    fn test_hidden_sockets_are_not_visible() {
        let mut doc = Document::new("Test");
        let coords = doc.allocate("ShaderNodeTexCoord");
        let vertex = doc.vertex_mut(coords).unwrap();
        assert_eq!(vertex.visible_sockets(SocketDirection::Output), 7);
        assert!(vertex.set_socket_hidden(SocketDirection::Output, &SocketSlot::Name("UV".into()), true));
        assert!(!vertex.set_socket_hidden(SocketDirection::Output, &SocketSlot::Index(42), true));
        assert_eq!(vertex.visible_sockets(SocketDirection::Output), 6);
    }

    #[test]
    fn test_ron_export() {
        let mut doc = Document::new("Export");
        doc.allocate("ShaderNodeMixRGB");
        let ron = doc.to_ron().unwrap();
        assert!(ron.contains("ShaderNodeMixRGB"));
        assert!(ron.contains("blend_type"));
    }
}
