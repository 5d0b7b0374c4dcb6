// SPDX-License-Identifier: MIT OR Apache-2.0
//! Reusable groups.
//!
//! A [`Group`] is a node tree with a published interface. Its
//! [`GroupInput`](crate::nodes::GroupInput) and
//! [`GroupOutput`](crate::nodes::GroupOutput) nodes expose the declared
//! sockets, and a [`GroupNode`](crate::nodes::GroupNode) in another tree
//! instantiates it as a single node.

use crate::document::{DocumentId, InterfaceSocket};
use crate::error::GraphError;
use crate::socket::{SocketDirection, SocketType, SocketValue};
use crate::tree::NodeTree;

/// A node tree with declared inputs and outputs
#[derive(Debug, Clone)]
pub struct Group {
    tree: NodeTree,
}

impl Group {
    /// Create an empty group
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_tree(NodeTree::new(name))
    }

    /// Publish an interface on an existing tree
    pub fn from_tree(tree: NodeTree) -> Self {
        Self { tree }
    }

    /// Group ID
    pub fn id(&self) -> DocumentId {
        self.tree.id()
    }

    /// Group name
    pub fn name(&self) -> &str {
        self.tree.name()
    }

    /// Inner tree
    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    /// Inner tree, for building the group body
    pub fn tree_mut(&mut self) -> &mut NodeTree {
        &mut self.tree
    }

    fn declare(
        &mut self,
        direction: SocketDirection,
        name: &str,
        socket_type: SocketType,
        default_value: SocketValue,
    ) -> Result<&mut Self, GraphError> {
        if default_value.socket_type() != socket_type {
            return Err(GraphError::ValueTypeMismatch {
                expected: socket_type,
                got: default_value.socket_type(),
            });
        }

        let socket = InterfaceSocket {
            name: name.to_string(),
            socket_type,
            default_value,
        };
        if !self.tree.document_mut().declare(direction, socket) {
            return Err(GraphError::DuplicateInterfaceSocket {
                direction,
                name: name.to_string(),
            });
        }
        tracing::debug!(group = self.name(), %direction, name, socket_type = socket_type.identifier(), "declared group socket");
        Ok(self)
    }

    /// Declare an input
    pub fn declare_input(
        &mut self,
        name: &str,
        socket_type: SocketType,
        default_value: SocketValue,
    ) -> Result<&mut Self, GraphError> {
        self.declare(SocketDirection::Input, name, socket_type, default_value)
    }

    /// Declare an output
    pub fn declare_output(
        &mut self,
        name: &str,
        socket_type: SocketType,
        default_value: SocketValue,
    ) -> Result<&mut Self, GraphError> {
        self.declare(SocketDirection::Output, name, socket_type, default_value)
    }

    /// Declare a scalar input
    pub fn set_float_input(&mut self, name: &str, value: f32) -> Result<&mut Self, GraphError> {
        self.declare_input(name, SocketType::Float, SocketValue::Float(value))
    }

    /// Declare a vector input
    pub fn set_vector_input(&mut self, name: &str, value: [f32; 3]) -> Result<&mut Self, GraphError> {
        self.declare_input(name, SocketType::Vector, SocketValue::Vector(value))
    }

    /// Declare a color input
    pub fn set_color_input(&mut self, name: &str, value: [f32; 4]) -> Result<&mut Self, GraphError> {
        self.declare_input(name, SocketType::Color, SocketValue::Color(value))
    }

    /// Declare a scalar output
    pub fn set_float_output(&mut self, name: &str, value: f32) -> Result<&mut Self, GraphError> {
        self.declare_output(name, SocketType::Float, SocketValue::Float(value))
    }

    /// Declare a vector output
    pub fn set_vector_output(&mut self, name: &str, value: [f32; 3]) -> Result<&mut Self, GraphError> {
        self.declare_output(name, SocketType::Vector, SocketValue::Vector(value))
    }

    /// Declare a color output
    pub fn set_color_output(&mut self, name: &str, value: [f32; 4]) -> Result<&mut Self, GraphError> {
        self.declare_output(name, SocketType::Color, SocketValue::Color(value))
    }

    /// Declared inputs, in declaration order
    pub fn inputs(&self) -> impl Iterator<Item = &InterfaceSocket> {
        self.tree.document().interface().inputs.values()
    }

    /// Declared outputs, in declaration order
    pub fn outputs(&self) -> impl Iterator<Item = &InterfaceSocket> {
        self.tree.document().interface().outputs.values()
    }

    /// Declared input by name
    pub fn interface_input(&self, name: &str) -> Option<&InterfaceSocket> {
        self.tree.document().interface().inputs.get(name)
    }

    /// Declared output by name
    pub fn interface_output(&self, name: &str) -> Option<&InterfaceSocket> {
        self.tree.document().interface().outputs.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::TypedNode;
    use crate::nodes::{GroupInput, GroupNode, GroupOutput, MixRgb, Value};
    use crate::position::right_of;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn tinted() -> Group {
        let mut group = Group::new("Tinted");
        group
            .set_float_input("Amount", 0.25)
            .and_then(|g| g.set_color_input("Tint", [0.8, 0.2, 0.1, 1.0]))
            .and_then(|g| g.set_color_output("Color", [0.0; 4]))
            .unwrap();

        let tree = group.tree_mut();
        let input = tree.add::<GroupInput>();
        let mix = tree.add::<MixRgb>();
        mix.set_position(tree, right_of(input).with_distance(50.0)).unwrap();
        let output = tree.add::<GroupOutput>();
        output.set_position(tree, right_of(mix).with_distance(50.0)).unwrap();

        tree.link(&input.output("Amount"), &mix.mix_factor_input()).unwrap();
        tree.link(&input.output("Tint"), &mix.second_color_input()).unwrap();
        tree.link(&mix.color_output(), &output.input("Color")).unwrap();
        group
    }

    #[test]
    fn test_boundaries_expose_interface() {
        let group = tinted();
        let tree = group.tree();
        let input = tree.nodes().find(|n| tree.type_tag(*n) == Ok(crate::catalog::GROUP_INPUT));
        let input = input.unwrap();
        assert_eq!(
            tree.socket_names(input, SocketDirection::Output).unwrap(),
            vec!["Amount", "Tint"]
        );
        assert_eq!(tree.links().count(), 3);
    }

    #[test]
    fn test_duplicate_and_mismatched_declarations() {
        let mut group = tinted();
        assert!(matches!(
            group.set_float_input("Amount", 1.0),
            Err(GraphError::DuplicateInterfaceSocket { .. })
        ));
        // Same name on the other side is fine
        assert!(group.set_float_output("Amount", 1.0).is_ok());
        assert!(matches!(
            group.declare_input("Closure", SocketType::Shader, SocketValue::Float(0.0)),
            Err(GraphError::ValueTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_group_round_trip() {
        let group = tinted();
        let mut material = NodeTree::new("Material");
        let instance = material
            .add::<GroupNode>()
            .set_node_tree(&mut material, &group)
            .unwrap();

        assert_eq!(
            material.socket_names(instance.id(), SocketDirection::Input).unwrap(),
            vec!["Amount", "Tint"]
        );
        assert_eq!(
            material.socket_names(instance.id(), SocketDirection::Output).unwrap(),
            vec!["Color"]
        );
        for declared in group.inputs() {
            let socket = instance.input(declared.name.clone());
            assert_eq!(
                material.default_value(&socket).unwrap(),
                Some(declared.default_value)
            );
        }

        let value = material.add::<Value>();
        let link = material.link(&value.value_output(), &instance.input("Amount")).unwrap();
        assert_eq!(link.to_socket, 0);

        // header, padding, one output, tree selector, two inputs
        assert!(approx(material.compute_height(instance.id()).unwrap(), 121.0));
    }

    #[test]
    fn test_collapsed_group_node_grows_with_sockets() {
        let mut wide = Group::new("Wide");
        wide.set_float_input("A", 0.0)
            .and_then(|g| g.set_float_input("B", 0.0))
            .unwrap();
        for name in ["O1", "O2", "O3", "O4", "O5", "O6"] {
            wide.set_float_output(name, 0.0).unwrap();
        }
        let mut narrow = Group::new("Narrow");
        narrow
            .set_float_input("A", 0.0)
            .and_then(|g| g.set_float_input("B", 0.0))
            .and_then(|g| g.set_float_output("O1", 0.0))
            .and_then(|g| g.set_float_output("O2", 0.0))
            .unwrap();

        let mut tree = NodeTree::new("Material");
        let mut collapsed = |group: &Group| {
            let node = tree.add::<GroupNode>().set_node_tree(&mut tree, group).unwrap();
            tree.document_mut()
                .vertex_mut(node.id().vertex())
                .unwrap()
                .set_collapsed(true);
            tree.compute_height(node.id()).unwrap()
        };
        let wide_height = collapsed(&wide);
        let narrow_height = collapsed(&narrow);

        assert!(wide_height > narrow_height);
        assert!(approx(wide_height, 35.0));
        assert!(approx(narrow_height, 25.0));
    }
}
