// SPDX-License-Identifier: MIT OR Apache-2.0
//! Reroutes, group boundaries and group references.

use crate::catalog;
use crate::error::GraphError;
use crate::group::Group;
use crate::node::{typed_node, TypedNode};
use crate::socket::Socket;
use crate::tree::NodeTree;
use std::borrow::Cow;

typed_node!(
    /// Reroute dot
    Reroute => catalog::REROUTE
);

impl Reroute {
    /// Incoming link
    pub fn input(self) -> Socket {
        self.input_by_index(0)
    }

    /// Outgoing link
    pub fn output(self) -> Socket {
        self.output_by_index(0)
    }
}

typed_node!(
    /// Inputs of the enclosing group, as outputs
    GroupInput => catalog::GROUP_INPUT
);

impl GroupInput {
    /// Declared group input `name`
    pub fn output(self, name: impl Into<Cow<'static, str>>) -> Socket {
        self.output_by_name(name)
    }
}

typed_node!(
    /// Outputs of the enclosing group, as inputs
    GroupOutput => catalog::GROUP_OUTPUT
);

impl GroupOutput {
    /// Declared group output `name`
    pub fn input(self, name: impl Into<Cow<'static, str>>) -> Socket {
        self.input_by_name(name)
    }
}

typed_node!(
    /// Instance of a reusable group
    GroupNode => catalog::GROUP
);

impl GroupNode {
    /// Reference `group` and expose its interface as sockets
    pub fn set_node_tree(self, tree: &mut NodeTree, group: &Group) -> Result<Self, GraphError> {
        tree.assign_subgraph(self.id(), group.tree().document())?;
        Ok(self)
    }

    /// Group input `name`
    pub fn input(self, name: impl Into<Cow<'static, str>>) -> Socket {
        self.input_by_name(name)
    }

    /// Group output `name`
    pub fn output(self, name: impl Into<Cow<'static, str>>) -> Socket {
        self.output_by_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::Value;
    use crate::position::below;

    #[test]
    fn test_reroute_sizes_like_a_plain_node() {
        let mut tree = NodeTree::new("Routing");
        let value = tree.add::<Value>();
        let reroute = tree.add::<Reroute>();
        tree.link(&value.value_output(), &reroute.input()).unwrap();

        assert_eq!(tree.compute_width(reroute.id()).unwrap(), 16.0);
        assert_eq!(tree.compute_height(reroute.id()).unwrap(), 70.0);

        let below_reroute = tree.add::<Value>();
        below_reroute
            .set_position(&mut tree, below(reroute).with_distance(50.0))
            .unwrap();
        assert_eq!(tree.location(below_reroute.id()).unwrap().y, -120.0);
    }

    #[test]
    fn test_group_cannot_reference_its_own_tree() {
        let mut group = Group::new("Self");
        let node = group.tree_mut().add::<GroupNode>();
        let document = group.tree().document().clone();
        assert!(matches!(
            group.tree_mut().assign_subgraph(node.id(), &document),
            Err(GraphError::RecursiveGroup(_))
        ));
    }

    #[test]
    fn test_group_cannot_reference_its_user() {
        let mut inner = Group::new("Inner");
        let mut outer = Group::new("Outer");
        let instance = outer.tree_mut().add::<GroupNode>();
        instance.set_node_tree(outer.tree_mut(), &inner).unwrap();

        let back = inner.tree_mut().add::<GroupNode>();
        assert!(matches!(
            back.set_node_tree(inner.tree_mut(), &outer),
            Err(GraphError::RecursiveGroup(_))
        ));
        let vertex = inner.tree().document().vertex(back.id().vertex()).unwrap();
        assert_eq!(vertex.subgraph(), None);
    }

    #[test]
    fn test_cloned_group_is_a_distinct_tree() {
        let group = Group::new("Original");
        let copy = group.clone();
        assert_ne!(copy.tree().id(), group.tree().id());

        let mut tree = NodeTree::new("User");
        let node = tree.add::<GroupNode>();
        node.set_node_tree(&mut tree, &group).unwrap();
        node.set_node_tree(&mut tree, &copy).unwrap();
    }
}
