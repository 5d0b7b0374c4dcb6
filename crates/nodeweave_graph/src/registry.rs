// SPDX-License-Identifier: MIT OR Apache-2.0
//! Registry mapping host type tags to layout variants.

use crate::layout::NodeShape;
use crate::nodes;
use indexmap::IndexMap;
use std::sync::Arc;

/// Layout of a node type the registry has no entry for
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericNode;

impl NodeShape for GenericNode {
    fn name(&self) -> &'static str {
        "Node"
    }
}

/// Registry of node variants by host type tag
pub struct NodeRegistry {
    /// Registered variants by tag
    shapes: IndexMap<String, Arc<dyn NodeShape>>,
    /// Used for every unregistered tag
    fallback: Arc<dyn NodeShape>,
}

impl NodeRegistry {
    /// Create a registry with no variants
    pub fn new() -> Self {
        Self {
            shapes: IndexMap::new(),
            fallback: Arc::new(GenericNode),
        }
    }

    /// Create a registry with every built-in shader variant
    pub fn shader() -> Self {
        let mut registry = Self::new();
        nodes::register_builtin(&mut registry);
        registry
    }

    /// Register (or replace) the variant for a tag
    pub fn register(&mut self, type_tag: impl Into<String>, shape: impl NodeShape + 'static) {
        self.shapes.insert(type_tag.into(), Arc::new(shape));
    }

    /// Get the variant registered for a tag
    pub fn get(&self, type_tag: &str) -> Option<&Arc<dyn NodeShape>> {
        self.shapes.get(type_tag)
    }

    /// Variant for a tag, falling back to the generic node
    pub fn resolve(&self, type_tag: &str) -> Arc<dyn NodeShape> {
        self.get(type_tag).unwrap_or(&self.fallback).clone()
    }

    /// Whether a tag has its own variant
    pub fn is_registered(&self, type_tag: &str) -> bool {
        self.shapes.contains_key(type_tag)
    }

    /// Registered tags, in registration order
    pub fn type_tags(&self) -> impl Iterator<Item = &str> {
        self.shapes.keys().map(String::as_str)
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NodeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRegistry")
            .field("types", &self.shapes.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Tall;

    impl NodeShape for Tall {
        fn name(&self) -> &'static str {
            "Tall"
        }

        fn buttons_y_space(&self, metrics: &crate::layout::LayoutMetrics) -> f32 {
            10.0 * metrics.node_dy()
        }
    }

    #[test]
    fn test_unknown_tag_resolves_to_generic() {
        let registry = NodeRegistry::shader();
        assert!(!registry.is_registered("ShaderNodeBsdfDiffuse"));
        assert_eq!(registry.resolve("ShaderNodeBsdfDiffuse").name(), "Node");
        assert_eq!(registry.resolve("ShaderNodeMixRGB").name(), "MixRgb");
    }

    #[test]
    fn test_builtin_variants() {
        let registry = NodeRegistry::shader();
        let tags: Vec<_> = registry.type_tags().collect();
        assert!(tags.contains(&"NodeFrame"));
        assert!(tags.contains(&"NodeGroupOutput"));
        assert!(tags.contains(&"ShaderNodeValToRGB"));
        assert!(registry.resolve("NodeFrame").contains_children());
        assert!(!registry.resolve("ShaderNodeMath").contains_children());
    }

    #[test]
    fn test_custom_registration() {
        let mut registry = NodeRegistry::new();
        registry.register("CustomTall", Tall);
        assert!(registry.is_registered("CustomTall"));
        assert_eq!(registry.resolve("CustomTall").name(), "Tall");
        assert_eq!(registry.resolve("ShaderNodeMixRGB").name(), "Node");
    }
}
