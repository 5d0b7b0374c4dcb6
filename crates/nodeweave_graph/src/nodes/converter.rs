// SPDX-License-Identifier: MIT OR Apache-2.0
//! Math and vector/color converters.

use super::{set_default, set_enum, set_flag};
use crate::error::GraphError;
use crate::layout::{LayoutMetrics, NodeShape};
use crate::node::{typed_node, TypedNode};
use crate::socket::{Socket, SocketValue};
use crate::tree::NodeTree;

host_enum!(
    /// Operation of a math node
    MathOperation {
        /// a + b
        Add => "ADD",
        /// a - b
        Subtract => "SUBTRACT",
        /// a * b
        Multiply => "MULTIPLY",
        /// a / b
        Divide => "DIVIDE",
        /// sin(a)
        Sine => "SINE",
        /// cos(a)
        Cosine => "COSINE",
        /// tan(a)
        Tangent => "TANGENT",
        /// asin(a)
        Arcsine => "ARCSINE",
        /// acos(a)
        Arccosine => "ARCCOSINE",
        /// atan(a)
        Arctangent => "ARCTANGENT",
        /// a ^ b
        Power => "POWER",
        /// log of a in base b
        Logarithm => "LOGARITHM",
        /// min(a, b)
        Minimum => "MINIMUM",
        /// max(a, b)
        Maximum => "MAXIMUM",
        /// Nearest integer to a
        Round => "ROUND",
        /// 1 if a < b
        LessThan => "LESS_THAN",
        /// 1 if a > b
        GreaterThan => "GREATER_THAN",
        /// a mod b
        Modulo => "MODULO",
        /// |a|
        Absolute => "ABSOLUTE",
    }
);

typed_node!(
    /// Scalar operation on two operands
    Math => "ShaderNodeMath"
);

impl Math {
    /// Set the operation
    pub fn set_operation(self, tree: &mut NodeTree, operation: MathOperation) -> Result<Self, GraphError> {
        set_enum(tree, self.id(), "operation", operation.identifier())?;
        Ok(self)
    }

    /// Clamp the result to `[0, 1]`
    pub fn set_use_clamp(self, tree: &mut NodeTree, use_clamp: bool) -> Result<Self, GraphError> {
        set_flag(tree, self.id(), "use_clamp", use_clamp)?;
        Ok(self)
    }

    /// Set the first operand
    pub fn set_first_value(self, tree: &mut NodeTree, value: f32) -> Result<Self, GraphError> {
        set_default(tree, self.first_value_input(), SocketValue::Float(value))?;
        Ok(self)
    }

    /// Set the second operand
    pub fn set_second_value(self, tree: &mut NodeTree, value: f32) -> Result<Self, GraphError> {
        set_default(tree, self.second_value_input(), SocketValue::Float(value))?;
        Ok(self)
    }

    // Both operands are named "Value"; only the index tells them apart

    /// First operand
    pub fn first_value_input(self) -> Socket {
        self.input_by_index(0)
    }

    /// Second operand
    pub fn second_value_input(self) -> Socket {
        self.input_by_index(1)
    }

    /// Result
    pub fn value_output(self) -> Socket {
        self.output_by_name("Value")
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct MathShape;

impl NodeShape for MathShape {
    fn name(&self) -> &'static str {
        "Math"
    }

    // Operation and clamp rows, each followed by the block spacing
    fn buttons_y_space(&self, metrics: &LayoutMetrics) -> f32 {
        2.0 * (metrics.node_dy() + metrics.template_space())
    }
}

typed_node!(
    /// Split a color into channels
    SeparateRgb => "ShaderNodeSeparateRGB"
);

impl SeparateRgb {
    /// Color to split
    pub fn image_input(self) -> Socket {
        self.input_by_name("Image")
    }

    /// Red channel
    pub fn r_output(self) -> Socket {
        self.output_by_name("R")
    }

    /// Green channel
    pub fn g_output(self) -> Socket {
        self.output_by_name("G")
    }

    /// Blue channel
    pub fn b_output(self) -> Socket {
        self.output_by_name("B")
    }
}

typed_node!(
    /// Split a vector into components
    SeparateXyz => "ShaderNodeSeparateXYZ"
);

impl SeparateXyz {
    /// Vector to split
    pub fn vector_input(self) -> Socket {
        self.input_by_name("Vector")
    }

    /// X component
    pub fn x_output(self) -> Socket {
        self.output_by_name("X")
    }

    /// Y component
    pub fn y_output(self) -> Socket {
        self.output_by_name("Y")
    }

    /// Z component
    pub fn z_output(self) -> Socket {
        self.output_by_name("Z")
    }
}

typed_node!(
    /// Build a vector from components
    CombineXyz => "ShaderNodeCombineXYZ"
);

impl CombineXyz {
    /// X component
    pub fn x_input(self) -> Socket {
        self.input_by_name("X")
    }

    /// Y component
    pub fn y_input(self) -> Socket {
        self.input_by_name("Y")
    }

    /// Z component
    pub fn z_input(self) -> Socket {
        self.input_by_name("Z")
    }

    /// Combined vector
    pub fn vector_output(self) -> Socket {
        self.output_by_name("Vector")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PropertyValue;
    use crate::socket::SocketDirection;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_operands_resolve_by_index() {
        let mut tree = NodeTree::new("Math");
        let math = tree
            .add::<Math>()
            .set_operation(&mut tree, MathOperation::Power)
            .and_then(|m| m.set_second_value(&mut tree, 2.0))
            .unwrap();

        assert_eq!(tree.resolve_socket(&math.second_value_input()).unwrap().0, 1);
        assert_eq!(
            tree.default_value(&math.first_value_input()).unwrap(),
            Some(SocketValue::Float(0.5))
        );
        assert_eq!(
            tree.default_value(&math.second_value_input()).unwrap(),
            Some(SocketValue::Float(2.0))
        );
        assert_eq!(
            tree.property(math.id(), "operation").unwrap(),
            Some(&PropertyValue::Enum("POWER".to_string()))
        );
        // By name, only the first operand is reachable
        assert_eq!(tree.resolve_socket(&math.input_by_name("Value")).unwrap().0, 0);
    }

    #[test]
    fn test_math_height() {
        let mut tree = NodeTree::new("Math");
        let math = tree.add::<Math>();
        assert_eq!(MathShape.buttons_y_space(tree.metrics()), 50.0);
        assert!(approx(tree.compute_height(math.id()).unwrap(), 151.0));
    }

    #[test]
    fn test_separate_xyz_height() {
        let mut tree = NodeTree::new("Converters");
        let separate = tree.add::<SeparateXyz>();
        assert!(approx(tree.compute_height(separate.id()).unwrap(), 112.0));

        tree.document_mut()
            .vertex_mut(separate.id().vertex())
            .unwrap()
            .set_socket_hidden(SocketDirection::Output, &crate::socket::SocketSlot::Index(2), true);
        assert!(approx(tree.compute_height(separate.id()).unwrap(), 91.0));
    }

    #[test]
    fn test_swap_axes() {
        let mut tree = NodeTree::new("Converters");
        let separate = tree.add::<SeparateXyz>();
        let combine = tree.add::<CombineXyz>();
        tree.link(&separate.x_output(), &combine.z_input()).unwrap();
        tree.link(&separate.y_output(), &combine.y_input()).unwrap();
        tree.link(&separate.z_output(), &combine.x_input()).unwrap();

        let targets: Vec<_> = tree.links().map(|l| (l.from_socket, l.to_socket)).collect();
        assert_eq!(targets, vec![(0, 2), (1, 1), (2, 0)]);
    }
}
