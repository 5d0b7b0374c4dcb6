// SPDX-License-Identifier: MIT OR Apache-2.0
//! Procedural shader node-tree construction with render-free auto layout.
//!
//! This crate builds node trees the way a user would in a shader editor,
//! but from code:
//! - Typed nodes with named socket accessors
//! - Links validated against the tree they are made in
//! - Frames sized from the bounding box of their children
//! - Reusable groups with a published interface
//!
//! ## Layout
//!
//! The host only knows how big a node is once it has drawn it. Placement
//! here happens during construction instead: every [`Position`] is resolved
//! against sizes predicted by replaying the host's drawing arithmetic
//! ([`layout`]), so nodes can be laid out next to and below each other as
//! they are created.
//!
//! ```ignore
//! let mut tree = NodeTree::new("Material");
//! let noise = tree.add::<NoiseTexture>().set_location(&mut tree, pos2(0.0, 0.0))?;
//! let mix = tree
//!     .add::<MixRgb>()
//!     .set_position(&mut tree, right_of(noise).with_distance(50.0))?;
//! tree.link(&noise.color_output(), &mix.first_color_input())?;
//! ```

pub mod catalog;
pub mod document;
pub mod error;
pub mod group;
pub mod layout;
pub mod node;
pub mod nodes;
pub mod position;
pub mod registry;
pub mod socket;
pub mod tree;

pub use document::{Document, DocumentId, Vertex, VertexId};
pub use error::{ConfigError, GraphError, LayoutError, LinkError};
pub use group::Group;
pub use layout::{LayoutMetrics, NodeShape, Sizer};
pub use node::{NodeId, TypedNode};
pub use position::{below, location, right_of, Position};
pub use registry::{GenericNode, NodeRegistry};
pub use socket::{Socket, SocketDirection, SocketSlot, SocketType, SocketValue};
pub use tree::{Link, NodeTree};

pub use egui::{pos2, vec2, Pos2, Vec2};
