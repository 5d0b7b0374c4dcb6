// SPDX-License-Identifier: MIT OR Apache-2.0
//! Procedural wood texture built from node groups.
//!
//! Each anatomical feature of wood is a reusable [`Group`]: the grain base,
//! support fibres, axial parenchyma, vessels and rays. The
//! [`DiffuseColorBuilder`] instantiates them in a material tree and mixes
//! their masks into one diffuse color.
//!
//! ```ignore
//! let (tree, diffuse) = wood_material("Oak")?;
//! println!("{}", tree.to_ron()?);
//! ```

pub mod fibres;
pub mod grain;
pub mod material;
pub mod rays;

pub use fibres::{AxialParenchyma, LongGrainVessels, SupportFibres};
pub use grain::GrainPattern;
pub use material::{wood_material, DiffuseColor, DiffuseColorBuilder};
pub use rays::{Angle, Rays};

use nodeweave_graph::{GraphError, Group, LayoutError, LinkError};
use thiserror::Error;

/// Gap between neighbouring nodes
pub(crate) const SPACING: f32 = 50.0;

/// Name of the vector input every texture group takes
pub const TEXTURE_COORDINATES: &str = "Texture coordinates";

/// Error raised while building a wood group or material
#[derive(Debug, Error)]
pub enum WoodError {
    /// Node or interface edit failed
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Link was refused
    #[error(transparent)]
    Link(#[from] LinkError),
    /// Placement could not be resolved
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Recipe for one reusable group
pub trait GroupBuilder {
    /// Name given to the built group
    fn name(&self) -> &str;

    /// Build a fresh group with its interface and body
    fn build(&self) -> Result<Group, WoodError>;
}

#[cfg(test)]
pub(crate) fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
