#![forbid(unsafe_code)]

//! Core: the read-only view-tree capability the inspector consumes, geometry,
//! and an in-memory registry implementing it.

pub mod arena;
pub mod error;
pub mod geometry;
pub mod node;

pub use arena::{ViewArena, ViewSpec};
pub use error::TreeError;
pub use geometry::Rect;
pub use node::{NodeAttributes, NodeId, ViewTree};
