#![forbid(unsafe_code)]

//! Registry errors.

use crate::node::NodeId;

/// Errors raised when mutating a [`ViewArena`](crate::ViewArena).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The handle was not minted by this arena.
    UnknownNode(NodeId),
    /// The arena cannot hold more than `u32::MAX` views.
    CapacityExceeded,
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "unknown view {id}"),
            Self::CapacityExceeded => write!(f, "view arena is full"),
        }
    }
}

impl std::error::Error for TreeError {}
