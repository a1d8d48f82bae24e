//! Core identity types for graph nodes and dependencies.
//!
//! This module defines the handles used throughout the graph: node identifiers and
//! the ordered ancestor → dependent pairs that make up the edge set.

use std::fmt;

/// Opaque node identifier.
///
/// A `NodeId` is a stable handle into one [`crate::TopoGraph`]. It stays valid while other
/// nodes are added or removed; once its own node is removed (directly or through
/// [`crate::TopoGraph::clear`]) the id is stale and every lookup through it returns `None`.
/// Ids are never reused. They are ordered by insertion, which is also the tie-break used by
/// [`crate::TopoGraph::sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in insertion order (including removed slots).
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single precedence constraint: `ancestor` must be processed before `dependent`.
///
/// Dependencies are created only through [`crate::TopoGraph::add_dependency`], so both ends
/// always refer to nodes of the graph that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dependency {
    pub(crate) ancestor: NodeId,
    pub(crate) dependent: NodeId,
}

impl Dependency {
    pub(crate) fn new(ancestor: NodeId, dependent: NodeId) -> Self {
        Self {
            ancestor,
            dependent,
        }
    }

    /// The node that must come first.
    pub fn ancestor(&self) -> NodeId {
        self.ancestor
    }

    /// The node that waits on [`Dependency::ancestor`].
    pub fn dependent(&self) -> NodeId {
        self.dependent
    }

    /// True if `node` is either end of this dependency.
    pub fn touches(&self, node: NodeId) -> bool {
        self.ancestor == node || self.dependent == node
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.ancestor, self.dependent)
    }
}
