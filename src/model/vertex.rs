//! Vertex module for phylogenetic tree representation.

use crate::model::tree::VertexIndex;
use std::fmt;
use std::ops::Deref;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a phylogenetic tree.
///
/// A vertex can be either:
/// - **Root**: Has no parent and no branch length; any number of children
/// - **Internal**: Has a parent and at least one child; might have a branch length
/// - **Leaf**: Has a parent and no children; might have a branch length
///
/// Every vertex may carry a label (taxon name for leaves, clade name or
/// support value for internal vertices and root).
///
/// # Invariants
/// - `index` is the position of the vertex in the tree arena
/// - `parent` is `None` only during construction
#[derive(PartialEq, Debug, Clone)]
pub enum Vertex {
    /// Root vertex of the tree
    Root {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Indices of the child vertices, in order
        children: Vec<VertexIndex>,
        /// Optional label
        label: Option<String>,
    },
    /// Internal vertex
    Internal {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex
        parent: Option<VertexIndex>,
        /// Indices of the child vertices, in order
        children: Vec<VertexIndex>,
        /// Optional label
        label: Option<String>,
        /// Distance to parent vertex
        branch_length: Option<BranchLength>,
    },
    /// Leaf vertex
    Leaf {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex
        parent: Option<VertexIndex>,
        /// Optional label
        label: Option<String>,
        /// Distance to parent vertex
        branch_length: Option<BranchLength>,
    },
}

impl Vertex {
    /// Creates a new root vertex.
    pub fn new_root(index: VertexIndex, children: Vec<VertexIndex>, label: Option<String>) -> Self {
        Vertex::Root { index, children, label }
    }

    /// Creates a new internal vertex (without parent set yet).
    pub fn new_internal(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        label: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Vertex::Internal { index, parent: None, children, label, branch_length }
    }

    /// Creates a new leaf vertex (without parent set yet).
    pub fn new_leaf(index: VertexIndex, label: Option<String>, branch_length: Option<BranchLength>) -> Self {
        Vertex::Leaf { index, parent: None, label, branch_length }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        match self {
            Vertex::Root { index, .. } | Vertex::Internal { index, .. } | Vertex::Leaf { index, .. } => *index,
        }
    }

    /// Returns the label of this vertex, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            Vertex::Root { label, .. } | Vertex::Internal { label, .. } | Vertex::Leaf { label, .. } => {
                label.as_deref()
            }
        }
    }

    /// Returns the branch length if this is a non-root vertex that has one.
    pub fn branch_length(&self) -> Option<BranchLength> {
        match self {
            Vertex::Root { .. } => None,
            Vertex::Internal { branch_length, .. } | Vertex::Leaf { branch_length, .. } => *branch_length,
        }
    }

    /// Returns the children (empty for leaves).
    pub fn children(&self) -> &[VertexIndex] {
        match self {
            Vertex::Root { children, .. } | Vertex::Internal { children, .. } => children,
            Vertex::Leaf { .. } => &[],
        }
    }

    /// Returns the index of the parent, `None` for the root
    /// (and for vertices whose parent is not set yet).
    pub fn parent_index(&self) -> Option<VertexIndex> {
        match self {
            Vertex::Root { .. } => None,
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => *parent,
        }
    }

    /// Sets the parent of a non-root vertex; ignored on the root.
    pub(crate) fn set_parent(&mut self, new_parent: VertexIndex) {
        match self {
            Vertex::Root { .. } => {}
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => *parent = Some(new_parent),
        }
    }

    /// Returns `true` if this vertex is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Vertex::Leaf { .. })
    }

    /// Returns `true` if this vertex is an internal vertex.
    pub fn is_internal(&self) -> bool {
        matches!(self, Vertex::Internal { .. })
    }

    /// Returns `true` if this vertex is the root.
    pub fn is_root(&self) -> bool {
        matches!(self, Vertex::Root { .. })
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite;
    /// use [BranchLength::try_new] for unchecked input.
    pub fn new(length: f64) -> Self {
        Self::try_new(length).unwrap_or_else(|| panic!("Branch length must be non-negative and finite, got {length}"))
    }

    /// Creates a new branch length, or `None` if `length` is negative or not finite.
    pub fn try_new(length: f64) -> Option<Self> {
        (length >= 0.0 && length.is_finite()).then_some(BranchLength(length))
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for BranchLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
