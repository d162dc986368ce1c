//! Tree module for phylogenetic tree representation.
//!
//! This module provides [Tree], an arena of [Vertex] values referenced by
//! [VertexIndex]. Unlike a strictly binary model, a vertex may have any number
//! of children, since Nexus files commonly hold unrooted trees written with a
//! trifurcating root.

use crate::model::vertex::{BranchLength, Vertex};
use crate::newick::writer::to_newick;
use std::ops::Index;

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// A phylogenetic tree represented using the arena pattern on [Vertex].
///
/// # Structure
/// - All vertices (root, internal, and leaves) are stored in the arena
/// - Index of root is maintained once it has been added
/// - Children keep the order in which they were added,
///   which is the order they appear in the Newick string
///
/// # Construction
/// Add vertices bottom-up: leaves first, then internal vertices listing their
/// children, finally the root. Test validity with [Tree::is_valid].
///
/// # Example
/// ```
/// use nextrees::model::{BranchLength, Tree};
///
/// // ((A,B):0.5,C);
/// let mut tree = Tree::new();
/// let a = tree.add_leaf(Some("A".to_string()), None);
/// let b = tree.add_leaf(Some("B".to_string()), None);
/// let c = tree.add_leaf(Some("C".to_string()), None);
/// let ab = tree.add_internal_vertex(vec![a, b], None, Some(BranchLength::new(0.5)));
/// tree.add_root(vec![ab, c], None);
///
/// assert!(tree.is_valid());
/// assert_eq!(tree.write(), "((A,B):0.5,C);");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,
    /// Index of the root, once added
    root_index: Option<VertexIndex>,
    /// Name of tree; e.g. when loaded from a Nexus file
    name: Option<String>,
}

// ============================================================================
// New, Construction (pub)
// ============================================================================
impl Tree {
    /// Creates a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty tree with room for `num_vertices` vertices.
    pub fn with_capacity(num_vertices: usize) -> Self {
        Tree { vertices: Vec::with_capacity(num_vertices), root_index: None, name: None }
    }

    /// Attaches a name to this tree.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a leaf, returning its index.
    pub fn add_leaf(&mut self, label: Option<String>, branch_length: Option<BranchLength>) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices.push(Vertex::new_leaf(index, label, branch_length));
        index
    }

    /// Adds an internal vertex over already added `children`, returning its index.
    pub fn add_internal_vertex(
        &mut self,
        children: Vec<VertexIndex>,
        label: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        self.adopt(&children, index);
        self.vertices.push(Vertex::new_internal(index, children, label, branch_length));
        index
    }

    /// Adds the root over already added `children`, returning its index.
    pub fn add_root(&mut self, children: Vec<VertexIndex>, label: Option<String>) -> VertexIndex {
        let index = self.vertices.len();
        self.adopt(&children, index);
        self.vertices.push(Vertex::new_root(index, children, label));
        self.root_index = Some(index);
        index
    }

    fn adopt(&mut self, children: &[VertexIndex], parent: VertexIndex) {
        for &child in children {
            if let Some(vertex) = self.vertices.get_mut(child) {
                vertex.set_parent(parent);
            }
        }
    }
}

// ============================================================================
// Getters / Accessors (pub)
// ============================================================================
impl Tree {
    /// Returns the name of this tree, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the root index, if a root has been added.
    pub fn root_index(&self) -> Option<VertexIndex> {
        self.root_index
    }

    /// Returns the root vertex, if a root has been added.
    pub fn root(&self) -> Option<&Vertex> {
        self.root_index.map(|index| &self.vertices[index])
    }

    /// Returns the vertex at `index`, if it exists.
    pub fn vertex(&self, index: VertexIndex) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    /// Returns all vertices in arena order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of vertices, including the root.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of leaves.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_leaf()).count()
    }

    /// Number of internal vertices, excluding the root.
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_internal()).count()
    }

    /// Whether any vertex carries a branch length.
    pub fn has_branch_lengths(&self) -> bool {
        self.vertices.iter().any(|v| v.branch_length().is_some())
    }

    /// Returns the leaf labels in depth-first (Newick) order;
    /// unlabelled leaves are skipped.
    pub fn leaf_labels(&self) -> Vec<&str> {
        let mut labels = Vec::with_capacity(self.vertices.len() / 2 + 1);
        let Some(root) = self.root_index else {
            return labels;
        };

        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            let vertex = &self.vertices[index];
            if vertex.is_leaf() {
                if let Some(label) = vertex.label() {
                    labels.push(label);
                }
            }
            // Reverse so the first child is visited first
            stack.extend(vertex.children().iter().rev());
        }
        labels
    }

    /// Returns the canonical Newick representation of this tree.
    ///
    /// See [to_newick] for the format.
    pub fn write(&self) -> String {
        to_newick(self)
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root is set and is the only [Vertex::Root]
    /// - All vertex indices match their position in the arena
    /// - Internal vertices have at least one child
    /// - All child indices are valid and point back to their parent
    /// - Every non-root vertex is reachable from the root exactly once
    pub fn is_valid(&self) -> bool {
        let Some(root_index) = self.root_index else {
            return false;
        };
        if !self.vertices.get(root_index).is_some_and(Vertex::is_root) {
            return false;
        }

        let mut seen = vec![false; self.vertices.len()];
        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return false;
            }
            if vertex.is_root() && index != root_index {
                return false;
            }
            if vertex.is_internal() && vertex.children().is_empty() {
                return false;
            }
            for &child in vertex.children() {
                match self.vertices.get(child) {
                    Some(c) if c.parent_index() == Some(index) && !seen[child] => seen[child] = true,
                    _ => return false,
                }
            }
        }

        // All but the root must have been seen as someone's child
        seen.iter().enumerate().all(|(index, &s)| s || index == root_index)
    }
}

impl Index<VertexIndex> for Tree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}
