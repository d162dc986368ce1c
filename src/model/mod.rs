//! Data model for phylogenetic trees.
//!
//! Trees are represented by [Tree], which uses the arena pattern to store
//! [Vertex] nodes. Each vertex is either a `Root`, `Internal`, or `Leaf`,
//! referenced by [VertexIndex]. Vertices may have any number of children
//! and carry their label directly.
//!
//! Trees are usually built by the [NewickParser](crate::newick::NewickParser)
//! and turned back into text with [Tree::write].

pub mod tree;
pub mod vertex;

pub use tree::Tree;
pub use tree::VertexIndex;
pub use vertex::BranchLength;
pub use vertex::Vertex;
