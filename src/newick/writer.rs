//! Canonical Newick output for [Tree]s.

use crate::model::{Tree, VertexIndex};
use crate::newick::defs::BUFFER_CHARS;
use crate::parser::utils::escape_label;

/// Returns the canonical Newick representation of a tree with closing semicolon.
///
/// Children are written in their stored order, labels are escaped with
/// [escape_label], and `:<length>` follows every non-root vertex that has a
/// branch length. The root's label (if any) follows its closing parenthesis.
/// A tree without root is written as `;`.
///
/// # Example
/// ```
/// use nextrees::newick::{parse_str, to_newick};
///
/// let tree = parse_str("( (A , B) [clade] , 'C c' :2.0 );").unwrap();
/// assert_eq!(to_newick(&tree), "((A,B),C_c:2);");
///
/// let tree = parse_str("('tree_1',B);").unwrap();
/// assert_eq!(to_newick(&tree), "('tree_1',B);");
/// ```
pub fn to_newick(tree: &Tree) -> String {
    let mut newick = String::with_capacity(estimate_newick_len(tree));
    let Some(root) = tree.root_index() else {
        newick.push(';');
        return newick;
    };

    // Steps still to write, next one last
    let mut steps = vec![WriteStep::Open(root)];
    while let Some(step) = steps.pop() {
        match step {
            WriteStep::Open(index) => {
                let children = tree[index].children();
                if children.is_empty() {
                    push_label_and_length(tree, &mut newick, index);
                    continue;
                }

                newick.push('(');
                steps.push(WriteStep::Close(index));
                for (i, &child) in children.iter().enumerate().rev() {
                    steps.push(WriteStep::Open(child));
                    if i > 0 {
                        steps.push(WriteStep::Comma);
                    }
                }
            }
            WriteStep::Comma => newick.push(','),
            WriteStep::Close(index) => {
                newick.push(')');
                push_label_and_length(tree, &mut newick, index);
            }
        }
    }
    newick.push(';');

    newick
}

/// Pending output while writing a tree
enum WriteStep {
    Open(VertexIndex),
    Comma,
    Close(VertexIndex),
}

fn push_label_and_length(tree: &Tree, newick: &mut String, index: VertexIndex) {
    let vertex = &tree[index];
    if let Some(label) = vertex.label() {
        newick.push_str(&escape_label(label));
    }
    if let Some(branch_length) = vertex.branch_length() {
        newick.push(':');
        newick.push_str(&branch_length.to_string());
    }
}

/// Estimates the length of the Newick string for a given tree,
/// to pre-allocate string capacity.
pub(crate) fn estimate_newick_len(tree: &Tree) -> usize {
    // Per vertex with children: "()" plus separating commas
    const STRUCTURE_CHARS: usize = 3;
    // Branch lengths: ~20 chars each (e.g., ":0.009529961339106089")
    const BRANCH_LENGTH_CHARS: usize = 20;

    let vertices = tree.vertices();
    let structure = vertices.iter().filter(|v| !v.is_leaf()).count() * STRUCTURE_CHARS;
    let labels: usize = vertices.iter().filter_map(|v| v.label()).map(str::len).sum();
    let branches = if tree.has_branch_lengths() {
        vertices.len() * BRANCH_LENGTH_CHARS
    } else {
        0
    };

    structure + labels + branches + BUFFER_CHARS
}
