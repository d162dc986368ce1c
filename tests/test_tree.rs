use nextrees::model::{BranchLength, Tree, Vertex};

#[test]
fn test_building_tree() {
    let mut tree = Tree::with_capacity(5).with_name("kiwi");
    let index_l1 = tree.add_leaf(Some("Apteryx haastii".to_string()), Some(BranchLength::new(1.0)));
    let index_l2 = tree.add_leaf(Some("Apteryx owenii".to_string()), Some(BranchLength::new(1.0)));
    let index_l3 = tree.add_leaf(Some("Apteryx rowi".to_string()), Some(BranchLength::new(0.5)));
    let index_i1 = tree.add_internal_vertex(vec![index_l1, index_l2], None, Some(BranchLength::new(1.5)));
    let index_root = tree.add_root(vec![index_l3, index_i1], None);

    // Counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 1);
    assert_eq!(tree.num_vertices(), 5);
    assert_eq!(tree.name(), Some("kiwi"));

    // Root
    let root = tree.root().unwrap();
    assert_eq!(root.index(), index_root);
    assert_eq!(tree.root_index(), Some(index_root));
    assert!(root.is_root());
    assert_eq!(root.children(), [index_l3, index_i1]);

    // Leaf
    let l2 = &tree[index_l2];
    assert!(l2.is_leaf());
    assert_eq!(l2.index(), index_l2);
    assert_eq!(l2.label(), Some("Apteryx owenii"));
    assert_eq!(l2.parent_index(), Some(index_i1));

    // Internal
    let inti = &tree[index_i1];
    assert!(inti.is_internal());
    assert_eq!(inti.index(), index_i1);
    assert_eq!(inti.branch_length().unwrap(), BranchLength::new(1.5));
    assert_eq!(inti.parent_index(), Some(index_root));

    assert!(tree.is_valid());
    assert_eq!(tree.write(), "(Apteryx_rowi:0.5,(Apteryx_haastii:1,Apteryx_owenii:1):1.5);");
}

#[test]
fn test_empty_tree() {
    let tree = Tree::new();
    assert!(tree.root().is_none());
    assert!(tree.vertex(55).is_none());
    assert!(!tree.is_valid());
    assert_eq!(tree.write(), ";");
    assert!(tree.leaf_labels().is_empty());
}

#[test]
#[should_panic]
fn test_index_out_of_bounds() {
    let tree = Tree::new();
    let _ = &tree[55];
}

#[test]
fn test_invalid_without_root() {
    let mut tree = Tree::new();
    let a = tree.add_leaf(Some("A".to_string()), None);
    let b = tree.add_leaf(Some("B".to_string()), None);
    tree.add_internal_vertex(vec![a, b], None, None);
    assert!(!tree.is_valid());
}

#[test]
fn test_invalid_when_child_shared() {
    let mut tree = Tree::new();
    let a = tree.add_leaf(Some("A".to_string()), None);
    let ab = tree.add_internal_vertex(vec![a], None, None);
    tree.add_root(vec![ab, a], None);
    assert!(!tree.is_valid());
}

#[test]
fn test_leaf_labels_in_newick_order() {
    let tree = nextrees::parse_newick_str("((Ginkgo,Pinus),(Ephedra,(Gnetum,Welwitschia)));").unwrap();
    assert_eq!(tree.leaf_labels(), vec!["Ginkgo", "Pinus", "Ephedra", "Gnetum", "Welwitschia"]);
}

// ============= Vertex Tests =============

#[test]
fn test_branch_lengths() {
    let test_length = 1.234;
    let vertex = Vertex::new_internal(5, vec![1, 2], None, Some(BranchLength::new(test_length)));
    assert_eq!(*vertex.branch_length().unwrap(), test_length);
    assert_eq!(BranchLength::new(0.25).to_string(), "0.25");
}

#[test]
#[should_panic]
fn test_negative_branch_length() {
    let _ = BranchLength::new(-1.0);
}

#[test]
fn test_try_new_branch_length() {
    assert!(BranchLength::try_new(0.0).is_some());
    assert!(BranchLength::try_new(-0.1).is_none());
    assert!(BranchLength::try_new(f64::NAN).is_none());
    assert!(BranchLength::try_new(f64::INFINITY).is_none());
}

#[test]
fn test_is_x() {
    let leaf = Vertex::new_leaf(0, Some("Kea".to_string()), Some(BranchLength::new(0.5)));
    assert!(leaf.is_leaf());

    let vertex = Vertex::new_internal(0, vec![1, 2], None, Some(BranchLength::new(0.5)));
    assert!(vertex.is_internal());

    let root = Vertex::new_root(2, vec![0, 1], None);
    assert!(root.is_root());
}

#[test]
fn test_labels_on_all_vertex_kinds() {
    let internal = Vertex::new_internal(0, vec![1, 2], Some("Nestoridae".to_string()), None);
    assert_eq!(internal.label(), Some("Nestoridae"));

    let root = Vertex::new_root(0, vec![12, 34], None);
    assert_eq!(root.label(), None);
    assert_eq!(root.branch_length(), None);
}

#[test]
fn test_parent_unset() {
    let vertex = Vertex::new_internal(0, vec![1, 2], None, Some(BranchLength::new(0.5)));
    assert_eq!(vertex.parent_index(), None);

    let leaf = Vertex::new_leaf(0, None, Some(BranchLength::new(0.5)));
    assert_eq!(leaf.parent_index(), None);

    let root = Vertex::new_root(2, vec![42, 43], None);
    assert_eq!(root.parent_index(), None);
}

#[test]
fn test_leaf_has_no_children() {
    let vertex = Vertex::new_leaf(0, Some("Kakapo".to_string()), None);
    assert!(vertex.children().is_empty());
}
