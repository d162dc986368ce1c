use nextrees::nexus::{DuplicateTokens, NexusReader, RootingTag};
use nextrees::{LoadError, get_trees, load, load_file, load_str};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

const INSECTS: &str = "((Scarabaeus,Drosophila),Aranaeus);";

fn fixture(name: &str) -> PathBuf {
    Path::new("tests").join("fixtures").join(name)
}

// ============= End-to-end =============

#[test]
fn test_positional_translated_and_verbatim_trees_agree() {
    let result = load_file(fixture("insects.nex"));
    if let Err(e) = &result {
        eprintln!("Error loading insects: {:?}", e);
    }
    let trees = result.unwrap();

    let names: Vec<&str> = trees.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["positional", "translated", "verbatim"]);
    for (name, tree) in &trees {
        assert_eq!(tree.name(), Some(name.as_str()));
        assert_eq!(tree.write(), INSECTS);
        assert!(tree.is_valid());
    }
}

#[test]
fn test_load_from_reader() {
    let text = std::fs::read_to_string(fixture("insects.nex")).unwrap();
    let trees = load(Cursor::new(text.into_bytes())).unwrap();

    assert_eq!(trees.len(), 3);
    assert_eq!(trees["translated"].write(), INSECTS);
}

#[test]
fn test_load_from_temporary_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "#NEXUS").unwrap();
    writeln!(file, "BEGIN TREES;").unwrap();
    writeln!(file, "    Translate 1 Ephedra, 2 Gnetum, 3 Welwitschia, 4 Ginkgo, 5 Pinus;").unwrap();
    writeln!(file, "    Tree gymnosperms = [&U] (1,2,(3,(4,5)));").unwrap();
    writeln!(file, "END;").unwrap();
    file.flush().unwrap();

    let trees = load_file(file.path()).unwrap();
    assert_eq!(trees["gymnosperms"].write(), "(Ephedra,Gnetum,(Welwitschia,(Ginkgo,Pinus)));");
    assert_eq!(trees["gymnosperms"].num_leaves(), 5);
}

#[test]
fn test_missing_file() {
    let err = load_file(fixture("does_not_exist.nex")).unwrap_err();
    assert!(matches!(err, LoadError::Nexus(_)));
}

// ============= getTrees =============

#[test]
fn test_rooting_tag_stripped_and_tokens_substituted() {
    let text = "#NEXUS
BEGIN TREES;
    TRANSLATE 1 Ephedra, 2 Gnetum, 3 Welwitschia, 4 Ginkgo, 5 Pinus;
    TREE gymnosperms = [&U] (1,2,(3,(4,5)))
;
END;";

    let trees = get_trees(text).unwrap();
    assert_eq!(trees.len(), 1);
    assert_eq!(trees["gymnosperms"], "(Ephedra,Gnetum,(Welwitschia,(Ginkgo,Pinus)));");
}

#[test]
fn test_comments_quotes_and_unknown_blocks() {
    let text = std::fs::read_to_string(fixture("gymnosperms_comments.nex")).unwrap();
    let trees = get_trees(&text).unwrap();

    let names: Vec<&str> = trees.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["gnetales_first", "conifers first", "best"]);
    assert_eq!(
        trees["gnetales_first"],
        "(Ephedra:0.2,Gnetum:0.3,('Welwitschia mirabilis':0.1,(Ginkgo:0.4,Pinus:0.5):0.2):0.1);"
    );
    assert_eq!(trees["conifers first"], "((Ginkgo,Pinus),(Ephedra,(Gnetum,'Welwitschia mirabilis')));");
    assert_eq!(trees["best"], "(Ephedra,Gnetum,('Welwitschia mirabilis',(Ginkgo,Pinus)));");

    let loaded = load_str(&text).unwrap();
    assert_eq!(
        loaded["best"].write(),
        "(Ephedra,Gnetum,(Welwitschia_mirabilis,(Ginkgo,Pinus)));"
    );
    assert!(loaded["gnetales_first"].has_branch_lengths());
}

#[test]
fn test_rooting_tags_recorded() {
    let text = std::fs::read_to_string(fixture("gymnosperms_comments.nex")).unwrap();
    let document = NexusReader::new().parse(&text).unwrap();

    assert_eq!(document.taxa().len(), 5);
    assert_eq!(document.ntax(), Some(5));
    assert_eq!(document.trees()["gnetales_first"].rooting_tag(), Some(RootingTag::Unrooted));
    assert_eq!(document.trees()["conifers first"].rooting_tag(), Some(RootingTag::Rooted));
    assert_eq!(document.trees()["best"].rooting_tag(), None);
}

#[test]
fn test_get_trees_is_idempotent() {
    let text = std::fs::read_to_string(fixture("gymnosperms_comments.nex")).unwrap();
    let first = get_trees(&text).unwrap();
    let second = get_trees(&text).unwrap();

    assert_eq!(first, second);
    let first: Vec<_> = first.into_iter().collect();
    let second: Vec<_> = second.into_iter().collect();
    assert_eq!(first, second);
}

#[test]
fn test_keys_in_declaration_order() {
    let text = "#NEXUS\nBEGIN TREES;\n\
                Tree zeta = (A,B);\n\
                Tree alpha = (A,B);\n\
                Tree mu = (A,B);\n\
                END;";

    let names: Vec<String> = get_trees(text).unwrap().into_keys().collect();
    assert_eq!(names, vec!["zeta", "alpha", "mu"]);
}

#[test]
fn test_case_insensitive_directives() {
    let text = "#nExUs\nbEgIn TaXa; tAxLaBeLs A B; eNd;\nBeGiN tReEs; TrAnSlAtE x A, y B; TrEe t = (x,y); EnDbLoCk;";
    let trees = get_trees(text).unwrap();
    assert_eq!(trees["t"], "(A,B);");
}

// ============= Missing or empty structure =============

#[test]
fn test_missing_header() {
    let text = "BEGIN TREES; Tree t = (A,B); END;";

    let err = get_trees(text).unwrap_err();
    assert!(err.message().contains("#NEXUS"));

    let err = load_str(text).unwrap_err();
    assert!(matches!(err, LoadError::Nexus(_)));

    let err = load(Cursor::new(text)).unwrap_err();
    assert!(matches!(err, LoadError::Nexus(_)));
}

#[test]
fn test_without_trees_block() {
    let text = std::fs::read_to_string(fixture("taxa_only.nex")).unwrap();
    assert!(get_trees(&text).unwrap().is_empty());
    assert!(load_str(&text).unwrap().is_empty());

    assert!(get_trees("#NEXUS\n").unwrap().is_empty());
    assert!(load_str("#NEXUS").unwrap().is_empty());
}

#[test]
fn test_empty_trees_block() {
    for text in [
        "#NEXUS\nBEGIN TREES;\nEND;",
        "#NEXUS\nBEGIN TAXA; TaxLabels A B; END;\nBEGIN TREES; Translate 1 A, 2 B; END;",
    ] {
        assert!(get_trees(text).unwrap().is_empty());
        assert!(load(Cursor::new(text)).unwrap().is_empty());
    }
}

// ============= Errors =============

#[test]
fn test_unbalanced_blocks() {
    assert!(get_trees("#NEXUS\nBEGIN TREES; Tree t = (A,B);").is_err());
    assert!(get_trees("#NEXUS\nEND;").is_err());
    assert!(load_str("#NEXUS\nBEGIN TAXA; TaxLabels A; END; END;").is_err());
}

#[test]
fn test_malformed_tree_statement_aborts_parse() {
    let text = "#NEXUS\nBEGIN TREES; Tree good = (A,B); Tree bad (A,B); END;";
    let err = get_trees(text).unwrap_err();
    assert!(err.message().contains("missing '='"));
}

#[test]
fn test_newick_errors_propagate_unmodified() {
    let body = "((A,B),C;";
    let text = format!("#NEXUS\nBEGIN TREES; Tree bad = {body} END;");

    let expected = nextrees::parse_newick_str(body).unwrap_err();
    match load_str(&text).unwrap_err() {
        LoadError::Newick(err) => assert_eq!(err, expected),
        other => panic!("expected Newick error, got {other:?}"),
    }
}

#[test]
fn test_duplicate_tokens_policy() {
    let text = "#NEXUS\nBEGIN TREES; Translate 1 A, 2 B, 1 C; Tree t = (1,2); END;";

    let trees = get_trees(text).unwrap();
    assert_eq!(trees["t"], "(C,B);");

    let reader = NexusReader::new().with_duplicate_tokens(DuplicateTokens::Reject);
    assert!(reader.get_trees(text).is_err());
    assert!(matches!(reader.load_str(text).unwrap_err(), LoadError::Nexus(_)));
}

#[test]
fn test_translate_tables_of_separate_trees_blocks() {
    let text = "#NEXUS
BEGIN TREES; Translate 1 Scarabaeus; Tree early = (1,Aranaeus); END;
BEGIN TREES; Translate 1 Drosophila; Tree late = (1,Aranaeus); END;";

    let trees = load_str(text).unwrap();
    assert_eq!(trees["early"].write(), "(Scarabaeus,Aranaeus);");
    assert_eq!(trees["late"].write(), "(Drosophila,Aranaeus);");

    let reader = NexusReader::new().with_duplicate_tokens(DuplicateTokens::Reject);
    assert!(reader.get_trees(text).is_err());
    assert!(matches!(reader.load_str(text).unwrap_err(), LoadError::Nexus(_)));
}

// ============= Large input =============

#[test]
fn test_deeply_nested_tree() {
    let depth = 10_000;
    let mut body = "(".repeat(depth);
    body.push('0');
    for i in 1..=depth {
        body.push_str(&format!(",{i})"));
    }
    let text = format!("#NEXUS\nBEGIN TREES;\n    Translate 0 Scarabaeus;\n    Tree ladder = {body};\nEND;");

    let trees = load_str(&text).unwrap();
    let tree = &trees["ladder"];
    assert_eq!(tree.num_leaves(), depth + 1);
    assert!(tree.is_valid());
    assert_eq!(tree.leaf_labels()[0], "Scarabaeus");
    assert_eq!(tree.write(), format!("{};", body.replacen('0', "Scarabaeus", 1)));
}
