//! TAXA block handler.
//!
//! Collects the `TaxLabels` of a TAXA block and the `ntax` of its
//! `Dimensions` statement.

use crate::nexus::defs::{DIMENSIONS, NTAX, TAXLABELS};
use crate::nexus::router::Block;
use crate::parser::utils::split_words;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Contents of a TAXA block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxaBlock {
    labels: Vec<String>,
    ntax: Option<usize>,
}

impl TaxaBlock {
    /// Taxon labels in declaration order, quoted labels kept with their quotes.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of taxa announced by `Dimensions ntax=<n>`, if present.
    pub fn ntax(&self) -> Option<usize> {
        self.ntax
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Option<usize>) {
        (self.labels, self.ntax)
    }
}

/// Extracts the taxon labels (`TaxLabels`) and announced taxon count
/// (`Dimensions ntax=<n>`) of a TAXA block.
///
/// A block without `TaxLabels` yields no labels. Several `TaxLabels`
/// statements append to each other. Other statements are ignored.
///
/// Irregularities are tolerated and logged: an `ntax` differing from the
/// number of labels, a duplicate label, or an unreadable `ntax` value.
pub fn parse_taxa_block(block: &Block) -> TaxaBlock {
    let mut taxa = TaxaBlock::default();

    for statement in block.statements() {
        if statement.is(TAXLABELS) {
            taxa.labels.extend(split_words(statement.rest()).into_iter().map(String::from));
        } else if statement.is(DIMENSIONS) {
            taxa.ntax = parse_ntax(statement.rest()).or(taxa.ntax);
        } else {
            debug!("Ignoring statement in TAXA block: {:?}", statement.keyword());
        }
    }

    if let Some(ntax) = taxa.ntax.filter(|&n| n != taxa.labels.len()) {
        warn!("TAXA block announces ntax={ntax} but lists {} labels", taxa.labels.len());
    }

    let mut seen = HashSet::with_capacity(taxa.labels.len());
    for label in &taxa.labels {
        if !seen.insert(label.as_str()) {
            warn!("Duplicate taxon label {label:?} in TAXA block");
        }
    }

    debug!("Parsed TAXA block with {} labels", taxa.labels.len());
    taxa
}

/// Reads `ntax=<n>` from the arguments of a `Dimensions` statement,
/// tolerating whitespace around `=`.
fn parse_ntax(arguments: &str) -> Option<usize> {
    let lower = arguments.to_ascii_lowercase();
    let after_key = lower.find(NTAX).map(|i| lower[i + NTAX.len()..].trim_start())?;
    let value = after_key.strip_prefix('=')?.trim_start();
    let digits: String = value.chars().take_while(char::is_ascii_digit).collect();

    match digits.parse() {
        Ok(ntax) => Some(ntax),
        Err(_) => {
            warn!("Cannot read ntax value in 'Dimensions {arguments}'");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nexus::router::route;
    use crate::nexus::scanner::scan;

    fn taxa_of(text: &str) -> TaxaBlock {
        let blocks = route(scan(text).unwrap()).unwrap();
        parse_taxa_block(&blocks[0])
    }

    #[test]
    fn test_taxlabels() {
        let taxa = taxa_of("#NEXUS\nBEGIN TAXA;\n  DIMENSIONS NTAX=3;\n  TAXLABELS Scarabaeus Drosophila Aranaeus;\nEND;");
        assert_eq!(taxa.labels(), ["Scarabaeus", "Drosophila", "Aranaeus"]);
        assert_eq!(taxa.ntax(), Some(3));
    }

    #[test]
    fn test_case_insensitive_and_quoted() {
        let taxa = taxa_of("#NEXUS\nbegin taxa; dimensions ntax = 2; taxlabels 'Apteryx owenii' Apteryx_rowi; end;");
        assert_eq!(taxa.labels(), ["'Apteryx owenii'", "Apteryx_rowi"]);
        assert_eq!(taxa.ntax(), Some(2));
    }

    #[test]
    fn test_without_taxlabels() {
        let taxa = taxa_of("#NEXUS\nBEGIN TAXA; DIMENSIONS NTAX=4; END;");
        assert!(taxa.labels().is_empty());
        assert_eq!(taxa.ntax(), Some(4));
    }

    #[test]
    fn test_multiple_taxlabels_append() {
        let taxa = taxa_of("#NEXUS\nBEGIN TAXA; TaxLabels A B; TaxLabels C; END;");
        assert_eq!(taxa.labels(), ["A", "B", "C"]);
        assert_eq!(taxa.ntax(), None);
    }

    #[test]
    fn test_mismatch_and_duplicates_tolerated() {
        let taxa = taxa_of("#NEXUS\nBEGIN TAXA; Dimensions ntax=5; TaxLabels A B A; END;");
        assert_eq!(taxa.labels(), ["A", "B", "A"]);
        assert_eq!(taxa.ntax(), Some(5));
    }

    #[test]
    fn test_parse_ntax() {
        assert_eq!(parse_ntax("NTAX=12"), Some(12));
        assert_eq!(parse_ntax("nchar=4 ntax = 7"), Some(7));
        assert_eq!(parse_ntax("ntax=many"), None);
        assert_eq!(parse_ntax("nchar=4"), None);
    }
}
