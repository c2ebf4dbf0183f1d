//! GAF annotation records
//!
//! A record is one tab-separated row of a GO Annotation File (GAF 2.x).
//! Only the columns the filter pipeline needs are kept.

use serde::{Deserialize, Serialize};

use crate::{GoaError, Result};

/// Number of tab-separated columns in a GAF 2.x row
pub const GAF_COLUMNS: usize = 17;

/// Qualifier marking an association that does NOT hold
pub const NOT_QUALIFIER: &str = "NOT";

const COL_DB: usize = 0;
const COL_OBJECT_ID: usize = 1;
const COL_QUALIFIER: usize = 3;
const COL_TERM_ID: usize = 4;
const COL_EVIDENCE: usize = 6;
const COL_OBJECT_TYPE: usize = 11;
const COL_TAXON: usize = 12;

const TAXON_PREFIX: &str = "taxon:";

/// One observed association between a gene product and a term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Source database (e.g. "UniProtKB")
    pub db: String,

    /// Database object identifier (e.g. a UniProt accession)
    pub object_id: String,

    /// Qualifiers such as "NOT" or "contributes_to"
    pub qualifiers: Vec<String>,

    /// Annotated term accession
    pub term_id: String,

    /// Evidence code (e.g. "IDA")
    pub evidence_code: String,

    /// Object type (e.g. "protein")
    pub object_type: String,

    /// NCBI taxon ids; more than one for interacting organisms
    pub taxa: Vec<u32>,
}

impl AnnotationRecord {
    /// Create a record for a protein without qualifiers or taxa
    pub fn new(
        db: impl Into<String>,
        object_id: impl Into<String>,
        term_id: impl Into<String>,
        evidence_code: impl Into<String>,
    ) -> Self {
        Self {
            db: db.into(),
            object_id: object_id.into(),
            qualifiers: Vec::new(),
            term_id: term_id.into(),
            evidence_code: evidence_code.into(),
            object_type: "protein".to_string(),
            taxa: Vec::new(),
        }
    }

    /// Add a qualifier
    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifiers.push(qualifier.into());
        self
    }

    /// Set the object type
    pub fn with_object_type(mut self, object_type: impl Into<String>) -> Self {
        self.object_type = object_type.into();
        self
    }

    /// Add a taxon id
    pub fn with_taxon(mut self, taxon: u32) -> Self {
        self.taxa.push(taxon);
        self
    }

    /// Build a record from the columns of one GAF row.
    ///
    /// The row must have exactly [`GAF_COLUMNS`] columns.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self> {
        if fields.len() != GAF_COLUMNS {
            return Err(GoaError::InvalidRecord {
                expected: GAF_COLUMNS,
                found: fields.len(),
            });
        }

        Ok(Self {
            db: fields[COL_DB].as_ref().to_string(),
            object_id: fields[COL_OBJECT_ID].as_ref().to_string(),
            qualifiers: split_pipe(fields[COL_QUALIFIER].as_ref())
                .map(str::to_string)
                .collect(),
            term_id: fields[COL_TERM_ID].as_ref().to_string(),
            evidence_code: fields[COL_EVIDENCE].as_ref().to_string(),
            object_type: fields[COL_OBJECT_TYPE].as_ref().to_string(),
            taxa: parse_taxa(fields[COL_TAXON].as_ref())?,
        })
    }

    /// Parse one tab-separated GAF line (without its line terminator)
    pub fn parse_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        Self::from_fields(&fields)
    }

    /// Whether the qualifier list carries the negation marker
    pub fn is_negated(&self) -> bool {
        self.qualifiers.iter().any(|q| q == NOT_QUALIFIER)
    }

    /// Whether any of the record's taxa is in `wanted`
    pub fn has_any_taxon(&self, wanted: &std::collections::HashSet<u32>) -> bool {
        self.taxa.iter().any(|taxon| wanted.contains(taxon))
    }
}

fn split_pipe(value: &str) -> impl Iterator<Item = &str> {
    value.split('|').filter(|part| !part.is_empty())
}

/// Parse a `taxon:9606|taxon:10090` column
fn parse_taxa(value: &str) -> Result<Vec<u32>> {
    let taxa = value
        .split('|')
        .map(|token| {
            token
                .trim()
                .strip_prefix(TAXON_PREFIX)
                .and_then(|id| id.parse::<u32>().ok())
                .ok_or_else(|| GoaError::InvalidTaxon(token.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(taxa)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn row(qualifier: &str, taxon: &str) -> String {
        [
            "UniProtKB",
            "P12345",
            "AAT1",
            qualifier,
            "GO:0005739",
            "PMID:2986063",
            "IDA",
            "",
            "C",
            "Aspartate aminotransferase",
            "GOT2",
            "protein",
            taxon,
            "20200101",
            "UniProt",
            "",
            "",
        ]
        .join("\t")
    }

    #[test]
    fn test_parse_line() {
        let record = AnnotationRecord::parse_line(&row("", "taxon:9606")).unwrap();

        assert_eq!(record.db, "UniProtKB");
        assert_eq!(record.object_id, "P12345");
        assert!(record.qualifiers.is_empty());
        assert_eq!(record.term_id, "GO:0005739");
        assert_eq!(record.evidence_code, "IDA");
        assert_eq!(record.object_type, "protein");
        assert_eq!(record.taxa, vec![9606]);
        assert!(!record.is_negated());
    }

    #[test]
    fn test_parse_qualifiers_and_multiple_taxa() {
        let record =
            AnnotationRecord::parse_line(&row("NOT|colocalizes_with", "taxon:9606|taxon:11676"))
                .unwrap();

        assert_eq!(record.qualifiers, vec!["NOT", "colocalizes_with"]);
        assert!(record.is_negated());
        assert_eq!(record.taxa, vec![9606, 11676]);
    }

    #[test]
    fn test_wrong_column_count_is_rejected() {
        let err = AnnotationRecord::parse_line("UniProtKB\tP1\tGENE").unwrap_err();
        assert!(matches!(
            err,
            GoaError::InvalidRecord {
                expected: 17,
                found: 3
            }
        ));

        let mut long = row("", "taxon:9606");
        long.push_str("\textra");
        assert!(AnnotationRecord::parse_line(&long).is_err());
    }

    #[test]
    fn test_invalid_taxon() {
        let err = AnnotationRecord::parse_line(&row("", "9606")).unwrap_err();
        assert!(matches!(err, GoaError::InvalidTaxon(token) if token == "9606"));

        assert!(AnnotationRecord::parse_line(&row("", "")).is_err());
        assert!(AnnotationRecord::parse_line(&row("", "taxon:human")).is_err());
    }

    #[test]
    fn test_negation_needs_exact_marker() {
        let record = AnnotationRecord::new("UniProtKB", "P1", "GO:1", "IDA")
            .with_qualifier("NOT_A_REAL_QUALIFIER");
        assert!(!record.is_negated());
    }

    #[test]
    fn test_has_any_taxon() {
        let record = AnnotationRecord::new("UniProtKB", "P1", "GO:1", "IDA")
            .with_taxon(9606)
            .with_taxon(10090);

        assert!(record.has_any_taxon(&HashSet::from([10090])));
        assert!(!record.has_any_taxon(&HashSet::from([7227])));
        assert!(!record.has_any_taxon(&HashSet::new()));
    }
}
