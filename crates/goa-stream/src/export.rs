//! Simplified projection and tab-separated export
//!
//! Row layout: pipe-joined taxon ids, object id, term id, evidence code.

use std::io::Write;

use serde::{Deserialize, Serialize};

use goa_core::{AnnotationRecord, Result};

/// The four exported columns of a surviving record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedAnnotation {
    pub taxa: Vec<u32>,
    pub object_id: String,
    pub term_id: String,
    pub evidence_code: String,
}

impl SimplifiedAnnotation {
    /// Render as one TSV row without a line terminator
    pub fn to_tsv_row(&self) -> String {
        let taxa = self
            .taxa
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join("|");

        format!(
            "{}\t{}\t{}\t{}",
            taxa, self.object_id, self.term_id, self.evidence_code
        )
    }
}

impl From<AnnotationRecord> for SimplifiedAnnotation {
    fn from(record: AnnotationRecord) -> Self {
        Self {
            taxa: record.taxa,
            object_id: record.object_id,
            term_id: record.term_id,
            evidence_code: record.evidence_code,
        }
    }
}

/// Write every row to `writer`, one per line.
///
/// Stops at the first erroneous row and returns its error. Returns the number
/// of rows written.
pub fn write_tsv<I, W>(rows: I, mut writer: W) -> Result<usize>
where
    I: IntoIterator<Item = Result<SimplifiedAnnotation>>,
    W: Write,
{
    let mut written = 0usize;
    for row in rows {
        let row = row?;
        writeln!(writer, "{}", row.to_tsv_row())?;
        written += 1;
    }
    writer.flush()?;

    tracing::debug!(rows = written, "TSV export finished");
    Ok(written)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use goa_core::GoaError;

    fn row(taxa: Vec<u32>, object_id: &str) -> SimplifiedAnnotation {
        SimplifiedAnnotation {
            taxa,
            object_id: object_id.to_string(),
            term_id: "GO:0005739".to_string(),
            evidence_code: "IDA".to_string(),
        }
    }

    #[test]
    fn test_tsv_row() {
        assert_eq!(
            row(vec![9606, 11676], "P1").to_tsv_row(),
            "9606|11676\tP1\tGO:0005739\tIDA"
        );
    }

    #[test]
    fn test_write_tsv() {
        let mut out = Vec::new();
        let written = write_tsv(
            vec![Ok(row(vec![9606], "P1")), Ok(row(vec![10090], "P2"))],
            &mut out,
        )
        .unwrap();

        assert_eq!(written, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "9606\tP1\tGO:0005739\tIDA\n10090\tP2\tGO:0005739\tIDA\n"
        );
    }

    #[test]
    fn test_write_tsv_stops_at_error() {
        let mut out = Vec::new();
        let result = write_tsv(
            vec![
                Ok(row(vec![9606], "P1")),
                Err(GoaError::InvalidTaxon("taxon:x".to_string())),
                Ok(row(vec![9606], "P2")),
            ],
            &mut out,
        );

        assert!(matches!(result, Err(GoaError::InvalidTaxon(_))));
        assert_eq!(String::from_utf8(out).unwrap(), "9606\tP1\tGO:0005739\tIDA\n");
    }

    #[test]
    fn test_serialize_row() {
        let json = serde_json::to_value(row(vec![9606], "P1")).unwrap();
        assert_eq!(json["object_id"], "P1");
        assert_eq!(json["taxa"][0], 9606);
    }
}
