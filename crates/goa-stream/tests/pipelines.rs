//! End-to-end pipeline tests: GAF text in, filtered TSV out

use std::collections::BTreeSet;
use std::io::Cursor;

use goa_core::{AnnotationRecord, GoaError, Term, TermCollection};
use goa_graph::{AlternateIdResolver, RelationshipGraphBuilder};
use goa_stream::{
    direct_object_pipeline, transitive_term_pipeline, write_tsv, AnnotationStream, GafReader,
    PipelineOptions,
};
use proptest::prelude::*;

fn gaf_row(
    db: &str,
    object_id: &str,
    qualifier: &str,
    term: &str,
    evidence: &str,
    taxon: &str,
) -> String {
    [
        db, object_id, "SYMBOL", qualifier, term, "PMID:1", evidence, "", "P", "name", "",
        "protein", taxon, "20240101", "UniProt", "", "",
    ]
    .join("\t")
}

fn example_record() -> AnnotationRecord {
    AnnotationRecord::new("UniProtKB", "P1", "GO:0000001", "IDA").with_taxon(9606)
}

// =============================================================================
// Worked examples
// =============================================================================

#[test]
fn test_direct_object_pipeline_species_example() {
    let options = PipelineOptions::default().with_evidence_codes(["IDA"]);

    let human: Vec<_> = direct_object_pipeline(
        AnnotationStream::from_records(vec![example_record()]),
        ["P1"],
        Some(BTreeSet::from([9606])),
        &options,
    )
    .collect::<Result<_, _>>()
    .unwrap();
    assert_eq!(human, vec![example_record()]);

    let mouse: Vec<_> = direct_object_pipeline(
        AnnotationStream::from_records(vec![example_record()]),
        ["P1"],
        Some(BTreeSet::from([10090])),
        &options,
    )
    .collect::<Result<_, _>>()
    .unwrap();
    assert!(mouse.is_empty());
}

#[test]
fn test_transitive_term_pipeline_chain_example() {
    let store = TermCollection::new(vec![
        Term::new("A").with_parent("B"),
        Term::new("B").with_parent("C"),
        Term::new("C"),
    ]);
    let graph = RelationshipGraphBuilder::new().build(&store).unwrap();
    let record = AnnotationRecord::new("UniProtKB", "P1", "C", "IDA").with_taxon(9606);

    let passed: Vec<_> = transitive_term_pipeline(
        AnnotationStream::from_records(vec![record.clone()]),
        &graph,
        ["A"],
        &PipelineOptions::default(),
    )
    .collect::<Result<_, _>>()
    .unwrap();

    assert_eq!(passed, vec![record]);
}

#[test]
fn test_term_outside_graph_does_not_match() {
    let store = TermCollection::new(vec![Term::new("A").with_parent("B"), Term::new("B")]);
    let graph = RelationshipGraphBuilder::new().build(&store).unwrap();
    let stale = AnnotationRecord::new("UniProtKB", "P1", "GO:STALE", "IDA").with_taxon(9606);

    let passed = transitive_term_pipeline(
        AnnotationStream::from_records(vec![stale]),
        &graph,
        ["A"],
        &PipelineOptions::default(),
    )
    .count();

    assert_eq!(passed, 0);
}

// =============================================================================
// GAF text to TSV
// =============================================================================

#[test]
fn test_reader_to_tsv_export() {
    let input = [
        "!gaf-version: 2.2".to_string(),
        gaf_row("UniProtKB", "P1", "", "GO:0005739", "IDA", "taxon:9606"),
        gaf_row("UniProtKB", "P1", "NOT", "GO:0005740", "IDA", "taxon:9606"),
        gaf_row("UniProtKB", "P1", "", "GO:0005741", "IEA", "taxon:9606"),
        gaf_row("UniProtKB", "P2", "", "GO:0005739", "IMP", "taxon:9606"),
        gaf_row("UniProtKB", "P1", "enables", "GO:0003824", "IMP", "taxon:9606|taxon:11676"),
    ]
    .join("\n");

    let stream = direct_object_pipeline(
        AnnotationStream::new(GafReader::new(Cursor::new(input))),
        ["P1"],
        None,
        &PipelineOptions::default(),
    );

    let mut out = Vec::new();
    let written = write_tsv(stream.simplified(), &mut out).unwrap();

    assert_eq!(written, 2);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "9606\tP1\tGO:0005739\tIDA\n9606|11676\tP1\tGO:0003824\tIMP\n"
    );
}

#[test]
fn test_malformed_row_aborts_export() {
    let input = [
        gaf_row("UniProtKB", "P1", "", "GO:0005739", "IDA", "taxon:9606"),
        "UniProtKB\tP1\ttruncated".to_string(),
        gaf_row("UniProtKB", "P1", "", "GO:0005741", "IDA", "taxon:9606"),
    ]
    .join("\n");

    let stream = direct_object_pipeline(
        AnnotationStream::new(GafReader::new(Cursor::new(input))),
        ["P1"],
        None,
        &PipelineOptions::default(),
    );

    let mut out = Vec::new();
    let err = write_tsv(stream.simplified(), &mut out).unwrap_err();

    assert!(matches!(err, GoaError::AtLine { line: 2, .. }));
    assert_eq!(String::from_utf8(out).unwrap(), "9606\tP1\tGO:0005739\tIDA\n");
}

#[test]
fn test_early_stop_leaves_rest_unread() {
    let input = [
        gaf_row("UniProtKB", "P1", "", "GO:0005739", "IDA", "taxon:9606"),
        gaf_row("UniProtKB", "P1", "", "GO:0005740", "IDA", "taxon:9606"),
        "garbage that would fail to parse".to_string(),
    ]
    .join("\n");

    let first: Vec<_> = AnnotationStream::new(GafReader::new(Cursor::new(input)))
        .take(2)
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(first.len(), 2);
}

#[test]
fn test_alternate_id_feeds_transitive_pipeline() {
    let store = TermCollection::new(vec![
        Term::new("GO:OLD").obsolete().with_alt_id("GO:NEW"),
        Term::new("GO:NEW").with_parent("GO:ROOT"),
        Term::new("GO:ROOT"),
    ]);
    let graph = RelationshipGraphBuilder::new().build(&store).unwrap();
    let resolver = AlternateIdResolver::build(&store).unwrap();

    let replacement = resolver.resolve("GO:OLD", &graph);
    let term = replacement.unique().unwrap().to_string();

    let record = AnnotationRecord::new("UniProtKB", "P1", "GO:ROOT", "EXP").with_taxon(9606);
    let passed = transitive_term_pipeline(
        AnnotationStream::from_records(vec![record]),
        &graph,
        [term],
        &PipelineOptions::default(),
    )
    .count();

    assert_eq!(passed, 1);
}

// =============================================================================
// Properties
// =============================================================================

fn arb_record() -> impl Strategy<Value = AnnotationRecord> {
    (
        prop::sample::select(vec!["UniProtKB", "MGI"]),
        prop::sample::select(vec!["P1", "P2", "P3"]),
        prop::collection::vec(
            prop::sample::select(vec!["NOT", "enables", "contributes_to"]),
            0..3,
        ),
        prop::sample::select(vec!["GO:1", "GO:2", "GO:3"]),
        prop::sample::select(vec!["IDA", "IEA", "IMP", "ISS"]),
        prop::sample::select(vec!["protein", "gene"]),
        prop::collection::vec(prop::sample::select(vec![9606u32, 10090, 7227]), 1..3),
    )
        .prop_map(|(db, object_id, qualifiers, term, evidence, object_type, taxa)| {
            let mut record = AnnotationRecord::new(db, object_id, term, evidence)
                .with_object_type(object_type);
            record.qualifiers = qualifiers.into_iter().map(str::to_string).collect();
            record.taxa = taxa;
            record
        })
}

proptest! {
    #[test]
    fn prop_positive_filter_drops_exactly_not(records in prop::collection::vec(arb_record(), 0..40)) {
        let kept: Vec<_> = AnnotationStream::from_records(records.clone())
            .positively_qualified_only()
            .map(Result::unwrap)
            .collect();

        let expected: Vec<_> = records
            .into_iter()
            .filter(|r| !r.qualifiers.iter().any(|q| q == "NOT"))
            .collect();

        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn prop_independent_filters_commute(records in prop::collection::vec(arb_record(), 0..40)) {
        let evidence_first: Vec<_> = AnnotationStream::from_records(records.clone())
            .for_evidence_codes(["IDA", "IMP"])
            .for_species([9606])
            .map(Result::unwrap)
            .collect();

        let species_first: Vec<_> = AnnotationStream::from_records(records)
            .for_species([9606])
            .for_evidence_codes(["IDA", "IMP"])
            .map(Result::unwrap)
            .collect();

        prop_assert_eq!(evidence_first, species_first);
    }
}
