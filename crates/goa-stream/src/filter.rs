//! Record predicates used by filter stages

use std::collections::{BTreeSet, HashSet};

use goa_core::{AnnotationRecord, ClosureDirection};
use goa_graph::{DescendantClosureIndex, RelationshipGraph};

/// A test applied to each record by one filter stage
pub trait RecordPredicate {
    /// Keep the record?
    fn accept(&mut self, record: &AnnotationRecord) -> bool;
}

/// Object id is one of the given ids
#[derive(Debug, Clone)]
pub struct ObjectIdFilter {
    object_ids: HashSet<String>,
}

impl ObjectIdFilter {
    pub fn new<I, S>(object_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            object_ids: object_ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl RecordPredicate for ObjectIdFilter {
    fn accept(&mut self, record: &AnnotationRecord) -> bool {
        self.object_ids.contains(&record.object_id)
    }
}

/// Evidence code is one of the given codes
#[derive(Debug, Clone)]
pub struct EvidenceCodeFilter {
    codes: HashSet<String>,
}

impl EvidenceCodeFilter {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }
}

impl RecordPredicate for EvidenceCodeFilter {
    fn accept(&mut self, record: &AnnotationRecord) -> bool {
        self.codes.contains(&record.evidence_code)
    }
}

/// Qualifiers do not contain `NOT`
#[derive(Debug, Clone, Copy, Default)]
pub struct PositiveQualifierFilter;

impl RecordPredicate for PositiveQualifierFilter {
    fn accept(&mut self, record: &AnnotationRecord) -> bool {
        !record.is_negated()
    }
}

/// Source database starts with a prefix and the object has a given type
#[derive(Debug, Clone)]
pub struct DatabaseTypeFilter {
    database_prefix: String,
    object_type: String,
}

impl DatabaseTypeFilter {
    pub fn new(database_prefix: impl Into<String>, object_type: impl Into<String>) -> Self {
        Self {
            database_prefix: database_prefix.into(),
            object_type: object_type.into(),
        }
    }
}

impl RecordPredicate for DatabaseTypeFilter {
    fn accept(&mut self, record: &AnnotationRecord) -> bool {
        record.db.starts_with(&self.database_prefix) && record.object_type == self.object_type
    }
}

/// At least one of the record's taxa is requested
#[derive(Debug, Clone)]
pub struct SpeciesFilter {
    taxa: HashSet<u32>,
}

impl SpeciesFilter {
    pub fn new(taxa: impl IntoIterator<Item = u32>) -> Self {
        Self {
            taxa: taxa.into_iter().collect(),
        }
    }
}

impl RecordPredicate for SpeciesFilter {
    fn accept(&mut self, record: &AnnotationRecord) -> bool {
        record.has_any_taxon(&self.taxa)
    }
}

/// Term equals a requested term or lies in its descendant closure.
///
/// The requested set never changes, so its closure is resolved through the
/// index on the first record and kept for the rest of the stage.
#[derive(Debug)]
pub struct TransitiveTermFilter<'g> {
    terms: BTreeSet<String>,
    index: DescendantClosureIndex<'g>,
    closure: Option<HashSet<String>>,
}

impl<'g> TransitiveTermFilter<'g> {
    pub fn new<I, S>(graph: &'g RelationshipGraph, terms: I, direction: ClosureDirection) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
            index: DescendantClosureIndex::with_direction(graph, direction),
            closure: None,
        }
    }

    /// Whether the closure has been resolved yet
    pub fn is_resolved(&self) -> bool {
        self.closure.is_some()
    }
}

impl RecordPredicate for TransitiveTermFilter<'_> {
    fn accept(&mut self, record: &AnnotationRecord) -> bool {
        if self.terms.contains(&record.term_id) {
            return true;
        }
        let Self {
            terms,
            index,
            closure,
        } = self;
        closure
            .get_or_insert_with(|| index.descendants_of(terms).clone())
            .contains(&record.term_id)
    }
}

/// Adapter turning a closure into a predicate
pub struct FnFilter<F>(pub F);

impl<F> RecordPredicate for FnFilter<F>
where
    F: FnMut(&AnnotationRecord) -> bool,
{
    fn accept(&mut self, record: &AnnotationRecord) -> bool {
        (self.0)(record)
    }
}

// ============================================================================
// Tests
// ============================================================================
