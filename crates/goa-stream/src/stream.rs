//! The composable annotation stream

use goa_core::{AnnotationRecord, ClosureDirection, GoaError, Result};
use goa_graph::RelationshipGraph;

use crate::export::SimplifiedAnnotation;
use crate::filter::{
    DatabaseTypeFilter, EvidenceCodeFilter, FnFilter, ObjectIdFilter, PositiveQualifierFilter,
    RecordPredicate, SpeciesFilter, TransitiveTermFilter,
};

/// One filter stage: pulls from its upstream until a record passes
#[derive(Debug)]
pub struct Filter<S, P> {
    upstream: S,
    predicate: P,
}

impl<S, P> Filter<S, P> {
    pub fn new(upstream: S, predicate: P) -> Self {
        Self {
            upstream,
            predicate,
        }
    }
}

impl<S, P> Iterator for Filter<S, P>
where
    S: Iterator<Item = Result<AnnotationRecord>>,
    P: RecordPredicate,
{
    type Item = Result<AnnotationRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.upstream.next()? {
                Ok(record) => {
                    if self.predicate.accept(&record) {
                        return Some(Ok(record));
                    }
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Single-pass, lazily filtered sequence of annotation records.
///
/// Every `for_*` method wraps the current chain in one more stage. The stream
/// is consumed by iterating it and cannot be restarted; dropping it drops the
/// whole chain, record source included.
pub struct AnnotationStream<'a> {
    inner: Box<dyn Iterator<Item = Result<AnnotationRecord>> + 'a>,
}

impl<'a> AnnotationStream<'a> {
    /// Wrap a record source
    pub fn new<I>(source: I) -> Self
    where
        I: IntoIterator<Item = Result<AnnotationRecord>>,
        I::IntoIter: 'a,
    {
        Self {
            inner: Box::new(source.into_iter()),
        }
    }

    /// Wrap already parsed records
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = AnnotationRecord>,
        I::IntoIter: 'a,
    {
        Self::new(records.into_iter().map(Ok::<AnnotationRecord, GoaError>))
    }

    /// Add a stage with a custom predicate
    pub fn filter_with<P>(self, predicate: P) -> Self
    where
        P: RecordPredicate + 'a,
    {
        Self {
            inner: Box::new(Filter::new(self.inner, predicate)),
        }
    }

    /// Add a stage from a closure
    pub fn filter_by<F>(self, predicate: F) -> Self
    where
        F: FnMut(&AnnotationRecord) -> bool + 'a,
    {
        self.filter_with(FnFilter(predicate))
    }

    /// Keep records whose object id is in `object_ids`
    pub fn for_object_ids<I, S>(self, object_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_with(ObjectIdFilter::new(object_ids))
    }

    /// Keep records whose evidence code is in `codes`
    pub fn for_evidence_codes<I, S>(self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_with(EvidenceCodeFilter::new(codes))
    }

    /// Keep records from a database starting with `database_prefix` and of `object_type`
    pub fn for_database(
        self,
        database_prefix: impl Into<String>,
        object_type: impl Into<String>,
    ) -> Self {
        self.filter_with(DatabaseTypeFilter::new(database_prefix, object_type))
    }

    /// Drop records qualified with `NOT`
    pub fn positively_qualified_only(self) -> Self {
        self.filter_with(PositiveQualifierFilter)
    }

    /// Keep records annotated to at least one of `taxa`
    pub fn for_species(self, taxa: impl IntoIterator<Item = u32>) -> Self {
        self.filter_with(SpeciesFilter::new(taxa))
    }

    /// Keep records whose term is one of `terms` or in their descendant closure
    pub fn for_transitively_annotated<I, S>(
        self,
        graph: &'a RelationshipGraph,
        terms: I,
        direction: ClosureDirection,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_with(TransitiveTermFilter::new(graph, terms, direction))
    }

    /// Project surviving records to the export shape
    pub fn simplified(self) -> impl Iterator<Item = Result<SimplifiedAnnotation>> + 'a {
        self.inner
            .map(|record| record.map(SimplifiedAnnotation::from))
    }
}

impl Iterator for AnnotationStream<'_> {
    type Item = Result<AnnotationRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl std::fmt::Debug for AnnotationStream<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationStream").finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
