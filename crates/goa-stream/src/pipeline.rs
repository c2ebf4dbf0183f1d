//! Standard composite pipelines
//!
//! Both pipelines restrict to curated evidence, the configured database and
//! object type, and positively qualified records. The direct pipeline starts
//! from explicit object ids; the transitive pipeline starts from terms.

use std::collections::BTreeSet;

use goa_core::{AppConfig, ClosureDirection};
use goa_graph::RelationshipGraph;

use crate::stream::AnnotationStream;

/// Parameters shared by the standard pipelines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Accepted evidence codes
    pub evidence_codes: BTreeSet<String>,
    /// Required prefix of the source database
    pub database_prefix: String,
    /// Required object type
    pub object_type: String,
    /// How transitive term matches walk the graph
    pub closure_direction: ClosureDirection,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl PipelineOptions {
    /// Replace the accepted evidence codes
    pub fn with_evidence_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.evidence_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the closure direction
    pub fn with_closure_direction(mut self, direction: ClosureDirection) -> Self {
        self.closure_direction = direction;
        self
    }
}

impl From<&AppConfig> for PipelineOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            evidence_codes: config.annotation.evidence_codes.clone(),
            database_prefix: config.annotation.database_prefix.clone(),
            object_type: config.annotation.object_type.clone(),
            closure_direction: config.ontology.closure_direction,
        }
    }
}

/// Annotations of the given objects: object ids, evidence, database/type,
/// positive qualifiers, then species when given.
pub fn direct_object_pipeline<'a, I, S>(
    source: AnnotationStream<'a>,
    object_ids: I,
    species: Option<BTreeSet<u32>>,
    options: &PipelineOptions,
) -> AnnotationStream<'a>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    tracing::debug!(
        evidence_codes = options.evidence_codes.len(),
        species = ?species,
        "Building direct object pipeline"
    );

    let stream = source
        .for_object_ids(object_ids)
        .for_evidence_codes(options.evidence_codes.iter().cloned())
        .for_database(options.database_prefix.as_str(), options.object_type.as_str())
        .positively_qualified_only();

    match species {
        Some(taxa) => stream.for_species(taxa),
        None => stream,
    }
}

/// Annotations to the given terms or their closure: evidence, database/type,
/// positive qualifiers, then transitive term match.
pub fn transitive_term_pipeline<'a, I, S>(
    source: AnnotationStream<'a>,
    graph: &'a RelationshipGraph,
    term_ids: I,
    options: &PipelineOptions,
) -> AnnotationStream<'a>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    tracing::debug!(
        evidence_codes = options.evidence_codes.len(),
        direction = %options.closure_direction,
        graph_nodes = graph.node_count(),
        "Building transitive term pipeline"
    );

    source
        .for_evidence_codes(options.evidence_codes.iter().cloned())
        .for_database(options.database_prefix.as_str(), options.object_type.as_str())
        .positively_qualified_only()
        .for_transitively_annotated(graph, term_ids, options.closure_direction)
}

// ============================================================================
// Tests
// ============================================================================
