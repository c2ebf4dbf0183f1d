//! Relationship graph over non-obsolete terms
//!
//! Nodes are exactly the non-obsolete terms of a store. An edge `u -> v` exists
//! when `u` declares `v` as a target of the selected relation type and both
//! endpoints are nodes. Edges pointing at obsolete or unknown terms are
//! dropped and counted in the [`BuildReport`]. Self-loops are kept as declared.

use std::collections::{BTreeSet, HashMap, HashSet};

use goa_core::{GoaError, OntologyConfig, RelationType, Result, TermStore};

// ============================================================================
// Relationship Graph
// ============================================================================

/// Immutable directed graph of one relation type
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    relation: RelationType,
    successors: HashMap<String, BTreeSet<String>>,
    predecessors: HashMap<String, BTreeSet<String>>,
    edge_count: usize,
}

impl RelationshipGraph {
    /// Relation type the edges were drawn from
    pub fn relation(&self) -> &RelationType {
        &self.relation
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.successors.len()
    }

    /// Number of distinct edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Check if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.successors.is_empty()
    }

    /// Whether `id` is a node
    pub fn contains(&self, id: &str) -> bool {
        self.successors.contains_key(id)
    }

    /// Iterate over all node accessions
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.successors.keys().map(String::as_str)
    }

    /// Iterate over all edges as `(source, target)`
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.successors.iter().flat_map(|(source, targets)| {
            targets
                .iter()
                .map(move |target| (source.as_str(), target.as_str()))
        })
    }

    /// Whether the edge `source -> target` exists
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.successors
            .get(source)
            .map(|targets| targets.contains(target))
            .unwrap_or(false)
    }

    /// Direct targets of `id`; empty for unknown ids
    pub fn successors(&self, id: &str) -> impl Iterator<Item = &str> {
        self.successors
            .get(id)
            .into_iter()
            .flat_map(|targets| targets.iter().map(String::as_str))
    }

    /// Direct sources pointing at `id`; empty for unknown ids
    pub fn predecessors(&self, id: &str) -> impl Iterator<Item = &str> {
        self.predecessors
            .get(id)
            .into_iter()
            .flat_map(|sources| sources.iter().map(String::as_str))
    }

    /// A node with no incoming or outgoing edges. Unknown ids are not isolates.
    pub fn is_isolate(&self, id: &str) -> bool {
        match (self.successors.get(id), self.predecessors.get(id)) {
            (Some(out), Some(incoming)) => out.is_empty() && incoming.is_empty(),
            _ => false,
        }
    }

    /// Nodes with an edge to themselves
    pub fn self_loops(&self) -> impl Iterator<Item = &str> {
        self.successors
            .iter()
            .filter(|(node, targets)| targets.contains(node.as_str()))
            .map(|(node, _)| node.as_str())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Summary of one graph build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Non-obsolete terms turned into nodes
    pub nodes: usize,
    /// Distinct edges kept
    pub edges: usize,
    /// Obsolete terms left out
    pub obsolete_terms: usize,
    /// Declared targets dropped because they are obsolete or unknown
    pub pruned_edges: usize,
    /// Kept edges whose source and target are the same term
    pub self_loops: usize,
}

/// Builds a [`RelationshipGraph`] from a term store
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraphBuilder {
    relation: RelationType,
}

impl From<&OntologyConfig> for RelationshipGraphBuilder {
    fn from(config: &OntologyConfig) -> Self {
        Self::from_config(config)
    }
}

impl RelationshipGraphBuilder {
    /// Create a builder for `is_a` edges
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the relation type to draw edges from
    pub fn with_relation(mut self, relation: RelationType) -> Self {
        self.relation = relation;
        self
    }

    /// Builder for the relation named in `config`
    pub fn from_config(config: &OntologyConfig) -> Self {
        Self::new().with_relation(config.relation_type.clone())
    }

    /// Build the graph
    pub fn build<S: TermStore + ?Sized>(&self, store: &S) -> Result<RelationshipGraph> {
        self.build_with_report(store).map(|(graph, _)| graph)
    }

    /// Build the graph and report what was pruned.
    ///
    /// Fails only when a term has an empty accession.
    pub fn build_with_report<S: TermStore + ?Sized>(
        &self,
        store: &S,
    ) -> Result<(RelationshipGraph, BuildReport)> {
        let mut report = BuildReport::default();
        let mut nodes: HashSet<&str> = HashSet::new();

        for term in store.terms() {
            if term.id.is_empty() {
                return Err(GoaError::MissingIdentifier);
            }
            if term.obsolete {
                report.obsolete_terms += 1;
            } else {
                nodes.insert(term.id.as_str());
            }
        }

        let mut graph = RelationshipGraph {
            relation: self.relation.clone(),
            successors: nodes
                .iter()
                .map(|id| (id.to_string(), BTreeSet::new()))
                .collect(),
            predecessors: nodes
                .iter()
                .map(|id| (id.to_string(), BTreeSet::new()))
                .collect(),
            edge_count: 0,
        };

        for term in store.terms().filter(|term| !term.obsolete) {
            for target in term.targets(&self.relation) {
                if !nodes.contains(target) {
                    tracing::trace!(source = %term.id, to = target, "Pruned edge to obsolete or unknown term");
                    report.pruned_edges += 1;
                    continue;
                }

                let inserted = graph
                    .successors
                    .get_mut(term.id.as_str())
                    .map(|targets| targets.insert(target.to_string()))
                    .unwrap_or(false);
                if !inserted {
                    continue;
                }

                if let Some(sources) = graph.predecessors.get_mut(target) {
                    sources.insert(term.id.clone());
                }
                graph.edge_count += 1;

                if target == term.id {
                    tracing::debug!(term = %term.id, relation = %self.relation, "Self-loop kept");
                    report.self_loops += 1;
                }
            }
        }

        report.nodes = graph.node_count();
        report.edges = graph.edge_count;

        tracing::info!(
            relation = %self.relation,
            nodes = report.nodes,
            edges = report.edges,
            obsolete_terms = report.obsolete_terms,
            pruned_edges = report.pruned_edges,
            self_loops = report.self_loops,
            "Relationship graph built"
        );

        Ok((graph, report))
    }
}

// ============================================================================
// Tests
// ============================================================================
