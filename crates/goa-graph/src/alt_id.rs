//! Alternate accession resolution
//!
//! Terms and the alternate ids they declare form an undirected graph over
//! every accession in the store, obsolete ones included. Each connected
//! component is one equivalence class of accessions.

use std::collections::{BTreeSet, HashMap, VecDeque};

use goa_core::{GoaError, Result, TermStore};

use crate::relationship::RelationshipGraph;

/// Outcome of mapping an accession onto a current term
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AltIdResolution {
    /// No equivalent accession is connected in the relationship graph
    Unresolved,
    /// Exactly one candidate
    Unique(String),
    /// Several candidates; the caller picks
    Ambiguous(Vec<String>),
}

impl AltIdResolution {
    /// The single candidate, if unambiguous
    pub fn unique(&self) -> Option<&str> {
        match self {
            Self::Unique(id) => Some(id.as_str()),
            _ => None,
        }
    }
}

/// Undirected accession graph with component queries
#[derive(Debug, Clone, Default)]
pub struct AlternateIdResolver {
    neighbours: HashMap<String, BTreeSet<String>>,
}

impl AlternateIdResolver {
    /// Build the accession graph from every term of the store
    pub fn build<S: TermStore + ?Sized>(store: &S) -> Result<Self> {
        let mut neighbours: HashMap<String, BTreeSet<String>> = HashMap::new();
        let mut links = 0usize;

        for term in store.terms() {
            if term.id.is_empty() {
                return Err(GoaError::MissingIdentifier);
            }
            neighbours.entry(term.id.clone()).or_default();

            for alt_id in &term.alt_ids {
                neighbours
                    .entry(term.id.clone())
                    .or_default()
                    .insert(alt_id.clone());
                neighbours
                    .entry(alt_id.clone())
                    .or_default()
                    .insert(term.id.clone());
                links += 1;
            }
        }

        tracing::info!(
            accessions = neighbours.len(),
            links,
            "Alternate id graph built"
        );

        Ok(Self { neighbours })
    }

    /// Number of accessions (terms plus alternate ids)
    pub fn node_count(&self) -> usize {
        self.neighbours.len()
    }

    /// Whether the accession is known
    pub fn contains(&self, id: &str) -> bool {
        self.neighbours.contains_key(id)
    }

    /// Every accession equivalent to `id`, `id` included.
    ///
    /// An unknown accession is only equivalent to itself.
    pub fn alternates_of(&self, id: &str) -> BTreeSet<String> {
        let mut component = BTreeSet::new();
        component.insert(id.to_string());

        let mut queue = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            let Some(neighbours) = self.neighbours.get(current) else {
                continue;
            };
            for neighbour in neighbours {
                if component.insert(neighbour.clone()) {
                    queue.push_back(neighbour.as_str());
                }
            }
        }

        component
    }

    /// Equivalent accessions that are connected nodes of `graph`
    pub fn valid_alternates_of(&self, id: &str, graph: &RelationshipGraph) -> Vec<String> {
        let valid: Vec<String> = self
            .alternates_of(id)
            .into_iter()
            .filter(|candidate| graph.contains(candidate) && !graph.is_isolate(candidate))
            .collect();

        if valid.len() > 1 {
            tracing::warn!(
                id,
                candidates = valid.len(),
                "Found several valid alternatives"
            );
        }

        valid
    }

    /// Map a possibly stale accession onto a current term without picking
    /// between several candidates
    pub fn resolve(&self, id: &str, graph: &RelationshipGraph) -> AltIdResolution {
        let mut valid = self.valid_alternates_of(id, graph);
        match valid.len() {
            0 => AltIdResolution::Unresolved,
            1 => AltIdResolution::Unique(valid.remove(0)),
            _ => AltIdResolution::Ambiguous(valid),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
