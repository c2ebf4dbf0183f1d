//! Ontology terms and the read-only term store contract
//!
//! Parsing an ontology file is left to the caller. This module only models
//! terms that are already loaded and answers membership questions over them.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::{GoaError, Result};

// ============================================================================
// Relation Types
// ============================================================================

/// Label of a relation between two terms (e.g. `is_a`, `part_of`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationType(String);

impl RelationType {
    /// Hierarchical specialization relation
    pub const IS_A: &'static str = "is_a";

    /// Create a relation type from its label
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The `is_a` relation
    pub fn is_a() -> Self {
        Self::new(Self::IS_A)
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RelationType {
    fn default() -> Self {
        Self::is_a()
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Terms
// ============================================================================

/// An ontology term
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Accession (e.g. "GO:0008150")
    pub id: String,

    /// Relation label -> target accessions
    #[serde(default)]
    pub relations: BTreeMap<String, BTreeSet<String>>,

    /// Whether the term has been retired
    #[serde(default)]
    pub obsolete: bool,

    /// Historical accessions merged into this term
    #[serde(default)]
    pub alt_ids: BTreeSet<String>,
}

impl Term {
    /// Create a new, non-obsolete term without relations
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Build a term from OBO-style tag/value metadata.
    ///
    /// `is_obsolete` counts as set when any of its values is `true`; every
    /// `alt_id` value becomes an alternate accession.
    pub fn from_metadata(
        id: impl Into<String>,
        relations: BTreeMap<String, BTreeSet<String>>,
        metadata: &HashMap<String, Vec<String>>,
    ) -> Self {
        let obsolete = metadata
            .get("is_obsolete")
            .map(|values| values.iter().any(|v| v.trim() == "true"))
            .unwrap_or(false);

        let alt_ids = metadata
            .get("alt_id")
            .map(|values| values.iter().map(|v| v.trim().to_string()).collect())
            .unwrap_or_default();

        Self {
            id: id.into(),
            relations,
            obsolete,
            alt_ids,
        }
    }

    /// Add a relation target
    pub fn with_relation(mut self, relation: &RelationType, target: impl Into<String>) -> Self {
        self.relations
            .entry(relation.as_str().to_string())
            .or_default()
            .insert(target.into());
        self
    }

    /// Add an `is_a` parent
    pub fn with_parent(self, parent: impl Into<String>) -> Self {
        self.with_relation(&RelationType::is_a(), parent)
    }

    /// Add an alternate accession
    pub fn with_alt_id(mut self, alt_id: impl Into<String>) -> Self {
        self.alt_ids.insert(alt_id.into());
        self
    }

    /// Mark the term obsolete
    pub fn obsolete(mut self) -> Self {
        self.obsolete = true;
        self
    }

    /// Targets of the given relation type
    pub fn targets<'a>(&'a self, relation: &RelationType) -> impl Iterator<Item = &'a str> + 'a {
        self.relations
            .get(relation.as_str())
            .into_iter()
            .flat_map(|targets| targets.iter().map(String::as_str))
    }

    /// Whether the term declares at least one relation target of any type
    pub fn has_relations(&self) -> bool {
        self.relations.values().any(|targets| !targets.is_empty())
    }

    /// Whether `id` appears as a target of any relation of this term
    pub fn references(&self, id: &str) -> bool {
        self.relations.values().any(|targets| targets.contains(id))
    }
}

// ============================================================================
// Term Store
// ============================================================================

/// Read-only access to a loaded ontology
pub trait TermStore: Send + Sync {
    /// Iterate over every term, obsolete ones included
    fn terms(&self) -> Box<dyn Iterator<Item = &Term> + '_>;

    /// Look up a term by accession
    fn get(&self, id: &str) -> Option<&Term>;

    /// Unknown accessions count as obsolete
    fn is_obsolete(&self, id: &str) -> bool {
        self.get(id).map(|term| term.obsolete).unwrap_or(true)
    }

    /// True when the term is unknown, or has no relations and no other
    /// term points at it
    fn is_disconnected(&self, id: &str) -> bool {
        let Some(term) = self.get(id) else {
            return true;
        };

        if term.has_relations() {
            return false;
        }

        !self.terms().any(|other| other.references(id))
    }
}

/// In-memory term store indexed by accession
#[derive(Debug, Clone, Default)]
pub struct TermCollection {
    terms: Vec<Term>,
    index: HashMap<String, usize>,
}

impl TermCollection {
    /// Create a collection; the first term wins when accessions repeat and
    /// later duplicates are dropped
    pub fn new(terms: Vec<Term>) -> Self {
        let mut index = HashMap::with_capacity(terms.len());
        let mut kept = Vec::with_capacity(terms.len());
        for term in terms {
            if index.contains_key(&term.id) {
                tracing::warn!(id = %term.id, "Duplicate term accession ignored");
                continue;
            }
            index.insert(term.id.clone(), kept.len());
            kept.push(term);
        }

        Self { terms: kept, index }
    }

    /// Load a pre-parsed term list from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let terms: Vec<Term> =
            serde_json::from_str(json).map_err(|e| GoaError::InvalidTermData(e.to_string()))?;
        Ok(Self::new(terms))
    }

    /// Number of terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the collection holds no terms
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl FromIterator<Term> for TermCollection {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl TermStore for TermCollection {
    fn terms(&self) -> Box<dyn Iterator<Item = &Term> + '_> {
        Box::new(self.terms.iter())
    }

    fn get(&self, id: &str) -> Option<&Term> {
        self.index.get(id).map(|&position| &self.terms[position])
    }
}

// ============================================================================
// Tests
// ============================================================================
