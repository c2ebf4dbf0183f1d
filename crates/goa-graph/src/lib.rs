//! GOA Graph - Ontology term graphs
//!
//! Builds immutable adjacency-map graphs from a loaded [`TermStore`]:
//! - [`RelationshipGraph`]: directed relation edges among non-obsolete terms
//! - [`AlternateIdResolver`]: undirected links between terms and their alternate accessions
//! - [`DescendantClosureIndex`]: memoized reachability over a relationship graph
//!
//! Graphs are never mutated after construction and can be shared across threads.
//!
//! [`TermStore`]: goa_core::TermStore

pub mod alt_id;
pub mod closure;
pub mod relationship;

pub use alt_id::{AltIdResolution, AlternateIdResolver};
pub use closure::DescendantClosureIndex;
pub use relationship::{BuildReport, RelationshipGraph, RelationshipGraphBuilder};
