//! Memoized descendant closures over a relationship graph
//!
//! The index borrows the graph read-only and caches one reachability set per
//! distinct ancestor set. Create one index per pipeline evaluation so cached
//! sets never leak between unrelated queries.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use goa_core::ClosureDirection;

use crate::relationship::RelationshipGraph;

/// Reachability cache layered on a [`RelationshipGraph`]
#[derive(Debug)]
pub struct DescendantClosureIndex<'g> {
    graph: &'g RelationshipGraph,
    direction: ClosureDirection,
    memo: HashMap<BTreeSet<String>, HashSet<String>>,
}

impl<'g> DescendantClosureIndex<'g> {
    /// Index following edges forward, from ancestor to descendant
    pub fn new(graph: &'g RelationshipGraph) -> Self {
        Self::with_direction(graph, ClosureDirection::Forward)
    }

    /// Index following edges in the given direction
    pub fn with_direction(graph: &'g RelationshipGraph, direction: ClosureDirection) -> Self {
        Self {
            graph,
            direction,
            memo: HashMap::new(),
        }
    }

    /// The underlying graph
    pub fn graph(&self) -> &'g RelationshipGraph {
        self.graph
    }

    /// Traversal direction
    pub fn direction(&self) -> ClosureDirection {
        self.direction
    }

    /// True iff `term` is a node and is reachable from some member of
    /// `ancestors`, or is itself a member.
    pub fn is_descendant(&mut self, ancestors: &BTreeSet<String>, term: &str) -> bool {
        if !self.graph.contains(term) {
            return false;
        }
        if let Some(closure) = self.memo.get(ancestors) {
            return closure.contains(term);
        }

        let closure = self.compute(ancestors);
        let reachable = closure.contains(term);
        self.memo.insert(ancestors.clone(), closure);
        reachable
    }

    /// Every graph node reachable from `ancestors`, ancestors that are nodes
    /// included
    pub fn descendants_of(&mut self, ancestors: &BTreeSet<String>) -> &HashSet<String> {
        if !self.memo.contains_key(ancestors) {
            let closure = self.compute(ancestors);
            self.memo.insert(ancestors.clone(), closure);
        }
        &self.memo[ancestors]
    }

    /// Number of cached ancestor sets
    pub fn cached_sets(&self) -> usize {
        self.memo.len()
    }

    fn compute(&self, ancestors: &BTreeSet<String>) -> HashSet<String> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();

        for ancestor in ancestors {
            if self.graph.contains(ancestor) && visited.insert(ancestor.clone()) {
                queue.push_back(ancestor.as_str());
            }
        }

        while let Some(current) = queue.pop_front() {
            let next: Box<dyn Iterator<Item = &str> + '_> = match self.direction {
                ClosureDirection::Forward => Box::new(self.graph.successors(current)),
                ClosureDirection::Reverse => Box::new(self.graph.predecessors(current)),
            };
            for neighbour in next {
                if visited.insert(neighbour.to_string()) {
                    queue.push_back(neighbour);
                }
            }
        }

        tracing::debug!(
            ancestors = ancestors.len(),
            reachable = visited.len(),
            direction = %self.direction,
            "Computed descendant closure"
        );
        visited
    }
}

// ============================================================================
// Tests
// ============================================================================
