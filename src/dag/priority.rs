use crate::{candidate_set::CandidateSet, graph::Graph, types::VId};
use std::cmp::Ordering;

/// How good a query vertex is as an early branching point; lower is better.
///
/// The score is `candidates / degree`: selective, well-connected vertices score low. Entries are
/// totally ordered by score, then by vertex id.
#[derive(Debug, Clone, Copy)]
pub struct PriorityEntry {
    score: f64,
    vertex: VId,
}

impl PriorityEntry {
    pub fn new(query: &Graph, candidate_set: &CandidateSet, u: VId) -> Self {
        let degree = query.degree(u);
        let score = if degree == 0 {
            f64::INFINITY
        } else {
            candidate_set.size(u) as f64 / degree as f64
        };
        Self { score, vertex: u }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn vertex(&self) -> VId {
        self.vertex
    }
}

impl Ord for PriorityEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then(self.vertex.cmp(&other.vertex))
    }
}

impl PartialOrd for PriorityEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PriorityEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PriorityEntry {}
