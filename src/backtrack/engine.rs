use super::{EmbeddingSink, FrontierEntry};
use crate::{candidate_set::CandidateSet, dag::Dag, error::Result, graph::Graph, types::VId};
use log::info;

/// The number of embeddings after which an enumeration stops by default.
pub const DEFAULT_CAP: usize = 100_000;

/// The result of an enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    found: usize,
    capped: bool,
}

impl Outcome {
    /// Returns the number of embeddings emitted.
    pub fn found(&self) -> usize {
        self.found
    }

    /// Tests whether the enumeration stopped at the cap rather than running to completion.
    pub fn capped(&self) -> bool {
        self.capped
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Depth-first enumeration of the embeddings of a query graph in a data graph.
///
/// The query is walked along its [`Dag`]. The root takes each of its candidates in turn. Every
/// other vertex becomes extendable once all its parents are assigned, and its frontier entry then
/// caches the candidates adjacent to every parent's image. At each step the extendable vertex with
/// the fewest feasible candidates, i.e. cached ones still unused, is expanded next, ties going to
/// the lower id.
pub struct Backtrack<'a> {
    data: &'a Graph,
    dag: &'a Dag,
    candidate_set: &'a CandidateSet,
    cap: usize,
    embedding: Vec<Option<VId>>,
    used: Vec<bool>,
    assigned: usize,
    frontier: Vec<FrontierEntry>,
    found: usize,
    row: Vec<VId>,
}

impl<'a> Backtrack<'a> {
    pub fn new(data: &'a Graph, dag: &'a Dag, candidate_set: &'a CandidateSet) -> Result<Self> {
        candidate_set.check(dag.num_vertices(), data.num_vertices())?;
        Ok(Self {
            data,
            dag,
            candidate_set,
            cap: DEFAULT_CAP,
            embedding: vec![None; dag.num_vertices()],
            used: vec![false; data.num_vertices()],
            assigned: 0,
            frontier: vec![FrontierEntry::default(); dag.num_vertices()],
            found: 0,
            row: Vec::with_capacity(dag.num_vertices()),
        })
    }

    /// Sets the maximum number of embeddings to emit.
    pub fn cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    /// Emits every embedding to `sink`, up to the cap.
    ///
    /// Each call starts from scratch, so repeated calls emit the same embeddings in the same
    /// order.
    pub fn enumerate<S: EmbeddingSink + ?Sized>(&mut self, sink: &mut S) -> Result<Outcome> {
        self.reset();
        sink.header(self.dag.num_vertices())?;
        let flow = if self.cap == 0 {
            Flow::Stop
        } else {
            self.expand(self.dag.root(), sink)?
        };
        sink.finish()?;
        let outcome = Outcome {
            found: self.found,
            capped: flow == Flow::Stop,
        };
        if outcome.capped {
            info!("found {} embeddings (stopped at the cap)", outcome.found);
        } else {
            info!("found {} embeddings", outcome.found);
        }
        Ok(outcome)
    }
}

// Private methods.
impl<'a> Backtrack<'a> {
    fn reset(&mut self) {
        for slot in &mut self.embedding {
            *slot = None;
        }
        for flag in &mut self.used {
            *flag = false;
        }
        for entry in &mut self.frontier {
            entry.clear();
        }
        self.assigned = 0;
        self.found = 0;
    }

    fn expand<S: EmbeddingSink + ?Sized>(&mut self, curr: VId, sink: &mut S) -> Result<Flow> {
        if curr == self.dag.root() {
            let candidate_set = self.candidate_set;
            return self.try_candidates(curr, candidate_set.candidates(curr), sink);
        }
        // The cached list stays untouched by deeper frames while it is out of the frontier.
        let candidates = self.frontier[curr].take();
        let flow = self.try_candidates(curr, &candidates, sink);
        self.frontier[curr].replace(candidates);
        if flow? == Flow::Stop {
            return Ok(Flow::Stop);
        }
        self.refresh(curr);
        Ok(Flow::Continue)
    }

    fn try_candidates<S: EmbeddingSink + ?Sized>(
        &mut self,
        curr: VId,
        candidates: &[VId],
        sink: &mut S,
    ) -> Result<Flow> {
        for &v in candidates {
            // Entries cached higher up may name vertices a sibling has taken since.
            if self.used[v] {
                continue;
            }
            self.assign(curr, v);
            let flow = if self.assigned == self.embedding.len() {
                self.emit(sink)
            } else {
                self.refresh(curr);
                match self.select() {
                    Some(next) => self.expand(next, sink),
                    None => Ok(Flow::Continue),
                }
            };
            self.unassign(curr, v);
            if flow? == Flow::Stop {
                return Ok(Flow::Stop);
            }
        }
        Ok(Flow::Continue)
    }

    fn assign(&mut self, u: VId, v: VId) {
        self.embedding[u] = Some(v);
        self.used[v] = true;
        self.assigned += 1;
    }

    fn unassign(&mut self, u: VId, v: VId) {
        self.embedding[u] = None;
        self.used[v] = false;
        self.assigned -= 1;
    }

    fn emit<S: EmbeddingSink + ?Sized>(&mut self, sink: &mut S) -> Result<Flow> {
        self.row.clear();
        self.row.extend(self.embedding.iter().flatten());
        debug_assert_eq!(self.row.len(), self.embedding.len());
        sink.embedding(&self.row)?;
        self.found += 1;
        if self.found >= self.cap {
            Ok(Flow::Stop)
        } else {
            Ok(Flow::Continue)
        }
    }

    /// Recomputes the frontier entries of the children of `u`.
    fn refresh(&mut self, u: VId) {
        let dag = self.dag;
        for &child in dag.children(u) {
            let mut candidates = self.frontier[child].take();
            candidates.clear();
            if self.parents_assigned(child) {
                candidates.extend(self.extendable_candidates(child));
            }
            self.frontier[child].replace(candidates);
        }
    }

    fn parents_assigned(&self, u: VId) -> bool {
        self.dag
            .parents(u)
            .iter()
            .all(|&p| self.embedding[p].is_some())
    }

    /// Candidates of `u` that are unused and adjacent to the images of all parents of `u`.
    fn extendable_candidates(&self, u: VId) -> impl Iterator<Item = VId> + '_ {
        let parents = self.dag.parents(u);
        self.candidate_set
            .candidates(u)
            .iter()
            .copied()
            .filter(move |&x| {
                !self.used[x]
                    && parents.iter().all(|&p| {
                        self.embedding[p].map_or(false, |v| self.data.is_neighbor(v, x))
                    })
            })
    }

    /// Returns the unassigned vertex with the fewest feasible candidates, if any has one.
    fn select(&self) -> Option<VId> {
        debug_assert!(self.frontier_is_consistent());
        (0..self.embedding.len())
            .filter(|&u| self.embedding[u].is_none() && self.frontier[u].is_extendable())
            .map(|u| (self.feasible_count(u), u))
            .filter(|&(count, _)| count > 0)
            .min()
            .map(|(_, u)| u)
    }

    fn feasible_count(&self, u: VId) -> usize {
        self.frontier[u]
            .candidates()
            .iter()
            .filter(|&&x| !self.used[x])
            .count()
    }

    /// Tests that every unassigned vertex caches exactly its extendable candidates, once the
    /// vertices used since the entry was filled are skipped.
    fn frontier_is_consistent(&self) -> bool {
        (0..self.embedding.len())
            .filter(|&u| u != self.dag.root() && self.embedding[u].is_none())
            .all(|u| {
                let cached = self.frontier[u]
                    .candidates()
                    .iter()
                    .copied()
                    .filter(|&x| !self.used[x]);
                if self.parents_assigned(u) {
                    cached.eq(self.extendable_candidates(u))
                } else {
                    cached.count() == 0
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{backtrack::CollectSink, input::GraphRecords};

    fn create_graph(labels: &[u64], edges: &[(VId, VId)]) -> Graph {
        Graph::from_data_records(&records(labels, edges))
    }

    fn records(labels: &[u64], edges: &[(VId, VId)]) -> GraphRecords {
        GraphRecords::new(
            0,
            labels.len(),
            labels.iter().copied().enumerate().collect(),
            edges.iter().map(|&(u, v)| (u, v, 0)).collect(),
        )
    }

    fn label_candidates(data: &Graph, query: &Graph) -> CandidateSet {
        CandidateSet::new(
            (0..query.num_vertices())
                .map(|u| {
                    (0..data.num_vertices())
                        .filter(|&v| data.label(v) == query.label(u))
                        .collect()
                })
                .collect(),
        )
    }

    fn run(data: &Graph, query: &Graph, cap: usize) -> (Outcome, Vec<Vec<VId>>) {
        let cs = label_candidates(data, query);
        let dag = Dag::new(query, &cs).unwrap();
        let mut sink = CollectSink::new();
        let outcome = Backtrack::new(data, &dag, &cs)
            .unwrap()
            .cap(cap)
            .enumerate(&mut sink)
            .unwrap();
        assert_eq!(sink.query_size(), Some(query.num_vertices()));
        (outcome, sink.into_embeddings())
    }

    #[test]
    fn test_triangle() {
        let data = create_graph(&[0, 0, 0], &[(0, 1), (1, 2), (2, 0)]);
        let query = Graph::from_query_records(
            &records(&[0, 0, 0], &[(0, 1), (1, 2), (2, 0)]),
            data.label_map(),
        );
        let (outcome, mut embeddings) = run(&data, &query, DEFAULT_CAP);
        assert_eq!((outcome.found(), outcome.capped()), (6, false));
        embeddings.sort();
        assert_eq!(
            embeddings,
            [
                [0, 1, 2],
                [0, 2, 1],
                [1, 0, 2],
                [1, 2, 0],
                [2, 0, 1],
                [2, 1, 0]
            ]
        );
    }

    #[test]
    fn test_sibling_takes_cached_candidate() {
        // A star with two leaves of the same label: both leaves cache [1, 2] after the center is
        // assigned, and the second leaf has to skip whatever the first one took.
        let data = create_graph(&[0, 1, 1], &[(0, 1), (0, 2)]);
        let query = Graph::from_query_records(
            &records(&[0, 1, 1], &[(0, 1), (0, 2)]),
            data.label_map(),
        );
        let (outcome, embeddings) = run(&data, &query, DEFAULT_CAP);
        assert_eq!(outcome.found(), 2);
        assert_eq!(embeddings, [[0, 1, 2], [0, 2, 1]]);
    }

    #[test]
    fn test_selection_counts_unused_candidates() {
        // u1 and u3 share the candidates 1, 2 and 3. Once u1 takes 1, u3 has two feasible
        // candidates left against three for u2, so u3 is expanded before u2.
        let data = create_graph(
            &[0, 1, 1, 1, 2, 2, 2],
            &[(0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (0, 6)],
        );
        let query = Graph::from_query_records(
            &records(&[0, 1, 2, 1], &[(0, 1), (0, 2), (0, 3)]),
            data.label_map(),
        );
        let (outcome, embeddings) = run(&data, &query, DEFAULT_CAP);
        assert_eq!(outcome.found(), 18);
        assert_eq!(
            embeddings[..4],
            [[0, 1, 4, 2], [0, 1, 5, 2], [0, 1, 6, 2], [0, 1, 4, 3]]
        );
    }

    #[test]
    fn test_cap() {
        let data = create_graph(&[0, 0, 0], &[(0, 1), (1, 2), (2, 0)]);
        let query = Graph::from_query_records(
            &records(&[0, 0], &[(0, 1)]),
            data.label_map(),
        );
        let (outcome, embeddings) = run(&data, &query, 4);
        assert_eq!((outcome.found(), outcome.capped()), (4, true));
        assert_eq!(embeddings.len(), 4);
        let (outcome, embeddings) = run(&data, &query, 6);
        assert_eq!((outcome.found(), outcome.capped()), (6, true));
        assert_eq!(embeddings.len(), 6);
        let (outcome, _) = run(&data, &query, 7);
        assert_eq!((outcome.found(), outcome.capped()), (6, false));
        let (outcome, embeddings) = run(&data, &query, 0);
        assert_eq!((outcome.found(), outcome.capped()), (0, true));
        assert!(embeddings.is_empty());
    }

    #[test]
    fn test_invalid_label() {
        let data = create_graph(&[0, 0], &[(0, 1)]);
        let query = Graph::from_query_records(
            &records(&[0, 9], &[(0, 1)]),
            data.label_map(),
        );
        let (outcome, embeddings) = run(&data, &query, DEFAULT_CAP);
        assert_eq!((outcome.found(), outcome.capped()), (0, false));
        assert!(embeddings.is_empty());
    }

    #[test]
    fn test_repeated_enumeration() {
        let data = create_graph(
            &[0, 1, 0, 1, 0],
            &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 1), (0, 3)],
        );
        let query = Graph::from_query_records(
            &records(&[0, 1, 0], &[(0, 1), (1, 2)]),
            data.label_map(),
        );
        let cs = label_candidates(&data, &query);
        let dag = Dag::new(&query, &cs).unwrap();
        let mut backtrack = Backtrack::new(&data, &dag, &cs).unwrap();
        let (mut first, mut second) = (CollectSink::new(), CollectSink::new());
        let a = backtrack.enumerate(&mut first).unwrap();
        let b = backtrack.enumerate(&mut second).unwrap();
        assert_eq!(a, b);
        assert!(a.found() > 0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_candidate_out_of_range() {
        let data = create_graph(&[0, 0], &[(0, 1)]);
        let query = Graph::from_query_records(
            &records(&[0, 0], &[(0, 1)]),
            data.label_map(),
        );
        let cs = CandidateSet::new(vec![vec![0, 1], vec![0, 2]]);
        let dag = Dag::new(&query, &cs).unwrap();
        assert!(Backtrack::new(&data, &dag, &cs).is_err());
    }
}
