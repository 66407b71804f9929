use super::PriorityEntry;
use crate::{
    candidate_set::CandidateSet,
    error::{Error, Result},
    graph::Graph,
    types::VId,
};
use itertools::Itertools;
use log::debug;

/// A rooted acyclic orientation of the query graph.
///
/// Every query edge appears exactly once, pointing from the endpoint settled first to the one
/// settled later during a depth-first traversal from the root. The root is the only vertex
/// without parents, and every vertex is reachable from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dag {
    root: VId,
    parents: Vec<Vec<VId>>,
    children: Vec<Vec<VId>>,
    order: Vec<VId>,
}

impl Dag {
    /// Orients `query`, preferring vertices with a low [`PriorityEntry`].
    ///
    /// The root is the vertex with the lowest priority. From the vertex on top of the stack the
    /// traversal settles its unsettled neighbor with the lowest priority, and pops once none is
    /// left. Parent and child lists are kept in ascending priority order.
    pub fn new(query: &Graph, candidate_set: &CandidateSet) -> Result<Self> {
        let num_vertices = query.num_vertices();
        if candidate_set.num_vertices() != num_vertices {
            return Err(Error::CandidateSetMismatch(format!(
                "{} candidate lists for {} query vertices",
                candidate_set.num_vertices(),
                num_vertices
            )));
        }
        let priorities: Vec<_> = (0..num_vertices)
            .map(|u| PriorityEntry::new(query, candidate_set, u))
            .collect();
        let root = priorities
            .iter()
            .min()
            .map(PriorityEntry::vertex)
            .ok_or(Error::EmptyQuery)?;
        let order = settle(query, &priorities, root);
        if order.len() != num_vertices {
            return Err(Error::DisconnectedQuery {
                settled: order.len(),
                total: num_vertices,
            });
        }
        let mut rank = vec![0; num_vertices];
        for (i, &u) in order.iter().enumerate() {
            rank[u] = i;
        }
        let (mut parents, mut children) = (vec![vec![]; num_vertices], vec![vec![]; num_vertices]);
        for u in 0..num_vertices {
            for &w in query.neighbors(u) {
                if rank[w] < rank[u] {
                    parents[u].push(w);
                } else {
                    children[u].push(w);
                }
            }
            parents[u].sort_by_key(|&w| priorities[w]);
            children[u].sort_by_key(|&w| priorities[w]);
        }
        let dag = Self {
            root,
            parents,
            children,
            order,
        };
        debug!(
            "dag root: u{} (score {}), settle order: {}",
            root,
            priorities[root].score(),
            dag.order.iter().map(|u| format!("u{}", u)).join(" ")
        );
        debug_assert!(dag.is_well_formed());
        Ok(dag)
    }

    pub fn root(&self) -> VId {
        self.root
    }

    pub fn num_vertices(&self) -> usize {
        self.parents.len()
    }

    pub fn parents(&self, u: VId) -> &[VId] {
        &self.parents[u]
    }

    pub fn children(&self, u: VId) -> &[VId] {
        &self.children[u]
    }

    /// Returns the vertices in the order they were settled, starting with the root.
    pub fn order(&self) -> &[VId] {
        &self.order
    }

    /// Tests whether `u` and `v` are joined by an edge in either direction.
    pub fn is_neighbor(&self, u: VId, v: VId) -> bool {
        self.parents[u].contains(&v) || self.parents[v].contains(&u)
    }

    /// Checks the structural invariants: a single parentless root, mirrored parent and child
    /// lists, and no cycles.
    pub fn is_well_formed(&self) -> bool {
        let n = self.num_vertices();
        if self.root >= n || self.children.len() != n {
            return false;
        }
        let single_root = (0..n).all(|u| self.parents[u].is_empty() == (u == self.root));
        let mirrored = (0..n).all(|u| {
            self.children[u]
                .iter()
                .all(|&c| self.parents[c].contains(&u))
                && self.parents[u]
                    .iter()
                    .all(|&p| self.children[p].contains(&u))
        });
        single_root && mirrored && self.is_acyclic()
    }
}

// Private methods.
impl Dag {
    fn is_acyclic(&self) -> bool {
        let mut in_deg: Vec<usize> = self.parents.iter().map(Vec::len).collect();
        let mut ready: Vec<VId> = (0..in_deg.len()).filter(|&u| in_deg[u] == 0).collect();
        let mut visited = 0;
        while let Some(u) = ready.pop() {
            visited += 1;
            for &c in &self.children[u] {
                in_deg[c] -= 1;
                if in_deg[c] == 0 {
                    ready.push(c);
                }
            }
        }
        visited == in_deg.len()
    }
}

/// Returns the vertices reachable from `root` in settle order.
fn settle(query: &Graph, priorities: &[PriorityEntry], root: VId) -> Vec<VId> {
    let mut settled = vec![false; query.num_vertices()];
    let mut order = vec![root];
    let mut stack = vec![root];
    settled[root] = true;
    while let Some(&v) = stack.last() {
        let next = query
            .neighbors(v)
            .iter()
            .filter(|&&w| !settled[w])
            .map(|&w| priorities[w])
            .min();
        match next {
            Some(entry) => {
                let w = entry.vertex();
                settled[w] = true;
                order.push(w);
                stack.push(w);
            }
            None => {
                stack.pop();
            }
        }
    }
    order
}

impl std::fmt::Display for Dag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "root: u{}", self.root)?;
        for &u in &self.order {
            writeln!(
                f,
                "u{}: parents [{}] children [{}]",
                u,
                self.parents[u].iter().map(|p| format!("u{}", p)).join(", "),
                self.children[u].iter().map(|c| format!("u{}", c)).join(", ")
            )?;
        }
        Ok(())
    }
}
