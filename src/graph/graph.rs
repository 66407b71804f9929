use super::{GraphInfo, LabelMap};
use crate::{
    error::Result,
    input::{parse_graph, GraphRecords},
    source::Source,
    tools::GroupBy,
    types::{VId, VLabel, INVALID_VLABEL, UNRECORDED_VLABEL},
};
use log::{info, warn};
use rayon::prelude::*;
use std::{cmp::Reverse, path::Path};

/// A contiguous run of neighbors sharing one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct VLabelPosLen {
    vlabel: VLabel,
    pos: usize,
    len: usize,
}

/// An immutable undirected vertex-labeled graph in compressed adjacency form.
///
/// The layout is:
///
/// ```text
///            offsets[v]                          offsets[v + 1]
///                 |                                    |
///                 v                                    v
/// neighbors: ... | l0 l0 l0 | l1 | l3 l3 | ...         | ...
///                 \_ run _/  \run/ \run_/
///
/// runs[label_offsets[v]..label_offsets[v + 1]]:  (l0, pos, 3) (l1, pos, 1) (l3, pos, 2)
/// ```
///
/// Within the block of `v`, neighbors are sorted by label ascending, then degree descending,
/// then id ascending. Every vertex has one [`VLabelPosLen`] per distinct neighbor label, so
/// edge tests only look at neighbors that carry the right label.
#[derive(Debug, Clone)]
pub struct Graph {
    labels: Vec<VLabel>,
    offsets: Vec<usize>,
    neighbors: Vec<VId>,
    label_offsets: Vec<usize>,
    runs: Vec<VLabelPosLen>,
    label_frequency: Vec<usize>,
    label_map: LabelMap,
}

impl Graph {
    /// Builds a data graph, remapping its labels onto a dense range of its own.
    ///
    /// Vertices without a vertex record get [`UNRECORDED_VLABEL`].
    pub fn from_data_records(records: &GraphRecords) -> Self {
        Self::build(records, LabelMap::from_records(records), UNRECORDED_VLABEL)
    }

    /// Builds a query graph whose labels are remapped through the data graph's `label_map`.
    ///
    /// Labels the data graph lacks, and vertices without a vertex record, get [`INVALID_VLABEL`].
    pub fn from_query_records(records: &GraphRecords, label_map: &LabelMap) -> Self {
        Self::build(records, label_map.clone(), INVALID_VLABEL)
    }

    /// Loads and builds a data graph.
    pub fn open_data<P: AsRef<Path>>(path: P) -> Result<Self> {
        let records = parse_graph(Source::open(path)?.as_str()?)?;
        let graph = Self::from_data_records(&records);
        info!("data graph {}: {}", records.id(), graph.info());
        if graph.label_map().is_empty() {
            warn!("data graph {} has no vertex records", records.id());
        }
        Ok(graph)
    }

    /// Loads and builds a query graph against the data graph's `label_map`.
    pub fn open_query<P: AsRef<Path>>(path: P, label_map: &LabelMap) -> Result<Self> {
        let records = parse_graph(Source::open(path)?.as_str()?)?;
        let graph = Self::from_query_records(&records, label_map);
        info!("query graph {}: {}", records.id(), graph.info());
        Ok(graph)
    }

    pub fn num_vertices(&self) -> usize {
        self.labels.len()
    }

    /// Returns the number of undirected edges.
    pub fn num_edges(&self) -> usize {
        self.neighbors.len() / 2
    }

    /// Returns the number of distinct labels carried by the vertices of this graph.
    pub fn num_labels(&self) -> usize {
        self.label_frequency.iter().filter(|&&f| f > 0).count()
    }

    pub fn label(&self, v: VId) -> VLabel {
        self.labels[v]
    }

    pub fn degree(&self, v: VId) -> usize {
        self.offsets[v + 1] - self.offsets[v]
    }

    /// Returns the occurrence of vertices with `label`.
    pub fn label_frequency(&self, label: VLabel) -> usize {
        self.label_frequency
            .get(label as usize)
            .copied()
            .unwrap_or(0)
    }

    pub fn label_map(&self) -> &LabelMap {
        &self.label_map
    }

    /// Returns all neighbors of `v` in block order.
    pub fn neighbors(&self, v: VId) -> &[VId] {
        &self.neighbors[self.offsets[v]..self.offsets[v + 1]]
    }

    /// Returns the neighbors of `v` carrying `label`, sorted by degree descending then id.
    pub fn neighbors_with_label(&self, v: VId, label: VLabel) -> &[VId] {
        let runs = &self.runs[self.label_offsets[v]..self.label_offsets[v + 1]];
        runs.binary_search_by_key(&label, |run| run.vlabel)
            .map(|i| {
                let VLabelPosLen { pos, len, .. } = runs[i];
                &self.neighbors[pos..pos + len]
            })
            .unwrap_or(&[])
    }

    /// Tests whether `u` and `v` are adjacent.
    ///
    /// Only the neighbors of `u` sharing `v`'s label are searched.
    pub fn is_neighbor(&self, u: VId, v: VId) -> bool {
        self.neighbors_with_label(u, self.label(v))
            .binary_search_by_key(&(Reverse(self.degree(v)), v), |&n| {
                (Reverse(self.degree(n)), n)
            })
            .is_ok()
    }

    /// Returns an iterator visiting every undirected edge once, as `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (VId, VId)> + '_ {
        (0..self.num_vertices()).flat_map(move |u| {
            self.neighbors(u)
                .iter()
                .filter(move |&&v| u < v)
                .map(move |&v| (u, v))
        })
    }

    pub fn info(&self) -> GraphInfo {
        GraphInfo::new(self.num_vertices(), self.num_edges(), self.num_labels())
    }
}

// Private methods.
impl Graph {
    fn build(records: &GraphRecords, label_map: LabelMap, unrecorded: VLabel) -> Self {
        let num_vertices = records.num_vertices();
        let labels = create_labels(records, &label_map, unrecorded);
        let mut label_frequency = vec![0; label_map.len()];
        for &label in &labels {
            if let Some(f) = label_frequency.get_mut(label as usize) {
                *f += 1;
            }
        }
        let mut adj = create_adjacency_lists(records);
        let degrees: Vec<usize> = adj.iter().map(Vec::len).collect();
        adj.par_iter_mut().for_each(|neighbors| {
            neighbors.sort_unstable_by_key(|&n| (labels[n], Reverse(degrees[n]), n))
        });
        let mut offsets = Vec::with_capacity(num_vertices + 1);
        let mut neighbors = Vec::with_capacity(degrees.iter().sum());
        let mut label_offsets = Vec::with_capacity(num_vertices + 1);
        let mut runs = vec![];
        offsets.push(0);
        label_offsets.push(0);
        for block in &adj {
            let base = neighbors.len();
            for (vlabel, range) in GroupBy::new(block, |&n| labels[n]) {
                runs.push(VLabelPosLen {
                    vlabel,
                    pos: base + range.start,
                    len: range.len(),
                });
            }
            neighbors.extend_from_slice(block);
            offsets.push(neighbors.len());
            label_offsets.push(runs.len());
        }
        Self {
            labels,
            offsets,
            neighbors,
            label_offsets,
            runs,
            label_frequency,
            label_map,
        }
    }
}

fn create_labels(
    records: &GraphRecords,
    label_map: &LabelMap,
    unrecorded: VLabel,
) -> Vec<VLabel> {
    let mut labels = vec![unrecorded; records.num_vertices()];
    let mut seen = vec![false; records.num_vertices()];
    let mut num_unknown = 0;
    for &(vid, raw) in records.vertices() {
        labels[vid] = label_map.get_or_invalid(raw);
        if labels[vid] == INVALID_VLABEL {
            num_unknown += 1;
        }
        seen[vid] = true;
    }
    let num_missing = seen.iter().filter(|&&s| !s).count();
    if num_missing > 0 {
        warn!("{} vertices have no vertex record and will never match", num_missing);
    }
    if num_unknown > 0 {
        warn!("{} vertices carry a label absent from the data graph", num_unknown);
    }
    labels
}

/// Collects the undirected adjacency lists, sorted by id and without duplicate edges.
fn create_adjacency_lists(records: &GraphRecords) -> Vec<Vec<VId>> {
    let mut adj = vec![vec![]; records.num_vertices()];
    let mut num_self_loops = 0;
    for &(v1, v2, _) in records.edges() {
        if v1 == v2 {
            num_self_loops += 1;
        } else {
            adj[v1].push(v2);
            adj[v2].push(v1);
        }
    }
    if num_self_loops > 0 {
        warn!("dropped {} self-loop edge records", num_self_loops);
    }
    adj.par_iter_mut().for_each(|neighbors: &mut Vec<VId>| {
        neighbors.sort_unstable();
        neighbors.dedup();
    });
    adj
}
