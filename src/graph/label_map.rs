use crate::{
    input::GraphRecords,
    types::{RawLabel, VLabel, INVALID_VLABEL},
};
use std::collections::BTreeSet;

/// The remap table from raw input labels to the dense range `0..k`.
///
/// The table is built from the data graph alone; the query graph is remapped through the data
/// graph's table so both graphs share one label domain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelMap {
    /// Distinct raw labels in ascending order; a raw label's dense label is its position.
    raw_labels: Vec<RawLabel>,
}

impl LabelMap {
    /// Collects the distinct vertex labels of a data graph.
    pub fn from_records(records: &GraphRecords) -> Self {
        Self::from_raw_labels(records.vertices().iter().map(|&(_, raw)| raw))
    }

    pub fn from_raw_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = RawLabel>,
    {
        Self {
            raw_labels: labels
                .into_iter()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
        }
    }

    /// Returns the dense label of `raw`, if the data graph has it.
    pub fn get(&self, raw: RawLabel) -> Option<VLabel> {
        self.raw_labels
            .binary_search(&raw)
            .ok()
            .map(|rank| rank as VLabel)
    }

    /// Like [`get`](Self::get), but maps unknown labels to [`INVALID_VLABEL`].
    pub fn get_or_invalid(&self, raw: RawLabel) -> VLabel {
        self.get(raw).unwrap_or(INVALID_VLABEL)
    }

    pub fn len(&self) -> usize {
        self.raw_labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_labels.is_empty()
    }
}
