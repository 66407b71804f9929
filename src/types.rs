//! Various types related to subgraph matching.

/// The vertex id type.
///
/// Vertex ids are dense: a graph with `n` vertices uses exactly `0..n`.
pub type VId = usize;

/// The dense vertex label type, i.e. the rank of a raw label in the data graph's label set.
pub type VLabel = u32;

/// The vertex label as it appears in the input files.
pub type RawLabel = u64;

/// The edge label type. Edge labels are parsed but not used for matching.
pub type ELabel = i64;

/// The label given to query vertices whose raw label never occurs in the data graph, or that
/// have no vertex record.
///
/// No data vertex ever carries it.
pub const INVALID_VLABEL: VLabel = VLabel::MAX;

/// The label given to data vertices that have no vertex record.
///
/// No query vertex ever carries it, so such data vertices never match.
pub const UNRECORDED_VLABEL: VLabel = VLabel::MAX - 1;

/// Tests whether `label` is a dense label of the data graph rather than a sentinel.
pub fn is_matchable(label: VLabel) -> bool {
    label < UNRECORDED_VLABEL
}
