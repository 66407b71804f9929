//! The graph store shared by the data graph and the raw query graph.

pub use graph::Graph;
pub use info::GraphInfo;
pub use label_map::LabelMap;

mod graph;
mod info;
mod label_map;
