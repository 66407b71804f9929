//! DAG-guided subgraph matching.

pub mod backtrack;
pub mod candidate_set;
pub mod dag;
pub mod error;
pub mod graph;
pub mod input;
pub mod source;
pub mod types;

pub(crate) mod tools;
