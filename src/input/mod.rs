//! Readers for the line-oriented graph and candidate-set formats.

pub use parser::{parse_candidates, parse_graph, Rule};
pub use records::GraphRecords;

mod parser;
mod records;
