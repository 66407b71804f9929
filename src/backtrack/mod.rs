//! Enumeration of embeddings by backtracking over the query DAG.

mod engine;
mod frontier;
mod sink;
mod verify;

pub use engine::{Backtrack, Outcome, DEFAULT_CAP};
pub use frontier::FrontierEntry;
pub use sink::{CheckedSink, CollectSink, EmbeddingSink, WriteSink};
pub use verify::{verify, Violation};
