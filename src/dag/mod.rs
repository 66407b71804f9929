//! The rooted query DAG.

pub use dag::Dag;
pub use priority::PriorityEntry;

mod dag;
mod priority;
