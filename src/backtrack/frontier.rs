use crate::types::VId;
use std::mem;

/// The extendable candidates of one query vertex.
///
/// An entry is filled once every parent of its vertex is assigned, and holds the candidates
/// adjacent to all parents' images that were unused at that moment. It is emptied when a parent
/// is unassigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontierEntry {
    candidates: Vec<VId>,
}

impl FrontierEntry {
    /// Returns the number of cached candidates; zero means not extendable.
    pub fn count(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_extendable(&self) -> bool {
        !self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[VId] {
        &self.candidates
    }

    pub fn clear(&mut self) {
        self.candidates.clear();
    }

    /// Replaces the cached list, handing back the previous one for reuse.
    pub fn replace(&mut self, candidates: Vec<VId>) -> Vec<VId> {
        mem::replace(&mut self.candidates, candidates)
    }

    /// Moves the cached list out, leaving the entry empty.
    pub fn take(&mut self) -> Vec<VId> {
        mem::take(&mut self.candidates)
    }
}
