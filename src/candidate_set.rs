//! The precomputed candidate set.

use crate::{
    error::{Error, Result},
    input::parse_candidates,
    source::Source,
    types::VId,
};
use log::info;
use std::path::Path;

/// For every query vertex, the ordered data vertices that could realize it.
///
/// The candidate set is computed elsewhere and only read here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateSet {
    candidates: Vec<Vec<VId>>,
}

impl CandidateSet {
    pub fn new(candidates: Vec<Vec<VId>>) -> Self {
        Self { candidates }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let candidate_set = Self::new(parse_candidates(Source::open(path)?.as_str()?)?);
        info!(
            "candidate set: {} query vertices, {} candidates",
            candidate_set.num_vertices(),
            candidate_set.candidates.iter().map(Vec::len).sum::<usize>()
        );
        Ok(candidate_set)
    }

    /// Returns the number of query vertices covered.
    pub fn num_vertices(&self) -> usize {
        self.candidates.len()
    }

    /// Returns the number of candidates of `u`.
    pub fn size(&self, u: VId) -> usize {
        self.candidates[u].len()
    }

    /// Returns the `i`-th candidate of `u`.
    pub fn get(&self, u: VId, i: usize) -> VId {
        self.candidates[u][i]
    }

    pub fn candidates(&self, u: VId) -> &[VId] {
        &self.candidates[u]
    }

    /// Checks that there is one list per query vertex and that every candidate is a data vertex.
    pub fn check(&self, num_query_vertices: usize, num_data_vertices: usize) -> Result<()> {
        if self.num_vertices() != num_query_vertices {
            return Err(Error::CandidateSetMismatch(format!(
                "{} candidate lists for {} query vertices",
                self.num_vertices(),
                num_query_vertices
            )));
        }
        for (u, candidates) in self.candidates.iter().enumerate() {
            if let Some(&v) = candidates.iter().find(|&&v| v >= num_data_vertices) {
                return Err(Error::CandidateSetMismatch(format!(
                    "candidate {} of u{} is not one of the {} data vertices",
                    v, u, num_data_vertices
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_accessors() {
        let cs = CandidateSet::new(vec![vec![3, 1], vec![]]);
        assert_eq!(cs.num_vertices(), 2);
        assert_eq!((cs.size(0), cs.size(1)), (2, 0));
        assert_eq!((cs.get(0, 0), cs.get(0, 1)), (3, 1));
        assert_eq!(cs.candidates(0), [3, 1]);
    }

    #[test]
    fn test_check() {
        let cs = CandidateSet::new(vec![vec![0, 4], vec![2]]);
        assert!(cs.check(2, 5).is_ok());
        assert!(matches!(cs.check(3, 5), Err(Error::CandidateSetMismatch(_))));
        assert!(matches!(cs.check(2, 4), Err(Error::CandidateSetMismatch(_))));
    }

    #[test]
    fn test_open() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "t 2\nc 0 3 5 6 7\nc 1 1 8\n").unwrap();
        let cs = CandidateSet::open(file.path()).unwrap();
        assert_eq!(cs, CandidateSet::new(vec![vec![5, 6, 7], vec![8]]));
    }
}
