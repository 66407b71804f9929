use crate::{
    graph::Graph,
    types::{is_matchable, VId, VLabel},
};
use derive_more::Display;
use itertools::Itertools;

/// The first condition an embedding was found to break.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum Violation {
    #[display(fmt = "{} entries for {} query vertices", len, expected)]
    Length { len: usize, expected: usize },
    #[display(fmt = "u{} is mapped to v{}, which is not a data vertex", u, v)]
    NoSuchVertex { u: VId, v: VId },
    #[display(
        fmt = "u{} has label {} but v{} has label {}",
        u,
        query_label,
        v,
        data_label
    )]
    Label {
        u: VId,
        v: VId,
        query_label: VLabel,
        data_label: VLabel,
    },
    #[display(fmt = "u{} and u{} are both mapped to v{}", u1, u2, v)]
    NotInjective { u1: VId, u2: VId, v: VId },
    #[display(
        fmt = "edge (u{}, u{}) is mapped to non-adjacent (v{}, v{})",
        u1,
        u2,
        v1,
        v2
    )]
    MissingEdge { u1: VId, u2: VId, v1: VId, v2: VId },
}

/// Checks a complete embedding from scratch.
///
/// Position `u` of `embedding` is the data vertex query vertex `u` is mapped to. Labels,
/// injectivity and every query edge are checked independently of the search that produced it.
pub fn verify(data: &Graph, query: &Graph, embedding: &[VId]) -> Result<(), Violation> {
    if embedding.len() != query.num_vertices() {
        return Err(Violation::Length {
            len: embedding.len(),
            expected: query.num_vertices(),
        });
    }
    for (u, &v) in embedding.iter().enumerate() {
        if v >= data.num_vertices() {
            return Err(Violation::NoSuchVertex { u, v });
        }
        if !is_matchable(query.label(u)) || query.label(u) != data.label(v) {
            return Err(Violation::Label {
                u,
                v,
                query_label: query.label(u),
                data_label: data.label(v),
            });
        }
    }
    if let Some((u1, u2)) = (0..embedding.len())
        .tuple_combinations()
        .find(|&(u1, u2)| embedding[u1] == embedding[u2])
    {
        return Err(Violation::NotInjective {
            u1,
            u2,
            v: embedding[u1],
        });
    }
    for (u1, u2) in query.edges() {
        let (v1, v2) = (embedding[u1], embedding[u2]);
        if !data.is_neighbor(v1, v2) {
            return Err(Violation::MissingEdge { u1, u2, v1, v2 });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::GraphRecords;

    /// Data: a square 0-1-2-3-0 with labels 1, 2, 1, 2. Query: a path u0 - u1 labelled 1, 2.
    fn create_graphs() -> (Graph, Graph) {
        let data = Graph::from_data_records(&GraphRecords::new(
            0,
            4,
            vec![(0, 1), (1, 2), (2, 1), (3, 2)],
            vec![(0, 1, 0), (1, 2, 0), (2, 3, 0), (3, 0, 0)],
        ));
        let query = Graph::from_query_records(
            &GraphRecords::new(1, 2, vec![(0, 1), (1, 2)], vec![(0, 1, 0)]),
            data.label_map(),
        );
        (data, query)
    }

    #[test]
    fn test_valid() {
        let (data, query) = create_graphs();
        assert_eq!(verify(&data, &query, &[0, 1]), Ok(()));
        assert_eq!(verify(&data, &query, &[2, 3]), Ok(()));
    }

    #[test]
    fn test_violations() {
        let (data, query) = create_graphs();
        assert_eq!(
            verify(&data, &query, &[0]),
            Err(Violation::Length {
                len: 1,
                expected: 2
            })
        );
        assert_eq!(
            verify(&data, &query, &[0, 9]),
            Err(Violation::NoSuchVertex { u: 1, v: 9 })
        );
        assert_eq!(
            verify(&data, &query, &[1, 0]),
            Err(Violation::Label {
                u: 0,
                v: 1,
                query_label: 0,
                data_label: 1
            })
        );
        assert_eq!(
            verify(&data, &query, &[0, 0]),
            Err(Violation::Label {
                u: 1,
                v: 0,
                query_label: 1,
                data_label: 0
            })
        );
    }

    #[test]
    fn test_not_injective_and_missing_edge() {
        let (data, _) = create_graphs();
        let query = Graph::from_query_records(
            &GraphRecords::new(1, 3, vec![(0, 1), (1, 1), (2, 2)], vec![(0, 2, 0), (1, 2, 0)]),
            data.label_map(),
        );
        assert_eq!(
            verify(&data, &query, &[0, 0, 1]),
            Err(Violation::NotInjective { u1: 0, u2: 1, v: 0 })
        );
        assert_eq!(verify(&data, &query, &[0, 2, 1]), Ok(()));
        let path = Graph::from_query_records(
            &GraphRecords::new(1, 2, vec![(0, 1), (1, 1)], vec![(0, 1, 0)]),
            data.label_map(),
        );
        assert_eq!(
            verify(&data, &path, &[0, 2]),
            Err(Violation::MissingEdge {
                u1: 0,
                u2: 1,
                v1: 0,
                v2: 2
            })
        );
    }

    #[test]
    fn test_sentinel_labels() {
        // Data vertex 1 has no record and query vertex u1 has a label the data graph lacks.
        let data =
            Graph::from_data_records(&GraphRecords::new(0, 2, vec![(0, 5)], vec![(0, 1, 0)]));
        let query = Graph::from_query_records(
            &GraphRecords::new(1, 2, vec![(0, 5), (1, 99)], vec![(0, 1, 0)]),
            data.label_map(),
        );
        assert!(matches!(
            verify(&data, &query, &[0, 1]),
            Err(Violation::Label { u: 1, v: 1, .. })
        ));
        let unrecorded = Graph::from_query_records(
            &GraphRecords::new(1, 2, vec![(0, 5)], vec![(0, 1, 0)]),
            data.label_map(),
        );
        assert!(matches!(
            verify(&data, &unrecorded, &[0, 1]),
            Err(Violation::Label { u: 1, v: 1, .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Violation::NotInjective { u1: 0, u2: 3, v: 7 }.to_string(),
            "u0 and u3 are both mapped to v7"
        );
    }
}
