use crate::types::{ELabel, RawLabel, VId};

/// The records of one graph file, in file order.
#[derive(Debug, PartialEq, Default, Clone)]
pub struct GraphRecords {
    id: i64,
    num_vertices: usize,
    vertices: Vec<(VId, RawLabel)>,
    edges: Vec<(VId, VId, ELabel)>,
}

impl GraphRecords {
    pub fn new(
        id: i64,
        num_vertices: usize,
        vertices: Vec<(VId, RawLabel)>,
        edges: Vec<(VId, VId, ELabel)>,
    ) -> Self {
        Self {
            id,
            num_vertices,
            vertices,
            edges,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub fn vertices(&self) -> &[(VId, RawLabel)] {
        &self.vertices
    }

    pub fn edges(&self) -> &[(VId, VId, ELabel)] {
        &self.edges
    }
}
