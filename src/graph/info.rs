use derive_more::Display;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[display(
    fmt = "num_vertices: {}, num_edges: {}, num_vlabels: {}",
    num_vertices,
    num_edges,
    num_vlabels
)]
pub struct GraphInfo {
    num_vertices: usize,
    num_edges: usize,
    num_vlabels: usize,
}

impl GraphInfo {
    pub fn new(num_vertices: usize, num_edges: usize, num_vlabels: usize) -> Self {
        Self {
            num_vertices,
            num_edges,
            num_vlabels,
        }
    }
}
