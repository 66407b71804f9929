use super::verify;
use crate::{
    error::{Error, Result},
    graph::Graph,
    types::VId,
};
use std::io::Write;

/// Receives the output of an enumeration.
///
/// `header` is called exactly once, before any embedding. Position `u` of an embedding is the
/// data vertex query vertex `u` is mapped to.
pub trait EmbeddingSink {
    fn header(&mut self, query_size: usize) -> Result<()>;

    fn embedding(&mut self, embedding: &[VId]) -> Result<()>;

    /// Called once the enumeration stops.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: EmbeddingSink + ?Sized> EmbeddingSink for &mut S {
    fn header(&mut self, query_size: usize) -> Result<()> {
        (**self).header(query_size)
    }

    fn embedding(&mut self, embedding: &[VId]) -> Result<()> {
        (**self).embedding(embedding)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// Writes `t <query size>` followed by one `a <v0> <v1> ...` line per embedding.
pub struct WriteSink<W: Write> {
    buf: W,
}

impl<W: Write> WriteSink<W> {
    pub fn new(buf: W) -> Self {
        Self { buf }
    }

    pub fn into_inner(self) -> W {
        self.buf
    }
}

fn write_row<W: Write>(buf: &mut W, row: &[VId]) -> std::io::Result<()> {
    write!(buf, "a")?;
    for &x in row {
        write!(buf, " {}", x)?;
    }
    writeln!(buf)
}

impl<W: Write> EmbeddingSink for WriteSink<W> {
    fn header(&mut self, query_size: usize) -> Result<()> {
        writeln!(self.buf, "t {}", query_size).map_err(Error::Output)
    }

    fn embedding(&mut self, embedding: &[VId]) -> Result<()> {
        write_row(&mut self.buf, embedding).map_err(Error::Output)
    }

    fn finish(&mut self) -> Result<()> {
        self.buf.flush().map_err(Error::Output)
    }
}

/// Keeps every embedding in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectSink {
    query_size: Option<usize>,
    embeddings: Vec<Vec<VId>>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the query size announced by the header, if it was written.
    pub fn query_size(&self) -> Option<usize> {
        self.query_size
    }

    pub fn embeddings(&self) -> &[Vec<VId>] {
        &self.embeddings
    }

    pub fn into_embeddings(self) -> Vec<Vec<VId>> {
        self.embeddings
    }
}

impl EmbeddingSink for CollectSink {
    fn header(&mut self, query_size: usize) -> Result<()> {
        self.query_size = Some(query_size);
        Ok(())
    }

    fn embedding(&mut self, embedding: &[VId]) -> Result<()> {
        self.embeddings.push(embedding.to_vec());
        Ok(())
    }
}

/// Verifies every embedding against the graphs before passing it on.
///
/// The first embedding that fails [`verify`] stops the enumeration with
/// [`Error::Violation`].
pub struct CheckedSink<'a, S> {
    data: &'a Graph,
    query: &'a Graph,
    inner: S,
}

impl<'a, S: EmbeddingSink> CheckedSink<'a, S> {
    pub fn new(data: &'a Graph, query: &'a Graph, inner: S) -> Self {
        Self { data, query, inner }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<'a, S: EmbeddingSink> EmbeddingSink for CheckedSink<'a, S> {
    fn header(&mut self, query_size: usize) -> Result<()> {
        self.inner.header(query_size)
    }

    fn embedding(&mut self, embedding: &[VId]) -> Result<()> {
        verify(self.data, self.query, embedding)?;
        self.inner.embedding(embedding)
    }

    fn finish(&mut self) -> Result<()> {
        self.inner.finish()
    }
}
