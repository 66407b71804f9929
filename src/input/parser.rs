use super::GraphRecords;
use crate::{
    error::{Error, Result},
    types::{ELabel, RawLabel, VId},
};
use pest::{
    iterators::{Pair, Pairs},
    Parser,
};
use pest_derive::Parser;
use std::{fmt::Display, str::FromStr};

#[derive(Parser)]
#[grammar = "input/igraph.pest"]
struct IGraphParser;

/// Parses a graph file.
pub fn parse_graph(input: &str) -> Result<GraphRecords> {
    let (mut id, mut num_vertices) = (0, 0);
    let mut vertices: Vec<(VId, RawLabel)> = vec![];
    let mut edges: Vec<(VId, VId, ELabel)> = vec![];
    for pair in top_level(Rule::graph, input)? {
        match pair.as_rule() {
            Rule::graph_header => {
                let mut fields = pair.into_inner();
                id = number(fields.next())?;
                num_vertices = vertex_count(fields.next(), input)?;
            }
            Rule::vertex => {
                let line = line_of(&pair);
                let mut fields = pair.into_inner();
                let vid = vertex_id(fields.next(), num_vertices, line)?;
                vertices.push((vid, number(fields.next())?));
            }
            Rule::edge => {
                let line = line_of(&pair);
                let mut fields = pair.into_inner();
                let v1 = vertex_id(fields.next(), num_vertices, line)?;
                let v2 = vertex_id(fields.next(), num_vertices, line)?;
                edges.push((v1, v2, number(fields.next())?));
            }
            Rule::EOI => {}
            _ => unreachable!(),
        }
    }
    Ok(GraphRecords::new(id, num_vertices, vertices, edges))
}

/// Parses a candidate-set file into one candidate list per query vertex.
///
/// Query vertices without a `c` record get an empty list.
pub fn parse_candidates(input: &str) -> Result<Vec<Vec<VId>>> {
    let mut lists: Vec<Option<Vec<VId>>> = vec![];
    for pair in top_level(Rule::candidates, input)? {
        match pair.as_rule() {
            Rule::candidates_header => {
                lists = vec![None; vertex_count(pair.into_inner().next(), input)?];
            }
            Rule::candidate_list => {
                let line = line_of(&pair);
                let mut fields = pair.into_inner();
                let u = vertex_id(fields.next(), lists.len(), line)?;
                let size: usize = number(fields.next())?;
                let list = fields.map(|x| number(Some(x))).collect::<Result<Vec<VId>>>()?;
                if list.len() != size {
                    return Err(Error::Format(format!(
                        "line {}: candidate record of u{} declares {} vertices but lists {}",
                        line,
                        u,
                        size,
                        list.len()
                    )));
                }
                if lists[u].replace(list).is_some() {
                    return Err(Error::Format(format!(
                        "line {}: duplicate candidate record for u{}",
                        line, u
                    )));
                }
            }
            Rule::EOI => {}
            _ => unreachable!(),
        }
    }
    Ok(lists.into_iter().map(Option::unwrap_or_default).collect())
}

fn top_level(rule: Rule, input: &str) -> Result<Pairs<'_, Rule>> {
    IGraphParser::parse(rule, input)?
        .next()
        .map(|pair| pair.into_inner())
        .ok_or_else(|| Error::Format(String::from("empty input")))
}

fn line_of(pair: &Pair<Rule>) -> usize {
    pair.as_span().start_pos().line_col().0
}

fn number<T>(pair: Option<Pair<Rule>>) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let pair = pair.ok_or_else(|| Error::Format(String::from("missing field")))?;
    pair.as_str().parse().map_err(|e| {
        Error::Format(format!(
            "line {}: `{}`: {}",
            line_of(&pair),
            pair.as_str(),
            e
        ))
    })
}

/// Reads the vertex count of a `t` header.
///
/// The count sizes per-vertex tables, so it may not exceed the length of the input.
fn vertex_count(pair: Option<Pair<Rule>>, input: &str) -> Result<usize> {
    let pair = pair.ok_or_else(|| Error::Format(String::from("missing field")))?;
    let line = line_of(&pair);
    let count: usize = number(Some(pair))?;
    if count <= input.len() {
        Ok(count)
    } else {
        Err(Error::Format(format!(
            "line {}: header declares {} vertices in {} bytes of input",
            line,
            count,
            input.len()
        )))
    }
}

fn vertex_id(pair: Option<Pair<Rule>>, num_vertices: usize, line: usize) -> Result<VId> {
    let vid: VId = number(pair)?;
    if vid < num_vertices {
        Ok(vid)
    } else {
        Err(Error::Format(format!(
            "line {}: vertex {} out of range for {} vertices",
            line, vid, num_vertices
        )))
    }
}
