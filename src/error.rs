//! Error management.

use crate::{backtrack::Violation, input::Rule};
use derive_more::Display;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display)]
pub enum Error {
    #[display(fmt = "cannot open {}: {}", path, source)]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[display(fmt = "cannot write output: {}", _0)]
    Output(std::io::Error),
    #[display(fmt = "{}", _0)]
    Syntax(Box<pest::error::Error<Rule>>),
    #[display(fmt = "malformed input: {}", _0)]
    Format(String),
    #[display(fmt = "the query graph has no vertices")]
    EmptyQuery,
    #[display(
        fmt = "the query graph is disconnected: {} of {} vertices reachable from the root",
        settled,
        total
    )]
    DisconnectedQuery { settled: usize, total: usize },
    #[display(fmt = "candidate set does not fit the graphs: {}", _0)]
    CandidateSetMismatch(String),
    #[display(fmt = "invalid embedding: {}", _0)]
    Violation(Violation),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { source, .. } => Some(source),
            Error::Output(e) => Some(e),
            Error::Syntax(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<pest::error::Error<Rule>> for Error {
    fn from(e: pest::error::Error<Rule>) -> Self {
        Error::Syntax(Box::new(e))
    }
}

impl From<Violation> for Error {
    fn from(v: Violation) -> Self {
        Error::Violation(v)
    }
}
