use dgsm::{
    backtrack::{Backtrack, CheckedSink, WriteSink},
    candidate_set::CandidateSet,
    dag::Dag,
    error::Error,
    graph::Graph,
};
use std::{fs, path::PathBuf};
use tempfile::TempDir;

const DATA: &str = "\
t 0 3
v 0 5
v 1 5
v 2 5
e 0 1 0
e 1 2 0
";

const QUERY: &str = "\
t 1 2
v 0 5
v 1 5
e 0 1 0
";

const CANDIDATES: &str = "\
t 2
c 0 3 0 1 2
c 1 3 0 1 2
";

fn create_files(dir: &TempDir, data: &str, query: &str, candidates: &str) -> [PathBuf; 3] {
    let paths = [
        dir.path().join("data.graph"),
        dir.path().join("query.graph"),
        dir.path().join("query.cs"),
    ];
    for (path, contents) in paths.iter().zip(&[data, query, candidates]) {
        fs::write(path, contents).unwrap();
    }
    paths
}

fn run(paths: &[PathBuf; 3], check: bool) -> Result<String, Error> {
    let data = Graph::open_data(&paths[0])?;
    let query = Graph::open_query(&paths[1], data.label_map())?;
    let cs = CandidateSet::open(&paths[2])?;
    let dag = Dag::new(&query, &cs)?;
    let mut backtrack = Backtrack::new(&data, &dag, &cs)?;
    let buf = if check {
        let mut sink = CheckedSink::new(&data, &query, WriteSink::new(vec![]));
        backtrack.enumerate(&mut sink)?;
        sink.into_inner().into_inner()
    } else {
        let mut sink = WriteSink::new(vec![]);
        backtrack.enumerate(&mut sink)?;
        sink.into_inner()
    };
    Ok(String::from_utf8(buf).unwrap())
}

#[test]
fn test_output() {
    let dir = TempDir::new().unwrap();
    let paths = create_files(&dir, DATA, QUERY, CANDIDATES);
    let expected = "\
t 2
a 0 1
a 1 0
a 1 2
a 2 1
";
    assert_eq!(run(&paths, false).unwrap(), expected);
    assert_eq!(run(&paths, true).unwrap(), expected);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let mut paths = create_files(&dir, DATA, QUERY, CANDIDATES);
    paths[1] = dir.path().join("missing.graph");
    match run(&paths, false) {
        Err(Error::Open { path, .. }) => assert_eq!(path, paths[1].display().to_string()),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_malformed_files() {
    let dir = TempDir::new().unwrap();
    let paths = create_files(&dir, "t 0 1\nv 0 x\n", QUERY, CANDIDATES);
    assert!(matches!(run(&paths, false), Err(Error::Syntax(_))));
    let paths = create_files(&dir, DATA, QUERY, "t 3\n");
    assert!(matches!(run(&paths, false), Err(Error::CandidateSetMismatch(_))));
    let paths = create_files(&dir, DATA, QUERY, "t 2\nc 0 1 7\nc 1 1 0\n");
    assert!(matches!(run(&paths, false), Err(Error::CandidateSetMismatch(_))));
    let paths = create_files(&dir, DATA, "t 1 2\nv 0 5\nv 1 5\n", CANDIDATES);
    assert!(matches!(
        run(&paths, false),
        Err(Error::DisconnectedQuery {
            settled: 1,
            total: 2
        })
    ));
}
