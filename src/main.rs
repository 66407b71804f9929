use clap::{crate_authors, crate_description, crate_name, crate_version, value_t, App, Arg};
use dgsm::{
    backtrack::{Backtrack, CheckedSink, EmbeddingSink, WriteSink, DEFAULT_CAP},
    candidate_set::CandidateSet,
    dag::Dag,
    graph::Graph,
};
use std::{
    error::Error,
    io::{self, BufWriter},
};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let default_cap = DEFAULT_CAP.to_string();
    let matches = App::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .arg(Arg::with_name("DATA").required(true).help("Data graph file"))
        .arg(Arg::with_name("QUERY").required(true).help("Query graph file"))
        .arg(
            Arg::with_name("CANDIDATES")
                .required(true)
                .help("Candidate set file"),
        )
        .arg(
            Arg::with_name("cap")
                .help("Stops after this many embeddings")
                .long("cap")
                .takes_value(true)
                .default_value(&default_cap),
        )
        .arg(
            Arg::with_name("check")
                .help("Verifies every embedding against both graphs")
                .long("check")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("dag")
                .help("Prints the query DAG to stderr")
                .long("dag")
                .takes_value(false),
        )
        .get_matches();
    let cap = value_t!(matches, "cap", usize).unwrap_or_else(|e| e.exit());
    let data = Graph::open_data(matches.value_of("DATA").unwrap())?;
    let query = Graph::open_query(matches.value_of("QUERY").unwrap(), data.label_map())?;
    let candidate_set = CandidateSet::open(matches.value_of("CANDIDATES").unwrap())?;
    let dag = Dag::new(&query, &candidate_set)?;
    if matches.is_present("dag") {
        eprint!("{}", dag);
    }
    let mut backtrack = Backtrack::new(&data, &dag, &candidate_set)?.cap(cap);
    let stdout = io::stdout();
    let mut sink: Box<dyn EmbeddingSink + '_> = {
        let writer = WriteSink::new(BufWriter::new(stdout.lock()));
        if matches.is_present("check") {
            Box::new(CheckedSink::new(&data, &query, writer))
        } else {
            Box::new(writer)
        }
    };
    backtrack.enumerate(sink.as_mut())?;
    Ok(())
}
