//! `lpath` — approximate longest path from a CSV edge list.
//!
//! # Usage
//!
//! ```bash
//! lpath --input graph_data.csv --nodes 30 --source 0 --destination 29 --epsilon 0.5
//! lpath --input graph_data.csv --schedule active --report out/report.json
//! lpath --input rewards.csv --nodes 20 --source 0 --destination 19 --constraint 50 --epsilon 0.1
//! ```
//!
//! `--input` accepts `source,destination,weight` or
//! `source,destination,reward,penalty` rows. With `--constraint C` the
//! reported path maximises total reward among paths whose total penalty is
//! at most `C`.
//!
//! Node count, source, destination and epsilon are prompted for on stdin
//! when not given on the command line.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::Parser;
use tracing::{error, info};

use lpath_core::{io as lpio, solve, Graph, LpError, Query, Schedule, SolverConfig};

#[derive(Parser, Debug)]
#[command(name = "lpath", version, about = "Epsilon-approximate longest path on signed-weight digraphs", long_about = None)]
struct Args {
    /// Edge list CSV (3 or 4 integer columns after one header line).
    #[arg(short, long, value_name = "FILE", default_value = "graph_data.csv")]
    input: PathBuf,

    /// Number of nodes.
    #[arg(short, long)]
    nodes: Option<usize>,

    /// Source node id in `0..nodes`.
    #[arg(short, long)]
    source: Option<usize>,

    /// Destination node id in `0..nodes`.
    #[arg(short, long)]
    destination: Option<usize>,

    /// Approximation parameter (> 0).
    #[arg(short, long)]
    epsilon: Option<f64>,

    /// Penalty budget C: maximise reward subject to total penalty <= C.
    #[arg(long, value_name = "C")]
    constraint: Option<u64>,

    /// Print each edge of the reported path with its reward and penalty.
    #[arg(long)]
    details: bool,

    /// Scheduling policy: `bounded` or `active`.
    #[arg(long)]
    schedule: Option<Schedule>,

    /// JSON solver configuration; `LPATH_*` variables override it.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also write the result line to this file.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write a JSON report (outcome, path, stats) to this file.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn prompt<T: FromStr>(input: &mut impl BufRead, msg: &str) -> Result<T, LpError> {
    loop {
        println!("{}", msg);
        io::stdout().flush().map_err(|e| LpError::io("<stdout>", e))?;
        let mut line = String::new();
        let read = input.read_line(&mut line).map_err(|e| LpError::io("<stdin>", e))?;
        if read == 0 {
            return Err(LpError::invalid_config("stdin", format!("input closed while waiting for: {}", msg)));
        }
        match line.trim().parse() {
            Ok(v) => return Ok(v),
            Err(_) => eprintln!("could not parse `{}`, try again", line.trim()),
        }
    }
}

fn run(args: Args) -> Result<(), LpError> {
    let mut config = match args.config.as_deref() {
        Some(path) => SolverConfig::from_json(path)?,
        None => SolverConfig::default(),
    }
    .with_env_overrides()?;
    if let Some(s) = args.schedule { config.schedule = s; }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let nodes = match args.nodes { Some(v) => v, None => prompt(&mut input, "Enter the number of nodes")? };
    let last = nodes.saturating_sub(1);
    let source = match args.source {
        Some(v) => v,
        None => prompt(&mut input, &format!("Enter the source node which is between 0 to {}", last))?,
    };
    let destination = match args.destination {
        Some(v) => v,
        None => prompt(&mut input, &format!("Enter the destination node which is between 0 to {}", last))?,
    };

    let edges = lpio::read_edges(&args.input)?;
    println!("Edge list size:{}", edges.len());
    let graph = Graph::new(nodes, edges)?;

    config.epsilon = match args.epsilon {
        Some(v) => v,
        None if args.config.is_none() && std::env::var_os(lpath_core::config::ENV_EPSILON).is_none() => {
            prompt(&mut input, "Enter the value of error parameter")?
        }
        None => config.epsilon,
    };

    let query = match args.constraint {
        Some(c) => Query::new(source, destination).within(c),
        None => Query::new(source, destination),
    };
    let solution = solve(&graph, &query, &config)?;
    info!(rounds = solution.stats.rounds, labels = solution.stats.labels_allocated, delta = solution.delta, "run stats");
    println!("{}", solution.outcome);
    if let Some(path) = solution.outcome.path() {
        let hops: Vec<String> = path.iter().map(|n| n.to_string()).collect();
        println!("Path: {}", hops.join(" -> "));
        if args.details || args.constraint.is_some() {
            print!("{}", lpio::path_details(&graph, &solution.edges));
        }
    }
    if let Some(out) = args.output.as_deref() { lpio::write_outcome(out, &solution)?; }
    if let Some(report) = args.report.as_deref() { lpio::write_report_json(report, &solution)?; }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = args
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::WARN);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
