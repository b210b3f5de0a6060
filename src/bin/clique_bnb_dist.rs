use std::net::TcpListener;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{App, load_yaml};
use serde_json::json;

use clique_bnb::edgelist::read_from_file;
use clique_bnb::search::dist::{run_coordinator, run_worker};
use clique_bnb::util::{export_results, print_result};

/** solves a maximum clique instance with the distributed process-parallel
search. An external launcher starts one instance per worker and passes each
its rank and the total worker count; rank 0 coordinates, reads the instance
and prints the merged result. */
pub fn main() -> anyhow::Result<()> {
    // parse arguments
    let yaml = load_yaml!("clique_bnb_dist.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let rank: usize = main_args.value_of("rank").unwrap().parse()
        .context("unable to parse the rank given")?;
    let workers: usize = main_args.value_of("workers").unwrap().parse()
        .context("unable to parse the worker count given")?;
    let addr = main_args.value_of("addr").unwrap();
    if workers < 1 {
        bail!("at least one worker is required");
    }
    if rank >= workers {
        bail!("rank {} out of range ({} workers)", rank, workers);
    }

    // non-coordinating workers receive the graph over the wire
    if rank != 0 {
        return run_worker(addr, rank, workers);
    }

    // coordinator: timing covers loading, search and the final barrier
    let t_start = Instant::now();
    let inst_filename = main_args.value_of("instance")
        .context("the coordinator requires the instance file path")?;
    let sol_file = main_args.value_of("solution").map(|e| e.to_string());
    let perf_file = main_args.value_of("perf").map(|e| e.to_string());
    let graph = read_from_file(inst_filename)?;
    graph.display_statistics();
    let listener = TcpListener::bind(addr)
        .with_context(|| format!("unable to bind the rendezvous address {}", addr))?;
    let solution = run_coordinator(&listener, &graph, workers)?;
    let duration = t_start.elapsed().as_secs_f64();
    print_result(&solution, duration);

    // export results
    let stats = json!({
        "clique_size": solution.len(),
        "time_searched": duration,
        "nb_workers": workers,
        "inst_name": inst_filename
    });
    export_results(&graph, &solution, &stats, perf_file, sol_file)
}
