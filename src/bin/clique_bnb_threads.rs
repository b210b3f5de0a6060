use std::time::Instant;

use anyhow::Context;
use clap::{App, load_yaml};
use serde_json::json;

use clique_bnb::search::threads::solve_threads;
use clique_bnb::util::{export_results, print_result, read_params};

/** solves a maximum clique instance with the shared-memory thread-parallel
search. The seed loop is balanced dynamically over the pool. */
pub fn main() -> anyhow::Result<()> {
    // parse arguments
    let yaml = load_yaml!("clique_bnb_threads.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let t_start = Instant::now();
    let nb_threads: Option<usize> = match main_args.value_of("threads") {
        None => None,
        Some(e) => Some(e.parse().context("unable to parse the thread count given")?),
    };
    let (inst_filename, graph, sol_file, perf_file) = read_params(&main_args)?;

    // solve it on a dedicated pool (rayon picks the core count by default)
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(nb_threads.unwrap_or(0))
        .build()
        .context("unable to build the thread pool")?;
    let solution = pool.install(|| solve_threads(&graph));
    let duration = t_start.elapsed().as_secs_f64();
    print_result(&solution, duration);

    // export results
    let stats = json!({
        "clique_size": solution.len(),
        "time_searched": duration,
        "nb_threads": pool.current_num_threads(),
        "inst_name": inst_filename
    });
    export_results(&graph, &solution, &stats, perf_file, sol_file)
}
