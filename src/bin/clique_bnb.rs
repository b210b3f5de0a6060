use std::time::Instant;

use clap::{App, load_yaml};
use serde_json::json;

use clique_bnb::search::bnb::solve_sequential;
use clique_bnb::util::{export_results, print_result, read_params};

/** solves a maximum clique instance with the single-threaded recursive search. */
pub fn main() -> anyhow::Result<()> {
    // parse arguments
    let yaml = load_yaml!("clique_bnb.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let t_start = Instant::now();
    let (inst_filename, graph, sol_file, perf_file) = read_params(&main_args)?;

    // solve it
    let solution = solve_sequential(&graph);
    let duration = t_start.elapsed().as_secs_f64();
    print_result(&solution, duration);

    // export results
    let stats = json!({
        "clique_size": solution.len(),
        "time_searched": duration,
        "inst_name": inst_filename
    });
    export_results(&graph, &solution, &stats, perf_file, sol_file)
}
