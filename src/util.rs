use anyhow::{Context, Result};
use clap::ArgMatches;
use serde_json::Value;

use crate::edgelist::read_from_file;
use crate::graph::{Graph, VertexId, is_clique, is_maximal};

/** reads command line input and returns the instance name, the graph, and
the optional solution / performance output filenames */
pub fn read_params(main_args:&ArgMatches) -> Result<(String, Graph, Option<String>, Option<String>)> {
    let inst_filename = main_args.value_of("instance").unwrap();
    // read value of the solution filename
    let sol_file: Option<String> = match main_args.value_of("solution") {
        None => None,
        Some(e) => {
            eprintln!("printing solutions in: {}", e);
            Some(e.to_string())
        }
    };
    // read value of the performance logs filename
    let perf_file: Option<String> = match main_args.value_of("perf") {
        None => None,
        Some(e) => {
            eprintln!("printing perfs in: {}", e);
            Some(e.to_string())
        }
    };
    let graph = read_from_file(inst_filename)?;
    graph.display_statistics();
    Ok((inst_filename.to_string(), graph, sol_file, perf_file))
}

/** prints the result on stdout: the 1-indexed clique in discovery order on
one line, then the elapsed wall-clock seconds */
pub fn print_result(clique:&[VertexId], duration:f64) {
    let vertices:Vec<String> = clique.iter().map(|v| (v+1).to_string()).collect();
    println!("{}", vertices.join(" "));
    println!("{}", duration);
}

/** encodes a clique as a single 1-indexed line (use this to export the solution) */
pub fn clique_to_string(clique:&[VertexId]) -> String {
    let mut res = String::default();
    for v in clique {
        res += format!("{} ", v+1).as_str();
    }
    res += "\n";
    res
}

/** exports the clique and the run statistics to the requested files */
pub fn export_results(
    graph:&Graph,
    clique:&[VertexId],
    stats:&Value,
    perf_file:Option<String>,
    sol_file:Option<String>,
) -> Result<()> {
    // export statistics
    if let Some(filename) = perf_file {
        std::fs::write(filename.as_str(), serde_json::to_string(stats)?)
            .with_context(|| format!("couldn't write {}", filename))?;
    }
    // export solution
    if let Some(filename) = sol_file {
        if !is_clique(graph, clique) {
            eprintln!("invalid solution (not a clique)");
        } else if !is_maximal(graph, clique) {
            eprintln!("invalid solution (not maximal)");
        }
        std::fs::write(filename.as_str(), clique_to_string(clique))
            .with_context(|| format!("couldn't write {}", filename))?;
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clique_to_string() {
        assert_eq!(clique_to_string(&[0,1,2]), "1 2 3 \n");
        assert_eq!(clique_to_string(&[]), "\n");
    }
}
