use rayon::prelude::*;

use crate::graph::{Graph, VertexId};
use crate::search::bnb::{BestClique, SearchStack};
use crate::search::partition::seed_frame;
use crate::search::reduce::reduce;

/**
Shared-memory strategy. The seed loop is distributed dynamically over the
thread pool (work stealing hands the next unclaimed seed to the next
available thread, balancing uneven subtree sizes); the graph is shared
read-only and each seed search owns a private accumulator. The per-seed
results are folded sequentially in ascending seed order once the parallel
phase has fully joined, so no synchronization guards the global best and the
outcome does not depend on thread scheduling.
*/
pub fn solve_threads(graph:&Graph) -> Vec<VertexId> {
    let locals:Vec<Vec<VertexId>> = (0..graph.n()).into_par_iter()
        .map(|seed| {
            let mut local = BestClique::default();
            SearchStack::new(graph, seed_frame(graph, seed)).run(&mut local);
            local.into_vertices()
        })
        .collect();
    reduce(locals)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::edgelist::read_from_file;
    use crate::graph::{is_clique, is_maximal};
    use crate::search::bnb::solve_sequential;

    #[test]
    fn test_threads_triangle() {
        let graph = read_from_file("insts/triangle5.txt").unwrap();
        assert_eq!(solve_threads(&graph), vec![0,1,2]);
    }

    #[test]
    fn test_threads_matches_sequential() {
        for inst in &["insts/triangle5.txt", "insts/k4.txt", "insts/empty6.txt", "insts/petersen.txt"] {
            let graph = read_from_file(inst).unwrap();
            let solution = solve_threads(&graph);
            assert_eq!(solution.len(), solve_sequential(&graph).len(), "{}", inst);
            assert!(is_clique(&graph, &solution), "{}", inst);
            assert!(is_maximal(&graph, &solution), "{}", inst);
        }
    }

    #[test]
    fn test_threads_deterministic() {
        let graph = read_from_file("insts/petersen.txt").unwrap();
        let first = solve_threads(&graph);
        for _ in 0..5 {
            assert_eq!(solve_threads(&graph), first);
        }
    }
}
