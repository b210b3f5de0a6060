use crate::graph::{Graph, VertexId};
use crate::search::bnb::Frame;

/** seed vertices assigned to `rank` among `workers`, ascending:
{ i : i ≡ rank (mod workers) }. The round-robin split keeps seed counts
balanced across workers. */
pub fn round_robin(rank:usize, workers:usize, n:usize) -> Vec<VertexId> {
    assert!(workers >= 1, "at least one worker required");
    assert!(rank < workers, "rank {} out of range ({} workers)", rank, workers);
    (rank..n).step_by(workers).collect()
}

/** root subproblem for seed vertex v: clique = {v}, candidates = the
neighbors of v greater than v. Restricting candidates to greater indices
explores each clique from its smallest member only, so distinct seeds span
disjoint search trees. */
pub fn seed_frame(graph:&Graph, v:VertexId) -> Frame {
    let candidates:Vec<VertexId> = graph.adj(v).iter()
        .filter(|j| **j > v)
        .copied().collect();
    Frame { clique: vec![v], candidates }
}
