use crate::graph::{Graph, VertexId};

/**
Best clique observed so far within a search scope (one per worker, merged at
reduction points). Only a strictly larger clique replaces the current
content: among equal-size cliques, the first one offered wins.
*/
#[derive(Debug, Clone, Default)]
pub struct BestClique {
    /// vertices of the best clique found so far, in discovery order
    vertices: Vec<VertexId>,
}

impl BestClique {

    /// size of the best clique found so far
    pub fn len(&self) -> usize { self.vertices.len() }

    /// true if nothing has been offered yet
    pub fn is_empty(&self) -> bool { self.vertices.is_empty() }

    /// view of the best clique found so far
    pub fn vertices(&self) -> &[VertexId] { &self.vertices }

    /// replaces the content if the candidate is strictly larger
    pub fn offer(&mut self, candidate:&[VertexId]) {
        if candidate.len() > self.vertices.len() {
            self.vertices = candidate.to_vec();
        }
    }

    /// consumes the accumulator, returning the best clique found
    pub fn into_vertices(self) -> Vec<VertexId> { self.vertices }
}


/**
Recursive branch-and-bound extension of a partial clique.

`candidates` must hold, in ascending order, exactly the vertices adjacent to
every member of `clique` and greater than its most recently added member.
Each candidate v is appended in turn; the child candidate set keeps the
candidates after v that are adjacent to v (adjacency to the older members
already holds, so the one test suffices). Every extension is offered to the
accumulator eagerly; a leaf (empty candidate set) is maximal for its branch.

Candidate sets strictly shrink with each extension, so the recursion depth
is bounded by the number of vertices.
*/
pub fn extend(graph:&Graph, clique:&mut Vec<VertexId>, candidates:&[VertexId], best:&mut BestClique) {
    if candidates.is_empty() {
        best.offer(clique);
        return;
    }
    for (i,v) in candidates.iter().enumerate() {
        debug_assert!(
            clique.iter().all(|u| graph.are_adjacent(*u, *v)),
            "candidate {} not adjacent to the whole clique", v
        );
        clique.push(*v);
        best.offer(clique); // no descendant leaf is smaller
        let survivors:Vec<VertexId> = candidates[i+1..].iter()
            .filter(|w| graph.are_adjacent(*v, **w))
            .copied().collect();
        extend(graph, clique, &survivors, best);
        clique.pop();
    }
}

/** searches the whole graph with the recursive engine (single worker):
the root subproblem is the empty clique with every vertex as a candidate. */
pub fn solve_sequential(graph:&Graph) -> Vec<VertexId> {
    let mut best = BestClique::default();
    let mut clique = Vec::new();
    let candidates:Vec<VertexId> = (0..graph.n()).collect();
    extend(graph, &mut clique, &candidates, &mut best);
    best.into_vertices()
}


/** one pending subproblem: a partial clique and the vertices that may still
extend it (same invariants as the recursive form) */
#[derive(Debug, Clone)]
pub struct Frame {
    /// partial clique, pairwise adjacent
    pub clique: Vec<VertexId>,
    /// eligible extensions, ascending, all greater than the last member
    pub candidates: Vec<VertexId>,
}

impl Frame {
    /// true if no extension remains: the clique is maximal for its branch
    pub fn is_leaf(&self) -> bool { self.candidates.is_empty() }
}

/**
Explicit-stack form of the same search: the pending frames are the
(clique, candidates) states the recursive form keeps on the call stack.
A frame is either a leaf (offered to the accumulator) or a branch (expanded
into one child frame per candidate). Finds the same best size as `extend`
without deep call stacks; used by the parallel strategies.
*/
#[derive(Debug)]
pub struct SearchStack<'a> {
    graph: &'a Graph,
    /// pending frames, explored LIFO
    pending: Vec<Frame>,
}

impl<'a> SearchStack<'a> {

    /// creates a search over a single root subproblem
    pub fn new(graph:&'a Graph, root:Frame) -> Self {
        Self { graph, pending: vec![root] }
    }

    /// number of pending frames
    pub fn nb_pending(&self) -> usize { self.pending.len() }

    /** processes one pending frame; returns false once no frame remains */
    pub fn step(&mut self, best:&mut BestClique) -> bool {
        let frame = match self.pending.pop() {
            None => return false,
            Some(f) => f,
        };
        if frame.is_leaf() {
            best.offer(&frame.clique);
            return true;
        }
        for (i,v) in frame.candidates.iter().enumerate() {
            let mut extended = frame.clique.clone();
            extended.push(*v);
            best.offer(&extended);
            let survivors:Vec<VertexId> = frame.candidates[i+1..].iter()
                .filter(|w| self.graph.are_adjacent(*v, **w))
                .copied().collect();
            self.pending.push(Frame { clique: extended, candidates: survivors });
        }
        true
    }

    /// runs the search to exhaustion
    pub fn run(&mut self, best:&mut BestClique) {
        while self.step(best) {}
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::edgelist::read_from_file;
    use crate::graph::{is_clique, is_maximal};

    #[test]
    fn test_best_clique_strictly_greater_wins() {
        let mut best = BestClique::default();
        assert!(best.is_empty());
        best.offer(&[4]);
        best.offer(&[1,2]);
        assert_eq!(best.vertices(), &[1,2]);
        // an equal-size late-comer never overwrites
        best.offer(&[7,8]);
        assert_eq!(best.vertices(), &[1,2]);
        best.offer(&[3,4,5]);
        assert_eq!(best.len(), 3);
    }

    #[test]
    fn test_sequential_triangle() {
        let graph = read_from_file("insts/triangle5.txt").unwrap();
        assert_eq!(solve_sequential(&graph), vec![0,1,2]);
    }

    #[test]
    fn test_sequential_complete_graph() {
        let graph = read_from_file("insts/k4.txt").unwrap();
        assert_eq!(solve_sequential(&graph), vec![0,1,2,3]);
    }

    #[test]
    fn test_sequential_no_edges() {
        let graph = read_from_file("insts/empty6.txt").unwrap();
        assert_eq!(solve_sequential(&graph).len(), 1);
    }

    #[test]
    fn test_sequential_triangle_free() {
        let graph = read_from_file("insts/petersen.txt").unwrap();
        let solution = solve_sequential(&graph);
        assert_eq!(solution.len(), 2);
        assert!(is_clique(&graph, &solution));
        assert!(is_maximal(&graph, &solution));
    }

    #[test]
    fn test_solution_invariants() {
        for inst in &["insts/triangle5.txt", "insts/k4.txt", "insts/empty6.txt", "insts/petersen.txt"] {
            let graph = read_from_file(inst).unwrap();
            let solution = solve_sequential(&graph);
            assert!(is_clique(&graph, &solution), "{}: not a clique", inst);
            assert!(is_maximal(&graph, &solution), "{}: not maximal", inst);
        }
    }

    #[test]
    fn test_stack_matches_recursive_size() {
        for inst in &["insts/triangle5.txt", "insts/k4.txt", "insts/empty6.txt", "insts/petersen.txt"] {
            let graph = read_from_file(inst).unwrap();
            let mut best = BestClique::default();
            let root = Frame {
                clique: Vec::new(),
                candidates: (0..graph.n()).collect(),
            };
            SearchStack::new(&graph, root).run(&mut best);
            assert_eq!(best.len(), solve_sequential(&graph).len(), "{}", inst);
            assert!(is_clique(&graph, best.vertices()));
        }
    }

    #[test]
    fn test_stack_steps() {
        let graph = read_from_file("insts/k4.txt").unwrap();
        let mut best = BestClique::default();
        // a leaf root is consumed in one step
        let leaf = Frame { clique: vec![0,1], candidates: Vec::new() };
        let mut search = SearchStack::new(&graph, leaf);
        assert_eq!(search.nb_pending(), 1);
        assert!(search.step(&mut best));
        assert_eq!(best.vertices(), &[0,1]);
        assert!(!search.step(&mut best));
        // a branch root pushes one child per candidate
        let root = Frame { clique: vec![0], candidates: vec![1,2,3] };
        let mut search_branch = SearchStack::new(&graph, root);
        assert!(search_branch.step(&mut best));
        assert_eq!(search_branch.nb_pending(), 3);
    }
}
