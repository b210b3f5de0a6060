use bit_set::BitSet;

/** Vertex Id */
pub type VertexId = usize;

/** models an undirected graph, immutable after construction.
Vertices are indexed 0..n-1 internally (instance files are 1-indexed).
The adjacency matrix is always populated, so adjacency queries are O(1);
its memory cost is O(n²), which bounds the practical vertex count. */
#[derive(Debug)]
pub struct Graph {
    /// nb vertices
    n: usize,
    /// nb edges
    m: usize,
    /// adj_list[i]: neighbors of i, ascending
    adj_list: Vec<Vec<VertexId>>,
    /// adj_matrix[i]: bitset of the neighbors of i
    adj_matrix: Vec<BitSet>,
}

impl Graph {

    /// number of vertices
    pub fn n(&self) -> usize { self.n }

    /// number of edges
    pub fn m(&self) -> usize { self.m }

    /// neighbors of vertex i, in ascending order
    pub fn adj(&self, i:VertexId) -> &[VertexId] { &self.adj_list[i] }

    /// degree of vertex i
    pub fn degree(&self, i:VertexId) -> usize { self.adj_list[i].len() }

    /** constructor using an adjacency list. Neighbor lists are sorted and
    deduplicated (the candidate ordering of the search relies on ascending
    adjacency), then the adjacency matrix is populated. */
    pub fn new(mut adj_list:Vec<Vec<VertexId>>) -> Self {
        let n = adj_list.len();
        for l in adj_list.iter_mut() {
            l.sort_unstable();
            l.dedup();
            debug_assert!(l.iter().all(|v| *v < n));
        }
        // compute nb edges: m = (∑ d(v)) / 2
        let mut m = 0;
        for l in &adj_list {
            m += l.len();
        }
        m /= 2;
        let mut adj_matrix = vec![BitSet::default(); n];
        for (a,row) in adj_matrix.iter_mut().enumerate() {
            for b in &adj_list[a] {
                row.insert(*b);
            }
        }
        Self { n, m, adj_list, adj_matrix }
    }

    /** returns true if a and b are adjacent, in O(1).
    A vertex is never adjacent to itself (no self-loops). */
    pub fn are_adjacent(&self, a:VertexId, b:VertexId) -> bool {
        self.adj_matrix[a].contains(b)
    }

    /// print statistics of the instance (on stderr, stdout carries the result)
    pub fn display_statistics(&self) {
        eprintln!("\t{} \t vertices", self.n());
        eprintln!("\t{} \t edges", self.m());
        if self.n > 0 {
            let degrees:Vec<usize> = (0..self.n()).map(|i| self.degree(i)).collect();
            eprintln!("\t{} \t min degree", degrees.iter().min().unwrap());
            eprintln!("\t{} \t max degree", degrees.iter().max().unwrap());
        }
    }
}

/** returns true if every pair of members is adjacent */
pub fn is_clique(graph:&Graph, vertices:&[VertexId]) -> bool {
    for (i,a) in vertices.iter().enumerate() {
        for b in vertices.iter().skip(i+1) {
            if !graph.are_adjacent(*a, *b) { return false; }
        }
    }
    true
}

/** returns true if no outside vertex is adjacent to every member */
pub fn is_maximal(graph:&Graph, vertices:&[VertexId]) -> bool {
    let mut inside: BitSet = BitSet::default();
    for v in vertices { inside.insert(*v); }
    for u in 0..graph.n() {
        if !inside.contains(u) && vertices.iter().all(|v| graph.are_adjacent(u, *v)) {
            return false;
        }
    }
    true
}
