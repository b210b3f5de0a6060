use crate::graph::VertexId;
use crate::search::bnb::BestClique;

/** folds local results into one global maximum, in iteration order:
a local result replaces the current best only if strictly larger, so among
equal-size results the earliest one wins. Called with a deterministic order
(ascending seed or ascending rank), the merged result is reproducible. */
pub fn reduce<I>(locals:I) -> Vec<VertexId>
where I: IntoIterator<Item = Vec<VertexId>> {
    let mut best = BestClique::default();
    for local in locals {
        best.offer(&local);
    }
    best.into_vertices()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_keeps_strictly_larger() {
        let merged = reduce(vec![vec![4], vec![0,2], vec![1,3,5]]);
        assert_eq!(merged, vec![1,3,5]);
    }

    #[test]
    fn test_reduce_first_of_a_size_wins() {
        let merged = reduce(vec![vec![0,2], vec![7,8], vec![4,5]]);
        assert_eq!(merged, vec![0,2]);
    }

    #[test]
    fn test_reduce_empty() {
        assert!(reduce(Vec::new()).is_empty());
    }
}
