//! Search strategies for the maximum clique problem.

/// branch-and-bound engine (recursive and explicit-stack forms)
pub mod bnb;

/// seed partition across workers
pub mod partition;

/// local-to-global result reduction
pub mod reduce;

/// shared-memory thread-parallel strategy
pub mod threads;

/// distributed process-parallel strategy
pub mod dist;
