use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::graph::{Graph, VertexId};
use crate::search::bnb::{BestClique, SearchStack};
use crate::search::partition::{round_robin, seed_frame};
use crate::search::reduce::reduce;

/*
Distributed strategy: one process per worker, started by an external
launcher that assigns each its rank and the worker count. Rank 0 is the
coordinator: it owns the instance, broadcasts the graph before any search
begins, folds every local result in ascending rank order, then releases the
final barrier. There is no inter-worker communication during search, and no
recovery: a worker crash aborts the run.
*/

/** one protocol message, encoded as one JSON object per line */
#[derive(Debug, Serialize, Deserialize)]
pub enum Message {
    /// worker -> coordinator: identifies the connection
    Hello {
        /// sender rank
        rank: usize,
    },
    /// coordinator -> worker: one-shot graph broadcast
    Load {
        /// vertex count
        n: usize,
        /// adjacency rows, one per vertex
        adj: Vec<Vec<VertexId>>,
    },
    /// worker -> coordinator: local maximum, once the whole seed batch is done
    Result {
        /// sender rank
        rank: usize,
        /// local maximum clique, in discovery order
        clique: Vec<VertexId>,
    },
    /// coordinator -> worker: barrier release
    Done,
}

impl Message {
    /// message name, for protocol error reports
    fn kind(&self) -> &'static str {
        match self {
            Message::Hello {..} => "Hello",
            Message::Load {..} => "Load",
            Message::Result {..} => "Result",
            Message::Done => "Done",
        }
    }
}

/** framed JSON-lines channel over a socket */
#[derive(Debug)]
struct Channel {
    reader: BufReader<TcpStream>,
}

impl Channel {
    fn new(stream:TcpStream) -> Self {
        Self { reader: BufReader::new(stream) }
    }

    /// blocking send of one message
    fn send(&mut self, msg:&Message) -> Result<()> {
        let mut line = serde_json::to_string(msg).context("encoding message")?;
        line.push('\n');
        self.reader.get_mut().write_all(line.as_bytes())
            .with_context(|| format!("sending {}", msg.kind()))?;
        Ok(())
    }

    /// blocking receive of one message
    fn recv(&mut self) -> Result<Message> {
        let mut line = String::new();
        let nb_read = self.reader.read_line(&mut line).context("receiving message")?;
        if nb_read == 0 {
            bail!("peer closed the connection mid-protocol");
        }
        serde_json::from_str(line.trim_end()).context("decoding message")
    }
}

/** runs the explicit-stack engine over every seed assigned to `rank`,
accumulating a single local maximum across the whole batch. */
pub fn search_batch(graph:&Graph, rank:usize, workers:usize) -> Vec<VertexId> {
    let mut local = BestClique::default();
    for seed in round_robin(rank, workers, graph.n()) {
        SearchStack::new(graph, seed_frame(graph, seed)).run(&mut local);
    }
    local.into_vertices()
}

/**
Coordinator side (rank 0). Accepts one connection per non-coordinating
worker, broadcasts the graph, searches its own seed batch, then collects
exactly one result per worker and folds all local maxima in ascending rank
order (rank 0 first), which makes the answer reproducible for a fixed rank
assignment. The barrier release is sent only after the fold, so the caller's
timing covers the whole collective.
*/
pub fn run_coordinator(listener:&TcpListener, graph:&Graph, workers:usize) -> Result<Vec<VertexId>> {
    assert!(workers >= 1, "at least one worker required");
    // rendezvous: each worker introduces itself with its rank
    let mut channels:Vec<(usize, Channel)> = Vec::with_capacity(workers-1);
    for _ in 1..workers {
        let (stream, _) = listener.accept().context("accepting a worker connection")?;
        let mut chan = Channel::new(stream);
        match chan.recv()? {
            Message::Hello { rank } => {
                if rank == 0 || rank >= workers {
                    bail!("hello from out-of-range rank {} ({} workers)", rank, workers);
                }
                if channels.iter().any(|(r,_)| *r == rank) {
                    bail!("two workers claimed rank {}", rank);
                }
                channels.push((rank, chan));
            }
            other => bail!("expected Hello, got {}", other.kind()),
        }
    }
    channels.sort_by_key(|(rank,_)| *rank);
    // one-shot blocking broadcast of the graph before any search
    let adj:Vec<Vec<VertexId>> = (0..graph.n()).map(|i| graph.adj(i).to_vec()).collect();
    for (_, chan) in channels.iter_mut() {
        chan.send(&Message::Load { n: graph.n(), adj: adj.clone() })?;
    }
    // the coordinator searches its own batch like any other worker
    let mut locals:Vec<Vec<VertexId>> = Vec::with_capacity(workers);
    locals.push(search_batch(graph, 0, workers));
    // blocking collection, one typed result per worker
    for (rank, chan) in channels.iter_mut() {
        match chan.recv()? {
            Message::Result { rank: sender, clique } => {
                if sender != *rank {
                    bail!("result from rank {} on the rank-{} channel", sender, rank);
                }
                locals.push(clique);
            }
            other => bail!("expected Result from rank {}, got {}", rank, other.kind()),
        }
    }
    let best = reduce(locals);
    // barrier release: workers exit only once the global result is folded
    for (_, chan) in channels.iter_mut() {
        chan.send(&Message::Done)?;
    }
    Ok(best)
}

/**
Worker side (rank ≠ 0). Joins the rendezvous, receives the graph, searches
its seed batch, reports one typed result, then blocks on the barrier.
*/
pub fn run_worker(addr:&str, rank:usize, workers:usize) -> Result<()> {
    if rank == 0 || rank >= workers {
        bail!("worker rank {} out of range ({} workers)", rank, workers);
    }
    let mut chan = connect(addr)?;
    chan.send(&Message::Hello { rank })?;
    let graph = match chan.recv()? {
        Message::Load { n, adj } => {
            if adj.len() != n {
                bail!("graph broadcast announced {} vertices but carried {} rows", n, adj.len());
            }
            if adj.iter().any(|row| row.iter().any(|v| *v >= n)) {
                bail!("graph broadcast holds an out-of-range vertex (n = {})", n);
            }
            Graph::new(adj)
        }
        other => bail!("expected Load, got {}", other.kind()),
    };
    let local = search_batch(&graph, rank, workers);
    chan.send(&Message::Result { rank, clique: local })?;
    match chan.recv()? {
        Message::Done => Ok(()),
        other => bail!("expected Done, got {}", other.kind()),
    }
}

/// bounded rendezvous: the coordinator's listener may come up after us
fn connect(addr:&str) -> Result<Channel> {
    let mut attempts = 0;
    loop {
        match TcpStream::connect(addr) {
            Ok(stream) => return Ok(Channel::new(stream)),
            Err(e) => {
                attempts += 1;
                if attempts >= 50 {
                    return Err(anyhow!(e)
                        .context(format!("unable to reach the coordinator at {}", addr)));
                }
                std::thread::sleep(Duration::from_millis(100));
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use crate::edgelist::read_from_file;
    use crate::graph::is_clique;
    use crate::search::bnb::solve_sequential;

    fn run_cluster(inst:&str, workers:usize) -> Vec<VertexId> {
        let graph = read_from_file(inst).unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let handles:Vec<_> = (1..workers).map(|rank| {
            let worker_addr = addr.clone();
            thread::spawn(move || run_worker(&worker_addr, rank, workers))
        }).collect();
        let best = run_coordinator(&listener, &graph, workers).unwrap();
        for h in handles {
            h.join().unwrap().unwrap();
        }
        best
    }

    #[test]
    fn test_single_worker() {
        let best = run_cluster("insts/triangle5.txt", 1);
        assert_eq!(best, vec![0,1,2]);
    }

    #[test]
    fn test_two_workers() {
        let best = run_cluster("insts/triangle5.txt", 2);
        assert_eq!(best, vec![0,1,2]);
    }

    #[test]
    fn test_matches_sequential() {
        for inst in &["insts/triangle5.txt", "insts/k4.txt", "insts/empty6.txt", "insts/petersen.txt"] {
            let graph = read_from_file(inst).unwrap();
            let expected = solve_sequential(&graph).len();
            for workers in &[1usize, 2, 3] {
                let best = run_cluster(inst, *workers);
                assert_eq!(best.len(), expected, "{} with {} workers", inst, workers);
                assert!(is_clique(&graph, &best));
            }
        }
    }

    #[test]
    fn test_reproducible_for_fixed_ranks() {
        let first = run_cluster("insts/petersen.txt", 3);
        for _ in 0..3 {
            assert_eq!(run_cluster("insts/petersen.txt", 3), first);
        }
    }

    #[test]
    fn test_search_batch_covers_assigned_seeds() {
        let graph = read_from_file("insts/triangle5.txt").unwrap();
        // rank 1 of 2 owns seeds {1,3}: its best reachable clique is {1,2}
        assert_eq!(search_batch(&graph, 1, 2), vec![1,2]);
        // rank 0 of 2 owns seeds {0,2,4} and finds the triangle
        assert_eq!(search_batch(&graph, 0, 2), vec![0,1,2]);
    }

    #[test]
    fn test_duplicate_rank_rejected() {
        let graph = read_from_file("insts/k4.txt").unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let handles:Vec<_> = (0..2).map(|_| {
            let worker_addr = addr.clone();
            thread::spawn(move || run_worker(&worker_addr, 1, 3))
        }).collect();
        assert!(run_coordinator(&listener, &graph, 3).is_err());
        for h in handles {
            // both workers fail: one on the duplicate, one on the closed socket
            let _ = h.join().unwrap();
        }
    }
}
