use std::fs;

use anyhow::{anyhow, bail, Context, Result};
use nom::IResult;
use nom::character::complete::{digit1, multispace0};
use nom::combinator::map_res;
use nom::sequence::{pair, preceded};

use crate::graph::{Graph, VertexId};

/*
Instance format: whitespace-separated integers. The first two tokens are the
vertex count V and the edge count E, followed by E pairs (u, v) of 1-indexed
endpoints, each declaring one undirected edge.
*/

/// reads a single integer token, skipping leading whitespace
fn read_integer(s:&str) -> IResult<&str, usize> {
    map_res(preceded(multispace0, digit1), |d:&str| d.parse::<usize>())(s)
}

/// reads two integer tokens (header or edge line)
pub fn read_pair(s:&str) -> IResult<&str, (usize,usize)> {
    pair(read_integer, read_integer)(s)
}

/** parses an instance, returns (n, m, adj_list).
Endpoints are 1-indexed in the input and 0-indexed in the result.
Rejects out-of-range endpoints, self-loops, missing edges and trailing data. */
pub fn parse_instance(s:&str) -> Result<(usize, usize, Vec<Vec<VertexId>>)> {
    let (mut rest,(n,m)) = read_pair(s)
        .map_err(|e| anyhow!("invalid header (expected vertex and edge counts): {}", e))?;
    let mut adj_list = vec![Vec::new(); n];
    for k in 0..m {
        let (tmp,(a,b)) = read_pair(rest)
            .map_err(|_| anyhow!("edge {} of {} missing or malformed", k+1, m))?;
        rest = tmp;
        if a < 1 || a > n || b < 1 || b > n {
            bail!("edge {} ({},{}): endpoint out of range [1,{}]", k+1, a, b, n);
        }
        if a == b {
            bail!("edge {} ({},{}): self-loop", k+1, a, b);
        }
        adj_list[a-1].push(b-1);
        adj_list[b-1].push(a-1);
    }
    if !rest.trim_start().is_empty() {
        bail!("unexpected data after {} edges", m);
    }
    Ok((n, m, adj_list))
}

/// reads an instance from a file and builds the graph
pub fn read_from_file(filename:&str) -> Result<Graph> {
    let s = fs::read_to_string(filename)
        .with_context(|| format!("unable to read instance {}", filename))?;
    let (_,_,adj_list) = parse_instance(&s)
        .with_context(|| format!("instance {} is malformed", filename))?;
    Ok(Graph::new(adj_list))
}
