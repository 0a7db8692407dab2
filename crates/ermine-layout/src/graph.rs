use crate::error::{Error, Result};

/// Directed edge between two node indices of the caller's canonical node order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
}

impl Edge {
    pub const fn new(source: usize, target: usize) -> Self {
        Self { source, target }
    }

    pub fn is_loop(&self) -> bool {
        self.source == self.target
    }
}

impl From<(usize, usize)> for Edge {
    fn from((source, target): (usize, usize)) -> Self {
        Self { source, target }
    }
}

pub fn validate_edges(node_count: usize, edges: &[Edge]) -> Result<()> {
    for (idx, e) in edges.iter().enumerate() {
        if e.source >= node_count || e.target >= node_count {
            return Err(Error::EdgeOutOfRange {
                edge: idx,
                from: e.source,
                to: e.target,
                node_count,
            });
        }
    }
    Ok(())
}

/// Undirected, loop-free, deduplicated adjacency lists.
pub(crate) fn undirected_adjacency(node_count: usize, edges: &[Edge]) -> Vec<Vec<usize>> {
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for e in edges {
        if e.is_loop() || e.source >= node_count || e.target >= node_count {
            continue;
        }
        adjacency[e.source].push(e.target);
        adjacency[e.target].push(e.source);
    }
    for neigh in &mut adjacency {
        neigh.sort_unstable();
        neigh.dedup();
    }
    adjacency
}

pub(crate) fn connected_components(adjacency: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let n = adjacency.len();
    let mut visited = vec![false; n];
    let mut out: Vec<Vec<usize>> = Vec::new();
    let mut q: std::collections::VecDeque<usize> = std::collections::VecDeque::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        q.push_back(start);
        let mut comp: Vec<usize> = Vec::new();

        while let Some(v) = q.pop_front() {
            comp.push(v);
            for &u in &adjacency[v] {
                if !visited[u] {
                    visited[u] = true;
                    q.push_back(u);
                }
            }
        }

        comp.sort_unstable();
        out.push(comp);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_edges_reports_the_first_offending_edge() {
        let edges = [Edge::new(0, 1), Edge::new(1, 3), Edge::new(4, 0)];
        assert_eq!(
            validate_edges(3, &edges),
            Err(Error::EdgeOutOfRange {
                edge: 1,
                from: 1,
                to: 3,
                node_count: 3,
            })
        );
        assert!(validate_edges(5, &edges).is_ok());
    }

    #[test]
    fn adjacency_drops_loops_and_duplicates() {
        let edges = [
            Edge::new(0, 1),
            Edge::new(1, 0),
            Edge::new(2, 2),
            Edge::new(0, 1),
        ];
        let adj = undirected_adjacency(3, &edges);
        assert_eq!(adj, vec![vec![1], vec![0], vec![]]);
        assert_eq!(connected_components(&adj), vec![vec![0, 1], vec![2]]);
    }
}
