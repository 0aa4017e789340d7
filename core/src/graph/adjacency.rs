use super::{Connection, IndexedGraph};
use std::borrow::Cow;

/// In-memory adjacency-list graph whose nodes are their own indices.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    connections: Vec<Vec<Connection<usize>>>,
}

impl AdjacencyGraph {
    pub fn new(node_count: usize) -> Self {
        Self {
            connections: vec![Vec::new(); node_count],
        }
    }

    /// Builds a graph from `(from, to, cost)` triples.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize, f32)]) -> Self {
        let mut graph = Self::new(node_count);
        for &(from, to, cost) in edges {
            graph.add_connection(from, to, cost);
        }
        graph
    }

    /// Appends a directed connection. Panics if either endpoint is out of
    /// range or the cost is negative.
    pub fn add_connection(&mut self, from: usize, to: usize, cost: f32) {
        let node_count = self.connections.len();
        assert!(
            from < node_count && to < node_count,
            "connection {from} -> {to} is outside a graph of {node_count} nodes"
        );
        assert!(cost >= 0.0, "connection {from} -> {to} has negative cost {cost}");
        self.connections[from].push(Connection::new(from, to, cost));
    }

    /// Appends connections in both directions with the same cost.
    pub fn add_edge(&mut self, a: usize, b: usize, cost: f32) {
        self.add_connection(a, b, cost);
        self.add_connection(b, a, cost);
    }

    pub fn connection_count(&self) -> usize {
        self.connections.iter().map(Vec::len).sum()
    }
}

impl IndexedGraph for AdjacencyGraph {
    type Node = usize;

    fn node_count(&self) -> usize {
        self.connections.len()
    }

    fn index(&self, node: &usize) -> usize {
        *node
    }

    fn connections(&self, node: &usize) -> Cow<'_, [Connection<usize>]> {
        Cow::Borrowed(&self.connections[*node])
    }
}
