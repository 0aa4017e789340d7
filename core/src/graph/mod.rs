//! Graphs the search engine runs on, and the heuristics that guide it.
//!
//! The engine never owns a graph. It only needs a dense, stable index for
//! every node so that per-search bookkeeping can live in flat arrays instead of
//! hash maps or the caller's node objects.

pub mod adjacency;
pub mod binary;
pub mod tiled;

pub use adjacency::AdjacencyGraph;
pub use binary::{BinaryGraph, write_binary_graph};
pub use tiled::{
    EuclideanDistance, ManhattanDistance, OctileDistance, Tile, TileNode, TiledGraph,
    TiledRaycastCollisionDetector,
};

use std::borrow::Cow;
use std::fmt::Debug;

/// A directed, costed edge between two nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection<N> {
    pub from: N,
    pub to: N,
    pub cost: f32,
}

impl<N> Connection<N> {
    pub fn new(from: N, to: N, cost: f32) -> Self {
        Self { from, to, cost }
    }
}

/// A read-only graph whose nodes are numbered `0..node_count()`.
///
/// The index of a node must stay the same for as long as any search over the
/// graph is in flight.
pub trait IndexedGraph {
    type Node: Copy + PartialEq + Debug;

    fn node_count(&self) -> usize;

    /// Dense, zero-based index of `node`.
    fn index(&self, node: &Self::Node) -> usize;

    /// Outgoing connections of `node`, in a stable order.
    fn connections(&self, node: &Self::Node) -> Cow<'_, [Connection<Self::Node>]>;
}

/// Estimates the remaining cost from a node to the goal.
///
/// The estimate should never exceed the true cost (admissible) for returned
/// paths to be optimal. This is not checked: the engine still terminates with
/// an inadmissible heuristic, it just may return a costlier path.
pub trait Heuristic<N> {
    fn estimate(&self, node: &N, goal: &N) -> f32;
}

impl<N, F> Heuristic<N> for F
where
    F: Fn(&N, &N) -> f32,
{
    fn estimate(&self, node: &N, goal: &N) -> f32 {
        self(node, goal)
    }
}

/// Estimates zero everywhere, turning A* into Dijkstra's algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroHeuristic;

impl<N> Heuristic<N> for ZeroHeuristic {
    fn estimate(&self, _node: &N, _goal: &N) -> f32 {
        0.0
    }
}
