#![allow(dead_code)]

use waypath_core::{
    AdjacencyGraph, Heuristic, PathFinder, PathFinderRequest, PathFinderRequestControl,
    PathfindingConfig, SteppingClock, messaging::MessageDispatcher,
};

pub const A: usize = 0;
pub const B: usize = 1;
pub const C: usize = 2;
pub const D: usize = 3;

/// A→B (1), B→D (1), A→C (1), C→D (5). Cheapest A→D route is A, B, D.
pub fn diamond_graph() -> AdjacencyGraph {
    AdjacencyGraph::from_edges(4, &[(A, B, 1.0), (B, D, 1.0), (A, C, 1.0), (C, D, 5.0)])
}

/// 0 → 1 → … → n-1, every step costing 1.
pub fn chain_graph(node_count: usize) -> AdjacencyGraph {
    let edges: Vec<_> = (1..node_count).map(|to| (to - 1, to, 1.0)).collect();
    AdjacencyGraph::from_edges(node_count, &edges)
}

pub const S: usize = 0;
pub const DETOUR: usize = 1;
pub const X: usize = 2;
pub const GOAL: usize = 3;

/// The direct S→X connection is found first (cost 10). The detour through
/// DETOUR reaches X for 6, but only after X was closed, because the heuristic
/// overestimates DETOUR.
pub fn reopening_graph() -> AdjacencyGraph {
    AdjacencyGraph::from_edges(
        4,
        &[
            (S, X, 10.0),
            (S, DETOUR, 1.0),
            (DETOUR, X, 5.0),
            (X, GOAL, 100.0),
        ],
    )
}

pub fn reopening_heuristic(node: &usize, _goal: &usize) -> f32 {
    if *node == DETOUR { 20.0 } else { 0.0 }
}

/// Deterministic pseudo-random graph with integer costs, so float sums are exact.
pub fn random_graph(node_count: usize, edge_count: usize, seed: u64) -> AdjacencyGraph {
    let mut state = seed;
    let mut next = move |bound: u64| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) % bound
    };

    let mut graph = AdjacencyGraph::new(node_count);
    for _ in 0..edge_count {
        let from = next(node_count as u64) as usize;
        let to = next(node_count as u64) as usize;
        let cost = next(10) as f32;
        graph.add_connection(from, to, cost);
    }
    graph
}

/// Reference single-source shortest distances, by repeated relaxation.
pub fn shortest_distances(graph: &AdjacencyGraph, start: usize) -> Vec<Option<f32>> {
    use waypath_core::IndexedGraph;

    let mut distances = vec![None; graph.node_count()];
    distances[start] = Some(0.0);
    for _ in 0..graph.node_count() {
        let mut changed = false;
        for node in 0..graph.node_count() {
            let Some(base) = distances[node] else {
                continue;
            };
            for connection in graph.connections(&node).iter() {
                let candidate = base + connection.cost;
                if distances[connection.to].is_none_or(|known: f32| candidate < known) {
                    distances[connection.to] = Some(candidate);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    distances
}

pub fn stepping_control(step: u64) -> PathFinderRequestControl<SteppingClock> {
    PathFinderRequestControl::with_clock(SteppingClock::new(step), &PathfindingConfig::default())
}

/// Runs `request` one frame at a time until the controller reports it finished.
/// Returns the number of frames used.
pub fn run_frames<N, H, P, D>(
    control: &mut PathFinderRequestControl<SteppingClock>,
    request: &mut PathFinderRequest<N, H>,
    path_finder: &mut P,
    dispatcher: &mut D,
    budget: i64,
    max_frames: u32,
) -> u32
where
    H: Heuristic<N>,
    P: PathFinder<N>,
    D: MessageDispatcher<N, H>,
{
    for frame in 1..=max_frames {
        control.start_frame(budget);
        if control.execute(request, path_finder, dispatcher) {
            return frame;
        }
    }
    panic!("request did not finish within {max_frames} frames");
}
