use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;
use waypath_core::pathfinding::{Metrics, Positioned, path_cost};
use waypath_core::{
    DefaultGraphPath, EuclideanDistance, Heuristic, IndexedAStarPathFinder, IndexedGraph,
    ManhattanDistance, OctileDistance, PathFinderQueue, PathFinderRequest, PathfindingConfig,
    TelegramQueue, TileNode, ZeroHeuristic,
};

use crate::args::HeuristicKind;

/// The heuristic picked on the command line.
#[derive(Debug, Clone, Copy)]
pub struct GridHeuristic(pub HeuristicKind);

impl Heuristic<TileNode> for GridHeuristic {
    fn estimate(&self, node: &TileNode, goal: &TileNode) -> f32 {
        match self.0 {
            HeuristicKind::Manhattan => ManhattanDistance.estimate(node, goal),
            HeuristicKind::Euclidean => EuclideanDistance.estimate(node, goal),
            HeuristicKind::Octile => OctileDistance.estimate(node, goal),
            HeuristicKind::Zero => ZeroHeuristic.estimate(node, goal),
        }
    }
}

pub struct FrameOptions {
    pub budget_nanos: i64,
    pub max_frames: u32,
    pub config: PathfindingConfig,
}

#[derive(Debug)]
pub struct SearchResult<N> {
    pub path: Option<Vec<N>>,
    pub cost: Option<f32>,
    pub frames: u32,
    pub metrics: Option<Metrics>,
    pub search_duration: f64,
}

/// Runs `request` through a request queue one frame at a time, the way a game
/// loop would, until the queue reports the result.
pub fn run_frames<G, H>(
    graph: &G,
    request: PathFinderRequest<G::Node, H>,
    options: &FrameOptions,
) -> Result<SearchResult<G::Node>, String>
where
    G: IndexedGraph,
    H: Heuristic<G::Node>,
{
    let path_finder = IndexedAStarPathFinder::from_config(graph, &options.config);
    let mut queue = PathFinderQueue::new(path_finder, &options.config);
    let mut telegrams = TelegramQueue::new();
    let client = Uuid::new_v4();

    queue.submit(client, request);

    let started = Instant::now();
    let mut frames = 0;
    let response = loop {
        if frames >= options.max_frames {
            return Err(format!(
                "Search did not finish within {} frames",
                options.max_frames
            ));
        }
        frames += 1;
        queue.run(options.budget_nanos, &mut telegrams);

        if let Some(response) = telegrams.drain().next() {
            break response;
        }
        debug!(frame = frames, "frame budget spent");
    };
    let search_duration = started.elapsed().as_secs_f64();

    info!(
        path_found = response.path_found,
        frames,
        execution_frames = response.execution_frames,
        "search finished"
    );

    let path = response.path_found.then_some(response.nodes);
    let cost = path
        .as_ref()
        .and_then(|nodes| path_cost(graph, &DefaultGraphPath::from(nodes.clone())));

    Ok(SearchResult {
        path,
        cost,
        frames,
        metrics: queue.path_finder().metrics().copied(),
        search_duration,
    })
}

/// Length of the polyline through `nodes`. Smoothed paths skip over tiles, so
/// their cost is measured geometrically rather than along graph connections.
pub fn polyline_length(nodes: &[TileNode]) -> f32 {
    nodes
        .windows(2)
        .map(|pair| pair[0].position().distance(&pair[1].position()))
        .sum()
}
