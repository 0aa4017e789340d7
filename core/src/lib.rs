pub mod error;
pub mod graph;
pub mod messaging;
pub mod pathfinding;
pub mod pathfinding_config;
pub mod raycast;
pub mod time;

// Re-export commonly used items
pub use error::GraphError;
pub use graph::{
    AdjacencyGraph, BinaryGraph, Connection, EuclideanDistance, Heuristic, IndexedGraph,
    ManhattanDistance, OctileDistance, Tile, TileNode, TiledGraph, ZeroHeuristic,
};
pub use messaging::{AgentId, MessageDispatcher, NullDispatcher, PathResponse, Telegram, TelegramQueue};
pub use pathfinding::{
    DefaultGraphPath, GraphPath, IndexedAStarPathFinder, PathFinder, PathFinderQueue,
    PathFinderRequest, PathFinderRequestControl, PathSmoother, SearchStatus,
};
pub use pathfinding_config::PathfindingConfig;
pub use time::{Clock, SteppingClock, SystemClock};
