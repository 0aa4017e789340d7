pub mod app;
pub mod args;
pub mod colors;
pub mod display;
pub mod json_output;
pub mod logging;
pub mod parsing;
pub mod search;
pub mod utils;

// Re-export commonly used items
pub use args::{Args, HeuristicKind};
pub use parsing::{parse_tile, resolve_node_id, resolve_tile};
pub use search::{FrameOptions, GridHeuristic, SearchResult, run_frames};
pub use utils::format_number;
