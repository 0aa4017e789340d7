use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HeuristicKind {
    Manhattan,
    Euclidean,
    Octile,
    Zero,
}

impl HeuristicKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeuristicKind::Manhattan => "manhattan",
            HeuristicKind::Euclidean => "euclidean",
            HeuristicKind::Octile => "octile",
            HeuristicKind::Zero => "zero",
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "waypath")]
#[command(about = "Find a path across a grid map or a binary graph, one time-sliced frame at a time")]
pub struct Args {
    /// ASCII grid map (`#` wall, `.` floor, `S`/`G` markers), or a binary graph with --binary
    pub map: PathBuf,

    /// Start tile as `x,y` (defaults to the map's `S`), or a node UUID with --binary
    #[arg(short, long, value_name = "NODE")]
    pub from: Option<String>,

    /// Goal tile as `x,y` (defaults to the map's `G`), or a node UUID with --binary
    #[arg(short, long, value_name = "NODE")]
    pub to: Option<String>,

    /// Allow diagonal moves on grid maps
    #[arg(short, long)]
    pub diagonal: bool,

    /// Heuristic for grid maps (default: octile with --diagonal, manhattan otherwise)
    #[arg(long, value_enum)]
    pub heuristic: Option<HeuristicKind>,

    /// Time budget per frame, in microseconds
    #[arg(short, long, value_name = "MICROS", default_value = "1000")]
    pub budget_us: u64,

    /// Give up after this many frames
    #[arg(long, value_name = "COUNT", default_value = "10000")]
    pub max_frames: u32,

    /// Remove path nodes that a straight line can skip (grid maps only)
    #[arg(short, long)]
    pub smooth: bool,

    /// Treat MAP as a binary graph file
    #[arg(long)]
    pub binary: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose mode - show search info, statistics and debug logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode - only show the path
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn heuristic(&self) -> HeuristicKind {
        self.heuristic.unwrap_or(if self.diagonal {
            HeuristicKind::Octile
        } else {
            HeuristicKind::Manhattan
        })
    }

    pub fn budget_nanos(&self) -> i64 {
        i64::try_from(self.budget_us.saturating_mul(1_000)).unwrap_or(i64::MAX)
    }
}
