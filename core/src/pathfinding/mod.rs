pub mod control;
pub mod indexed_astar;
pub mod path;
pub mod queue;
pub mod request;
pub mod smoothing;

pub use control::PathFinderRequestControl;
pub use indexed_astar::{
    EqualNodes, IndexedAStarPathFinder, Metrics, NodeCategory, NodeRecord, SameIndex, SearchStep,
    StopCondition, path_cost,
};
pub use path::{DefaultGraphPath, GraphPath};
pub use queue::PathFinderQueue;
pub use request::{PathFinderRequest, SearchFinalizer, SearchStatus};
pub use smoothing::{PathSmoother, Positioned, SmoothableGraphPath};

use crate::graph::{Connection, Heuristic};
use crate::time::Clock;

/// A search algorithm usable either to completion or in frame-sized slices.
pub trait PathFinder<N> {
    /// Searches a path from `start` to `end` and, on success, appends its
    /// nodes to `out`. `out` is left untouched when no path exists.
    fn search_node_path<H, P>(&mut self, start: N, end: N, heuristic: &H, out: &mut P) -> bool
    where
        H: Heuristic<N> + ?Sized,
        P: GraphPath<N> + ?Sized;

    /// Like [`search_node_path`](Self::search_node_path), producing the
    /// connections that make up the path instead of its nodes.
    fn search_connection_path<H, P>(
        &mut self,
        start: N,
        end: N,
        heuristic: &H,
        out: &mut P,
    ) -> bool
    where
        H: Heuristic<N> + ?Sized,
        P: GraphPath<Connection<N>> + ?Sized;

    /// Advances `request` by as many node expansions as fit in `time_to_run`
    /// nanoseconds. Returns `true` once the search has finished, whether or
    /// not a path was found.
    fn search<H>(
        &mut self,
        request: &mut PathFinderRequest<N, H>,
        time_to_run: i64,
        clock: &dyn Clock,
    ) -> bool
    where
        H: Heuristic<N>;

    /// Sets the remaining budget (ns) at or below which [`search`](Self::search)
    /// yields. Finders without a budget check ignore it.
    fn set_time_tolerance(&mut self, _time_tolerance: i64) {}
}
