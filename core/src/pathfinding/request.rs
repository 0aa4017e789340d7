use super::PathFinder;
use super::path::{DefaultGraphPath, GraphPath};
use crate::graph::Heuristic;
use crate::messaging::AgentId;
use crate::time::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a [`PathFinderRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchStatus {
    New,
    Initialized,
    Done,
    Finalized,
}

/// Hook run once per search, in the phase after the search completes.
///
/// Returning `false` asks the controller to retry the hook on its next frame.
pub trait SearchFinalizer<N> {
    fn finalize_search(
        &mut self,
        path: &mut DefaultGraphPath<N>,
        path_found: bool,
        time_to_run: i64,
    ) -> bool;
}

impl<N, F> SearchFinalizer<N> for F
where
    F: FnMut(&mut DefaultGraphPath<N>, bool, i64) -> bool,
{
    fn finalize_search(
        &mut self,
        path: &mut DefaultGraphPath<N>,
        path_found: bool,
        time_to_run: i64,
    ) -> bool {
        self(path, path_found, time_to_run)
    }
}

/// A path query that can be carried across frames.
///
/// The controller moves a request through [`SearchStatus::New`],
/// [`Initialized`](SearchStatus::Initialized), [`Done`](SearchStatus::Done) and
/// [`Finalized`](SearchStatus::Finalized). A finalized request runs again only
/// after [`renew`](Self::renew) or [`retarget`](Self::retarget).
pub struct PathFinderRequest<N, H> {
    pub start_node: N,
    pub end_node: N,
    pub heuristic: H,
    pub result_path: DefaultGraphPath<N>,
    pub(crate) status: SearchStatus,
    pub(crate) status_changed: bool,
    pub(crate) path_found: bool,
    pub(crate) execution_frames: u32,
    pub(crate) client: Option<AgentId>,
    pub(crate) response_code: i32,
    finalizer: Option<Box<dyn SearchFinalizer<N>>>,
}

impl<N, H> PathFinderRequest<N, H> {
    pub fn new(start_node: N, end_node: N, heuristic: H) -> Self {
        Self {
            start_node,
            end_node,
            heuristic,
            result_path: DefaultGraphPath::new(),
            status: SearchStatus::New,
            status_changed: false,
            path_found: false,
            execution_frames: 0,
            client: None,
            response_code: 0,
            finalizer: None,
        }
    }

    pub fn with_client(mut self, client: AgentId) -> Self {
        self.client = Some(client);
        self
    }

    /// Message code the completion telegram is sent with.
    pub fn with_response_code(mut self, response_code: i32) -> Self {
        self.response_code = response_code;
        self
    }

    pub fn with_finalizer(mut self, finalizer: impl SearchFinalizer<N> + 'static) -> Self {
        self.finalizer = Some(Box::new(finalizer));
        self
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn status_changed(&self) -> bool {
        self.status_changed
    }

    pub fn path_found(&self) -> bool {
        self.path_found
    }

    /// Number of controller calls this run has taken so far.
    pub fn execution_frames(&self) -> u32 {
        self.execution_frames
    }

    pub fn client(&self) -> Option<AgentId> {
        self.client
    }

    pub fn response_code(&self) -> i32 {
        self.response_code
    }

    pub fn change_status(&mut self, status: SearchStatus) {
        self.status = status;
        self.status_changed = true;
    }

    /// Schedules the request to run again from scratch.
    pub fn renew(&mut self) {
        self.change_status(SearchStatus::New);
    }

    /// Renews the request with new endpoints.
    pub fn retarget(&mut self, start_node: N, end_node: N) {
        self.start_node = start_node;
        self.end_node = end_node;
        self.renew();
    }

    /// Prepares a request handed over by `client` for a fresh run.
    pub(crate) fn reset_for(&mut self, client: AgentId) {
        self.renew();
        self.execution_frames = 0;
        self.client = Some(client);
    }

    pub fn initialize_search(&mut self, _time_to_run: i64) -> bool {
        self.result_path.clear();
        self.path_found = false;
        true
    }

    pub fn search<P>(&mut self, path_finder: &mut P, time_to_run: i64, clock: &dyn Clock) -> bool
    where
        P: PathFinder<N>,
        H: Heuristic<N>,
    {
        path_finder.search(self, time_to_run, clock)
    }

    pub fn finalize_search(&mut self, time_to_run: i64) -> bool {
        match self.finalizer.as_mut() {
            Some(finalizer) => {
                finalizer.finalize_search(&mut self.result_path, self.path_found, time_to_run)
            }
            None => true,
        }
    }
}

impl<N: fmt::Debug, H> fmt::Debug for PathFinderRequest<N, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathFinderRequest")
            .field("start_node", &self.start_node)
            .field("end_node", &self.end_node)
            .field("status", &self.status)
            .field("status_changed", &self.status_changed)
            .field("path_found", &self.path_found)
            .field("execution_frames", &self.execution_frames)
            .field("client", &self.client)
            .field("response_code", &self.response_code)
            .field("result_path", &self.result_path)
            .finish_non_exhaustive()
    }
}
