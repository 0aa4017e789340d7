use super::PathFinder;
use super::control::PathFinderRequestControl;
use super::request::PathFinderRequest;
use crate::graph::Heuristic;
use crate::messaging::{AgentId, MessageDispatcher};
use crate::pathfinding_config::PathfindingConfig;
use crate::time::{Clock, SystemClock};
use std::collections::VecDeque;
use tracing::{debug, trace};
use uuid::Uuid;

/// Requests waiting for one shared path finder, served first come first served.
///
/// Each [`run`](Self::run) spends one frame's budget on as many requests as it
/// can. A request that does not finish stays current and is resumed by the
/// next `run`. Finished requests are reported through the dispatcher, with the
/// queue's [`id`](Self::id) as sender, and then dropped.
pub struct PathFinderQueue<P, N, H, C = SystemClock> {
    id: AgentId,
    requests: VecDeque<PathFinderRequest<N, H>>,
    current: Option<PathFinderRequest<N, H>>,
    control: PathFinderRequestControl<C>,
    path_finder: P,
}

impl<P, N, H> PathFinderQueue<P, N, H, SystemClock>
where
    P: PathFinder<N>,
    H: Heuristic<N>,
{
    pub fn new(path_finder: P, config: &PathfindingConfig) -> Self {
        Self::with_clock(path_finder, SystemClock::new(), config)
    }
}

impl<P, N, H, C> PathFinderQueue<P, N, H, C>
where
    P: PathFinder<N>,
    H: Heuristic<N>,
    C: Clock,
{
    /// The finder adopts `config`'s time tolerance so it yields at the same
    /// threshold as the controller.
    pub fn with_clock(mut path_finder: P, clock: C, config: &PathfindingConfig) -> Self {
        path_finder.set_time_tolerance(config.time_tolerance_ns);
        let id = Uuid::new_v4();
        Self {
            id,
            requests: VecDeque::with_capacity(config.queue_capacity),
            current: None,
            control: PathFinderRequestControl::with_clock(clock, config).with_server(id),
            path_finder,
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    /// Queues `request` on behalf of `client`, resetting it for a fresh run.
    pub fn submit(&mut self, client: AgentId, mut request: PathFinderRequest<N, H>) {
        request.reset_for(client);
        self.requests.push_back(request);
        trace!(%client, pending = self.requests.len(), "request queued");
    }

    /// Requests waiting, not counting the one in progress.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty() && self.current.is_none()
    }

    /// Whether a request was left unfinished by the previous frame.
    pub fn has_current(&self) -> bool {
        self.current.is_some()
    }

    pub fn path_finder(&self) -> &P {
        &self.path_finder
    }

    pub fn path_finder_mut(&mut self) -> &mut P {
        &mut self.path_finder
    }

    /// Runs one frame of `time_to_run` nanoseconds. Returns how many requests
    /// finished during it.
    pub fn run<D>(&mut self, time_to_run: i64, dispatcher: &mut D) -> usize
    where
        D: MessageDispatcher<N, H> + ?Sized,
    {
        self.control.start_frame(time_to_run);

        let mut finished = 0;
        loop {
            if self.current.is_none() {
                self.current = self.requests.pop_front();
            }
            let Some(request) = self.current.as_mut() else {
                break;
            };

            if !self
                .control
                .execute(request, &mut self.path_finder, dispatcher)
            {
                trace!(
                    frames = request.execution_frames(),
                    "frame budget spent, request carried over"
                );
                break;
            }

            debug!(
                client = ?request.client(),
                path_found = request.path_found(),
                frames = request.execution_frames(),
                "request finished"
            );
            self.current = None;
            finished += 1;
        }
        finished
    }
}
