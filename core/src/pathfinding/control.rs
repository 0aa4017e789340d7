use super::PathFinder;
use super::request::{PathFinderRequest, SearchStatus};
use crate::graph::Heuristic;
use crate::messaging::{AgentId, MessageDispatcher, Telegram};
use crate::pathfinding_config::PathfindingConfig;
use crate::time::{Clock, SystemClock, elapsed_nanos};
use tracing::{debug, trace};

/// Drives a [`PathFinderRequest`] through its phases within a frame budget.
///
/// Call [`start_frame`](Self::start_frame) once per frame, then
/// [`execute`](Self::execute) for as many requests as the budget allows. All
/// `execute` calls of a frame draw from the same budget.
#[derive(Debug)]
pub struct PathFinderRequestControl<C = SystemClock> {
    server: Option<AgentId>,
    clock: C,
    last_time: u64,
    time_to_run: i64,
    time_tolerance: i64,
}

impl PathFinderRequestControl<SystemClock> {
    pub fn new(config: &PathfindingConfig) -> Self {
        Self::with_clock(SystemClock::new(), config)
    }
}

impl<C: Clock> PathFinderRequestControl<C> {
    pub fn with_clock(clock: C, config: &PathfindingConfig) -> Self {
        Self {
            server: None,
            clock,
            last_time: 0,
            time_to_run: 0,
            time_tolerance: config.time_tolerance_ns,
        }
    }

    /// Sender of completion telegrams. Without a server nothing is dispatched.
    pub fn with_server(mut self, server: AgentId) -> Self {
        self.server = Some(server);
        self
    }

    pub fn server(&self) -> Option<AgentId> {
        self.server
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Budget still available in the current frame, as of the last phase.
    pub fn time_to_run(&self) -> i64 {
        self.time_to_run
    }

    pub fn time_tolerance(&self) -> i64 {
        self.time_tolerance
    }

    /// Opens a frame with `time_to_run` nanoseconds of budget.
    pub fn start_frame(&mut self, time_to_run: i64) {
        self.last_time = self.clock.now_nanos();
        self.time_to_run = time_to_run;
    }

    /// Charges the time since the last phase and reports whether enough budget
    /// is left to start another one.
    fn charge(&mut self) -> Option<u64> {
        let current_time = self.clock.now_nanos();
        self.time_to_run -= elapsed_nanos(self.last_time, current_time);
        (self.time_to_run > self.time_tolerance).then_some(current_time)
    }

    /// Advances `request` as far as the frame budget allows. Returns `true`
    /// when the request reached [`SearchStatus::Finalized`] and was not renewed
    /// by the dispatcher.
    ///
    /// Panics when handed a finalized request that has not been renewed.
    pub fn execute<N, H, P, D>(
        &mut self,
        request: &mut PathFinderRequest<N, H>,
        path_finder: &mut P,
        dispatcher: &mut D,
    ) -> bool
    where
        H: Heuristic<N>,
        P: PathFinder<N>,
        D: MessageDispatcher<N, H> + ?Sized,
    {
        assert!(
            request.status() != SearchStatus::Finalized,
            "executing a finalized request; renew it first"
        );

        request.execution_frames += 1;

        loop {
            if request.status() == SearchStatus::New {
                let Some(current_time) = self.charge() else {
                    return false;
                };
                if !request.initialize_search(self.time_to_run) {
                    return false;
                }
                request.change_status(SearchStatus::Initialized);
                trace!(frames = request.execution_frames, "search initialized");
                self.last_time = current_time;
            }

            if request.status() == SearchStatus::Initialized {
                let Some(current_time) = self.charge() else {
                    return false;
                };
                if !request.search(path_finder, self.time_to_run, &self.clock) {
                    return false;
                }
                request.change_status(SearchStatus::Done);
                debug!(
                    path_found = request.path_found,
                    frames = request.execution_frames,
                    "search done"
                );
                self.last_time = current_time;
            }

            if request.status() == SearchStatus::Done {
                let Some(current_time) = self.charge() else {
                    return false;
                };
                if !request.finalize_search(self.time_to_run) {
                    return false;
                }
                request.change_status(SearchStatus::Finalized);

                if let Some(server) = self.server {
                    let receiver = request.client;
                    let code = request.response_code;
                    trace!(%server, ?receiver, code, "dispatching search result");
                    dispatcher.dispatch(Telegram {
                        sender: server,
                        receiver,
                        code,
                        request: &mut *request,
                    });
                }
                self.last_time = current_time;

                if request.status_changed() && request.status() == SearchStatus::New {
                    debug!("search renewed");
                    continue;
                }
            }

            return true;
        }
    }
}
