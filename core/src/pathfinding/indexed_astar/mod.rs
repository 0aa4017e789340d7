//! Indexed A*.
//!
//! Per-node search state lives in a table indexed by the graph's dense node
//! indices, so finding the record of a node is an array access and the closed
//! list disappears: a node's category says whether it is open or closed. Only
//! the open list remains, as an addressable binary heap.

mod node_record;
mod open_list;

pub use node_record::{NodeCategory, NodeRecord};

use super::path::{DefaultGraphPath, GraphPath};
use super::request::PathFinderRequest;
use super::PathFinder;
use crate::graph::{Connection, Heuristic, IndexedGraph};
use crate::pathfinding_config::PathfindingConfig;
use crate::time::{Clock, elapsed_nanos};
use node_record::NodeRecordTable;
use open_list::OpenList;
use serde::{Deserialize, Serialize};

/// Decides whether the node just taken off the open list ends the search.
pub trait StopCondition<G: IndexedGraph> {
    fn should_stop_search(&self, graph: &G, current: &G::Node, end: &G::Node) -> bool;
}

/// Stops when the current node has the goal's index. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct SameIndex;

impl<G: IndexedGraph> StopCondition<G> for SameIndex {
    fn should_stop_search(&self, graph: &G, current: &G::Node, end: &G::Node) -> bool {
        graph.index(current) == graph.index(end)
    }
}

/// Stops when the current node compares equal to the goal.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualNodes;

impl<G: IndexedGraph> StopCondition<G> for EqualNodes {
    fn should_stop_search(&self, _graph: &G, current: &G::Node, end: &G::Node) -> bool {
        current == end
    }
}

impl<G, F> StopCondition<G> for F
where
    G: IndexedGraph,
    F: Fn(&G::Node, &G::Node) -> bool,
{
    fn should_stop_search(&self, _graph: &G, current: &G::Node, end: &G::Node) -> bool {
        self(current, end)
    }
}

/// Counters collected over one search when metrics are enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Connections examined while expanding nodes.
    pub visited_nodes: usize,
    pub open_list_additions: usize,
    pub open_list_peak: usize,
}

impl Metrics {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Outcome of expanding one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStep {
    /// The stop condition held for the node just closed.
    Found,
    /// The node was expanded and the open list still has candidates.
    Expanded,
    /// The open list ran dry without meeting the stop condition.
    Exhausted,
}

/// A* over an [`IndexedGraph`] that can run to completion in one call or be
/// advanced one node at a time across frames.
///
/// One instance serves one in-flight search: interleaving two time-sliced
/// requests on the same instance corrupts both, since they share the record
/// table and the open list. Use one instance per concurrent request.
pub struct IndexedAStarPathFinder<'g, G: IndexedGraph, S = SameIndex> {
    graph: &'g G,
    records: NodeRecordTable<G::Node>,
    open_list: OpenList,
    current: Option<usize>,
    stop_condition: S,
    metrics: Option<Metrics>,
    time_tolerance: i64,
}

impl<'g, G: IndexedGraph> IndexedAStarPathFinder<'g, G, SameIndex> {
    pub fn new(graph: &'g G) -> Self {
        Self::with_stop_condition(graph, SameIndex)
    }

    pub fn from_config(graph: &'g G, config: &PathfindingConfig) -> Self {
        Self::new(graph)
            .with_metrics(config.calculate_metrics)
            .with_time_tolerance(config.time_tolerance_ns)
    }
}

impl<'g, G, S> IndexedAStarPathFinder<'g, G, S>
where
    G: IndexedGraph,
    S: StopCondition<G>,
{
    pub fn with_stop_condition(graph: &'g G, stop_condition: S) -> Self {
        let node_count = graph.node_count();
        Self {
            graph,
            records: NodeRecordTable::new(node_count),
            open_list: OpenList::new(node_count),
            current: None,
            stop_condition,
            metrics: None,
            time_tolerance: PathfindingConfig::default().time_tolerance_ns,
        }
    }

    pub fn with_metrics(mut self, calculate_metrics: bool) -> Self {
        self.metrics = calculate_metrics.then(Metrics::default);
        self
    }

    /// Remaining budget (ns) at or below which a time-sliced search yields.
    pub fn with_time_tolerance(mut self, time_tolerance: i64) -> Self {
        self.time_tolerance = time_tolerance;
        self
    }

    pub fn time_tolerance(&self) -> i64 {
        self.time_tolerance
    }

    pub fn graph(&self) -> &'g G {
        self.graph
    }

    pub fn metrics(&self) -> Option<&Metrics> {
        self.metrics.as_ref()
    }

    pub fn search_id(&self) -> i32 {
        self.records.search_id()
    }

    /// Search state of `node` in the current search, if the search reached it.
    pub fn node_record(&self, node: &G::Node) -> Option<&NodeRecord<G::Node>> {
        self.records.get(self.graph.index(node))
    }

    /// Number of nodes waiting in the open list.
    pub fn open_count(&self) -> usize {
        self.open_list.len()
    }

    /// Starts a new search: a new generation of records and an open list
    /// holding only the start node.
    pub fn init_search<H>(&mut self, start: G::Node, end: G::Node, heuristic: &H)
    where
        H: Heuristic<G::Node> + ?Sized,
    {
        if let Some(metrics) = self.metrics.as_mut() {
            metrics.reset();
        }

        self.records.next_search();
        self.open_list.clear();

        let start_index = self.graph.index(&start);
        let start_record = self.records.get_or_create(start_index, start);
        start_record.node = start;
        start_record.connection = None;
        start_record.cost_so_far = 0.0;
        self.add_to_open_list(start_index, heuristic.estimate(&start, &end));

        self.current = None;
    }

    /// Closes the most promising open node and, unless it ends the search,
    /// relaxes its outgoing connections.
    ///
    /// Panics when the open list is empty, i.e. when called before
    /// [`init_search`](Self::init_search) or after a step that returned
    /// [`SearchStep::Found`] or [`SearchStep::Exhausted`].
    pub fn expand_best_node<H>(&mut self, end: &G::Node, heuristic: &H) -> SearchStep
    where
        H: Heuristic<G::Node> + ?Sized,
    {
        let current_index = self.open_list.pop();
        self.current = Some(current_index);

        let current = self.records.current_mut(current_index);
        current.category = NodeCategory::Closed;
        let current_node = current.node;

        if self
            .stop_condition
            .should_stop_search(self.graph, &current_node, end)
        {
            return SearchStep::Found;
        }

        self.visit_children(current_index, end, heuristic);

        if self.open_list.is_empty() {
            SearchStep::Exhausted
        } else {
            SearchStep::Expanded
        }
    }

    fn visit_children<H>(&mut self, current_index: usize, end: &G::Node, heuristic: &H)
    where
        H: Heuristic<G::Node> + ?Sized,
    {
        let graph = self.graph;
        let current = self.records.current(current_index);
        let current_cost = current.cost_so_far;
        let connections = graph.connections(&current.node);

        for connection in connections.iter() {
            if let Some(metrics) = self.metrics.as_mut() {
                metrics.visited_nodes += 1;
            }

            let node = connection.to;
            let node_cost = current_cost + connection.cost;
            let node_index = graph.index(&node);
            let record = self.records.get_or_create(node_index, node);

            let node_heuristic = match record.category {
                NodeCategory::Closed => {
                    // Closed nodes reopen when a cheaper route turns up, which
                    // only happens with an inconsistent heuristic.
                    if record.cost_so_far <= node_cost {
                        continue;
                    }
                    record.heuristic()
                }
                NodeCategory::Open => {
                    if record.cost_so_far <= node_cost {
                        continue;
                    }
                    let node_heuristic = record.heuristic();
                    self.open_list.remove(node_index);
                    node_heuristic
                }
                NodeCategory::Unvisited => heuristic.estimate(&node, end),
            };

            let record = self.records.current_mut(node_index);
            record.cost_so_far = node_cost;
            record.connection = Some(*connection);
            self.add_to_open_list(node_index, node_cost + node_heuristic);
        }
    }

    fn add_to_open_list(&mut self, index: usize, estimated_total_cost: f32) {
        let record = self.records.current_mut(index);
        record.estimated_total_cost = estimated_total_cost;
        record.category = NodeCategory::Open;
        self.open_list.push(index, estimated_total_cost);

        if let Some(metrics) = self.metrics.as_mut() {
            metrics.open_list_additions += 1;
            metrics.open_list_peak = metrics.open_list_peak.max(self.open_list.len());
        }
    }

    fn run_to_completion<H>(&mut self, start: G::Node, end: G::Node, heuristic: &H) -> bool
    where
        H: Heuristic<G::Node> + ?Sized,
    {
        self.init_search(start, end, heuristic);

        loop {
            match self.expand_best_node(&end, heuristic) {
                SearchStep::Found => return true,
                SearchStep::Exhausted => return false,
                SearchStep::Expanded => {}
            }
        }
    }

    fn current_record(&self) -> &NodeRecord<G::Node> {
        match self.current {
            Some(index) => self.records.current(index),
            None => panic!("no node has been expanded in the current search"),
        }
    }

    /// Writes the nodes from the start to the last closed node into `out`, by
    /// following incoming connections backwards and reversing.
    pub fn generate_node_path<P>(&self, start: G::Node, out: &mut P)
    where
        P: GraphPath<G::Node> + ?Sized,
    {
        let mut record = self.current_record();
        while let Some(connection) = record.connection {
            out.add(record.node);
            record = self.records.current(self.graph.index(&connection.from));
        }
        out.add(start);
        out.reverse();
    }

    /// Writes the connections from the start to the last closed node into `out`.
    pub fn generate_connection_path<P>(&self, start: G::Node, out: &mut P)
    where
        P: GraphPath<Connection<G::Node>> + ?Sized,
    {
        let start_index = self.graph.index(&start);
        let mut record = self.current_record();
        while self.graph.index(&record.node) != start_index {
            let Some(connection) = record.connection else {
                break;
            };
            out.add(connection);
            record = self.records.current(self.graph.index(&connection.from));
        }
        out.reverse();
    }
}

impl<G, S> PathFinder<G::Node> for IndexedAStarPathFinder<'_, G, S>
where
    G: IndexedGraph,
    S: StopCondition<G>,
{
    fn search_node_path<H, P>(
        &mut self,
        start: G::Node,
        end: G::Node,
        heuristic: &H,
        out: &mut P,
    ) -> bool
    where
        H: Heuristic<G::Node> + ?Sized,
        P: GraphPath<G::Node> + ?Sized,
    {
        let found = self.run_to_completion(start, end, heuristic);
        if found {
            self.generate_node_path(start, out);
        }
        found
    }

    fn search_connection_path<H, P>(
        &mut self,
        start: G::Node,
        end: G::Node,
        heuristic: &H,
        out: &mut P,
    ) -> bool
    where
        H: Heuristic<G::Node> + ?Sized,
        P: GraphPath<Connection<G::Node>> + ?Sized,
    {
        let found = self.run_to_completion(start, end, heuristic);
        if found {
            self.generate_connection_path(start, out);
        }
        found
    }

    fn search<H>(
        &mut self,
        request: &mut PathFinderRequest<G::Node, H>,
        mut time_to_run: i64,
        clock: &dyn Clock,
    ) -> bool
    where
        H: Heuristic<G::Node>,
    {
        let mut last_time = clock.now_nanos();

        if request.status_changed {
            self.init_search(request.start_node, request.end_node, &request.heuristic);
            request.status_changed = false;
        }

        loop {
            let current_time = clock.now_nanos();
            time_to_run -= elapsed_nanos(last_time, current_time);
            if time_to_run <= self.time_tolerance {
                return false;
            }

            match self.expand_best_node(&request.end_node, &request.heuristic) {
                SearchStep::Found => {
                    request.path_found = true;
                    self.generate_node_path(request.start_node, &mut request.result_path);
                    return true;
                }
                SearchStep::Exhausted => {
                    request.path_found = false;
                    return true;
                }
                SearchStep::Expanded => {}
            }

            last_time = current_time;
        }
    }

    fn set_time_tolerance(&mut self, time_tolerance: i64) {
        self.time_tolerance = time_tolerance;
    }
}

/// Cost of a node path, summing the cheapest connection between each pair of
/// consecutive nodes. `None` if two consecutive nodes are not connected.
pub fn path_cost<G: IndexedGraph>(graph: &G, path: &DefaultGraphPath<G::Node>) -> Option<f32> {
    path.as_slice().windows(2).try_fold(0.0, |total, pair| {
        let to_index = graph.index(&pair[1]);
        graph
            .connections(&pair[0])
            .iter()
            .filter(|connection| graph.index(&connection.to) == to_index)
            .map(|connection| connection.cost)
            .min_by(f32::total_cmp)
            .map(|cost| total + cost)
    })
}
