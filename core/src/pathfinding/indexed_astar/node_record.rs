use crate::graph::Connection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeCategory {
    Unvisited,
    Open,
    Closed,
}

/// Search-local state of one graph node.
#[derive(Debug, Clone)]
pub struct NodeRecord<N> {
    pub node: N,
    /// The connection the best known route arrives through; `None` for the start.
    pub connection: Option<Connection<N>>,
    pub cost_so_far: f32,
    /// `cost_so_far` plus the heuristic estimate; the open-list key.
    pub estimated_total_cost: f32,
    pub category: NodeCategory,
    search_id: i32,
}

impl<N> NodeRecord<N> {
    /// Heuristic part of the key, recovered without calling the heuristic again.
    pub fn heuristic(&self) -> f32 {
        self.estimated_total_cost - self.cost_so_far
    }
}

/// One lazily created record per node index, reused across searches.
///
/// Records carry the id of the search that last touched them. Bumping the id
/// turns every record into an unvisited one on its next access, so a new
/// search never has to sweep the table.
pub(crate) struct NodeRecordTable<N> {
    records: Vec<Option<NodeRecord<N>>>,
    search_id: i32,
}

impl<N: Copy> NodeRecordTable<N> {
    pub fn new(node_count: usize) -> Self {
        Self {
            records: (0..node_count).map(|_| None).collect(),
            search_id: 0,
        }
    }

    /// Starts a new search generation. Ids wrap to 1 on overflow; 0 is never
    /// handed out again. A wrap sweeps the stamps so no record from an old
    /// generation can pass for a current one.
    pub fn next_search(&mut self) -> i32 {
        self.search_id = self.search_id.wrapping_add(1);
        if self.search_id <= 0 {
            self.search_id = 1;
            for record in self.records.iter_mut().flatten() {
                record.search_id = 0;
            }
        }
        self.search_id
    }

    pub fn search_id(&self) -> i32 {
        self.search_id
    }

    /// The record of `index` for the current search, created on first access.
    /// Records left over from an earlier search come back unvisited; their
    /// costs are stale and get overwritten before they are read.
    pub fn get_or_create(&mut self, index: usize, node: N) -> &mut NodeRecord<N> {
        let search_id = self.search_id;
        let record = self.records[index].get_or_insert_with(|| NodeRecord {
            node,
            connection: None,
            cost_so_far: 0.0,
            estimated_total_cost: 0.0,
            category: NodeCategory::Unvisited,
            search_id,
        });

        if record.search_id != search_id {
            record.category = NodeCategory::Unvisited;
            record.search_id = search_id;
        }
        record
    }

    /// The record of `index` if the current search has touched it.
    pub fn get(&self, index: usize) -> Option<&NodeRecord<N>> {
        self.records
            .get(index)?
            .as_ref()
            .filter(|record| record.search_id == self.search_id)
    }

    /// Record of a node the current search has already reached.
    pub fn current(&self, index: usize) -> &NodeRecord<N> {
        match self.get(index) {
            Some(record) => record,
            None => panic!("node {index} has no record in the current search"),
        }
    }

    pub fn current_mut(&mut self, index: usize) -> &mut NodeRecord<N> {
        let search_id = self.search_id;
        match self.records[index].as_mut() {
            Some(record) if record.search_id == search_id => record,
            _ => panic!("node {index} has no record in the current search"),
        }
    }

    #[cfg(test)]
    pub(crate) fn force_search_id(&mut self, search_id: i32) {
        self.search_id = search_id;
    }
}
