use serde::{Deserialize, Serialize};
use std::slice;

/// An ordered, appendable sequence of nodes or of connections.
///
/// Searches fill a path back to front and then call [`GraphPath::reverse`],
/// so the finished path reads from start to goal.
pub trait GraphPath<T> {
    fn count(&self) -> usize;

    fn get(&self, index: usize) -> Option<&T>;

    fn add(&mut self, item: T);

    fn clear(&mut self);

    fn reverse(&mut self);

    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// A [`GraphPath`] backed by a `Vec`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultGraphPath<T> {
    nodes: Vec<T>,
}

impl<T> DefaultGraphPath<T> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.nodes
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.nodes.iter()
    }

    pub fn first(&self) -> Option<&T> {
        self.nodes.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.nodes.last()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.nodes
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.nodes.swap(a, b);
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }
}

impl<T> Default for DefaultGraphPath<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for DefaultGraphPath<T> {
    fn from(nodes: Vec<T>) -> Self {
        Self { nodes }
    }
}

impl<'a, T> IntoIterator for &'a DefaultGraphPath<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl<T> GraphPath<T> for DefaultGraphPath<T> {
    fn count(&self) -> usize {
        self.nodes.len()
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.nodes.get(index)
    }

    fn add(&mut self, item: T) {
        self.nodes.push(item);
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }

    fn reverse(&mut self) {
        self.nodes.reverse();
    }
}
