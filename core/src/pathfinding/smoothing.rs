use super::path::{DefaultGraphPath, GraphPath};
use super::request::SearchFinalizer;
use crate::raycast::{Ray, RaycastCollisionDetector, Vec2};

/// A node with a location in the plane.
pub trait Positioned {
    fn position(&self) -> Vec2;
}

/// A node path whose nodes can be located, reordered and cut.
pub trait SmoothableGraphPath<N>: GraphPath<N> {
    fn node_position(&self, index: usize) -> Vec2;

    fn swap_nodes(&mut self, index1: usize, index2: usize);

    fn truncate_path(&mut self, new_length: usize);
}

impl<N: Positioned> SmoothableGraphPath<N> for DefaultGraphPath<N> {
    fn node_position(&self, index: usize) -> Vec2 {
        self.as_slice()[index].position()
    }

    fn swap_nodes(&mut self, index1: usize, index2: usize) {
        self.swap(index1, index2);
    }

    fn truncate_path(&mut self, new_length: usize) {
        self.truncate(new_length);
    }
}

/// Removes the nodes of a path that a straight, unobstructed line can skip.
#[derive(Debug, Clone)]
pub struct PathSmoother<R> {
    collision_detector: R,
}

impl<R: RaycastCollisionDetector> PathSmoother<R> {
    pub fn new(collision_detector: R) -> Self {
        Self { collision_detector }
    }

    /// Smooths `path` in place and returns how many nodes were removed. The
    /// first and last nodes always stay.
    pub fn smooth_path<N, P>(&self, path: &mut P) -> usize
    where
        P: SmoothableGraphPath<N> + ?Sized,
    {
        let input_length = path.count();
        if input_length <= 2 {
            return 0;
        }

        // Nodes before `output_index` are kept. Each input node is tested for
        // visibility from the last kept node; when blocked, the node before it
        // becomes the next kept one.
        let mut output_index = 1;
        let mut input_index = 2;
        while input_index < input_length {
            let ray = Ray::new(
                path.node_position(output_index - 1),
                path.node_position(input_index),
            );
            if self.collision_detector.collides(&ray) {
                path.swap_nodes(output_index, input_index - 1);
                output_index += 1;
            }
            input_index += 1;
        }

        path.swap_nodes(output_index, input_index - 1);
        path.truncate_path(output_index + 1);
        input_index - output_index - 1
    }
}

impl<N, R> SearchFinalizer<N> for PathSmoother<R>
where
    N: Positioned,
    R: RaycastCollisionDetector,
{
    fn finalize_search(
        &mut self,
        path: &mut DefaultGraphPath<N>,
        path_found: bool,
        _time_to_run: i64,
    ) -> bool {
        if path_found {
            self.smooth_path(path);
        }
        true
    }
}
