//! Flat 2D tile maps as indexed graphs.

use super::{Connection, Heuristic, IndexedGraph};
use crate::error::GraphError;
use crate::pathfinding::smoothing::Positioned;
use crate::raycast::{Ray, RaycastCollisionDetector, Vec2};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

const ORTHOGONAL_STEPS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL_STEPS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Floor,
    Wall,
}

/// A tile coordinate, `x` growing to the right and `y` growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileNode {
    pub x: i32,
    pub y: i32,
}

impl TileNode {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Positioned for TileNode {
    fn position(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

/// A grid of floor and wall tiles. Every tile is a node (index `y * width + x`),
/// but only floor tiles have connections, and only to neighbouring floor tiles.
///
/// Orthogonal steps cost 1. With diagonal movement enabled, diagonal steps cost
/// √2 and are only allowed when both orthogonally adjacent tiles are floor, so a
/// path never squeezes between two wall corners.
#[derive(Debug, Clone)]
pub struct TiledGraph {
    width: usize,
    height: usize,
    tiles: Arc<[Tile]>,
    diagonal: bool,
    connections: Vec<Vec<Connection<TileNode>>>,
    start_marker: Option<TileNode>,
    goal_marker: Option<TileNode>,
}

impl TiledGraph {
    pub fn new(
        width: usize,
        height: usize,
        tiles: Vec<Tile>,
        diagonal: bool,
    ) -> Result<Self, GraphError> {
        if width == 0 || height == 0 {
            return Err(GraphError::EmptyMap);
        }
        if tiles.len() != width * height {
            return Err(GraphError::TileCountMismatch {
                expected: width * height,
                found: tiles.len(),
            });
        }

        let mut graph = Self {
            width,
            height,
            tiles: tiles.into(),
            diagonal,
            connections: Vec::new(),
            start_marker: None,
            goal_marker: None,
        };
        graph.connections = graph.build_connections();
        Ok(graph)
    }

    /// An obstacle-free grid.
    pub fn open(width: usize, height: usize, diagonal: bool) -> Result<Self, GraphError> {
        Self::new(width, height, vec![Tile::Floor; width * height], diagonal)
    }

    /// Parses a map drawn with `#` for walls and `.` or spaces for floor.
    /// `S` and `G` are floor tiles that also record the start and goal markers.
    /// Blank lines are ignored.
    pub fn from_ascii(map: &str, diagonal: bool) -> Result<Self, GraphError> {
        let rows: Vec<(usize, &str)> = map
            .lines()
            .enumerate()
            .filter(|(_, row)| !row.trim().is_empty())
            .collect();
        let Some(&(_, first_row)) = rows.first() else {
            return Err(GraphError::EmptyMap);
        };

        let width = first_row.chars().count();
        let mut tiles = Vec::with_capacity(width * rows.len());
        let mut start_marker = None;
        let mut goal_marker = None;

        for (y, &(line_index, row)) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(GraphError::RaggedMap {
                    line: line_index + 1,
                    expected: width,
                    found,
                });
            }
            for (x, character) in row.chars().enumerate() {
                let tile = match character {
                    '#' => Tile::Wall,
                    '.' | ' ' => Tile::Floor,
                    'S' => {
                        start_marker = Some(TileNode::new(x as i32, y as i32));
                        Tile::Floor
                    }
                    'G' => {
                        goal_marker = Some(TileNode::new(x as i32, y as i32));
                        Tile::Floor
                    }
                    _ => {
                        return Err(GraphError::UnknownTile {
                            line: line_index + 1,
                            column: x + 1,
                            character,
                        });
                    }
                };
                tiles.push(tile);
            }
        }

        let mut graph = Self::new(width, rows.len(), tiles, diagonal)?;
        graph.start_marker = start_marker;
        graph.goal_marker = goal_marker;
        Ok(graph)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn allows_diagonal(&self) -> bool {
        self.diagonal
    }

    /// Position of the `S` marker of a parsed map.
    pub fn start_marker(&self) -> Option<TileNode> {
        self.start_marker
    }

    /// Position of the `G` marker of a parsed map.
    pub fn goal_marker(&self) -> Option<TileNode> {
        self.goal_marker
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<Tile> {
        self.contains(x, y)
            .then(|| self.tiles[y as usize * self.width + x as usize])
    }

    pub fn is_passable(&self, x: i32, y: i32) -> bool {
        self.tile(x, y) == Some(Tile::Floor)
    }

    /// The node at `(x, y)`, if it lies on the map.
    pub fn node(&self, x: i32, y: i32) -> Option<TileNode> {
        self.contains(x, y).then_some(TileNode::new(x, y))
    }

    /// A line-of-sight checker sharing this map's tiles.
    pub fn collision_detector(&self) -> TiledRaycastCollisionDetector {
        TiledRaycastCollisionDetector {
            width: self.width,
            height: self.height,
            tiles: Arc::clone(&self.tiles),
        }
    }

    fn build_connections(&self) -> Vec<Vec<Connection<TileNode>>> {
        let mut connections = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                connections.push(self.neighbour_connections(TileNode::new(x, y)));
            }
        }
        connections
    }

    fn neighbour_connections(&self, from: TileNode) -> Vec<Connection<TileNode>> {
        let mut connections = Vec::new();
        if !self.is_passable(from.x, from.y) {
            return connections;
        }

        for (dx, dy) in ORTHOGONAL_STEPS {
            if self.is_passable(from.x + dx, from.y + dy) {
                connections.push(Connection::new(
                    from,
                    TileNode::new(from.x + dx, from.y + dy),
                    1.0,
                ));
            }
        }

        if self.diagonal {
            for (dx, dy) in DIAGONAL_STEPS {
                let clear_corners =
                    self.is_passable(from.x + dx, from.y) && self.is_passable(from.x, from.y + dy);
                if clear_corners && self.is_passable(from.x + dx, from.y + dy) {
                    connections.push(Connection::new(
                        from,
                        TileNode::new(from.x + dx, from.y + dy),
                        std::f32::consts::SQRT_2,
                    ));
                }
            }
        }

        connections
    }
}

impl IndexedGraph for TiledGraph {
    type Node = TileNode;

    fn node_count(&self) -> usize {
        self.width * self.height
    }

    fn index(&self, node: &TileNode) -> usize {
        assert!(
            self.contains(node.x, node.y),
            "tile ({}, {}) lies outside a {}x{} map",
            node.x,
            node.y,
            self.width,
            self.height
        );
        node.y as usize * self.width + node.x as usize
    }

    fn connections(&self, node: &TileNode) -> Cow<'_, [Connection<TileNode>]> {
        Cow::Borrowed(&self.connections[self.index(node)])
    }
}

/// Sum of axis distances. Admissible on 4-connected grids.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManhattanDistance;

impl Heuristic<TileNode> for ManhattanDistance {
    fn estimate(&self, node: &TileNode, goal: &TileNode) -> f32 {
        ((goal.x - node.x).abs() + (goal.y - node.y).abs()) as f32
    }
}

/// Straight-line distance. Admissible on any grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanDistance;

impl Heuristic<TileNode> for EuclideanDistance {
    fn estimate(&self, node: &TileNode, goal: &TileNode) -> f32 {
        node.position().distance(&goal.position())
    }
}

/// Exact cost on an obstacle-free 8-connected grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct OctileDistance;

impl Heuristic<TileNode> for OctileDistance {
    fn estimate(&self, node: &TileNode, goal: &TileNode) -> f32 {
        let dx = (goal.x - node.x).abs() as f32;
        let dy = (goal.y - node.y).abs() as f32;
        dx.max(dy) + (std::f32::consts::SQRT_2 - 1.0) * dx.min(dy)
    }
}

/// Walks the tiles under a ray with Bresenham's line algorithm and reports a
/// collision as soon as one of them is not floor.
#[derive(Debug, Clone)]
pub struct TiledRaycastCollisionDetector {
    width: usize,
    height: usize,
    tiles: Arc<[Tile]>,
}

impl TiledRaycastCollisionDetector {
    fn is_floor(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && (x as usize) < self.width
            && (y as usize) < self.height
            && self.tiles[y as usize * self.width + x as usize] == Tile::Floor
    }
}

impl RaycastCollisionDetector for TiledRaycastCollisionDetector {
    fn collides(&self, ray: &Ray) -> bool {
        let (mut x0, mut y0) = (ray.start.x as i32, ray.start.y as i32);
        let (mut x1, mut y1) = (ray.end.x as i32, ray.end.y as i32);

        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        let delta_x = x1 - x0;
        let delta_y = (y1 - y0).abs();
        let y_step = if y0 < y1 { 1 } else { -1 };
        let mut error = 0;
        let mut y = y0;

        for x in x0..=x1 {
            let floor = if steep {
                self.is_floor(y, x)
            } else {
                self.is_floor(x, y)
            };
            if !floor {
                return true;
            }
            error += delta_y;
            if 2 * error >= delta_x {
                y += y_step;
                error -= delta_x;
            }
        }

        false
    }
}
