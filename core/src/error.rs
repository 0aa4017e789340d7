use thiserror::Error;
use uuid::Uuid;

/// Errors raised while loading a graph from a file or a text map.
///
/// Search itself never fails with an error: a missing path is reported as
/// `false`, and misuse of the engine panics.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("graph data truncated at byte {offset}")]
    Truncated { offset: usize },

    #[error("{trailing} unexpected bytes after the last node record")]
    TrailingBytes { trailing: usize },

    #[error("node {node} connects to index {index}, but the graph has {node_count} nodes")]
    NodeIndexOutOfRange {
        node: usize,
        index: u32,
        node_count: usize,
    },

    #[error("node {node} has a connection with invalid cost {cost}")]
    InvalidCost { node: usize, cost: f32 },

    #[error("node id {0} appears more than once")]
    DuplicateNode(Uuid),

    #[error("map is empty")]
    EmptyMap,

    #[error("map row {line} has {found} tiles, expected {expected}")]
    RaggedMap {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile {character:?} at row {line}, column {column}")]
    UnknownTile {
        line: usize,
        column: usize,
        character: char,
    },

    #[error("map has {found} tiles, expected {expected}")]
    TileCountMismatch { expected: usize, found: usize },
}
