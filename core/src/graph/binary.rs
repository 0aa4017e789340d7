//! Memory-mapped adjacency files.
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! u32 node_count
//! node_count times:
//!     [u8; 16] node uuid
//!     u32      connection_count
//!     connection_count times:
//!         u32 to_index
//!         f32 cost
//! ```
//!
//! Node `i` is the `i`-th record in the file, which makes record order the
//! dense index the search engine works with.

use super::{Connection, IndexedGraph};
use crate::error::GraphError;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use memmap2::Mmap;
use rustc_hash::FxHashMap;
use std::{
    borrow::Cow,
    fs::File,
    io::{self, Cursor, Read, Write},
    path::Path,
};
use tracing::warn;
use uuid::Uuid;

const UUID_LEN: usize = 16;
/// Smallest possible node record: a uuid and an empty connection count.
const MIN_RECORD_LEN: usize = UUID_LEN + 4;

#[derive(Debug)]
pub struct BinaryGraph {
    data: Mmap,
    offsets: Vec<usize>,
    ids: Vec<Uuid>,
    index_by_id: FxHashMap<Uuid, usize>,
}

impl BinaryGraph {
    /// Maps `path` and validates every record once, so later connection
    /// lookups can decode without failing.
    pub fn open(path: &Path) -> Result<Self, GraphError> {
        let data = open_memory_mapped_file(path)?;
        let (offsets, ids) = scan_records(&data)?;

        let mut index_by_id = FxHashMap::with_capacity_and_hasher(ids.len(), Default::default());
        for (index, &id) in ids.iter().enumerate() {
            if index_by_id.insert(id, index).is_some() {
                return Err(GraphError::DuplicateNode(id));
            }
        }

        Ok(Self {
            data,
            offsets,
            ids,
            index_by_id,
        })
    }

    pub fn id(&self, node: usize) -> Option<Uuid> {
        self.ids.get(node).copied()
    }

    pub fn index_of(&self, id: &Uuid) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn ids(&self) -> &[Uuid] {
        &self.ids
    }

    fn decode_connections(&self, node: usize) -> io::Result<Vec<Connection<usize>>> {
        let mut cursor = Cursor::new(&self.data[self.offsets[node] + UUID_LEN..]);
        let connection_count = cursor.read_u32::<LittleEndian>()? as usize;
        let mut connections = Vec::with_capacity(connection_count);

        for _ in 0..connection_count {
            let to = cursor.read_u32::<LittleEndian>()? as usize;
            let cost = cursor.read_f32::<LittleEndian>()?;
            connections.push(Connection::new(node, to, cost));
        }

        Ok(connections)
    }
}

impl IndexedGraph for BinaryGraph {
    type Node = usize;

    fn node_count(&self) -> usize {
        self.ids.len()
    }

    fn index(&self, node: &usize) -> usize {
        *node
    }

    fn connections(&self, node: &usize) -> Cow<'_, [Connection<usize>]> {
        // Records were validated on open, so decoding cannot fail.
        match self.decode_connections(*node) {
            Ok(connections) => Cow::Owned(connections),
            Err(error) => {
                warn!(node = *node, %error, "validated node record failed to decode");
                Cow::Owned(Vec::new())
            }
        }
    }
}

fn open_memory_mapped_file(file_path: &Path) -> Result<Mmap, io::Error> {
    let file = File::open(file_path)?;
    unsafe { Mmap::map(&file) }
}

fn scan_records(data: &[u8]) -> Result<(Vec<usize>, Vec<Uuid>), GraphError> {
    let mut cursor = Cursor::new(data);
    let node_count = read_checked(&mut cursor, |c| c.read_u32::<LittleEndian>())? as usize;

    // The header is untrusted; reserve no more records than the bytes left can hold.
    let capacity = node_count.min(data.len().saturating_sub(4) / MIN_RECORD_LEN);
    let mut offsets = Vec::with_capacity(capacity);
    let mut ids = Vec::with_capacity(capacity);

    for node in 0..node_count {
        offsets.push(cursor.position() as usize);
        ids.push(read_checked(&mut cursor, read_uuid_from_cursor)?);

        let connection_count = read_checked(&mut cursor, |c| c.read_u32::<LittleEndian>())?;
        for _ in 0..connection_count {
            let index = read_checked(&mut cursor, |c| c.read_u32::<LittleEndian>())?;
            let cost = read_checked(&mut cursor, |c| c.read_f32::<LittleEndian>())?;

            if index as usize >= node_count {
                return Err(GraphError::NodeIndexOutOfRange {
                    node,
                    index,
                    node_count,
                });
            }
            if !cost.is_finite() || cost < 0.0 {
                return Err(GraphError::InvalidCost { node, cost });
            }
        }
    }

    let consumed = cursor.position() as usize;
    if consumed != data.len() {
        return Err(GraphError::TrailingBytes {
            trailing: data.len() - consumed,
        });
    }

    Ok((offsets, ids))
}

fn read_checked<'a, T>(
    cursor: &mut Cursor<&'a [u8]>,
    read: impl FnOnce(&mut Cursor<&'a [u8]>) -> io::Result<T>,
) -> Result<T, GraphError> {
    let offset = cursor.position() as usize;
    read(cursor).map_err(|error| match error.kind() {
        io::ErrorKind::UnexpectedEof => GraphError::Truncated { offset },
        _ => GraphError::Io(error),
    })
}

fn read_uuid_from_cursor(cursor: &mut Cursor<&[u8]>) -> io::Result<Uuid> {
    let mut uuid_bytes = [0u8; UUID_LEN];
    cursor.read_exact(&mut uuid_bytes)?;
    Ok(Uuid::from_bytes(uuid_bytes))
}

/// Writes a graph in the layout [`BinaryGraph::open`] reads. `adjacency[i]`
/// lists the `(to_index, cost)` pairs leaving node `ids[i]`.
pub fn write_binary_graph<W: Write>(
    writer: &mut W,
    ids: &[Uuid],
    adjacency: &[Vec<(u32, f32)>],
) -> io::Result<()> {
    assert_eq!(
        ids.len(),
        adjacency.len(),
        "every node needs an adjacency list"
    );

    writer.write_u32::<LittleEndian>(count_to_u32(ids.len(), "node")?)?;
    for (id, connections) in ids.iter().zip(adjacency) {
        writer.write_all(id.as_bytes())?;
        writer.write_u32::<LittleEndian>(count_to_u32(connections.len(), "connection")?)?;
        for &(to, cost) in connections {
            writer.write_u32::<LittleEndian>(to)?;
            writer.write_f32::<LittleEndian>(cost)?;
        }
    }
    Ok(())
}

fn count_to_u32(count: usize, what: &str) -> io::Result<u32> {
    u32::try_from(count).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{count} {what}s do not fit the u32 count field"),
        )
    })
}
