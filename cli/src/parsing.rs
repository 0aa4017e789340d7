use uuid::Uuid;
use waypath_core::{BinaryGraph, TileNode, TiledGraph};

/// Parses an `x,y` tile coordinate.
pub fn parse_tile(text: &str) -> Result<TileNode, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("Expected a tile as x,y, got '{}'", text))?;

    let x = x
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("Invalid x coordinate in '{}'", text))?;
    let y = y
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("Invalid y coordinate in '{}'", text))?;

    Ok(TileNode::new(x, y))
}

/// Resolves a grid endpoint from an explicit `x,y` argument or, failing that,
/// from the map marker. The tile must be on the map and walkable.
pub fn resolve_tile(
    argument: Option<&str>,
    marker: Option<TileNode>,
    marker_name: char,
    graph: &TiledGraph,
) -> Result<TileNode, String> {
    let tile = match argument {
        Some(text) => parse_tile(text)?,
        None => marker.ok_or_else(|| {
            format!("No '{}' marker on the map; pass the tile as x,y", marker_name)
        })?,
    };

    if !graph.contains(tile.x, tile.y) {
        return Err(format!(
            "Tile {},{} is outside the {}x{} map",
            tile.x,
            tile.y,
            graph.width(),
            graph.height()
        ));
    }
    if !graph.is_passable(tile.x, tile.y) {
        return Err(format!("Tile {},{} is a wall", tile.x, tile.y));
    }

    Ok(tile)
}

/// Resolves a binary-graph node from its UUID.
pub fn resolve_node_id(argument: Option<&str>, graph: &BinaryGraph) -> Result<usize, String> {
    let text = argument.ok_or("Binary graphs need --from and --to node UUIDs")?;
    let id = Uuid::parse_str(text.trim()).map_err(|_| format!("Invalid node UUID '{}'", text))?;
    graph
        .index_of(&id)
        .ok_or_else(|| format!("Node {} not found in graph", id))
}
