use std::{error::Error, fs, path::PathBuf};
use tracing::debug;
use waypath_core::{BinaryGraph, IndexedGraph, TiledGraph};

use crate::args::Args;

pub enum LoadedMap {
    Grid(TiledGraph),
    Binary(BinaryGraph),
}

pub struct WaypathApp {
    pub map_path: PathBuf,
    pub binary: bool,
    pub diagonal: bool,
}

impl WaypathApp {
    pub fn new(args: &Args) -> Result<Self, Box<dyn Error>> {
        if !args.map.exists() {
            return Err(format!("Map file does not exist: {:?}", args.map).into());
        }

        Ok(Self {
            map_path: args.map.clone(),
            binary: args.binary,
            diagonal: args.diagonal,
        })
    }

    pub fn load_map(&self) -> Result<LoadedMap, Box<dyn Error>> {
        if self.binary {
            let graph = BinaryGraph::open(&self.map_path)?;
            debug!(nodes = graph.node_count(), path = ?self.map_path, "binary graph loaded");
            Ok(LoadedMap::Binary(graph))
        } else {
            let text = fs::read_to_string(&self.map_path)?;
            let graph = TiledGraph::from_ascii(&text, self.diagonal)?;
            debug!(
                width = graph.width(),
                height = graph.height(),
                diagonal = graph.allows_diagonal(),
                "grid map loaded"
            );
            Ok(LoadedMap::Grid(graph))
        }
    }
}
