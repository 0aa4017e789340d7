use clap::Parser;
use std::io::Write;
use tempfile::NamedTempFile;
use uuid::Uuid;
use waypath::{Args, HeuristicKind, format_number, parse_tile, resolve_node_id, resolve_tile};
use waypath_core::graph::write_binary_graph;
use waypath_core::{BinaryGraph, TileNode, TiledGraph};

const MAP: &str = "
S..#
...#
..G.
";

#[test]
fn test_parse_tile() {
    assert_eq!(parse_tile("3,4"), Ok(TileNode::new(3, 4)));
    assert_eq!(parse_tile(" 0 , 12 "), Ok(TileNode::new(0, 12)));
    assert!(parse_tile("3").is_err());
    assert!(parse_tile("a,4").is_err());
    assert!(parse_tile("3,").is_err());
}

#[test]
fn test_resolve_tile_falls_back_to_markers() {
    let graph = TiledGraph::from_ascii(MAP, false).unwrap();

    assert_eq!(
        resolve_tile(None, graph.start_marker(), 'S', &graph),
        Ok(TileNode::new(0, 0))
    );
    assert_eq!(
        resolve_tile(Some("1,1"), graph.start_marker(), 'S', &graph),
        Ok(TileNode::new(1, 1))
    );
}

#[test]
fn test_resolve_tile_rejects_walls_and_outside_tiles() {
    let graph = TiledGraph::from_ascii(MAP, false).unwrap();

    let wall = resolve_tile(Some("3,0"), None, 'S', &graph).unwrap_err();
    assert!(wall.contains("wall"));

    let outside = resolve_tile(Some("9,9"), None, 'S', &graph).unwrap_err();
    assert!(outside.contains("outside"));

    let unmarked = TiledGraph::open(2, 2, false).unwrap();
    let missing = resolve_tile(None, unmarked.goal_marker(), 'G', &unmarked).unwrap_err();
    assert!(missing.contains("'G'"));
}

#[test]
fn test_resolve_node_id() {
    let ids = vec![Uuid::new_v4(), Uuid::new_v4()];
    let mut file = NamedTempFile::new().unwrap();
    write_binary_graph(&mut file, &ids, &[vec![(1, 1.0)], vec![]]).unwrap();
    file.flush().unwrap();
    let graph = BinaryGraph::open(file.path()).unwrap();

    assert_eq!(resolve_node_id(Some(ids[1].to_string().as_str()), &graph), Ok(1));
    assert!(resolve_node_id(Some("not-a-uuid"), &graph).is_err());
    assert!(resolve_node_id(Some(Uuid::new_v4().to_string().as_str()), &graph).is_err());
    assert!(resolve_node_id(None, &graph).is_err());
}

#[test]
fn test_args_defaults() {
    let args = Args::try_parse_from(["waypath", "map.txt"]).unwrap();
    assert_eq!(args.budget_us, 1000);
    assert_eq!(args.max_frames, 10_000);
    assert_eq!(args.heuristic(), HeuristicKind::Manhattan);
    assert_eq!(args.budget_nanos(), 1_000_000);

    let diagonal = Args::try_parse_from(["waypath", "map.txt", "--diagonal"]).unwrap();
    assert_eq!(diagonal.heuristic(), HeuristicKind::Octile);

    let explicit = Args::try_parse_from([
        "waypath",
        "map.txt",
        "--heuristic",
        "euclidean",
        "--from",
        "1,2",
    ])
    .unwrap();
    assert_eq!(explicit.heuristic(), HeuristicKind::Euclidean);
    assert_eq!(explicit.from.as_deref(), Some("1,2"));
}

#[test]
fn test_format_number() {
    assert_eq!(format_number(0), "0");
    assert_eq!(format_number(123), "123");
    assert_eq!(format_number(1234), "1,234");
    assert_eq!(format_number(1234567), "1,234,567");
}
