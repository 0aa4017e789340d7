use waypath_core::graph::TiledRaycastCollisionDetector;
use waypath_core::pathfinding::path_cost;
use waypath_core::raycast::{Ray, RaycastCollisionDetector, Vec2};
use waypath_core::{
    DefaultGraphPath, EuclideanDistance, GraphError, GraphPath, Heuristic, IndexedAStarPathFinder,
    IndexedGraph, ManhattanDistance, OctileDistance, PathFinder, Tile, TileNode, TiledGraph,
};

const MAZE: &str = "
S.#.....
..#.##.#
..#..#..
....#..G
";

fn assert_walkable(graph: &TiledGraph, path: &DefaultGraphPath<TileNode>) {
    for node in path.iter() {
        assert!(graph.is_passable(node.x, node.y), "{node:?} is a wall");
    }
    for pair in path.as_slice().windows(2) {
        let (dx, dy) = (pair[1].x - pair[0].x, pair[1].y - pair[0].y);
        assert!(dx.abs() <= 1 && dy.abs() <= 1 && (dx, dy) != (0, 0));
        if dx != 0 && dy != 0 {
            assert!(graph.is_passable(pair[0].x + dx, pair[0].y));
            assert!(graph.is_passable(pair[0].x, pair[0].y + dy));
        }
    }
}

#[test]
fn test_manhattan_path_length_on_open_grid() {
    let graph = TiledGraph::open(10, 8, false).unwrap();
    let mut finder = IndexedAStarPathFinder::new(&graph);

    for (start, goal) in [((0, 0), (4, 3)), ((9, 7), (2, 1)), ((5, 5), (5, 0))] {
        let start = TileNode::new(start.0, start.1);
        let goal = TileNode::new(goal.0, goal.1);
        let mut path = DefaultGraphPath::new();

        assert!(finder.search_node_path(start, goal, &ManhattanDistance, &mut path));
        let expected = (goal.x - start.x).abs() + (goal.y - start.y).abs() + 1;
        assert_eq!(path.as_slice().len(), expected as usize);
        assert_walkable(&graph, &path);
    }
}

#[test]
fn test_maze_path_avoids_walls() {
    let graph = TiledGraph::from_ascii(MAZE, false).unwrap();
    let start = graph.start_marker().unwrap();
    let goal = graph.goal_marker().unwrap();
    assert_eq!(start, TileNode::new(0, 0));
    assert_eq!(goal, TileNode::new(7, 3));

    let mut finder = IndexedAStarPathFinder::new(&graph);
    let mut path = DefaultGraphPath::new();
    assert!(finder.search_node_path(start, goal, &ManhattanDistance, &mut path));

    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&goal));
    assert_walkable(&graph, &path);
    assert_eq!(path_cost(&graph, &path), Some(16.0));
}

#[test]
fn test_diagonal_moves_do_not_cut_corners() {
    let graph = TiledGraph::from_ascii(
        "
..
#.
",
        true,
    )
    .unwrap();
    let mut finder = IndexedAStarPathFinder::new(&graph);
    let mut path = DefaultGraphPath::new();

    assert!(finder.search_node_path(
        TileNode::new(0, 0),
        TileNode::new(1, 1),
        &OctileDistance,
        &mut path
    ));
    assert_eq!(
        path.as_slice(),
        &[TileNode::new(0, 0), TileNode::new(1, 0), TileNode::new(1, 1)]
    );
}

#[test]
fn test_octile_path_on_open_diagonal_grid() {
    let graph = TiledGraph::open(5, 5, true).unwrap();
    let mut finder = IndexedAStarPathFinder::new(&graph);
    let mut path = DefaultGraphPath::new();

    assert!(finder.search_node_path(
        TileNode::new(0, 0),
        TileNode::new(3, 3),
        &OctileDistance,
        &mut path
    ));
    assert_eq!(path.as_slice().len(), 4);
    let cost = path_cost(&graph, &path).unwrap();
    assert!((cost - 3.0 * std::f32::consts::SQRT_2).abs() < 1e-5);
    assert_walkable(&graph, &path);
}

#[test]
fn test_walled_off_goal_is_unreachable() {
    let graph = TiledGraph::from_ascii(
        "
S.#..
..#.G
..#..
",
        true,
    )
    .unwrap();
    let mut finder = IndexedAStarPathFinder::new(&graph);
    let mut path = DefaultGraphPath::new();

    assert!(!finder.search_node_path(
        graph.start_marker().unwrap(),
        graph.goal_marker().unwrap(),
        &EuclideanDistance,
        &mut path
    ));
    assert!(path.is_empty());
}

#[test]
fn test_walls_have_no_connections() {
    let graph = TiledGraph::from_ascii("#.\n..", false).unwrap();
    assert_eq!(graph.tile(0, 0), Some(Tile::Wall));
    assert!(graph.connections(&TileNode::new(0, 0)).is_empty());

    let from_floor: Vec<TileNode> = graph
        .connections(&TileNode::new(1, 0))
        .iter()
        .map(|c| c.to)
        .collect();
    assert_eq!(from_floor, vec![TileNode::new(1, 1)]);
}

#[test]
fn test_index_is_row_major() {
    let graph = TiledGraph::open(4, 3, false).unwrap();
    assert_eq!(graph.node_count(), 12);
    assert_eq!(graph.index(&TileNode::new(0, 0)), 0);
    assert_eq!(graph.index(&TileNode::new(3, 0)), 3);
    assert_eq!(graph.index(&TileNode::new(1, 2)), 9);
    assert_eq!(graph.node(4, 0), None);
}

#[test]
#[should_panic(expected = "outside")]
fn test_index_outside_map_panics() {
    let graph = TiledGraph::open(2, 2, false).unwrap();
    graph.index(&TileNode::new(2, 0));
}

#[test]
fn test_heuristic_estimates() {
    let from = TileNode::new(1, 1);
    let to = TileNode::new(4, 5);
    assert_eq!(ManhattanDistance.estimate(&from, &to), 7.0);
    assert_eq!(EuclideanDistance.estimate(&from, &to), 5.0);
    let octile = OctileDistance.estimate(&from, &to);
    assert!((octile - (4.0 + 3.0 * (std::f32::consts::SQRT_2 - 1.0))).abs() < 1e-5);
}

#[test]
fn test_ascii_parse_errors() {
    assert!(matches!(
        TiledGraph::from_ascii("\n  \n", false),
        Err(GraphError::EmptyMap)
    ));
    assert!(matches!(
        TiledGraph::from_ascii("...\n..\n", false),
        Err(GraphError::RaggedMap {
            line: 2,
            expected: 3,
            found: 2
        })
    ));
    assert!(matches!(
        TiledGraph::from_ascii("..\n.x\n", false),
        Err(GraphError::UnknownTile {
            line: 2,
            column: 2,
            character: 'x'
        })
    ));
}

#[test]
fn test_tile_count_must_match_dimensions() {
    let result = TiledGraph::new(3, 3, vec![Tile::Floor; 8], false);
    assert!(matches!(
        result,
        Err(GraphError::TileCountMismatch {
            expected: 9,
            found: 8
        })
    ));
}

#[test]
fn test_raycast_stops_at_walls() {
    let graph = TiledGraph::from_ascii(
        "
.....
..#..
.....
",
        false,
    )
    .unwrap();
    let detector: TiledRaycastCollisionDetector = graph.collision_detector();

    let blocked = Ray::new(Vec2::new(0.0, 1.0), Vec2::new(4.0, 1.0));
    let above = Ray::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0));
    let diagonal = Ray::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 2.0));
    let off_map = Ray::new(Vec2::new(0.0, 0.0), Vec2::new(6.0, 0.0));

    assert!(detector.collides(&blocked));
    assert!(!detector.collides(&above));
    assert!(detector.collides(&diagonal));
    assert!(detector.collides(&off_map));
}
