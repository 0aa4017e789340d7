use rustc_hash::FxHashSet;
use waypath_core::{BinaryGraph, Tile, TileNode, TiledGraph};

use crate::args::Args;
use crate::colors::ColorScheme;
use crate::search::SearchResult;
use crate::utils::format_number;

pub fn display_search_info(from: &str, to: &str, args: &Args, colors: &ColorScheme) {
    println!(
        "🧭 Finding path from {} to {}",
        colors.node(from),
        colors.node(to)
    );

    if !args.binary {
        let movement = if args.diagonal { "8-way" } else { "4-way" };
        println!(
            "⚙️  Using {} movement with the {} heuristic",
            movement,
            args.heuristic().as_str()
        );
    }

    println!(
        "⏱️  Frame budget {} µs, at most {} frames",
        colors.number(&format_number(args.budget_us as usize)),
        colors.number(&format_number(args.max_frames as usize))
    );

    if args.smooth {
        println!("✂️  Smoothing the path");
    }

    println!("🔍 Searching...");
}

/// Draws the map with the path laid over it.
pub fn render_grid(
    graph: &TiledGraph,
    path: &[TileNode],
    start: TileNode,
    goal: TileNode,
    colors: &ColorScheme,
) -> String {
    let on_path: FxHashSet<TileNode> = path.iter().copied().collect();
    let mut rendered = String::new();

    for y in 0..graph.height() as i32 {
        for x in 0..graph.width() as i32 {
            let node = TileNode::new(x, y);
            let cell = if node == start {
                colors.endpoint("S")
            } else if node == goal {
                colors.endpoint("G")
            } else if on_path.contains(&node) {
                colors.path("*")
            } else if graph.tile(x, y) == Some(Tile::Wall) {
                colors.wall("#")
            } else {
                colors.wall(".")
            };
            rendered.push_str(&cell.to_string());
        }
        rendered.push('\n');
    }

    rendered
}

pub fn format_tile(node: &TileNode) -> String {
    format!("{},{}", node.x, node.y)
}

pub fn display_grid_results(
    graph: &TiledGraph,
    result: &SearchResult<TileNode>,
    start: TileNode,
    goal: TileNode,
    args: &Args,
    colors: &ColorScheme,
) {
    if args.verbose {
        println!("\n---\n");
    }

    match &result.path {
        Some(path) => {
            display_successful_path(
                &path.iter().map(format_tile).collect::<Vec<_>>(),
                result.cost,
                args,
                colors,
            );
            if !args.quiet {
                println!();
                print!("{}", render_grid(graph, path, start, goal, colors));
            }
        }
        None => display_no_path(&format_tile(&start), &format_tile(&goal), colors),
    }

    if args.verbose {
        display_search_statistics(result, colors);
    }
}

pub fn display_binary_results(
    graph: &BinaryGraph,
    result: &SearchResult<usize>,
    from: &str,
    to: &str,
    args: &Args,
    colors: &ColorScheme,
) {
    if args.verbose {
        println!("\n---\n");
    }

    match &result.path {
        Some(path) => {
            let labels: Vec<String> = path
                .iter()
                .map(|&node| match graph.id(node) {
                    Some(id) => id.to_string(),
                    None => format!("#{}", node),
                })
                .collect();
            display_successful_path(&labels, result.cost, args, colors);
        }
        None => display_no_path(from, to, colors),
    }

    if args.verbose {
        display_search_statistics(result, colors);
    }
}

fn display_no_path(from: &str, to: &str, colors: &ColorScheme) {
    println!(
        "{} {} and {}",
        colors.error("❌ No path found between"),
        colors.node(from),
        colors.node(to)
    );
}

fn display_successful_path(labels: &[String], cost: Option<f32>, args: &Args, colors: &ColorScheme) {
    if args.verbose {
        let step_count = labels.len().saturating_sub(1);
        println!(
            "{} Found path with {} steps:\n",
            colors.success("✅"),
            colors.number(&step_count.to_string())
        );
    }

    let path_flow = labels
        .iter()
        .map(|label| colors.node(label).to_string())
        .collect::<Vec<_>>()
        .join(" → ");
    println!("{}", path_flow);

    if args.quiet {
        return;
    }

    if let Some(cost) = cost {
        println!("{} {}", colors.stats("Cost:"), colors.number(&format!("{:.3}", cost)));
    }

    if args.binary {
        println!();
        for (step_index, label) in labels.iter().enumerate() {
            let step_number = format!("{}.", step_index + 1);
            println!("{:3} {}", colors.step_number(&step_number), colors.node(label));
        }
    }
}

fn display_search_statistics<N>(result: &SearchResult<N>, colors: &ColorScheme) {
    println!("\n---\n");
    if let Some(metrics) = &result.metrics {
        println!(
            "{} Examined {} connections, open list peaked at {} nodes",
            colors.stats("📊"),
            colors.number(&format_number(metrics.visited_nodes)),
            colors.number(&format_number(metrics.open_list_peak))
        );
    }
    println!(
        "{} Finished in {} frames, {} sec",
        colors.stats("⏱️"),
        colors.number(&format_number(result.frames as usize)),
        colors.number(&format!("{:.3}", result.search_duration))
    );
}
