use clap::Parser;
use std::error::Error;
use waypath::app::{LoadedMap, WaypathApp};
use waypath::colors::ColorScheme;
use waypath::display::{display_binary_results, display_grid_results, display_search_info, format_tile};
use waypath::json_output::create_json_output;
use waypath::logging::setup_logging;
use waypath::search::polyline_length;
use waypath::*;
use waypath_core::{
    BinaryGraph, PathFinderRequest, PathSmoother, PathfindingConfig, TiledGraph, ZeroHeuristic,
};

fn main() {
    let args = Args::parse();
    let colors = ColorScheme::new(!args.no_color && !args.json);
    setup_logging(args.verbose, args.quiet, !args.no_color);

    if let Err(error) = run(&args, &colors) {
        eprintln!("{} {}", colors.error("❌ Error:"), error);
        std::process::exit(1);
    }
}

fn run(args: &Args, colors: &ColorScheme) -> Result<(), Box<dyn Error>> {
    let app = WaypathApp::new(args)?;
    let options = FrameOptions {
        budget_nanos: args.budget_nanos(),
        max_frames: args.max_frames,
        config: PathfindingConfig {
            calculate_metrics: args.verbose || args.json,
            ..PathfindingConfig::default()
        },
    };

    match app.load_map()? {
        LoadedMap::Grid(graph) => run_grid_search(&graph, args, &options, colors),
        LoadedMap::Binary(graph) => run_binary_search(&graph, args, &options, colors),
    }
}

fn run_grid_search(
    graph: &TiledGraph,
    args: &Args,
    options: &FrameOptions,
    colors: &ColorScheme,
) -> Result<(), Box<dyn Error>> {
    let start = resolve_tile(args.from.as_deref(), graph.start_marker(), 'S', graph)?;
    let goal = resolve_tile(args.to.as_deref(), graph.goal_marker(), 'G', graph)?;

    if args.verbose && !args.json {
        display_search_info(&format_tile(&start), &format_tile(&goal), args, colors);
    }

    let mut request = PathFinderRequest::new(start, goal, GridHeuristic(args.heuristic()));
    if args.smooth {
        request = request.with_finalizer(PathSmoother::new(graph.collision_detector()));
    }

    let mut result = run_frames(graph, request, options)?;
    if args.smooth {
        result.cost = result.path.as_deref().map(polyline_length);
    }

    if args.json {
        let output = create_json_output(
            &format_tile(&start),
            &format_tile(&goal),
            args,
            &result,
            |node| *node,
        );
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        display_grid_results(graph, &result, start, goal, args, colors);
    }

    Ok(())
}

fn run_binary_search(
    graph: &BinaryGraph,
    args: &Args,
    options: &FrameOptions,
    colors: &ColorScheme,
) -> Result<(), Box<dyn Error>> {
    let start = resolve_node_id(args.from.as_deref(), graph)?;
    let goal = resolve_node_id(args.to.as_deref(), graph)?;
    let from = args.from.clone().unwrap_or_default();
    let to = args.to.clone().unwrap_or_default();

    if args.verbose && !args.json {
        display_search_info(&from, &to, args, colors);
    }

    let request = PathFinderRequest::new(start, goal, ZeroHeuristic);
    let result = run_frames(graph, request, options)?;

    if args.json {
        let output = create_json_output(&from, &to, args, &result, |&node| graph.id(node));
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        display_binary_results(graph, &result, &from, &to, args, colors);
    }

    Ok(())
}
