use serde::{Deserialize, Serialize};
use waypath_core::pathfinding::Metrics;

use crate::args::{Args, HeuristicKind};
use crate::search::SearchResult;

#[derive(Serialize, Deserialize)]
pub struct JsonOutput<N> {
    pub query: JsonQuery,
    pub result: JsonResult<N>,
    pub stats: JsonStats,
}

#[derive(Serialize, Deserialize)]
pub struct JsonQuery {
    pub map: String,
    pub from: String,
    pub to: String,
    pub options: JsonOptions,
}

#[derive(Serialize, Deserialize)]
pub struct JsonOptions {
    pub binary: bool,
    pub diagonal: bool,
    pub heuristic: String,
    pub budget_us: u64,
    pub smooth: bool,
}

#[derive(Serialize, Deserialize)]
pub struct JsonResult<N> {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<N>>,
}

#[derive(Serialize, Deserialize)]
pub struct JsonStats {
    pub frames: u32,
    pub search_duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
}

pub fn create_json_output<N, M>(
    from: &str,
    to: &str,
    args: &Args,
    result: &SearchResult<N>,
    to_output: impl Fn(&N) -> M,
) -> JsonOutput<M> {
    JsonOutput {
        query: JsonQuery {
            map: args.map.display().to_string(),
            from: from.to_string(),
            to: to.to_string(),
            options: JsonOptions {
                binary: args.binary,
                diagonal: args.diagonal,
                heuristic: if args.binary {
                    HeuristicKind::Zero.as_str().to_string()
                } else {
                    args.heuristic().as_str().to_string()
                },
                budget_us: args.budget_us,
                smooth: args.smooth,
            },
        },
        result: JsonResult {
            found: result.path.is_some(),
            cost: result.cost,
            path: result
                .path
                .as_ref()
                .map(|nodes| nodes.iter().map(&to_output).collect()),
        },
        stats: JsonStats {
            frames: result.frames,
            search_duration_ms: (result.search_duration * 1000.0) as u64,
            metrics: result.metrics,
        },
    }
}
