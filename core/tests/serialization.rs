use uuid::Uuid;
use waypath_core::pathfinding::Metrics;
use waypath_core::pathfinding_config::DEFAULT_TIME_TOLERANCE_NS;
use waypath_core::{PathResponse, PathfindingConfig, SearchStatus, TileNode};

#[test]
fn test_config_defaults() {
    let config = PathfindingConfig::default();
    assert_eq!(config.time_tolerance_ns, DEFAULT_TIME_TOLERANCE_NS);
    assert!(!config.calculate_metrics);
    assert_eq!(config.queue_capacity, 16);
}

#[test]
fn test_config_fills_missing_fields_with_defaults() {
    let config: PathfindingConfig = serde_json::from_str(r#"{"calculate_metrics": true}"#).unwrap();
    assert!(config.calculate_metrics);
    assert_eq!(config.time_tolerance_ns, DEFAULT_TIME_TOLERANCE_NS);
    assert_eq!(config.queue_capacity, 16);
}

#[test]
fn test_metrics_serialization() {
    let metrics = Metrics {
        visited_nodes: 12,
        open_list_additions: 7,
        open_list_peak: 3,
    };
    let json = serde_json::to_string(&metrics).unwrap();
    assert_eq!(
        json,
        r#"{"visited_nodes":12,"open_list_additions":7,"open_list_peak":3}"#
    );
    let back: Metrics = serde_json::from_str(&json).unwrap();
    assert_eq!(back, metrics);
}

#[test]
fn test_search_status_serialization() {
    assert_eq!(
        serde_json::to_string(&SearchStatus::Finalized).unwrap(),
        r#""Finalized""#
    );
}

#[test]
fn test_path_response_serialization() {
    let sender = Uuid::nil();
    let response = PathResponse {
        sender,
        receiver: None,
        code: 3,
        path_found: true,
        nodes: vec![TileNode::new(0, 0), TileNode::new(1, 0)],
        execution_frames: 2,
    };

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["code"], 3);
    assert_eq!(value["receiver"], serde_json::Value::Null);
    assert_eq!(value["nodes"][1]["x"], 1);
    assert_eq!(value["sender"], "00000000-0000-0000-0000-000000000000");
}
