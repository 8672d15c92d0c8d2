use gridnav::adapters::outbound::*;
use gridnav::common::DomainError;
use gridnav::domains::grid_navigation::*;
use gridnav::domains::logger::{DomainLogger, DynLogger};
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const SAMPLE_MAP: &str = r#"{
    "layers": [
        { "name": "background", "type": "imagelayer" },
        {
            "name": "world",
            "tileset": "MapEditor Tileset_woodland.png",
            "data": [0.5, 0, 0, 3, 3, 0, 0, 0, 8.1]
        }
    ],
    "tilesets": [],
    "canvas": { "width": 1024, "height": 1024 }
}"#;

#[cfg(test)]
mod tiled_map_tests {
    use super::*;

    #[test]
    fn test_parse_takes_first_layer_with_data() {
        let grid = parse_tiled_map(SAMPLE_MAP).unwrap();

        assert_eq!(grid.dimension(), 3);
        assert_eq!(grid.cell_value(0, 0).unwrap(), 0.5);
        assert_eq!(grid.cell_value(1, 0).unwrap(), 3.0);
        assert_eq!(grid.cell_value(2, 2).unwrap(), 8.1);
    }

    #[test]
    fn test_parse_rejects_non_square_data() {
        let json = r#"{ "layers": [ { "data": [0, 0, 0, 0, 0, 0, 0, 0] } ] }"#;
        assert!(matches!(
            parse_tiled_map(json),
            Err(DomainError::MalformedGrid { cell_count: 8 })
        ));
    }

    #[test]
    fn test_parse_rejects_missing_or_empty_data() {
        let no_data = r#"{ "layers": [ { "name": "background" } ] }"#;
        assert!(matches!(
            parse_tiled_map(no_data),
            Err(DomainError::MapFormat { .. })
        ));

        let empty = r#"{ "layers": [ { "data": [] } ] }"#;
        assert!(matches!(
            parse_tiled_map(empty),
            Err(DomainError::MapFormat { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(matches!(
            parse_tiled_map("{ not json"),
            Err(DomainError::SerializationError(_))
        ));
    }

    #[test]
    fn test_render_writes_single_world_layer() {
        let grid = Grid::from_rows(&[&[0.5, 0.0], &[3.0, 8.1]]).unwrap();

        let rendered = render_tiled_map(&grid).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(doc["layers"].as_array().unwrap().len(), 1);
        assert_eq!(doc["layers"][0]["name"], "world");
        assert_eq!(doc["layers"][0]["tileset"], "MapEditor Tileset_woodland.png");
        assert_eq!(
            doc["layers"][0]["data"],
            serde_json::json!([0.5, 0.0, 3.0, 8.1])
        );
        assert_eq!(doc["tilesets"][0]["imagewidth"], 512);
        assert_eq!(doc["tilesets"][0]["tilewidth"], 32);
        assert_eq!(doc["canvas"]["width"], 1024);
        assert_eq!(doc["canvas"]["height"], 1024);
    }

    #[test]
    fn test_rendered_map_parses_back() {
        let grid = Grid::from_rows(&[&[0.9, 0.0], &[0.0, 8.4]]).unwrap();
        let reparsed = parse_tiled_map(&render_tiled_map(&grid).unwrap()).unwrap();
        assert_eq!(reparsed, grid);
    }
}

#[cfg(test)]
mod map_source_tests {
    use super::*;

    #[test]
    fn test_load_and_save_under_base_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("maze.json"), SAMPLE_MAP).unwrap();
        let source = FilesystemMapSource::new(Some(dir.path().to_path_buf()));

        let mut grid = source.load_grid("maze.json").unwrap();
        grid.set_cell_value(0, 1, 0.5).unwrap();
        source.save_grid("out/marked.json", &grid).unwrap();

        let saved = fs::read_to_string(dir.path().join("out").join("marked.json")).unwrap();
        let reloaded = parse_tiled_map(&saved).unwrap();
        assert_eq!(reloaded.cell_value(0, 1).unwrap(), 0.5);
        assert_eq!(reloaded, grid);
    }

    #[test]
    fn test_absolute_names_bypass_base_directory() {
        let dir = TempDir::new().unwrap();
        let absolute = dir.path().join("elsewhere.json");
        fs::write(&absolute, SAMPLE_MAP).unwrap();
        let source = FilesystemMapSource::new(Some("/nonexistent/base".into()));

        assert_eq!(source.resolve(absolute.to_str().unwrap()), absolute);
        assert!(source.load_grid(absolute.to_str().unwrap()).is_ok());
    }

    #[test]
    fn test_missing_file_is_infrastructure_error() {
        let dir = TempDir::new().unwrap();
        let source = FilesystemMapSource::new(Some(dir.path().to_path_buf()));

        match source.load_grid("missing.json") {
            Err(DomainError::InfrastructureError(msg)) => assert!(msg.contains("missing.json")),
            other => panic!("Expected InfrastructureError, got {:?}", other),
        }
    }
}

struct CaptureLogger {
    messages: Arc<Mutex<Vec<String>>>,
}

impl DomainLogger for CaptureLogger {
    fn info(&self, msg: &str) {
        self.messages.lock().unwrap().push(format!("INFO:{}", msg));
    }
    fn warn(&self, msg: &str) {
        self.messages.lock().unwrap().push(format!("WARN:{}", msg));
    }
    fn error(&self, msg: &str) {
        self.messages.lock().unwrap().push(format!("ERR:{}", msg));
    }
}

#[cfg(test)]
mod logger_adapter_tests {
    use super::*;

    #[test]
    fn test_fanout_forwards_to_every_sink() {
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));
        let sinks: Vec<DynLogger> = vec![
            Arc::new(CaptureLogger { messages: first.clone() }),
            Arc::new(CaptureLogger { messages: second.clone() }),
        ];
        let fanout = FanoutLogger::new(sinks);
        assert_eq!(fanout.len(), 2);

        fanout.info("one");
        fanout.warn("two");
        fanout.error("three");

        for messages in [first, second] {
            let msgs = messages.lock().unwrap();
            assert_eq!(*msgs, vec!["INFO:one", "WARN:two", "ERR:three"]);
        }
    }

    #[test]
    fn test_empty_fanout_and_noop_accept_calls() {
        let fanout = FanoutLogger::new(Vec::new());
        assert!(fanout.is_empty());
        fanout.info("dropped");

        let noop = init_noop_logger();
        noop.info("ignored");
        noop.error("ignored-err");
    }

    #[test]
    fn test_domain_logger_without_file_is_tracing_only() {
        let logger = init_domain_logger(&gridnav::config::LoggingConfig::default());
        logger.info("tracing bridge");
    }
}
