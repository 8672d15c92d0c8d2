use crate::domains::logger::{parse_level, DomainLogger, FileLogger};
use std::sync::Arc;

/// Initialize the fast_log file sink and return the domain logger that
/// writes timestamped records into it.
pub fn init_file_logger(path: &str, level: &str) -> Result<Arc<dyn DomainLogger>, String> {
    FileLogger::init(path, parse_level(level))
        .map_err(|e| format!("Failed to initialize fast_log at {}: {}", path, e))?;
    Ok(Arc::new(FileLogger))
}
