use crate::config::LoggingConfig;
use crate::domains::logger::{DomainLogger, DynLogger};
use std::sync::Arc;

/// Forwards every record to each sink in order.
pub struct FanoutLogger {
    sinks: Vec<DynLogger>,
}

impl FanoutLogger {
    pub fn new(sinks: Vec<DynLogger>) -> Self {
        Self { sinks }
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl DomainLogger for FanoutLogger {
    fn info(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.info(msg));
    }

    fn warn(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.warn(msg));
    }

    fn error(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.error(msg));
    }
}

/// Builds the domain logger described by `config`: tracing output always,
/// plus the fast_log file sink when a file is configured. A file sink that
/// fails to initialize is reported and skipped.
pub fn init_domain_logger(config: &LoggingConfig) -> DynLogger {
    let tracing_sink = crate::adapters::outbound::init_tracing_logger();
    let Some(path) = config.file.as_deref() else {
        return tracing_sink;
    };

    match crate::adapters::outbound::file_logger::init_file_logger(path, &config.level) {
        Ok(file_sink) => Arc::new(FanoutLogger::new(vec![tracing_sink, file_sink])),
        Err(e) => {
            tracing_sink.warn(&e);
            tracing_sink
        }
    }
}
