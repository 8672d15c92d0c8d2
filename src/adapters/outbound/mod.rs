pub mod file_logger;
pub mod multi_logger;
pub mod noop_logger;
pub mod tiled_map;
pub mod tracing_logger;

pub use file_logger::*;
pub use multi_logger::*;
pub use noop_logger::*;
pub use tiled_map::*;
pub use tracing_logger::*;
