pub mod agent;
pub mod assignment;
pub mod astar;
pub mod coordinator;
pub mod discovery;
pub mod grid;
pub mod types;

// Re-export all public types for convenience
pub use agent::*;
pub use assignment::*;
pub use astar::*;
pub use coordinator::*;
pub use discovery::*;
pub use grid::*;
pub use types::*;
