pub mod grid_navigation;
pub mod logger;

pub use grid_navigation::*;
pub use logger::*;
