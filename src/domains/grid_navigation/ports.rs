use crate::common::DomainResult;
use crate::domains::grid_navigation::aggregate::{Cell, Grid};

/// Read/write access to a flattened square grid of marker values.
pub trait GridSource: Send + Sync {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Fails with `DomainError::OutOfRange` outside `[0, dim)`.
    fn cell_value(&self, row: usize, col: usize) -> DomainResult<f64>;
    fn set_cell_value(&mut self, row: usize, col: usize, value: f64) -> DomainResult<()>;

    /// All cells within `tolerance` of `value`, in row-major order.
    fn find_cells(&self, value: f64, tolerance: f64) -> Vec<Cell>;

    /// Current cell values in row-major order.
    fn to_row_major(&self) -> Vec<f64>;

    fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height() && cell.col < self.width()
    }
}

/// Single-pair shortest path search over a grid.
/// An empty result means the goal is unreachable.
pub trait PathPlanner: Send + Sync {
    fn plan(&self, grid: &dyn GridSource, start: Cell, goal: Cell) -> DomainResult<Vec<Cell>>;
}

/// Port for loading and storing tile maps. Adapters decide where names resolve.
pub trait MapSource: Send + Sync {
    fn load_grid(&self, name: &str) -> DomainResult<Grid>;
    fn save_grid(&self, name: &str, grid: &dyn GridSource) -> DomainResult<()>;
}
