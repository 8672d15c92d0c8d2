use super::types::{markers_match, Cell};
use crate::common::{DomainError, DomainResult};
use crate::domains::grid_navigation::ports::GridSource;
use serde::{Deserialize, Serialize};

/// Square grid stored row-major. The dimension is fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    dimension: usize,
    cells: Vec<f64>,
}

impl Grid {
    /// Builds a grid from row-major values. The count must be a non-empty
    /// perfect square.
    pub fn from_cells(cells: Vec<f64>) -> DomainResult<Self> {
        let cell_count = cells.len();
        let dimension = integer_sqrt(cell_count);
        if cell_count == 0 || dimension * dimension != cell_count {
            return Err(DomainError::MalformedGrid { cell_count });
        }
        Ok(Self { dimension, cells })
    }

    /// Convenience constructor for literal grids; every row must have the
    /// same length as the number of rows.
    pub fn from_rows(rows: &[&[f64]]) -> DomainResult<Self> {
        if rows.iter().any(|r| r.len() != rows.len()) {
            return Err(DomainError::MalformedGrid {
                cell_count: rows.iter().map(|r| r.len()).sum(),
            });
        }
        Self::from_cells(rows.iter().flat_map(|r| r.iter().copied()).collect())
    }

    pub fn filled(dimension: usize, value: f64) -> DomainResult<Self> {
        Self::from_cells(vec![value; dimension * dimension])
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    fn index(&self, row: usize, col: usize) -> DomainResult<usize> {
        if row >= self.dimension || col >= self.dimension {
            return Err(DomainError::OutOfRange {
                row,
                col,
                dimension: self.dimension,
            });
        }
        Ok(row * self.dimension + col)
    }
}

fn integer_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

impl GridSource for Grid {
    fn width(&self) -> usize {
        self.dimension
    }

    fn height(&self) -> usize {
        self.dimension
    }

    fn cell_value(&self, row: usize, col: usize) -> DomainResult<f64> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx])
    }

    fn set_cell_value(&mut self, row: usize, col: usize, value: f64) -> DomainResult<()> {
        let idx = self.index(row, col)?;
        self.cells[idx] = value;
        Ok(())
    }

    fn find_cells(&self, value: f64, tolerance: f64) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| markers_match(**v, value, tolerance))
            .map(|(i, _)| Cell::new(i / self.dimension, i % self.dimension))
            .collect()
    }

    fn to_row_major(&self) -> Vec<f64> {
        self.cells.clone()
    }
}
