use super::types::{Cell, MarkerSet};
use crate::common::{DomainError, DomainResult};
use crate::domains::grid_navigation::ports::{GridSource, PathPlanner};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use tracing::debug;

// right, down, left, up
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Static A* over 4-connected cells with unit step cost and a Manhattan
/// heuristic. Only the blocked marker stops expansion; agents are ignored.
#[derive(Debug, Clone)]
pub struct AStarPlanner {
    blocked: f64,
    tolerance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: OrderedFloat<f64>,
    g: OrderedFloat<f64>,
    index: usize,
}

impl AStarPlanner {
    pub fn new(blocked: f64, tolerance: f64) -> Self {
        Self { blocked, tolerance }
    }

    pub fn from_markers(markers: &MarkerSet) -> Self {
        Self::new(markers.blocked, markers.tolerance)
    }

    fn heuristic(from: Cell, goal: Cell) -> f64 {
        from.manhattan(&goal) as f64
    }

    fn is_blocked(&self, grid: &dyn GridSource, cell: Cell) -> DomainResult<bool> {
        let value = grid.cell_value(cell.row, cell.col)?;
        Ok((value - self.blocked).abs() <= self.tolerance)
    }

    fn ensure_in_bounds(grid: &dyn GridSource, cell: Cell) -> DomainResult<()> {
        if grid.contains(cell) {
            Ok(())
        } else {
            Err(DomainError::OutOfRange {
                row: cell.row,
                col: cell.col,
                dimension: grid.width(),
            })
        }
    }

    fn neighbors(grid: &dyn GridSource, cell: Cell) -> impl Iterator<Item = Cell> {
        let (height, width) = (grid.height() as isize, grid.width() as isize);
        DIRECTIONS.iter().filter_map(move |(dr, dc)| {
            let row = cell.row as isize + dr;
            let col = cell.col as isize + dc;
            if row < 0 || row >= height || col < 0 || col >= width {
                None
            } else {
                Some(Cell::new(row as usize, col as usize))
            }
        })
    }
}

impl PathPlanner for AStarPlanner {
    fn plan(&self, grid: &dyn GridSource, start: Cell, goal: Cell) -> DomainResult<Vec<Cell>> {
        Self::ensure_in_bounds(grid, start)?;
        Self::ensure_in_bounds(grid, goal)?;

        let width = grid.width();
        let index = |cell: Cell| cell.row * width + cell.col;
        let cell_at = |idx: usize| Cell::new(idx / width, idx % width);

        let mut g_costs = vec![f64::INFINITY; width * grid.height()];
        let mut came_from: HashMap<usize, usize> = HashMap::new();
        let mut open = BinaryHeap::new();

        g_costs[index(start)] = 0.0;
        open.push(Reverse(OpenNode {
            f: OrderedFloat(Self::heuristic(start, goal)),
            g: OrderedFloat(0.0),
            index: index(start),
        }));

        let mut expanded = 0usize;
        let mut found = false;
        while let Some(Reverse(node)) = open.pop() {
            let current = cell_at(node.index);
            if current == goal {
                found = true;
                break;
            }
            expanded += 1;

            for next in Self::neighbors(grid, current) {
                if self.is_blocked(grid, next)? {
                    continue;
                }
                let tentative = g_costs[node.index] + 1.0;
                let next_idx = index(next);
                if tentative < g_costs[next_idx] {
                    g_costs[next_idx] = tentative;
                    came_from.insert(next_idx, node.index);
                    open.push(Reverse(OpenNode {
                        f: OrderedFloat(tentative + Self::heuristic(next, goal)),
                        g: OrderedFloat(tentative),
                        index: next_idx,
                    }));
                }
            }
        }

        if !found {
            debug!(%start, %goal, expanded, "A* exhausted open set");
            return Ok(Vec::new());
        }

        let mut path = Vec::new();
        let mut cursor = index(goal);
        while let Some(&prev) = came_from.get(&cursor) {
            path.push(cell_at(cursor));
            cursor = prev;
        }
        path.push(start);
        path.reverse();

        debug!(%start, %goal, expanded, length = path.len(), "A* reached goal");
        Ok(path)
    }
}
