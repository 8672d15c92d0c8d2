use gridnav::common::DomainError;
use gridnav::domains::grid_navigation::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

const X: f64 = 3.0;

fn planner() -> AStarPlanner {
    AStarPlanner::from_markers(&MarkerSet::default())
}

/// Breadth-first distance in moves, or None when unreachable.
fn bfs_distance(grid: &Grid, start: Cell, goal: Cell) -> Option<usize> {
    let dim = grid.dimension();
    let mut dist = vec![usize::MAX; dim * dim];
    let mut queue = VecDeque::new();
    dist[start.row * dim + start.col] = 0;
    queue.push_back(start);
    while let Some(cell) = queue.pop_front() {
        if cell == goal {
            return Some(dist[cell.row * dim + cell.col]);
        }
        let d = dist[cell.row * dim + cell.col];
        let mut next = Vec::new();
        if cell.row > 0 {
            next.push(Cell::new(cell.row - 1, cell.col));
        }
        if cell.col > 0 {
            next.push(Cell::new(cell.row, cell.col - 1));
        }
        if cell.row + 1 < dim {
            next.push(Cell::new(cell.row + 1, cell.col));
        }
        if cell.col + 1 < dim {
            next.push(Cell::new(cell.row, cell.col + 1));
        }
        for n in next {
            let idx = n.row * dim + n.col;
            if dist[idx] == usize::MAX && grid.cell_value(n.row, n.col).unwrap() != X {
                dist[idx] = d + 1;
                queue.push_back(n);
            }
        }
    }
    None
}

fn assert_valid_path(grid: &Grid, path: &[Cell], start: Cell, goal: Cell) {
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&goal));
    for pair in path.windows(2) {
        assert_eq!(pair[0].manhattan(&pair[1]), 1, "non-adjacent step {:?}", pair);
    }
    for cell in &path[1..] {
        assert_ne!(grid.cell_value(cell.row, cell.col).unwrap(), X);
    }
}

#[cfg(test)]
mod astar_tests {
    use super::*;

    #[test]
    fn test_open_three_by_three_path_has_cost_four() {
        let grid = Grid::from_rows(&[
            &[0.5, 0.0, 0.0],
            &[0.0, 0.0, 0.0],
            &[0.0, 0.0, 8.1],
        ])
        .unwrap();
        let start = Cell::new(0, 0);
        let goal = Cell::new(2, 2);

        let path = planner().plan(&grid, start, goal).unwrap();

        assert_eq!(path.len(), 5);
        assert_valid_path(&grid, &path, start, goal);
    }

    #[test]
    fn test_blocked_middle_row_is_unreachable() {
        let grid = Grid::from_rows(&[
            &[0.5, 0.0, 0.0],
            &[X, X, X],
            &[0.0, 0.0, 8.1],
        ])
        .unwrap();

        let path = planner()
            .plan(&grid, Cell::new(0, 0), Cell::new(2, 2))
            .unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_blocked_column_is_unreachable() {
        let grid = Grid::from_rows(&[
            &[0.5, X, 0.0, 0.0],
            &[0.0, X, 0.0, 0.0],
            &[0.0, X, 0.0, 0.0],
            &[0.0, X, 0.0, 8.1],
        ])
        .unwrap();

        let path = planner()
            .plan(&grid, Cell::new(0, 0), Cell::new(3, 3))
            .unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_start_equals_goal_yields_single_cell() {
        let grid = Grid::filled(3, 0.0).unwrap();
        let cell = Cell::new(1, 1);

        let path = planner().plan(&grid, cell, cell).unwrap();
        assert_eq!(path, vec![cell]);
    }

    #[test]
    fn test_blocked_goal_is_unreachable() {
        let grid = Grid::from_rows(&[
            &[0.5, 0.0, 0.0],
            &[0.0, 0.0, 0.0],
            &[0.0, 0.0, X],
        ])
        .unwrap();

        let path = planner()
            .plan(&grid, Cell::new(0, 0), Cell::new(2, 2))
            .unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_detour_around_wall_is_shortest() {
        let grid = Grid::from_rows(&[
            &[0.5, 0.0, X, 0.0, 8.1],
            &[0.0, 0.0, X, 0.0, 0.0],
            &[0.0, 0.0, X, 0.0, 0.0],
            &[0.0, 0.0, X, 0.0, 0.0],
            &[0.0, 0.0, 0.0, 0.0, 0.0],
        ])
        .unwrap();
        let start = Cell::new(0, 0);
        let goal = Cell::new(0, 4);

        let path = planner().plan(&grid, start, goal).unwrap();

        assert_valid_path(&grid, &path, start, goal);
        assert_eq!(path.len() - 1, 12);
        assert!(path.contains(&Cell::new(4, 2)));
    }

    #[test]
    fn test_blocked_marker_uses_tolerance() {
        let nearly_blocked = X + 1e-7;
        let not_blocked = X + 1e-3;

        let walled = Grid::from_rows(&[
            &[0.5, nearly_blocked, 8.1],
            &[0.0, nearly_blocked, 0.0],
            &[0.0, nearly_blocked, 0.0],
        ])
        .unwrap();
        assert!(planner()
            .plan(&walled, Cell::new(0, 0), Cell::new(0, 2))
            .unwrap()
            .is_empty());

        let open = Grid::from_rows(&[
            &[0.5, not_blocked, 8.1],
            &[0.0, not_blocked, 0.0],
            &[0.0, not_blocked, 0.0],
        ])
        .unwrap();
        assert_eq!(
            planner()
                .plan(&open, Cell::new(0, 0), Cell::new(0, 2))
                .unwrap()
                .len(),
            3
        );
    }

    #[test]
    fn test_planner_ignores_agent_markers() {
        // An agent start marker sits on the only corridor cell.
        let grid = Grid::from_rows(&[
            &[0.5, 0.6, 8.1],
            &[X, X, X],
            &[0.0, 0.0, 0.0],
        ])
        .unwrap();

        let path = planner()
            .plan(&grid, Cell::new(0, 0), Cell::new(0, 2))
            .unwrap();
        assert_eq!(path, vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)]);
    }

    #[test]
    fn test_out_of_range_endpoints_are_rejected() {
        let grid = Grid::filled(3, 0.0).unwrap();

        match planner().plan(&grid, Cell::new(3, 0), Cell::new(0, 0)) {
            Err(DomainError::OutOfRange { row, col, dimension }) => {
                assert_eq!((row, col, dimension), (3, 0, 3));
            }
            other => panic!("Expected OutOfRange error, got {:?}", other),
        }
        assert!(planner()
            .plan(&grid, Cell::new(0, 0), Cell::new(0, 5))
            .is_err());
    }

    #[test]
    fn test_custom_blocked_marker() {
        let grid = Grid::from_rows(&[
            &[0.0, 9.0, 0.0],
            &[0.0, 9.0, 0.0],
            &[0.0, 9.0, 0.0],
        ])
        .unwrap();

        let planner = AStarPlanner::new(9.0, 1e-6);
        assert!(planner
            .plan(&grid, Cell::new(0, 0), Cell::new(0, 2))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_matches_bfs_on_random_grids() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let planner = planner();

        for _ in 0..300 {
            let dim = rng.gen_range(2..=8);
            let cells: Vec<f64> = (0..dim * dim)
                .map(|_| if rng.gen_bool(0.3) { X } else { 0.0 })
                .collect();
            let mut grid = Grid::from_cells(cells).unwrap();
            let start = Cell::new(rng.gen_range(0..dim), rng.gen_range(0..dim));
            let goal = Cell::new(rng.gen_range(0..dim), rng.gen_range(0..dim));
            grid.set_cell_value(start.row, start.col, 0.0).unwrap();
            grid.set_cell_value(goal.row, goal.col, 0.0).unwrap();

            let path = planner.plan(&grid, start, goal).unwrap();
            match bfs_distance(&grid, start, goal) {
                Some(moves) => {
                    assert_valid_path(&grid, &path, start, goal);
                    assert_eq!(path.len() - 1, moves, "suboptimal path on {:?}", grid);
                }
                None => assert!(path.is_empty(), "path through walls on {:?}", grid),
            }
        }
    }
}
