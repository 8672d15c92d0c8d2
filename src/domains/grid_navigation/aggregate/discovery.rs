use super::agent::Agent;
use super::types::{Cell, MarkerSet};
use crate::domains::grid_navigation::ports::GridSource;

#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub agents: Vec<Agent>,
    pub goals: Vec<Cell>,
}

/// Scans the grid for start and goal markers.
///
/// Markers are walked in the order of the marker set and, for each marker,
/// cells in row-major order. Every start match becomes an agent with the next
/// id. The grid is not modified.
pub fn discover(grid: &dyn GridSource, markers: &MarkerSet) -> Discovery {
    let mut agents = Vec::new();
    for &marker in &markers.start {
        for cell in grid.find_cells(marker, markers.tolerance) {
            agents.push(Agent::new(agents.len(), marker, cell));
        }
    }

    let goals = markers
        .goal
        .iter()
        .flat_map(|&marker| grid.find_cells(marker, markers.tolerance))
        .collect();

    Discovery { agents, goals }
}
