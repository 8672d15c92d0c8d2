use crate::common::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A grid coordinate. Rows grow downwards, columns to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn manhattan(&self, other: &Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Reserved cell values. Start and goal markers are ordered: discovery
/// enumerates them in the order given here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSet {
    pub start: Vec<f64>,
    pub goal: Vec<f64>,
    pub blocked: f64,
    pub tolerance: f64,
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self {
            start: vec![0.5, 0.6, 0.9],
            goal: vec![8.1, 8.4, 8.13],
            blocked: 3.0,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl MarkerSet {
    pub fn matches(&self, value: f64, marker: f64) -> bool {
        markers_match(value, marker, self.tolerance)
    }

    pub fn is_blocked(&self, value: f64) -> bool {
        self.matches(value, self.blocked)
    }

    pub fn is_start(&self, value: f64) -> bool {
        self.start.iter().any(|m| self.matches(value, *m))
    }

    pub fn is_goal(&self, value: f64) -> bool {
        self.goal.iter().any(|m| self.matches(value, *m))
    }

    /// Rejects marker sets that would make cell classification ambiguous:
    /// no cell value may match two different markers.
    pub fn validate(&self) -> DomainResult<()> {
        let invalid = |reason: String| Err(DomainError::InvalidCommand { reason });
        if self.tolerance <= 0.0 {
            return invalid(format!(
                "marker tolerance must be positive, got {}",
                self.tolerance
            ));
        }
        if self.start.is_empty() || self.goal.is_empty() {
            return invalid("start and goal markers must both be non-empty".to_string());
        }

        let markers: Vec<f64> = self
            .start
            .iter()
            .chain(&self.goal)
            .copied()
            .chain(std::iter::once(self.blocked))
            .collect();
        for (i, &a) in markers.iter().enumerate() {
            if let Some(&b) = markers[i + 1..].iter().find(|&&b| self.overlaps(a, b)) {
                return invalid(format!(
                    "markers {} and {} are within twice the tolerance {} of each other",
                    a, b, self.tolerance
                ));
            }
        }
        Ok(())
    }

    // Some value lies within tolerance of both markers.
    fn overlaps(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= 2.0 * self.tolerance
    }
}

pub fn markers_match(value: f64, marker: f64, tolerance: f64) -> bool {
    (value - marker).abs() <= tolerance
}

/// Value written onto path cells when marking.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailValue {
    /// Each agent paints with its own start marker.
    #[default]
    StartMarker,
    Fixed(f64),
}

/// How occupancy is observed within one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepMode {
    /// Agents move one after another in stored order and see the positions
    /// of agents that already moved in the same tick.
    #[default]
    Sequential,
    /// Occupancy is read from the positions at tick start; a target cell
    /// claimed by an earlier agent in the same tick blocks later agents.
    Simultaneous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentState {
    Idle,
    Traveling,
    Arrived,
}

/// Which rule `assign_goals` applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentPolicy {
    IndexPairing,
    NearestGoal,
    Unassigned,
}
