use super::types::{AgentState, Cell};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: usize,
    /// Marker the agent was discovered on; doubles as its trail value.
    pub start_marker: f64,
    pub position: Cell,
    pub goal: Option<Cell>,
    pub path: Vec<Cell>,
    pub path_index: usize,
}

impl Agent {
    pub fn new(id: usize, start_marker: f64, position: Cell) -> Self {
        Self {
            id,
            start_marker,
            position,
            goal: None,
            path: Vec::new(),
            path_index: 0,
        }
    }

    pub fn state(&self) -> AgentState {
        if self.path.len() <= 1 {
            AgentState::Idle
        } else if self.path_index < self.path.len() - 1 {
            AgentState::Traveling
        } else {
            AgentState::Arrived
        }
    }

    pub fn is_settled(&self) -> bool {
        self.state() != AgentState::Traveling
    }

    /// Next cell on the path while traveling.
    pub fn next_cell(&self) -> Option<Cell> {
        match self.state() {
            AgentState::Traveling => self.path.get(self.path_index + 1).copied(),
            _ => None,
        }
    }

    pub(crate) fn advance(&mut self) {
        if let Some(next) = self.next_cell() {
            self.position = next;
            self.path_index += 1;
        }
    }

    pub fn last_path_index(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Agent {} startVal={} at {}",
            self.id, self.start_marker, self.position
        )?;
        match self.goal {
            Some(goal) => write!(f, " => Goal{}", goal)?,
            None => write!(f, " => NoGoal")?,
        }
        write!(
            f,
            " [pathIndex={}/{}]",
            self.path_index,
            self.last_path_index()
        )
    }
}
