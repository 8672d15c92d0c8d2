use super::aggregate::{AssignmentPolicy, Cell};
use crate::common::DomainEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NavigationEvent {
    AgentsDiscovered {
        coordinator_id: String,
        agent_count: usize,
        goal_count: usize,
        timestamp: DateTime<Utc>,
    },
    GoalAssigned {
        coordinator_id: String,
        agent_id: usize,
        goal: Cell,
        policy: AssignmentPolicy,
        timestamp: DateTime<Utc>,
    },
    PathPlanned {
        coordinator_id: String,
        agent_id: usize,
        path: Vec<Cell>,
        timestamp: DateTime<Utc>,
    },
    PathNotFound {
        coordinator_id: String,
        agent_id: usize,
        start: Cell,
        goal: Cell,
        timestamp: DateTime<Utc>,
    },
    PathsMarked {
        coordinator_id: String,
        cells_written: usize,
        timestamp: DateTime<Utc>,
    },
    AgentMoved {
        coordinator_id: String,
        agent_id: usize,
        from: Cell,
        to: Cell,
        tick: u64,
        timestamp: DateTime<Utc>,
    },
    AgentWaited {
        coordinator_id: String,
        agent_id: usize,
        blocked_cell: Cell,
        tick: u64,
        timestamp: DateTime<Utc>,
    },
    AllArrived {
        coordinator_id: String,
        tick: u64,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent for NavigationEvent {
    fn event_type(&self) -> &'static str {
        match self {
            NavigationEvent::AgentsDiscovered { .. } => "AgentsDiscovered",
            NavigationEvent::GoalAssigned { .. } => "GoalAssigned",
            NavigationEvent::PathPlanned { .. } => "PathPlanned",
            NavigationEvent::PathNotFound { .. } => "PathNotFound",
            NavigationEvent::PathsMarked { .. } => "PathsMarked",
            NavigationEvent::AgentMoved { .. } => "AgentMoved",
            NavigationEvent::AgentWaited { .. } => "AgentWaited",
            NavigationEvent::AllArrived { .. } => "AllArrived",
        }
    }

    fn aggregate_id(&self) -> &str {
        match self {
            NavigationEvent::AgentsDiscovered { coordinator_id, .. }
            | NavigationEvent::GoalAssigned { coordinator_id, .. }
            | NavigationEvent::PathPlanned { coordinator_id, .. }
            | NavigationEvent::PathNotFound { coordinator_id, .. }
            | NavigationEvent::PathsMarked { coordinator_id, .. }
            | NavigationEvent::AgentMoved { coordinator_id, .. }
            | NavigationEvent::AgentWaited { coordinator_id, .. }
            | NavigationEvent::AllArrived { coordinator_id, .. } => coordinator_id,
        }
    }

    fn event_version(&self) -> u64 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            NavigationEvent::AgentsDiscovered { timestamp, .. }
            | NavigationEvent::GoalAssigned { timestamp, .. }
            | NavigationEvent::PathPlanned { timestamp, .. }
            | NavigationEvent::PathNotFound { timestamp, .. }
            | NavigationEvent::PathsMarked { timestamp, .. }
            | NavigationEvent::AgentMoved { timestamp, .. }
            | NavigationEvent::AgentWaited { timestamp, .. }
            | NavigationEvent::AllArrived { timestamp, .. } => *timestamp,
        }
    }
}
