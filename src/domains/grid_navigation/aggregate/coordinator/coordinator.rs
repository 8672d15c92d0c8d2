use crate::common::DomainResult;
use crate::domains::grid_navigation::aggregate::agent::Agent;
use crate::domains::grid_navigation::aggregate::assignment::assign_goals;
use crate::domains::grid_navigation::aggregate::astar::AStarPlanner;
use crate::domains::grid_navigation::aggregate::discovery::discover;
use crate::domains::grid_navigation::aggregate::types::{
    AssignmentPolicy, Cell, MarkerSet, StepMode, TrailValue,
};
use crate::domains::grid_navigation::events::NavigationEvent;
use crate::domains::grid_navigation::ports::{GridSource, PathPlanner};
use crate::domains::logger::DynLogger;
use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Drives one multi-agent run over a caller-owned grid: discovery, goal
/// assignment, planning, optional path marking and tick-based stepping.
///
/// Agents are kept in discovery order for the whole run. That order is the
/// move order inside a tick and therefore part of the observable behavior.
pub struct Coordinator {
    pub id: String,
    pub(super) markers: MarkerSet,
    pub(super) step_mode: StepMode,
    pub(super) agents: Vec<Agent>,
    pub(super) goals: Vec<Cell>,
    pub(super) tick: u64,
    pub(super) arrival_reported: bool,
    planner: Arc<dyn PathPlanner>,
    pub(super) logger: DynLogger,
    pub(super) uncommitted_events: Vec<NavigationEvent>,
}

impl fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("id", &self.id)
            .field("step_mode", &self.step_mode)
            .field("agents", &self.agents)
            .field("goals", &self.goals)
            .field("tick", &self.tick)
            .finish_non_exhaustive()
    }
}

impl Coordinator {
    // Public methods for event bookkeeping
    pub fn uncommitted_events(&self) -> &[NavigationEvent] {
        &self.uncommitted_events
    }
    pub fn mark_events_as_committed(&mut self) {
        self.uncommitted_events.clear();
    }
    pub fn add_event(&mut self, event: NavigationEvent) {
        self.uncommitted_events.push(event);
    }
}

impl Coordinator {
    pub fn new(markers: MarkerSet, logger: DynLogger) -> Self {
        let planner = Arc::new(AStarPlanner::from_markers(&markers));
        Self {
            id: Uuid::new_v4().to_string(),
            markers,
            step_mode: StepMode::default(),
            agents: Vec::new(),
            goals: Vec::new(),
            tick: 0,
            arrival_reported: false,
            planner,
            logger,
            uncommitted_events: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_step_mode(mut self, step_mode: StepMode) -> Self {
        self.step_mode = step_mode;
        self
    }

    pub fn with_planner(mut self, planner: Arc<dyn PathPlanner>) -> Self {
        self.planner = planner;
        self
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: usize) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn goals(&self) -> &[Cell] {
        &self.goals
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn step_mode(&self) -> StepMode {
        self.step_mode
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Replaces the agent and goal lists with a fresh scan of `grid`.
    pub fn find_starts_and_goals(&mut self, grid: &dyn GridSource) -> (usize, usize) {
        let found = discover(grid, &self.markers);
        self.agents = found.agents;
        self.goals = found.goals;
        self.tick = 0;
        self.arrival_reported = false;

        let (agent_count, goal_count) = (self.agents.len(), self.goals.len());
        self.logger.info(&format!(
            "Found {} agent(s) and {} goal(s).",
            agent_count, goal_count
        ));
        self.add_event(NavigationEvent::AgentsDiscovered {
            coordinator_id: self.id.clone(),
            agent_count,
            goal_count,
            timestamp: Utc::now(),
        });
        (agent_count, goal_count)
    }

    pub fn assign_goals(&mut self) -> AssignmentPolicy {
        let policy = assign_goals(&mut self.agents, &self.goals);
        match policy {
            AssignmentPolicy::Unassigned => {
                self.logger.info("No agents or no goals to assign.");
                return policy;
            }
            AssignmentPolicy::IndexPairing => self
                .logger
                .info("Assigning distinct goals because agent count = goal count."),
            AssignmentPolicy::NearestGoal => self
                .logger
                .info("Assigning goals by nearest distance (some goals may be shared)."),
        }

        let mut events = Vec::new();
        for agent in &self.agents {
            if let Some(goal) = agent.goal {
                self.logger
                    .info(&format!("Agent {} assigned goal {}", agent.id, goal));
                events.push(NavigationEvent::GoalAssigned {
                    coordinator_id: self.id.clone(),
                    agent_id: agent.id,
                    goal,
                    policy,
                    timestamp: Utc::now(),
                });
            }
        }
        self.uncommitted_events.extend(events);
        policy
    }

    /// Plans every agent with a goal from its current position. Plans are
    /// independent: no agent's path accounts for any other agent. Returns the
    /// number of agents that received a non-empty path.
    pub fn plan_paths(&mut self, grid: &dyn GridSource) -> DomainResult<usize> {
        let mut planned = 0;
        let mut events = Vec::new();
        for agent in self.agents.iter_mut() {
            let Some(goal) = agent.goal else {
                continue;
            };

            let path = self.planner.plan(grid, agent.position, goal)?;
            agent.path_index = 0;
            if path.is_empty() {
                self.logger
                    .info(&format!("Agent {} => No path found.", agent.id));
                events.push(NavigationEvent::PathNotFound {
                    coordinator_id: self.id.clone(),
                    agent_id: agent.id,
                    start: agent.position,
                    goal,
                    timestamp: Utc::now(),
                });
            } else {
                planned += 1;
                self.logger.info(&format!(
                    "Agent {} path length: {}",
                    agent.id,
                    path.len()
                ));
                events.push(NavigationEvent::PathPlanned {
                    coordinator_id: self.id.clone(),
                    agent_id: agent.id,
                    path: path.clone(),
                    timestamp: Utc::now(),
                });
            }
            agent.path = path;
        }
        self.uncommitted_events.extend(events);
        self.arrival_reported = false;
        Ok(planned)
    }

    /// Writes a trail onto `grid` for every agent with a path, leaving each
    /// goal cell untouched. Later agents overwrite earlier trails and may
    /// overwrite start or goal markers of other agents where paths cross.
    /// Returns the number of cell writes.
    pub fn mark_paths(
        &mut self,
        grid: &mut dyn GridSource,
        trail: TrailValue,
    ) -> DomainResult<usize> {
        let mut written = 0;
        for agent in &self.agents {
            let Some((_goal, route)) = agent.path.split_last() else {
                continue;
            };
            let value = match trail {
                TrailValue::StartMarker => agent.start_marker,
                TrailValue::Fixed(v) => v,
            };
            for cell in route {
                grid.set_cell_value(cell.row, cell.col, value)?;
                written += 1;
            }
        }

        self.logger.info("Marked each agent's path in the map.");
        self.add_event(NavigationEvent::PathsMarked {
            coordinator_id: self.id.clone(),
            cells_written: written,
            timestamp: Utc::now(),
        });
        Ok(written)
    }

    /// One status line per agent, in stored order.
    pub fn agent_report(&self) -> Vec<String> {
        self.agents.iter().map(|a| a.to_string()).collect()
    }
}
