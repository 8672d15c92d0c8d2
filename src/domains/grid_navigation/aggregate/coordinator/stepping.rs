use super::Coordinator;
use crate::domains::grid_navigation::aggregate::types::{Cell, StepMode};
use crate::domains::grid_navigation::events::NavigationEvent;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Movement {
    Moved { agent_id: usize, from: Cell, to: Cell },
    Waited { agent_id: usize, blocked_cell: Cell },
}

/// What happened to each traveling agent during one tick, in move order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub movements: Vec<Movement>,
}

impl TickReport {
    pub fn moved(&self) -> Vec<usize> {
        self.movements
            .iter()
            .filter_map(|m| match m {
                Movement::Moved { agent_id, .. } => Some(*agent_id),
                Movement::Waited { .. } => None,
            })
            .collect()
    }

    pub fn waited(&self) -> Vec<usize> {
        self.movements
            .iter()
            .filter_map(|m| match m {
                Movement::Waited { agent_id, .. } => Some(*agent_id),
                Movement::Moved { .. } => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub ticks: u64,
    pub all_arrived: bool,
}

impl Coordinator {
    /// Advances the simulation by one tick. Each traveling agent tries to
    /// take the next cell of its path and waits if the cell is occupied.
    /// There is no replanning and no deadlock detection.
    pub fn step(&mut self) -> TickReport {
        self.tick += 1;
        let movements = match self.step_mode {
            StepMode::Sequential => self.step_sequential(),
            StepMode::Simultaneous => self.step_simultaneous(),
        };

        for movement in &movements {
            let event = match *movement {
                Movement::Moved { agent_id, from, to } => {
                    debug!(tick = self.tick, agent_id, %from, %to, "agent moved");
                    NavigationEvent::AgentMoved {
                        coordinator_id: self.id.clone(),
                        agent_id,
                        from,
                        to,
                        tick: self.tick,
                        timestamp: Utc::now(),
                    }
                }
                Movement::Waited {
                    agent_id,
                    blocked_cell,
                } => {
                    debug!(tick = self.tick, agent_id, %blocked_cell, "agent waiting");
                    NavigationEvent::AgentWaited {
                        coordinator_id: self.id.clone(),
                        agent_id,
                        blocked_cell,
                        tick: self.tick,
                        timestamp: Utc::now(),
                    }
                }
            };
            self.uncommitted_events.push(event);
        }

        if !self.arrival_reported && self.all_arrived() {
            self.arrival_reported = true;
            self.logger
                .info("All agents that found paths have arrived.");
            self.add_event(NavigationEvent::AllArrived {
                coordinator_id: self.id.clone(),
                tick: self.tick,
                timestamp: Utc::now(),
            });
        }

        TickReport {
            tick: self.tick,
            movements,
        }
    }

    // Occupancy is read from live positions, so an agent sees moves made
    // earlier in the same tick. Two agents can never swap cells here.
    fn step_sequential(&mut self) -> Vec<Movement> {
        let mut movements = Vec::new();
        for i in 0..self.agents.len() {
            let Some(next) = self.agents[i].next_cell() else {
                continue;
            };
            let occupied = self
                .agents
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && other.position == next);

            let agent = &mut self.agents[i];
            if occupied {
                movements.push(Movement::Waited {
                    agent_id: agent.id,
                    blocked_cell: next,
                });
            } else {
                let from = agent.position;
                agent.advance();
                movements.push(Movement::Moved {
                    agent_id: agent.id,
                    from,
                    to: next,
                });
            }
        }
        movements
    }

    fn step_simultaneous(&mut self) -> Vec<Movement> {
        let snapshot: Vec<Cell> = self.agents.iter().map(|a| a.position).collect();
        let mut claimed: HashSet<Cell> = HashSet::new();
        let mut movements = Vec::new();
        let mut movers = Vec::new();

        for (i, agent) in self.agents.iter().enumerate() {
            let Some(next) = agent.next_cell() else {
                continue;
            };
            let occupied = snapshot
                .iter()
                .enumerate()
                .any(|(j, pos)| j != i && *pos == next);
            if occupied || !claimed.insert(next) {
                movements.push(Movement::Waited {
                    agent_id: agent.id,
                    blocked_cell: next,
                });
            } else {
                movements.push(Movement::Moved {
                    agent_id: agent.id,
                    from: agent.position,
                    to: next,
                });
                movers.push(i);
            }
        }

        for i in movers {
            self.agents[i].advance();
        }
        movements
    }

    /// True when no agent is still traveling. Agents that never had a goal
    /// or a path count as settled.
    pub fn all_arrived(&self) -> bool {
        self.agents.iter().all(|a| a.is_settled())
    }

    /// Steps until every agent has settled or `max_steps` ticks have run.
    pub fn run(&mut self, max_steps: u64) -> RunOutcome {
        let mut ticks = 0;
        while ticks < max_steps && !self.all_arrived() {
            self.step();
            ticks += 1;
        }
        RunOutcome {
            ticks,
            all_arrived: self.all_arrived(),
        }
    }
}
