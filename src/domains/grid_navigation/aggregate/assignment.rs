use super::agent::Agent;
use super::types::{AssignmentPolicy, Cell};

/// Gives every agent at most one goal.
///
/// Equal counts pair agent i with goal i regardless of distance. Otherwise
/// each agent takes its nearest goal by Manhattan distance, the earliest goal
/// winning ties; goals stay in the pool so several agents may share one.
pub fn assign_goals(agents: &mut [Agent], goals: &[Cell]) -> AssignmentPolicy {
    if agents.is_empty() || goals.is_empty() {
        return AssignmentPolicy::Unassigned;
    }

    if agents.len() == goals.len() {
        for (agent, goal) in agents.iter_mut().zip(goals) {
            agent.goal = Some(*goal);
        }
        return AssignmentPolicy::IndexPairing;
    }

    for agent in agents.iter_mut() {
        agent.goal = nearest_goal(agent.position, goals);
    }
    AssignmentPolicy::NearestGoal
}

fn nearest_goal(from: Cell, goals: &[Cell]) -> Option<Cell> {
    let mut best: Option<(usize, Cell)> = None;
    for goal in goals {
        let dist = from.manhattan(goal);
        if best.map_or(true, |(best_dist, _)| dist < best_dist) {
            best = Some((dist, *goal));
        }
    }
    best.map(|(_, goal)| goal)
}
