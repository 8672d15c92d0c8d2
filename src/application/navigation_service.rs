use crate::common::{
    ApplicationError, ApplicationResult, DomainError, EventEnvelope, EventMetadata, EventStore,
};
use crate::config::SimulationConfig;
use crate::domains::grid_navigation::{
    Agent, AssignmentPolicy, Coordinator, GridSource, MapSource, MarkerSet, RunOutcome,
};
use crate::domains::DynLogger;
use serde::Serialize;
use std::sync::Arc;

const AGGREGATE_TYPE: &str = "Coordinator";

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub coordinator_id: String,
    pub agent_count: usize,
    pub goal_count: usize,
    pub policy: AssignmentPolicy,
    pub planned: usize,
    pub cells_marked: usize,
    pub outcome: RunOutcome,
    pub agents: Vec<Agent>,
    pub events_persisted: usize,
}

/// Runs a whole scenario: load map, discover, assign, plan, mark, export,
/// step, and optionally journal the coordinator's events.
pub struct NavigationService {
    map_source: Arc<dyn MapSource>,
    event_store: Option<Arc<dyn EventStore>>,
    logger: DynLogger,
    simulation: SimulationConfig,
    markers: MarkerSet,
}

impl NavigationService {
    pub fn new(
        map_source: Arc<dyn MapSource>,
        logger: DynLogger,
        simulation: SimulationConfig,
        markers: MarkerSet,
    ) -> Self {
        Self {
            map_source,
            event_store: None,
            logger,
            simulation,
            markers,
        }
    }

    pub fn with_event_store(mut self, event_store: Arc<dyn EventStore>) -> Self {
        self.event_store = Some(event_store);
        self
    }

    pub async fn run(&self, input: &str, output: Option<&str>) -> ApplicationResult<RunSummary> {
        let mut grid = self.map_source.load_grid(input)?;
        self.logger.info(&format!(
            "Map loaded successfully! Width = {}, Height = {}",
            grid.width(),
            grid.height()
        ));

        let mut coordinator = Coordinator::new(self.markers.clone(), self.logger.clone())
            .with_step_mode(self.simulation.step_mode);

        let (agent_count, goal_count) = coordinator.find_starts_and_goals(&grid);
        let policy = coordinator.assign_goals();
        let planned = coordinator.plan_paths(&grid)?;

        let cells_marked = if self.simulation.mark_paths {
            coordinator.mark_paths(&mut grid, self.simulation.trail_value)?
        } else {
            0
        };

        if let Some(output) = output {
            self.map_source.save_grid(output, &grid)?;
            self.logger
                .info(&format!("Wrote updated map with paths to {}", output));
        }

        let outcome = coordinator.run(self.simulation.max_steps);
        if !outcome.all_arrived {
            self.logger.warn(&format!(
                "Stopped after {} tick(s) with agents still traveling",
                outcome.ticks
            ));
        }

        let events_persisted = self.persist_events(&mut coordinator).await?;

        Ok(RunSummary {
            coordinator_id: coordinator.id.clone(),
            agent_count,
            goal_count,
            policy,
            planned,
            cells_marked,
            outcome,
            agents: coordinator.agents().to_vec(),
            events_persisted,
        })
    }

    async fn persist_events(&self, coordinator: &mut Coordinator) -> ApplicationResult<usize> {
        let Some(store) = &self.event_store else {
            return Ok(0);
        };

        let envelopes = coordinator
            .uncommitted_events()
            .iter()
            .enumerate()
            .map(|(seq, event)| {
                EventEnvelope::new(
                    event,
                    AGGREGATE_TYPE,
                    seq as u64,
                    EventMetadata::from_source("gridnav"),
                )
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(DomainError::from)?;

        let count = envelopes.len();
        store
            .append_events(&coordinator.id, envelopes)
            .await
            .map_err(ApplicationError::EventStore)?;
        coordinator.mark_events_as_committed();
        Ok(count)
    }
}
