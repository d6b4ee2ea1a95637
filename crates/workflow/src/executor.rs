//! The graph executor — drives step invocation, merges updates, and
//! routes until the terminal marker.
//!
//! Execution is strictly sequential: exactly one step runs at a time, and
//! no step begins before the previous update has been merged. The
//! executor is a thin, non-catching driver — a failing step's error
//! propagates out and its update is never merged.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use advisor_core::{
    ConversationState, Error, KnowledgeBase, NextStep, ReasoningService, Result, Step, StepId,
};

use crate::router::route;
use crate::steps::{ProducerStep, ResearchStep, SupervisorStep};

/// Whether `from → to` is an edge of the static graph.
///
/// The table exists for validation, not dynamic branching: a step whose
/// update names a non-edge target indicates a miswired graph, which is a
/// configuration error rather than a data error.
fn allowed_edge(from: StepId, to: StepId) -> bool {
    match from {
        // The supervisor may dispatch anywhere, including itself.
        StepId::Supervisor => true,
        StepId::Research => matches!(
            to,
            StepId::Supervisor | StepId::AppRationalization | StepId::Bcdr
        ),
        // Producers only terminate; they never name a next step.
        StepId::AppRationalization | StepId::Bcdr => false,
    }
}

/// Builder for a [`ConsultantGraph`].
///
/// Registration is validated at build time: every routable step must be
/// present exactly once, so dispatch can never miss at runtime.
#[derive(Default)]
pub struct GraphBuilder {
    steps: HashMap<StepId, Arc<dyn Step>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a step under its own id.
    pub fn add_step(mut self, step: Arc<dyn Step>) -> Result<Self> {
        let id = step.id();
        if self.steps.insert(id, step).is_some() {
            return Err(Error::Config {
                message: format!("step '{id}' registered twice"),
            });
        }
        Ok(self)
    }

    /// Validate and build the graph.
    pub fn build(self) -> Result<ConsultantGraph> {
        for id in StepId::ALL {
            if !self.steps.contains_key(&id) {
                return Err(Error::Config {
                    message: format!("no step registered for '{id}'"),
                });
            }
        }
        Ok(ConsultantGraph { steps: self.steps })
    }
}

/// The compiled consulting workflow graph.
pub struct ConsultantGraph {
    steps: HashMap<StepId, Arc<dyn Step>>,
}

impl ConsultantGraph {
    /// Assemble the standard five-state graph from the two collaborators.
    pub fn standard(
        reasoning: Arc<dyn ReasoningService>,
        knowledge: Arc<dyn KnowledgeBase>,
        top_k: usize,
    ) -> Result<Self> {
        GraphBuilder::new()
            .add_step(Arc::new(SupervisorStep::new()))?
            .add_step(Arc::new(
                ResearchStep::new(reasoning.clone(), knowledge).with_top_k(top_k),
            ))?
            .add_step(Arc::new(ProducerStep::app_rationalization(
                reasoning.clone(),
            )))?
            .add_step(Arc::new(ProducerStep::bcdr(reasoning)))?
            .build()
    }

    /// Run the graph to the terminal marker, starting at the supervisor.
    ///
    /// The state may be freshly built or a persisted snapshot with a new
    /// user message appended — the executor makes no distinction.
    pub async fn run(&self, mut state: ConversationState) -> Result<ConversationState> {
        let mut current = StepId::Supervisor;

        loop {
            let step = self
                .steps
                .get(&current)
                .ok_or_else(|| Error::Config {
                    message: format!("no step registered for '{current}'"),
                })?;

            debug!(step = %current, "invoking step");
            let update = step.run(&state).await?;

            if update.is_empty() {
                // An empty update carries no routing intent; re-reading a
                // stale next_step here could loop forever.
                debug!(step = %current, "empty update, terminating");
                break;
            }

            state.apply(update);

            match route(&state) {
                NextStep::End => break,
                NextStep::Step(next) => {
                    if !allowed_edge(current, next) {
                        return Err(Error::Config {
                            message: format!("transition '{current}' -> '{next}' is not a graph edge"),
                        });
                    }
                    current = next;
                }
            }
        }

        info!(
            iterations = state.iteration_count,
            messages = state.messages.len(),
            deliverables = state.deliverables.len(),
            "session complete"
        );

        Ok(state)
    }
}
