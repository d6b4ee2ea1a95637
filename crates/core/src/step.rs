//! Step identifiers and the step contract.
//!
//! The workflow graph is closed: every routable step is a variant of
//! [`StepId`], and free-text labels (from config files or persisted
//! snapshots) are rejected at parse time rather than at dispatch time.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::state::{ConversationState, StateUpdate};

/// The closed set of routable workflow steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    /// Classifies the request and decides which specialist runs next
    Supervisor,
    /// Searches the knowledge base and synthesizes findings
    Research,
    /// Application portfolio rationalization specialist
    AppRationalization,
    /// Business continuity / disaster recovery specialist
    Bcdr,
}

impl StepId {
    /// Every routable step, in graph registration order.
    pub const ALL: [StepId; 4] = [
        StepId::Supervisor,
        StepId::Research,
        StepId::AppRationalization,
        StepId::Bcdr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::Supervisor => "supervisor",
            StepId::Research => "research",
            StepId::AppRationalization => "app_rationalization",
            StepId::Bcdr => "bcdr",
        }
    }

    /// The author name used when this step appends assistant messages.
    pub fn author_name(&self) -> &'static str {
        match self {
            StepId::Supervisor => "supervisor",
            StepId::Research => "research_specialist",
            StepId::AppRationalization => "app_rationalization_specialist",
            StepId::Bcdr => "bcdr_specialist",
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StepId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "supervisor" => Ok(StepId::Supervisor),
            "research" => Ok(StepId::Research),
            "app_rationalization" => Ok(StepId::AppRationalization),
            "bcdr" => Ok(StepId::Bcdr),
            other => Err(Error::Config {
                message: format!("unknown step label: {other}"),
            }),
        }
    }
}

/// The routing field: either a concrete next step or the terminal marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "step")]
pub enum NextStep {
    Step(StepId),
    End,
}

impl NextStep {
    pub fn is_end(&self) -> bool {
        matches!(self, NextStep::End)
    }
}

impl std::fmt::Display for NextStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NextStep::Step(id) => f.write_str(id.as_str()),
            NextStep::End => f.write_str("end"),
        }
    }
}

/// The step contract.
///
/// A step is a pure function of a state snapshot to a partial update. Steps
/// never mutate the state they are given; the executor owns the single
/// mutation point (the merge). Collaborator failures propagate via `?` and
/// are never converted into routing decisions.
#[async_trait]
pub trait Step: Send + Sync {
    /// Which graph node this step implements.
    fn id(&self) -> StepId;

    /// Produce a partial-state update from the current snapshot.
    async fn run(&self, state: &ConversationState) -> Result<StateUpdate>;
}
