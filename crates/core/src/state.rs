//! Conversation state, findings, deliverables, and partial-state updates.
//!
//! `ConversationState` is the single shared record threaded through every
//! step of the workflow. Steps receive an immutable snapshot and return a
//! [`StateUpdate`]; the executor merges the update back with
//! [`ConversationState::apply`]. The three log fields (`messages`,
//! `research_findings`, `deliverables`) are append-only: a merge
//! concatenates, never replaces, and no step may edit a prior entry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::message::Message;
use crate::step::{NextStep, StepId};

/// Default iteration ceiling for a session.
pub const DEFAULT_MAX_ITERATIONS: u32 = 10;

/// A research finding retrieved from the knowledge base.
///
/// Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Source document or offering
    pub source: String,

    /// Relevant content found
    pub content: String,

    /// Relevance to the query, in [0, 1]
    pub relevance_score: f32,

    /// Source metadata (e.g. {"offering": "app-rationalization"})
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// A deliverable artifact created by a producing specialist.
///
/// Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deliverable {
    /// Deliverable title
    pub title: String,

    /// Type of deliverable (e.g. "assessment", "bc_dr_plan")
    #[serde(rename = "type")]
    pub kind: String,

    /// Deliverable content
    pub content: String,

    /// Associated offering
    pub offering: String,

    /// Which specialist created it
    pub produced_by: String,
}

/// The shared conversation state for one consulting session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    /// Ordered conversation log. Append-only.
    pub messages: Vec<Message>,

    /// Relevant offerings supplied at session start
    /// (e.g. "app-rationalization", "bcdr")
    #[serde(default)]
    pub offerings: Vec<String>,

    /// Optional client industry context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_industry: Option<String>,

    /// Accumulated research findings. Append-only.
    #[serde(default)]
    pub research_findings: Vec<Finding>,

    /// Created deliverables. Append-only.
    #[serde(default)]
    pub deliverables: Vec<Deliverable>,

    /// Which step the router should invoke next, if decided
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_step: Option<NextStep>,

    /// Which step produced the most recent update (audit field)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_step: Option<StepId>,

    /// Number of supervisor iterations so far
    #[serde(default)]
    pub iteration_count: u32,

    /// Iteration ceiling, configured at session start
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

impl ConversationState {
    /// Create the initial state for a new session from the user's request.
    pub fn new(message: impl Into<String>, offerings: Vec<String>) -> Self {
        Self {
            messages: vec![Message::user(message)],
            offerings,
            client_industry: None,
            research_findings: Vec::new(),
            deliverables: Vec::new(),
            next_step: None,
            active_step: None,
            iteration_count: 0,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Set the iteration ceiling.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Append a follow-up user message (multi-turn continuity).
    pub fn push_user_message(&mut self, message: impl Into<String>) {
        self.messages.push(Message::user(message));
    }

    /// Merge a partial update into this state.
    ///
    /// Scalar fields are replaced when the update carries a value; the log
    /// fields are concatenated after the existing entries. Only the
    /// executor calls this — steps never mutate state directly.
    pub fn apply(&mut self, update: StateUpdate) {
        self.messages.extend(update.messages);
        self.research_findings.extend(update.research_findings);
        self.deliverables.extend(update.deliverables);

        if let Some(next) = update.next_step {
            self.next_step = Some(next);
        }
        if let Some(active) = update.active_step {
            self.active_step = Some(active);
        }
        if let Some(count) = update.iteration_count {
            self.iteration_count = count;
        }
    }
}

/// A partial-state update returned by a step.
///
/// Unset fields leave the state unchanged; list fields are appended.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateUpdate {
    #[serde(default)]
    pub messages: Vec<Message>,

    #[serde(default)]
    pub research_findings: Vec<Finding>,

    #[serde(default)]
    pub deliverables: Vec<Deliverable>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_step: Option<NextStep>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_step: Option<StepId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration_count: Option<u32>,
}

impl StateUpdate {
    /// An update that sets nothing at all.
    ///
    /// The executor treats an empty update as an explicit request to
    /// terminate rather than re-reading a stale routing field.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no field is set and no entry would be appended.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
            && self.research_findings.is_empty()
            && self.deliverables.is_empty()
            && self.next_step.is_none()
            && self.active_step.is_none()
            && self.iteration_count.is_none()
    }

    /// An update that only routes, changing nothing else.
    pub fn route_to(next: NextStep) -> Self {
        Self {
            next_step: Some(next),
            ..Self::default()
        }
    }
}
