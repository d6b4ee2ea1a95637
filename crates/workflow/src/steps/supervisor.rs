//! Supervisor step — classifies each request and routes it to a
//! specialist.
//!
//! Routing is keyword-deterministic. The reasoning service, when
//! configured, only produces an explanatory note appended to the
//! conversation log; its output never influences the routing decision.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use advisor_core::message::last_user_message;
use advisor_core::{
    ConversationState, Message, NextStep, ReasoningService, Result, StateUpdate, Step, StepId,
};

use crate::classifier::{Intent, IntentClassifier, KeywordClassifier};

/// Appended when the iteration ceiling forces termination.
pub const ITERATION_LIMIT_NOTICE: &str =
    "Maximum iterations reached. Please refine your request.";

const SYSTEM_PROMPT: &str = "\
You are the supervisor for an enterprise consulting assistant. Explain, in \
one or two sentences, why the request was routed to the chosen specialist. \
Available specialists: research (knowledge base search), app_rationalization \
(portfolio analysis and TCO), bcdr (business continuity and disaster \
recovery planning).";

/// The routing supervisor.
pub struct SupervisorStep {
    classifier: Arc<dyn IntentClassifier>,
    reasoning: Option<Arc<dyn ReasoningService>>,
}

impl SupervisorStep {
    /// Create a supervisor with the default keyword classifier and no
    /// advisory reasoning service.
    pub fn new() -> Self {
        Self {
            classifier: Arc::new(KeywordClassifier::new()),
            reasoning: None,
        }
    }

    /// Replace the intent classifier.
    pub fn with_classifier(mut self, classifier: Arc<dyn IntentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Attach a reasoning service for advisory routing notes.
    pub fn with_reasoning(mut self, reasoning: Arc<dyn ReasoningService>) -> Self {
        self.reasoning = Some(reasoning);
        self
    }

    /// Map a classified intent onto a registered graph step.
    ///
    /// Strategy and cloud requests have no dedicated specialist in the
    /// compiled graph, so they go to research, as does anything
    /// unclassified.
    fn target_for(intent: Option<Intent>) -> StepId {
        match intent {
            Some(Intent::Portfolio) => StepId::AppRationalization,
            Some(Intent::Continuity) => StepId::Bcdr,
            Some(Intent::Research) | Some(Intent::Strategy) | Some(Intent::Cloud) | None => {
                StepId::Research
            }
        }
    }

    /// Build the context handed to the advisory reasoning call.
    fn routing_context(state: &ConversationState, request: &str, target: StepId) -> String {
        let mut parts = vec![format!("User request: {request}")];

        if !state.offerings.is_empty() {
            parts.push(format!("Identified offerings: {}", state.offerings.join(", ")));
        }
        if !state.research_findings.is_empty() {
            parts.push(format!(
                "Research findings available: {} documents",
                state.research_findings.len()
            ));
        }
        if let Some(previous) = state.active_step {
            parts.push(format!("Previous specialist: {previous}"));
        }
        parts.push(format!("Chosen specialist: {target}"));

        parts.join("\n")
    }
}

impl Default for SupervisorStep {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Step for SupervisorStep {
    fn id(&self) -> StepId {
        StepId::Supervisor
    }

    async fn run(&self, state: &ConversationState) -> Result<StateUpdate> {
        let Some(user) = last_user_message(&state.messages) else {
            debug!("no user message present, terminating");
            return Ok(StateUpdate::route_to(NextStep::End));
        };

        // Ceiling check comes before the increment and before any routing
        // work; this is the sole terminal condition besides completion.
        if state.iteration_count >= state.max_iterations {
            info!(
                iterations = state.iteration_count,
                ceiling = state.max_iterations,
                "iteration ceiling reached, terminating"
            );
            return Ok(StateUpdate {
                messages: vec![Message::system(ITERATION_LIMIT_NOTICE)],
                next_step: Some(NextStep::End),
                ..StateUpdate::default()
            });
        }

        let target = Self::target_for(self.classifier.classify(&user.content));

        let mut update = StateUpdate {
            next_step: Some(NextStep::Step(target)),
            iteration_count: Some(state.iteration_count + 1),
            ..StateUpdate::default()
        };

        // Advisory only: the note is appended to the log, the routing
        // decision above is already final.
        if let Some(reasoning) = &self.reasoning {
            let context = Self::routing_context(state, &user.content, target);
            let note = reasoning.generate(SYSTEM_PROMPT, &context).await?;
            update.messages.push(Message::system(note));
        }

        info!(
            specialist = %target,
            iteration = state.iteration_count + 1,
            "supervisor routed request"
        );

        Ok(update)
    }
}
