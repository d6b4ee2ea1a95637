//! Research step — searches the knowledge base and synthesizes findings.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use advisor_core::message::last_user_message;
use advisor_core::{
    ConversationState, KnowledgeBase, Message, NextStep, ReasoningService, Result, StateUpdate,
    Step, StepId,
};

const SYSTEM_PROMPT: &str = "\
You are a research specialist for an enterprise consulting firm. Synthesize \
the retrieved findings into a concise answer: cite sources clearly, \
highlight key points, and note which specialist should handle follow-up \
work (app_rationalization for portfolio engagements, bcdr for business \
continuity and disaster recovery).";

/// Keywords indicating the client wants produced work, not just an answer.
const DELIVERABLE_KEYWORDS: &[&str] =
    &["create", "develop", "build", "deliverable", "plan", "strategy"];

/// The knowledge-base research specialist.
pub struct ResearchStep {
    reasoning: Arc<dyn ReasoningService>,
    knowledge: Arc<dyn KnowledgeBase>,
    top_k: usize,
}

impl ResearchStep {
    pub fn new(reasoning: Arc<dyn ReasoningService>, knowledge: Arc<dyn KnowledgeBase>) -> Self {
        Self {
            reasoning,
            knowledge,
            top_k: 5,
        }
    }

    /// Set how many findings a single search may return.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Whether the request asks for produced work beyond information.
    fn wants_deliverable(text: &str) -> bool {
        let lower = text.to_lowercase();
        DELIVERABLE_KEYWORDS.iter().any(|kw| lower.contains(kw))
    }
}

#[async_trait]
impl Step for ResearchStep {
    fn id(&self) -> StepId {
        StepId::Research
    }

    async fn run(&self, state: &ConversationState) -> Result<StateUpdate> {
        let Some(user) = last_user_message(&state.messages) else {
            // Nothing to research. The executor treats an empty update as
            // explicit termination.
            debug!("no user message present, returning empty update");
            return Ok(StateUpdate::empty());
        };
        let query = user.content.clone();

        let findings = self
            .knowledge
            .search(&query, &state.offerings, self.top_k)
            .await?;

        debug!(findings = findings.len(), "knowledge search complete");

        let mut context = format!("Query: {query}\n");
        if !findings.is_empty() {
            context.push_str("\nFindings:\n");
            for (i, finding) in findings.iter().enumerate() {
                context.push_str(&format!(
                    "{}. [{}] {}\n",
                    i + 1,
                    finding.source,
                    finding.content
                ));
            }
        }

        let synthesis = self.reasoning.generate(SYSTEM_PROMPT, &context).await?;

        let next = if Self::wants_deliverable(&query) {
            // A producing specialist should take over; the supervisor
            // decides which one.
            NextStep::Step(StepId::Supervisor)
        } else {
            NextStep::End
        };

        info!(findings = findings.len(), next = %next, "research complete");

        Ok(StateUpdate {
            messages: vec![Message::named(StepId::Research.author_name(), synthesis)],
            research_findings: findings,
            next_step: Some(next),
            active_step: Some(StepId::Research),
            ..StateUpdate::default()
        })
    }
}
