//! Producing specialist steps — application rationalization and BC/DR.
//!
//! Both specialists share one shape: build context from the request plus
//! the first research findings, ask the reasoning service for the work
//! product, and emit exactly one deliverable. They never re-route; any
//! further work needs a fresh supervisor decision.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use advisor_core::message::last_user_message;
use advisor_core::{
    ConversationState, Deliverable, Message, NextStep, ReasoningService, Result, StateUpdate,
    Step, StepId,
};

/// How many findings are included in the specialist's context.
const CONTEXT_FINDINGS: usize = 3;

/// Substituted when the conversation has no user message.
const CONTINUE_PLACEHOLDER: &str = "Continue work";

const APP_RATIONALIZATION_PROMPT: &str = "\
You are an application rationalization specialist. Your expertise covers \
portfolio assessment, cost-benefit and TCO analysis, the 5R framework \
(Retain, Retire, Replace, Rehost, Refactor), business capability mapping, \
and migration roadmaps. Work from the current state, apply the framework \
systematically, and produce a structured, actionable assessment.";

const BCDR_PROMPT: &str = "\
You are a business continuity and disaster recovery specialist. Your \
expertise covers continuity strategy, disaster recovery planning, RTO/RPO \
analysis, business impact analysis, incident response runbooks, and \
compliance (SOC 2, ISO 22301). Start from business impact, define recovery \
objectives per critical service, and produce a detailed, testable plan.";

/// Persona configuration for a producing specialist.
struct Persona {
    id: StepId,
    system_prompt: &'static str,
    title: &'static str,
    kind: &'static str,
    offering: &'static str,
}

/// A producing specialist step.
pub struct ProducerStep {
    persona: Persona,
    reasoning: Arc<dyn ReasoningService>,
}

impl ProducerStep {
    /// The application portfolio rationalization specialist.
    pub fn app_rationalization(reasoning: Arc<dyn ReasoningService>) -> Self {
        Self {
            persona: Persona {
                id: StepId::AppRationalization,
                system_prompt: APP_RATIONALIZATION_PROMPT,
                title: "Application Rationalization Assessment",
                kind: "assessment",
                offering: "app-rationalization",
            },
            reasoning,
        }
    }

    /// The business continuity / disaster recovery specialist.
    pub fn bcdr(reasoning: Arc<dyn ReasoningService>) -> Self {
        Self {
            persona: Persona {
                id: StepId::Bcdr,
                system_prompt: BCDR_PROMPT,
                title: "Business Continuity and Disaster Recovery Plan",
                kind: "bc_dr_plan",
                offering: "bcdr",
            },
            reasoning,
        }
    }

    fn build_context(&self, state: &ConversationState) -> String {
        let request = last_user_message(&state.messages)
            .map(|m| m.content.as_str())
            .unwrap_or(CONTINUE_PLACEHOLDER);

        let mut context = format!("Request: {request}");
        if !state.research_findings.is_empty() {
            context.push_str("\n\nAvailable Research:\n");
            for finding in state.research_findings.iter().take(CONTEXT_FINDINGS) {
                context.push_str(&format!("- [{}] {}\n", finding.source, finding.content));
            }
        }
        context
    }
}

#[async_trait]
impl Step for ProducerStep {
    fn id(&self) -> StepId {
        self.persona.id
    }

    async fn run(&self, state: &ConversationState) -> Result<StateUpdate> {
        let context = self.build_context(state);

        let output = self
            .reasoning
            .generate(self.persona.system_prompt, &context)
            .await?;

        let deliverable = Deliverable {
            title: self.persona.title.into(),
            kind: self.persona.kind.into(),
            content: output.clone(),
            offering: self.persona.offering.into(),
            produced_by: self.persona.id.as_str().into(),
        };

        info!(
            specialist = %self.persona.id,
            kind = self.persona.kind,
            "deliverable produced"
        );

        Ok(StateUpdate {
            messages: vec![Message::named(self.persona.id.author_name(), output)],
            deliverables: vec![deliverable],
            active_step: Some(self.persona.id),
            next_step: Some(NextStep::End),
            ..StateUpdate::default()
        })
    }
}
