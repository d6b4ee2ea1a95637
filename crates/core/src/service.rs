//! Collaborator traits — the external services the workflow consults.
//!
//! Both collaborators are synchronous from a step's perspective: a step
//! suspends at the call boundary and resumes with the full response before
//! producing its update. Failures are propagated, never branched on.

use async_trait::async_trait;

use crate::error::{KnowledgeError, ReasoningError};
use crate::state::Finding;

/// A hosted language model used for synthesis and deliverable drafting.
///
/// Implementations: Anthropic Messages API, scripted test doubles.
#[async_trait]
pub trait ReasoningService: Send + Sync {
    /// A human-readable name for this service (e.g. "anthropic").
    fn name(&self) -> &str;

    /// Generate a completion from system instructions plus conversation
    /// context. Returns the full response text.
    async fn generate(
        &self,
        system_prompt: &str,
        context: &str,
    ) -> std::result::Result<String, ReasoningError>;
}

/// A knowledge base searched by the research step.
///
/// `search` may return an empty list — that is a normal result, not an
/// error. Offerings act as a metadata filter; an empty filter matches
/// every document.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// The backend name (e.g. "in_memory").
    fn name(&self) -> &str;

    /// Search for findings relevant to the query, restricted to the given
    /// offerings when the filter is non-empty.
    async fn search(
        &self,
        query: &str,
        offerings: &[String],
        top_k: usize,
    ) -> std::result::Result<Vec<Finding>, KnowledgeError>;
}
