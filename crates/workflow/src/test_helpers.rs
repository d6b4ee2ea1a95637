//! Shared test helpers for workflow tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use advisor_core::{Finding, KnowledgeBase, KnowledgeError, ReasoningError, ReasoningService};

/// A reasoning service that returns a sequence of scripted responses.
///
/// Each call to `generate` returns the next response in the queue.
/// Panics if more calls are made than responses provided.
pub struct ScriptedReasoning {
    responses: Mutex<Vec<String>>,
    calls: Mutex<usize>,
    last_context: Mutex<String>,
}

impl ScriptedReasoning {
    pub fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(str::to_string).collect()),
            calls: Mutex::new(0),
            last_context: Mutex::new(String::new()),
        }
    }

    /// A service that returns a single scripted response.
    pub fn single(text: &str) -> Self {
        Self::new(vec![text])
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    /// The context passed to the most recent `generate` call.
    pub fn last_context(&self) -> String {
        self.last_context.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReasoningService for ScriptedReasoning {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(
        &self,
        _system_prompt: &str,
        context: &str,
    ) -> Result<String, ReasoningError> {
        let mut calls = self.calls.lock().unwrap();
        let responses = self.responses.lock().unwrap();

        if *calls >= responses.len() {
            panic!(
                "ScriptedReasoning: no more responses (call #{}, have {})",
                *calls,
                responses.len()
            );
        }

        *self.last_context.lock().unwrap() = context.to_string();
        let response = responses[*calls].clone();
        *calls += 1;
        Ok(response)
    }
}

/// A reasoning service that always fails with a network error.
pub struct FailingReasoning;

#[async_trait]
impl ReasoningService for FailingReasoning {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(
        &self,
        _system_prompt: &str,
        _context: &str,
    ) -> Result<String, ReasoningError> {
        Err(ReasoningError::Network("connection refused".into()))
    }
}

/// A knowledge base that returns a fixed set of findings and records the
/// offering filter it was called with.
pub struct StubKnowledge {
    findings: Vec<Finding>,
    seen_offerings: Arc<Mutex<Vec<String>>>,
}

impl StubKnowledge {
    pub fn with(findings: Vec<Finding>) -> Self {
        Self {
            findings,
            seen_offerings: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn seen_offerings(&self) -> Arc<Mutex<Vec<String>>> {
        self.seen_offerings.clone()
    }
}

#[async_trait]
impl KnowledgeBase for StubKnowledge {
    fn name(&self) -> &str {
        "stub"
    }

    async fn search(
        &self,
        _query: &str,
        offerings: &[String],
        top_k: usize,
    ) -> Result<Vec<Finding>, KnowledgeError> {
        *self.seen_offerings.lock().unwrap() = offerings.to_vec();
        Ok(self.findings.iter().take(top_k).cloned().collect())
    }
}

/// A knowledge base that always fails.
pub struct FailingKnowledge;

#[async_trait]
impl KnowledgeBase for FailingKnowledge {
    fn name(&self) -> &str {
        "failing"
    }

    async fn search(
        &self,
        _query: &str,
        _offerings: &[String],
        _top_k: usize,
    ) -> Result<Vec<Finding>, KnowledgeError> {
        Err(KnowledgeError::QueryFailed("index offline".into()))
    }
}

/// Build a finding with the given source and placeholder content.
pub fn finding(source: &str) -> Finding {
    Finding {
        source: source.into(),
        content: format!("Content from {source}."),
        relevance_score: 0.8,
        metadata: HashMap::new(),
    }
}
