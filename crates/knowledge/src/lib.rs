//! Knowledge base — offering-filtered relevance search over consulting
//! documents.
//!
//! The store keeps whole documents in memory and scores them against a
//! query by term overlap. This is deliberately simple keyword relevance,
//! not semantic search: the trait boundary in `advisor-core` is where a
//! vector-backed implementation would slot in.

mod corpus;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use advisor_core::{Finding, KnowledgeBase, KnowledgeError};

pub use corpus::default_corpus;

/// A document in the knowledge base.
#[derive(Debug, Clone)]
pub struct KnowledgeDocument {
    /// Unique document ID
    pub id: String,

    /// Human-readable title, used as the finding source
    pub title: String,

    /// Offering this document belongs to (e.g. "bcdr")
    pub offering: String,

    /// Full document text
    pub content: String,
}

impl KnowledgeDocument {
    pub fn new(
        title: impl Into<String>,
        offering: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            offering: offering.into(),
            content: content.into(),
        }
    }
}

/// An in-memory knowledge base scored by query-term overlap.
pub struct InMemoryKnowledgeBase {
    documents: Arc<RwLock<Vec<KnowledgeDocument>>>,
}

impl InMemoryKnowledgeBase {
    /// Create an empty knowledge base.
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a knowledge base seeded with the built-in consulting corpus.
    pub fn with_default_corpus() -> Self {
        Self {
            documents: Arc::new(RwLock::new(default_corpus())),
        }
    }

    /// Add a document to the knowledge base.
    ///
    /// Rejects documents with an empty title or body — a finding sourced
    /// from either would be unattributable.
    pub async fn add_document(&self, doc: KnowledgeDocument) -> Result<String, KnowledgeError> {
        if doc.title.trim().is_empty() {
            return Err(KnowledgeError::InvalidDocument("empty title".into()));
        }
        if doc.content.trim().is_empty() {
            return Err(KnowledgeError::InvalidDocument("empty content".into()));
        }
        let id = doc.id.clone();
        self.documents.write().await.push(doc);
        Ok(id)
    }

    /// Number of documents currently stored.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

impl Default for InMemoryKnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KnowledgeBase for InMemoryKnowledgeBase {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn search(
        &self,
        query: &str,
        offerings: &[String],
        top_k: usize,
    ) -> Result<Vec<Finding>, KnowledgeError> {
        let terms = query_terms(query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let documents = self.documents.read().await;

        let mut scored: Vec<(f32, &KnowledgeDocument)> = documents
            .iter()
            .filter(|doc| offerings.is_empty() || offerings.iter().any(|o| o == &doc.offering))
            .filter_map(|doc| {
                let score = relevance(&terms, doc);
                (score > 0.0).then_some((score, doc))
            })
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);

        debug!(
            query_terms = terms.len(),
            matches = scored.len(),
            "knowledge search complete"
        );

        Ok(scored
            .into_iter()
            .map(|(score, doc)| Finding {
                source: doc.title.clone(),
                content: doc.content.clone(),
                relevance_score: score,
                metadata: HashMap::from([("offering".to_string(), doc.offering.clone())]),
            })
            .collect())
    }
}

/// Split a query into lowercase search terms, dropping stopword-length noise.
fn query_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() > 2)
        .map(str::to_string)
        .collect()
}

/// Fraction of query terms present in the document, with a small boost for
/// title hits. Clamped to [0, 1].
fn relevance(terms: &[String], doc: &KnowledgeDocument) -> f32 {
    let haystack = doc.content.to_lowercase();
    let title = doc.title.to_lowercase();

    let mut hits = 0usize;
    let mut title_hits = 0usize;
    for term in terms {
        if haystack.contains(term.as_str()) {
            hits += 1;
        }
        if title.contains(term.as_str()) {
            title_hits += 1;
        }
    }

    if hits == 0 && title_hits == 0 {
        return 0.0;
    }

    let base = hits as f32 / terms.len() as f32;
    let boost = title_hits as f32 / terms.len() as f32 * 0.25;
    (base + boost).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_kb() -> InMemoryKnowledgeBase {
        InMemoryKnowledgeBase::with_default_corpus()
    }

    #[tokio::test]
    async fn search_returns_relevant_findings() {
        let kb = sample_kb();
        let results = kb
            .search("application portfolio rationalization", &[], 5)
            .await
            .unwrap();

        assert!(!results.is_empty());
        assert!(results[0].content.to_lowercase().contains("rationalization"));
        for finding in &results {
            assert!((0.0..=1.0).contains(&finding.relevance_score));
        }
    }

    #[tokio::test]
    async fn results_sorted_by_relevance() {
        let kb = sample_kb();
        let results = kb
            .search("disaster recovery continuity planning", &[], 10)
            .await
            .unwrap();

        for pair in results.windows(2) {
            assert!(pair[0].relevance_score >= pair[1].relevance_score);
        }
    }

    #[tokio::test]
    async fn offering_filter_restricts_results() {
        let kb = sample_kb();
        let results = kb
            .search("assessment planning recovery", &["bcdr".into()], 10)
            .await
            .unwrap();

        assert!(!results.is_empty());
        for finding in &results {
            assert_eq!(finding.metadata.get("offering").unwrap(), "bcdr");
        }
    }

    #[tokio::test]
    async fn top_k_caps_result_count() {
        let kb = sample_kb();
        let results = kb.search("planning assessment", &[], 2).await.unwrap();
        assert!(results.len() <= 2);
    }

    #[tokio::test]
    async fn unmatched_query_returns_empty_not_error() {
        let kb = sample_kb();
        let results = kb.search("zzzqqqxxx", &[], 5).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn empty_query_returns_empty() {
        let kb = sample_kb();
        let results = kb.search("", &[], 5).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn added_document_becomes_searchable() {
        let kb = InMemoryKnowledgeBase::new();
        kb.add_document(KnowledgeDocument::new(
            "Mainframe Exit Playbook",
            "app-rationalization",
            "Sequencing mainframe decommissioning around batch window dependencies.",
        ))
        .await
        .unwrap();

        let results = kb.search("mainframe decommissioning", &[], 5).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source, "Mainframe Exit Playbook");
    }

    #[tokio::test]
    async fn blank_document_rejected() {
        let kb = InMemoryKnowledgeBase::new();
        let err = kb
            .add_document(KnowledgeDocument::new("", "bcdr", "body"))
            .await
            .unwrap_err();
        assert!(matches!(err, KnowledgeError::InvalidDocument(_)));
    }

    #[tokio::test]
    async fn default_corpus_covers_core_offerings() {
        let kb = sample_kb();
        assert!(kb.len().await >= 6);

        for offering in ["app-rationalization", "bcdr"] {
            let results = kb
                .search("assessment plan recovery portfolio", &[offering.into()], 10)
                .await
                .unwrap();
            assert!(!results.is_empty(), "no documents for {offering}");
        }
    }
}
