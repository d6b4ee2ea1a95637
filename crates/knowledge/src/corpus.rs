//! Built-in consulting corpus.
//!
//! A small set of offering guides so the research step works out of the
//! box. Production deployments replace or extend this via
//! `InMemoryKnowledgeBase::add_document`.

use crate::KnowledgeDocument;

pub fn default_corpus() -> Vec<KnowledgeDocument> {
    vec![
        KnowledgeDocument::new(
            "Application Rationalization Guide",
            "app-rationalization",
            "Application rationalization evaluates the portfolio to identify \
             redundancies, optimize costs, and modernize systems. The 5R framework \
             (Retain, Retire, Replace, Rehost, Refactor) classifies each application \
             by business value and technical fitness.",
        ),
        KnowledgeDocument::new(
            "Portfolio Assessment Best Practices",
            "app-rationalization",
            "Start with an inventory assessment covering tech stack, dependencies, \
             and run costs. Map applications to business capabilities, then \
             prioritize rationalization candidates by strategic value and total \
             cost of ownership.",
        ),
        KnowledgeDocument::new(
            "TCO Analysis Framework",
            "app-rationalization",
            "Total cost of ownership analysis compares current-state run costs \
             (licensing, hosting, support) against the projected future state after \
             rationalization. Include migration effort and decommissioning savings \
             in the model.",
        ),
        KnowledgeDocument::new(
            "Business Continuity Planning Handbook",
            "bcdr",
            "Business continuity planning starts with a business impact analysis: \
             identify critical processes, quantify downtime impact, and define \
             recovery time objectives (RTO) and recovery point objectives (RPO) \
             for each critical service.",
        ),
        KnowledgeDocument::new(
            "Disaster Recovery Runbook Patterns",
            "bcdr",
            "Disaster recovery plans document technical recovery procedures per \
             system tier: failover sequencing, data restoration from backups, and \
             validation checks. Runbooks are tested on a fixed schedule and after \
             every major architecture change.",
        ),
        KnowledgeDocument::new(
            "BC/DR Compliance Checklist",
            "bcdr",
            "Continuity programs align with ISO 22301 and SOC 2 availability \
             criteria. Evidence includes risk assessment matrices, tested recovery \
             procedures, and documented RTO/RPO commitments for critical systems.",
        ),
        KnowledgeDocument::new(
            "Technology Roadmap Primer",
            "tech-strategy",
            "A technology roadmap sequences architecture changes against business \
             milestones. Architecture assessments score current systems on \
             scalability, maintainability, and alignment with the target state.",
        ),
        KnowledgeDocument::new(
            "Cloud Migration Strategies",
            "cloud-modernization",
            "Cloud migration follows the same 5R dispositions as rationalization, \
             applied per workload. Landing zone design, network topology, and \
             identity integration precede the first production migration wave on \
             AWS or Azure.",
        ),
    ]
}
