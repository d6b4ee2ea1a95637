//! `advisor consult` — run a single request through the workflow graph.

use advisor_config::AppConfig;
use advisor_core::ConversationState;
use advisor_workflow::ConsultantGraph;

pub async fn run(
    message: String,
    offerings: Vec<String>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let (reasoning, knowledge) = super::build_services(&config)?;

    let graph = ConsultantGraph::standard(reasoning, knowledge, config.knowledge.top_k)?;
    let state = ConversationState::new(message, offerings)
        .with_max_iterations(config.workflow.max_iterations);

    let result = graph.run(state).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if let Some(reply) = result.messages.last() {
        println!("{}", reply.content);
    }

    if !result.deliverables.is_empty() {
        println!();
        println!("Deliverables:");
        for d in &result.deliverables {
            println!("  - {} ({}, {})", d.title, d.kind, d.offering);
        }
    }

    Ok(())
}
