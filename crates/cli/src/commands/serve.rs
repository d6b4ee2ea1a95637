//! `advisor serve` — start the HTTP gateway.

use std::sync::Arc;

use advisor_config::AppConfig;
use advisor_gateway::GatewayState;
use advisor_workflow::{ConsultantGraph, InMemorySessionStore};

pub async fn run(port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let (reasoning, knowledge) = super::build_services(&config)?;

    let graph = ConsultantGraph::standard(reasoning, knowledge, config.knowledge.top_k)?;
    let state = Arc::new(GatewayState {
        graph,
        sessions: Arc::new(InMemorySessionStore::new()),
        max_iterations: config.workflow.max_iterations,
    });

    let port = port.unwrap_or(config.gateway.port);
    advisor_gateway::serve(state, &config.gateway.host, port).await?;

    Ok(())
}
