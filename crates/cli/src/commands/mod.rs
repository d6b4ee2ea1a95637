//! CLI command implementations.

pub mod config_cmd;
pub mod consult;
pub mod serve;

use std::sync::Arc;

use advisor_config::AppConfig;
use advisor_core::{KnowledgeBase, ReasoningService};
use advisor_knowledge::InMemoryKnowledgeBase;
use advisor_providers::AnthropicService;

/// Build the live collaborators from configuration.
///
/// Fails fast with setup instructions when no API key is available.
pub(crate) fn build_services(
    config: &AppConfig,
) -> Result<(Arc<dyn ReasoningService>, Arc<dyn KnowledgeBase>), Box<dyn std::error::Error>> {
    let Some(api_key) = config.api_key.clone() else {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    ADVISOR_API_KEY   (generic)");
        eprintln!("    ANTHROPIC_API_KEY");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    };

    let reasoning = Arc::new(AnthropicService::new(api_key, &config.model));
    let knowledge = Arc::new(InMemoryKnowledgeBase::with_default_corpus());
    Ok((reasoning, knowledge))
}
