//! Name critique and shortlist stage

use crate::error::{NameForgeError, Result};
use crate::llm::providers::extract_json_object;
use crate::llm::{ChatProvider, ChatRequest};
use crate::types::{BrandEssence, CriticizedName, PipelineConfig};
use serde::Deserialize;
use std::sync::Arc;

/// Filters the candidate list down to a shortlist with rationale per name.
///
/// Selection criteria live in the prompt; the critic's output is trusted
/// as-is. An empty shortlist abandons the attempt, a malformed one is a
/// parse failure.
pub struct NameCritic {
    provider: Arc<dyn ChatProvider>,
    config: PipelineConfig,
}

impl NameCritic {
    pub fn new(provider: Arc<dyn ChatProvider>, config: PipelineConfig) -> Self {
        Self { provider, config }
    }

    pub async fn review(
        &self,
        names: &[String],
        essence: &BrandEssence,
    ) -> Result<Vec<CriticizedName>> {
        let prompt = self.critic_prompt(names, essence)?;
        let reply = self
            .provider
            .complete(&ChatRequest::structured(prompt))
            .await?;
        let shortlist = parse_shortlist(&reply)?;

        tracing::info!(
            candidates = %names.len(),
            shortlisted = %shortlist.len(),
            "Critic selected shortlist"
        );

        Ok(shortlist)
    }

    fn critic_prompt(&self, names: &[String], essence: &BrandEssence) -> Result<String> {
        Ok(format!(
            r#"You are the most discerning naming critic in the world. Your reputation is on the line. You will filter the provided list of names with extreme prejudice.

YOUR FILTERING CRITERIA:
1. **Immediate Disqualification**: Throw out anything that sounds like a generic AI-generated word salad ('Cogni', 'Intelli', 'Virtu', 'Vex', 'Xara', etc.).
2. **Brand Essence Alignment**: Does the name *feel* like it fits the Brand Story and Metaphors?
3. **Phonetic Appeal & Timelessness**: Is it easy to say? Will it sound good in 10 years?

From the list provided, select ONLY the TOP {count} strongest names. For each, provide a sharp, insightful "rationale".

BRAND ESSENCE:
{essence}

LIST OF NAMES TO EVALUATE:
{names}

Return a valid JSON object in this exact format: {{"topNames": [{{"name": "Auraq", "rationale": "..."}}]}}"#,
            count = self.config.shortlist_size,
            essence = serde_json::to_string_pretty(essence)?,
            names = names.join("\n"),
        ))
    }
}

/// Critic reply envelope; a missing `topNames` key reads as an empty
/// shortlist rather than a parse failure.
#[derive(Deserialize)]
struct CriticReply {
    #[serde(rename = "topNames", default)]
    top_names: Vec<CriticizedName>,
}

fn parse_shortlist(reply: &str) -> Result<Vec<CriticizedName>> {
    let json = extract_json_object(reply);
    let parsed: CriticReply = serde_json::from_str(json).map_err(|e| {
        NameForgeError::parse(
            format!("Critic reply is not valid structured data: {}", e),
            Some(json.to_string()),
        )
    })?;
    Ok(parsed.top_names)
}
