//! Dual-provider name generation stage

use crate::error::Result;
use crate::llm::{ChatProvider, ChatRequest};
use crate::types::{BrandEssence, PipelineConfig};
use std::collections::HashSet;
use std::sync::Arc;

// High-variance sampling; invented words need the tail of the distribution.
const CREATOR_TEMPERATURE: f32 = 1.3;
const CREATOR_TOP_P: f32 = 0.9;

/// Asks two independent providers for candidate names and merges the lists.
///
/// Both requests run concurrently and both must succeed; a provider that
/// returns zero usable lines just shrinks the union.
pub struct DualCreators {
    first: Arc<dyn ChatProvider>,
    second: Arc<dyn ChatProvider>,
    config: PipelineConfig,
}

impl DualCreators {
    pub fn new(
        first: Arc<dyn ChatProvider>,
        second: Arc<dyn ChatProvider>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            first,
            second,
            config,
        }
    }

    /// Generate a deduplicated candidate list, steering away from `avoid`
    pub async fn generate(&self, essence: &BrandEssence, avoid: &[String]) -> Result<Vec<String>> {
        let prompt = self.creator_prompt(essence, avoid)?;
        let request = ChatRequest::new(prompt).with_sampling(CREATOR_TEMPERATURE, CREATOR_TOP_P);

        let (first_reply, second_reply) = tokio::try_join!(
            self.first.complete(&request),
            self.second.complete(&request)
        )?;

        let first_names = sift_names(&first_reply, self.config.min_name_len, self.config.max_name_len);
        let second_names = sift_names(&second_reply, self.config.min_name_len, self.config.max_name_len);

        tracing::debug!(
            first_provider = %self.first.name(),
            first_count = %first_names.len(),
            second_provider = %self.second.name(),
            second_count = %second_names.len(),
            "Creator replies sifted"
        );

        let combined = merge_unique(first_names, second_names);
        tracing::info!(unique_candidates = %combined.len(), "Candidate names generated");

        Ok(combined)
    }

    fn creator_prompt(&self, essence: &BrandEssence, avoid: &[String]) -> Result<String> {
        let avoidance = if avoid.is_empty() {
            String::new()
        } else {
            let window_start = avoid.len().saturating_sub(self.config.avoidance_window);
            format!(
                "\nIMPORTANT: In the previous attempt, many domains were taken. AVOID generating names that are phonetically similar to these failed attempts: {}. Be more creative and unconventional.\n",
                avoid[window_start..].join(", ")
            )
        };

        Ok(format!(
            r#"You are a creative linguist who invents names for brands like 'Stripe', 'Notion', and 'Figma'. You are allergic to generic tech-speak.
Based on the following Brand Essence, generate a diverse list of {count} unique, invented brand names.

CRITICAL RULE: AVOID obvious, clunky tech portmanteaus like 'CogniVex', 'IntelliData', 'VirtuFlow'. The goal is subtlety, phonetic beauty, and emotional resonance, not a literal description.
{avoidance}
BRAND ESSENCE:
{essence}

Return ONLY a newline-separated list of the {count} names. Do not number them or add any other text."#,
            count = self.config.names_per_provider,
            avoidance = avoidance,
            essence = serde_json::to_string_pretty(essence)?,
        ))
    }
}

/// Split a raw reply into candidate names: one per line, trimmed, and kept
/// only when within the length bounds.
pub fn sift_names(reply: &str, min_len: usize, max_len: usize) -> Vec<String> {
    reply
        .lines()
        .map(str::trim)
        .filter(|line| line.len() >= min_len && line.len() <= max_len)
        .map(str::to_string)
        .collect()
}

/// Union of both providers' lists, duplicates removed (case-sensitive),
/// keeping order of first appearance with the first provider's names leading.
fn merge_unique(first: Vec<String>, second: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    first
        .into_iter()
        .chain(second)
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
