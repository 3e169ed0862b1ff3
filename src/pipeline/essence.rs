//! Brand-essence synthesis stage

use crate::error::{NameForgeError, Result};
use crate::llm::providers::extract_json_object;
use crate::llm::{ChatProvider, ChatRequest};
use crate::types::{BrandEssence, NamingRequest};
use std::sync::Arc;

/// Turns raw industry/keyword/tone input into a structured creative brief.
///
/// Runs exactly once per pipeline run; a failure here is fatal for the run.
pub struct BrandStrategist {
    provider: Arc<dyn ChatProvider>,
}

impl BrandStrategist {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    pub async fn synthesize(&self, request: &NamingRequest) -> Result<BrandEssence> {
        let prompt = strategist_prompt(request);
        let reply = self
            .provider
            .complete(&ChatRequest::structured(prompt))
            .await?;
        let essence = parse_essence(&reply)?;

        tracing::info!(
            metaphors = %essence.core_metaphors.len(),
            territories = %essence.naming_territories.len(),
            "Brand essence synthesized"
        );

        Ok(essence)
    }
}

fn strategist_prompt(request: &NamingRequest) -> String {
    format!(
        r#"You are a world-class brand strategist from the agency Wolff Olins. Your task is to analyze a user's request and create a deep "Brand Essence" document.
The goal is to move beyond literal descriptions and find the emotional core of the brand.

USER REQUEST:
- Industry: "{industry}"
- Keywords: "{keywords}"
- Tone: "{tone}"

Create a JSON object containing:
1. "brandStory": A short, evocative narrative (2-3 sentences).
2. "coreMetaphors": An array of 3 abstract, powerful metaphors.
3. "namingTerritories": An array of 3 distinct, creative territories to explore.

Return ONLY the JSON object for the Brand Essence."#,
        industry = request.industry,
        keywords = request.keywords,
        tone = request.tone_or_default(),
    )
}

fn parse_essence(reply: &str) -> Result<BrandEssence> {
    let json = extract_json_object(reply);
    serde_json::from_str(json).map_err(|e| {
        NameForgeError::parse(
            format!("Brand essence is not valid structured data: {}", e),
            Some(json.to_string()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strict_json_reply() {
        let reply = r#"{
            "brandStory": "A quiet force moving money at the speed of thought.",
            "coreMetaphors": ["current", "pulse", "bridge"],
            "namingTerritories": ["rivers", "signals", "crossings"]
        }"#;

        let essence = parse_essence(reply).unwrap();
        assert_eq!(essence.core_metaphors.len(), 3);
        assert_eq!(essence.naming_territories[0], "rivers");
    }

    #[test]
    fn parses_fenced_reply() {
        let reply = "```json\n{\"brandStory\":\"s\",\"coreMetaphors\":[\"m\"],\"namingTerritories\":[\"t\"]}\n```";
        assert!(parse_essence(reply).is_ok());
    }

    #[test]
    fn rejects_unstructured_reply() {
        let err = parse_essence("I would love to help you brainstorm!").unwrap_err();
        assert!(matches!(err, NameForgeError::Parse { .. }));
    }

    #[test]
    fn rejects_reply_missing_fields() {
        let err = parse_essence(r#"{"brandStory": "only a story"}"#).unwrap_err();
        assert!(matches!(err, NameForgeError::Parse { .. }));
    }

    #[test]
    fn prompt_carries_inputs_and_default_tone() {
        let request = NamingRequest {
            industry: "tech".to_string(),
            keywords: "fast payments".to_string(),
            tone: None,
        };
        let prompt = strategist_prompt(&request);
        assert!(prompt.contains("\"tech\""));
        assert!(prompt.contains("\"fast payments\""));
        assert!(prompt.contains("\"modern\""));
    }
}
