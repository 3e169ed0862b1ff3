//! Core types and structures for name-forge

use chrono::{DateTime, Utc};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// LLM provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Gemini,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::Gemini => write!(f, "gemini"),
        }
    }
}

/// Domain availability verdict
///
/// `Unknown` means the check itself failed; callers must not count it as
/// available. On the wire it serializes as `true` / `false` / `null` to stay
/// compatible with consumers expecting a nullable boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Taken,
    Unknown,
}

impl Availability {
    /// True only for a confirmed-available domain
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }

    /// Nullable-boolean view used on the wire
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Availability::Available => Some(true),
            Availability::Taken => Some(false),
            Availability::Unknown => None,
        }
    }
}

impl Serialize for Availability {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.as_bool() {
            Some(b) => serializer.serialize_bool(b),
            None => serializer.serialize_none(),
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::Available => write!(f, "available"),
            Availability::Taken => write!(f, "taken"),
            Availability::Unknown => write!(f, "unknown"),
        }
    }
}

/// Structured creative brief produced once per pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandEssence {
    pub brand_story: String,
    pub core_metaphors: Vec<String>,
    pub naming_territories: Vec<String>,
}

/// A shortlisted name with the critic's rationale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticizedName {
    pub name: String,
    pub rationale: String,
}

/// Per-domain availability verdict from the checker
#[derive(Debug, Clone, Serialize)]
pub struct DomainVerdict {
    pub domain: String,
    pub availability: Availability,
    pub status: Option<u32>,
    pub checked_at: DateTime<Utc>,
}

/// The externally returned unit: shortlisted name joined with its verdict
#[derive(Debug, Clone, Serialize)]
pub struct ResultRecord {
    pub name: String,
    pub rationale: String,
    pub domain: String,
    pub available: Availability,
}

/// User input driving a pipeline run
#[derive(Debug, Clone, Deserialize)]
pub struct NamingRequest {
    pub industry: String,
    pub keywords: String,
    pub tone: Option<String>,
}

impl NamingRequest {
    /// Tone defaults to "modern" when the caller omits it
    pub fn tone_or_default(&self) -> &str {
        self.tone.as_deref().unwrap_or("modern")
    }
}

/// Final pipeline output
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamingOutcome {
    pub names: Vec<ResultRecord>,
    pub brand_essence: BrandEssence,
    pub available_count: usize,
}

/// Configuration for the naming pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Hard cap on generate/critique/verify cycles
    pub max_attempts: usize,
    /// Available-domain count that ends the loop early
    pub min_available_domains: usize,
    /// Minimum unique candidates required to bother the critic
    pub min_candidates: usize,
    /// Names requested from each provider per attempt
    pub names_per_provider: usize,
    /// Shortlist size the critic is asked for
    pub shortlist_size: usize,
    /// How many rejected names the avoidance prompt cites
    pub avoidance_window: usize,
    /// Inclusive candidate length bounds
    pub min_name_len: usize,
    pub max_name_len: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            min_available_domains: 5,
            min_candidates: 10,
            names_per_provider: 25,
            shortlist_size: 10,
            avoidance_window: 10,
            min_name_len: 3,
            max_name_len: 14,
        }
    }
}

/// LLM provider configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: ProviderKind,
    pub model: String,
    pub api_key: String,
    pub base_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_serializes_as_nullable_bool() {
        assert_eq!(
            serde_json::to_string(&Availability::Available).unwrap(),
            "true"
        );
        assert_eq!(serde_json::to_string(&Availability::Taken).unwrap(), "false");
        assert_eq!(serde_json::to_string(&Availability::Unknown).unwrap(), "null");
    }

    #[test]
    fn availability_counting_excludes_unknown() {
        assert!(Availability::Available.is_available());
        assert!(!Availability::Taken.is_available());
        assert!(!Availability::Unknown.is_available());
        assert_eq!(Availability::Unknown.as_bool(), None);
    }

    #[test]
    fn tone_defaults_to_modern() {
        let request = NamingRequest {
            industry: "tech".to_string(),
            keywords: "fast payments".to_string(),
            tone: None,
        };
        assert_eq!(request.tone_or_default(), "modern");

        let request = NamingRequest {
            tone: Some("playful".to_string()),
            ..request
        };
        assert_eq!(request.tone_or_default(), "playful");
    }

    #[test]
    fn brand_essence_uses_camel_case_wire_names() {
        let essence = BrandEssence {
            brand_story: "A story".to_string(),
            core_metaphors: vec!["river".to_string()],
            naming_territories: vec!["water".to_string()],
        };
        let json = serde_json::to_value(&essence).unwrap();
        assert!(json.get("brandStory").is_some());
        assert!(json.get("coreMetaphors").is_some());
        assert!(json.get("namingTerritories").is_some());
    }
}
