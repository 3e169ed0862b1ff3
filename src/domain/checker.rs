//! Domain availability checker backed by public DNS-over-HTTPS

use crate::domain::AvailabilityCheck;
use crate::error::{NameForgeError, Result};
use crate::types::{Availability, DomainVerdict};
use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_RESOLVER_URL: &str = "https://dns.google/resolve";

/// Domain availability checker
///
/// Normalizes free-text names into fully qualified domains, queries a
/// DNS-over-HTTPS resolver for an A record, and classifies the answer.
pub struct DnsChecker {
    client: Client,
    resolver_url: String,
    whitespace: Regex,
}

/// A successful resolver round-trip, before best-effort degradation
#[derive(Debug, Clone)]
pub struct DnsLookup {
    pub domain: String,
    pub status: u32,
    pub availability: Availability,
}

impl DnsChecker {
    /// Create a checker against the default public resolver
    pub fn new() -> Self {
        Self::with_resolver(DEFAULT_RESOLVER_URL)
    }

    /// Create a checker against a specific resolver endpoint
    pub fn with_resolver(resolver_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("name-forge/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to create HTTP client: {}. Using default.", e);
                Client::new()
            });

        Self {
            client,
            resolver_url: resolver_url.into(),
            // Compiled once; the pattern is a literal and cannot fail
            whitespace: Regex::new(r"\s+").expect("valid whitespace pattern"),
        }
    }

    /// Normalize a free-text name into a fully qualified domain.
    ///
    /// Lowercases, strips all whitespace, and appends `.com` only when the
    /// name contains no dot. Idempotent: normalizing a normalized name is a
    /// no-op.
    pub fn normalize(&self, name: &str) -> String {
        let clean = self
            .whitespace
            .replace_all(name.trim().to_lowercase().as_str(), "")
            .into_owned();
        if clean.contains('.') {
            clean
        } else {
            format!("{}.com", clean)
        }
    }

    /// Query the resolver for an A record and classify the answer.
    ///
    /// Errors propagate to the caller; the pipeline's verify stage goes
    /// through [`AvailabilityCheck::verdict`] instead, which degrades them.
    pub async fn lookup(&self, name: &str) -> Result<DnsLookup> {
        let domain = self.normalize(name);

        let response = self
            .client
            .get(&self.resolver_url)
            .query(&[("name", domain.as_str()), ("type", "A")])
            .send()
            .await
            .map_err(|e| {
                NameForgeError::network(
                    format!("DNS resolver request failed: {}", e),
                    None,
                    Some(self.resolver_url.clone()),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NameForgeError::domain_check(
                domain,
                format!("DNS resolver returned status {}", status),
            ));
        }

        let answer: DnsResponse = response
            .json()
            .await
            .map_err(|e| NameForgeError::parse(e.to_string(), None))?;

        let has_answer = answer.answer.as_ref().is_some_and(|a| !a.is_empty());
        let availability = classify(answer.status, has_answer);

        tracing::debug!(
            domain = %domain,
            status = %answer.status,
            has_answer = %has_answer,
            availability = %availability,
            "Domain lookup completed"
        );

        Ok(DnsLookup {
            domain,
            status: answer.status,
            availability,
        })
    }
}

impl Default for DnsChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AvailabilityCheck for DnsChecker {
    async fn verdict(&self, name: &str) -> DomainVerdict {
        match self.lookup(name).await {
            Ok(lookup) => DomainVerdict {
                domain: lookup.domain,
                availability: lookup.availability,
                status: Some(lookup.status),
                checked_at: Utc::now(),
            },
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "Domain check failed");
                DomainVerdict {
                    domain: self.normalize(name),
                    availability: Availability::Unknown,
                    status: None,
                    checked_at: Utc::now(),
                }
            }
        }
    }
}

/// Classify a resolver answer.
///
/// Status 3 is NXDOMAIN; an answer-less response on any other status also
/// means no A record exists for the name.
pub fn classify(status: u32, has_answer: bool) -> Availability {
    if status == 3 || !has_answer {
        Availability::Available
    } else {
        Availability::Taken
    }
}

/// Google DNS JSON response (only the fields classification needs)
#[derive(Debug, Deserialize)]
struct DnsResponse {
    #[serde(rename = "Status")]
    status: u32,
    #[serde(rename = "Answer")]
    answer: Option<Vec<serde_json::Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_appends_com_when_no_dot() {
        let checker = DnsChecker::new();
        assert_eq!(checker.normalize("openai"), "openai.com");
        assert_eq!(checker.normalize("already.io"), "already.io");
    }

    #[test]
    fn normalize_lowercases_and_strips_whitespace() {
        let checker = DnsChecker::new();
        assert_eq!(checker.normalize("  My Brand "), "mybrand.com");
        assert_eq!(checker.normalize("Two\tWords\nHere"), "twowordshere.com");
    }

    #[test]
    fn normalize_is_idempotent() {
        let checker = DnsChecker::new();
        for name in ["openai", "My Brand", "sub.domain.io", "MIXED case.net"] {
            let once = checker.normalize(name);
            assert_eq!(checker.normalize(&once), once);
        }
    }

    #[test]
    fn classify_is_pure_in_status_and_answer_presence() {
        // NXDOMAIN is available regardless of answer presence
        assert_eq!(classify(3, false), Availability::Available);
        assert_eq!(classify(3, true), Availability::Available);
        // NOERROR without records is available
        assert_eq!(classify(0, false), Availability::Available);
        // NOERROR with records is taken
        assert_eq!(classify(0, true), Availability::Taken);
        // Other failure codes without records still read as available
        assert_eq!(classify(2, false), Availability::Available);
        assert_eq!(classify(2, true), Availability::Taken);
    }

    #[test]
    fn dns_response_parses_with_and_without_answer() {
        let taken: DnsResponse =
            serde_json::from_str(r#"{"Status":0,"Answer":[{"name":"x.com","data":"1.2.3.4"}]}"#)
                .unwrap();
        assert_eq!(taken.status, 0);
        assert!(taken.answer.is_some_and(|a| !a.is_empty()));

        let free: DnsResponse = serde_json::from_str(r#"{"Status":3}"#).unwrap();
        assert_eq!(free.status, 3);
        assert!(free.answer.is_none());
    }
}
