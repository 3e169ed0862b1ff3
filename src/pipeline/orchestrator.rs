//! Pipeline orchestration: the bounded self-correcting attempt loop

use crate::domain::AvailabilityCheck;
use crate::error::Result;
use crate::llm::ChatProvider;
use crate::pipeline::{BrandStrategist, DualCreators, NameCritic};
use crate::types::{BrandEssence, NamingOutcome, NamingRequest, PipelineConfig, ResultRecord};
use crate::validation_error;
use std::sync::Arc;

/// How a single generate → critique → verify cycle ended.
///
/// Abandoned attempts (the first two variants) consume attempt budget but
/// produce nothing; only an evaluated attempt yields records.
enum AttemptOutcome {
    /// Generation produced too few unique candidates to critique
    TooFewCandidates(usize),
    /// The critic shortlisted nothing
    EmptyShortlist,
    /// Full cycle ran; records carry per-domain verdicts
    Evaluated {
        records: Vec<ResultRecord>,
        available: usize,
    },
}

/// Runs essence synthesis once, then loops bounded attempts until enough
/// shortlisted names resolve to available domains.
///
/// Stage errors (network or parse) propagate; the loop only retries the
/// "not enough available domains" condition. Failed attempts feed their
/// shortlisted names into an avoidance list for the next attempt.
pub struct NamingPipeline {
    strategist: BrandStrategist,
    creators: DualCreators,
    critic: NameCritic,
    checker: Arc<dyn AvailabilityCheck>,
    config: PipelineConfig,
}

impl NamingPipeline {
    pub fn new(
        strategist_provider: Arc<dyn ChatProvider>,
        creator_pair: (Arc<dyn ChatProvider>, Arc<dyn ChatProvider>),
        critic_provider: Arc<dyn ChatProvider>,
        checker: Arc<dyn AvailabilityCheck>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            strategist: BrandStrategist::new(strategist_provider),
            creators: DualCreators::new(creator_pair.0, creator_pair.1, config.clone()),
            critic: NameCritic::new(critic_provider, config.clone()),
            checker,
            config,
        }
    }

    /// Run the whole pipeline for one request
    pub async fn run(&self, request: &NamingRequest) -> Result<NamingOutcome> {
        validate_request(request)?;

        let essence = self.strategist.synthesize(request).await?;

        let mut avoid: Vec<String> = Vec::new();
        let mut accepted: Option<Vec<ResultRecord>> = None;
        let mut fallback: Option<Vec<ResultRecord>> = None;

        for attempt in 1..=self.config.max_attempts {
            tracing::info!(attempt, "Starting naming attempt");

            match self.run_attempt(&essence, &avoid).await? {
                AttemptOutcome::TooFewCandidates(count) => {
                    tracing::warn!(
                        attempt,
                        candidates = count,
                        minimum = self.config.min_candidates,
                        "Not enough raw names generated, abandoning attempt"
                    );
                }
                AttemptOutcome::EmptyShortlist => {
                    tracing::warn!(attempt, "Critic found no good names, abandoning attempt");
                }
                AttemptOutcome::Evaluated { records, available } => {
                    if available >= self.config.min_available_domains {
                        tracing::info!(
                            attempt,
                            available,
                            "Found enough available domains, exiting loop"
                        );
                        accepted = Some(records);
                        break;
                    }

                    tracing::warn!(
                        attempt,
                        available,
                        required = self.config.min_available_domains,
                        "Batch below availability target"
                    );
                    avoid.extend(records.iter().map(|r| r.name.clone()));
                    fallback = Some(records);
                }
            }
        }

        // Exhausted attempts still return the last evaluated batch; the run
        // fails only when every attempt was abandoned before verification.
        let mut records = accepted.or(fallback).ok_or_else(|| {
            crate::error::NameForgeError::pipeline_exhausted(self.config.max_attempts)
        })?;

        sort_records(&mut records);
        let available_count = records
            .iter()
            .filter(|r| r.available.is_available())
            .count();

        tracing::info!(
            names = %records.len(),
            available = %available_count,
            "Pipeline complete"
        );

        Ok(NamingOutcome {
            names: records,
            brand_essence: essence,
            available_count,
        })
    }

    async fn run_attempt(
        &self,
        essence: &BrandEssence,
        avoid: &[String],
    ) -> Result<AttemptOutcome> {
        let candidates = self.creators.generate(essence, avoid).await?;
        if candidates.len() < self.config.min_candidates {
            return Ok(AttemptOutcome::TooFewCandidates(candidates.len()));
        }

        let shortlist = self.critic.review(&candidates, essence).await?;
        if shortlist.is_empty() {
            return Ok(AttemptOutcome::EmptyShortlist);
        }

        let names: Vec<String> = shortlist.iter().map(|c| c.name.clone()).collect();
        let verdicts = self.checker.verdict_batch(&names).await;

        let records: Vec<ResultRecord> = shortlist
            .into_iter()
            .zip(verdicts)
            .map(|(candidate, verdict)| ResultRecord {
                name: candidate.name,
                rationale: candidate.rationale,
                domain: verdict.domain,
                available: verdict.availability,
            })
            .collect();

        let available = records
            .iter()
            .filter(|r| r.available.is_available())
            .count();

        tracing::info!(
            shortlisted = %records.len(),
            available = %available,
            "Domain verification complete"
        );

        Ok(AttemptOutcome::Evaluated { records, available })
    }
}

/// Validate required pipeline inputs
pub fn validate_request(request: &NamingRequest) -> Result<()> {
    if request.industry.trim().is_empty() || request.keywords.trim().is_empty() {
        return Err(validation_error!("Industry and keywords are required"));
    }
    Ok(())
}

/// Available-domain records first, then lexicographic by name within each
/// group. Unknown verdicts sort with the taken group.
fn sort_records(records: &mut [ResultRecord]) {
    records.sort_by(|a, b| {
        b.available
            .is_available()
            .cmp(&a.available.is_available())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}
