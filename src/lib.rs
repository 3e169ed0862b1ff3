//! Name Forge - AI-powered brand name generation with live domain checks
//!
//! A multi-stage naming pipeline: brand-essence synthesis, dual-model name
//! generation, critique, and DNS-based domain availability verification,
//! wrapped in a small HTTP API.

pub mod domain;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod server;
pub mod types;

// Re-export commonly used types
pub use error::{NameForgeError, Result};
pub use types::{
    Availability, BrandEssence, CriticizedName, DomainVerdict, LlmConfig, NamingOutcome,
    NamingRequest, PipelineConfig, ProviderKind, ResultRecord,
};

// Re-export main functionality
pub use domain::{AvailabilityCheck, DnsChecker};
pub use llm::{ChatProvider, ChatRequest};
pub use pipeline::NamingPipeline;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
