//! The self-correcting naming pipeline
//!
//! Brand-essence synthesis runs once, then a bounded loop of
//! generate → critique → verify cycles until enough domains come back
//! available or the attempt budget is spent.

pub mod creators;
pub mod critic;
pub mod essence;
pub mod orchestrator;

// Re-export main functionality
pub use creators::DualCreators;
pub use critic::NameCritic;
pub use essence::BrandStrategist;
pub use orchestrator::{validate_request, NamingPipeline};
