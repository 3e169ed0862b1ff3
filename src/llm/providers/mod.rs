//! LLM provider implementations
//!
//! Each provider is implemented in its own module for better organization and
//! maintainability.

pub mod gemini;
pub mod openai;

// Re-export providers for easy access
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

/// Extract the JSON object embedded in a model reply.
///
/// Providers asked for strict JSON still occasionally wrap the object in
/// markdown fences or a line of prose. Scanning for the outermost braces is
/// enough to recover it; if no braces are found the input is returned as-is
/// and the caller's parse reports the failure.
pub fn extract_json_object(content: &str) -> &str {
    match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if end >= start => &content[start..=end],
        _ => content,
    }
}
