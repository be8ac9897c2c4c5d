mod client;
mod executor;
mod parse;
mod prompts;

pub use client::{ClaudeClient, TextGenerator};
pub use executor::{AnalysisExecutor, UNAVAILABLE_ANALYSIS, UNAVAILABLE_STANCE};
pub use parse::{
    decode_agent_response, decode_summary, degraded_summary, AgentResponse, Decoded,
    SummaryContent, DEFAULT_STANCE,
};
pub use prompts::{compose_analysis_prompt, compose_summary_prompt, TRAILER_REQUEST};
