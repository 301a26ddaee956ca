//! LLM-powered natural language to SQL translation.

pub mod client;
pub mod fence;
pub mod prompt;
pub mod translator;

pub use client::{LlmClient, TextGenerator};
pub use fence::strip_code_fences;
pub use prompt::{EXAMPLE_QUESTIONS, SYSTEM_PROMPT};
pub use translator::SqlTranslator;
