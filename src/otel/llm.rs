//! Model request instrumentation.

use tracing::{field, span, Level, Span};

/// Create a span for one generation request.
///
/// # Arguments
///
/// * `system` - Provider name (`gemini`, `openai`, `anthropic`)
/// * `model` - Requested model
pub fn llm_span(system: &str, model: &str) -> Span {
    span!(
        Level::INFO,
        "gen_ai.request",
        otel.name = format!("generate_content {}", model),
        otel.kind = "client",
        gen_ai.system = system,
        gen_ai.request.model = model,
        gen_ai.response.chars = field::Empty,
    )
}

/// Record response size on the current span.
pub fn record_llm_response(chars: usize) {
    Span::current().record("gen_ai.response.chars", chars);
}
