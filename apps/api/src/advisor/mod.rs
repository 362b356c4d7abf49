// Career advisor: LLM-backed advice with a static, label-keyed fallback.
// All LLM calls go through llm_client.

pub mod counselor;
pub mod handlers;
pub mod prompts;
pub mod templates;
