//! Career counselor: pluggable, trait-based advice generator.
//!
//! Default with an API key: `LlmAdvisor` (Claude, falls back to templates on any failure).
//! Without one: `TemplateAdvisor` (static, deterministic).
//!
//! `AppState` holds an `Arc<dyn Advisor>`, chosen at startup from config.

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use crate::advisor::prompts::{
    CAREER_ADVICE_PROMPT, CAREER_ADVICE_SYSTEM, GENERAL_PERSONALITY, NO_RESUME,
};
use crate::advisor::templates::{default_advice, roadmap_steps};
use crate::llm_client::{CallOptions, LlmClient};

const ADVICE_OPTIONS: CallOptions = CallOptions {
    max_tokens: 500,
    temperature: 0.5,
};

#[derive(Debug, Clone, Copy)]
pub struct AdviceRequest<'a> {
    pub message: &'a str,
    /// Classification label, or empty when the user has not been assessed.
    pub personality_type: &'a str,
    pub resume_text: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Advice {
    pub response: String,
    /// "llm" or "template".
    pub backend: &'static str,
}

/// The advisor trait. Advice never fails: implementations degrade to templates.
#[async_trait]
pub trait Advisor: Send + Sync {
    async fn advise(&self, request: AdviceRequest<'_>) -> Advice;

    fn roadmap(&self, personality_type: &str) -> Vec<String> {
        roadmap_steps(personality_type)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// TemplateAdvisor
// ────────────────────────────────────────────────────────────────────────────

pub struct TemplateAdvisor;

#[async_trait]
impl Advisor for TemplateAdvisor {
    async fn advise(&self, request: AdviceRequest<'_>) -> Advice {
        template_advice(request.personality_type)
    }
}

fn template_advice(personality_type: &str) -> Advice {
    Advice {
        response: default_advice(personality_type),
        backend: "template",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmAdvisor
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmAdvisor(pub LlmClient);

#[async_trait]
impl Advisor for LlmAdvisor {
    async fn advise(&self, request: AdviceRequest<'_>) -> Advice {
        let prompt = build_advice_prompt(&request);
        match self
            .0
            .call_text(&prompt, CAREER_ADVICE_SYSTEM, ADVICE_OPTIONS)
            .await
        {
            Ok(response) => Advice {
                response,
                backend: "llm",
            },
            Err(e) => {
                warn!("Advice generation failed, using template fallback: {e}");
                template_advice(request.personality_type)
            }
        }
    }
}

fn build_advice_prompt(request: &AdviceRequest<'_>) -> String {
    let personality_type = non_blank(Some(request.personality_type)).unwrap_or(GENERAL_PERSONALITY);
    let resume_text = non_blank(request.resume_text).unwrap_or(NO_RESUME);

    CAREER_ADVICE_PROMPT
        .replace("{personality_type}", personality_type)
        .replace("{resume_text}", resume_text)
        .replace("{message}", request.message)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
