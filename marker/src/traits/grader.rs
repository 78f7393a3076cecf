//!
//! # Grader Trait
//!
//! A [`Grader`] turns a [`GradingPrompt`] into the raw text of a grading reply. The
//! reply is interpreted by [`crate::parsers::response_parser`], so implementations
//! only deal with transport. Production code talks to a chat-completions service
//! ([`crate::feedback::ai_feedback::AiGrader`]); tests plug in canned replies.

use crate::error::MarkerError;
use crate::prompt::GradingPrompt;
use async_trait::async_trait;

#[async_trait]
pub trait Grader: Send + Sync {
    /// Sends `prompt` to the grading backend and returns its reply verbatim.
    async fn grade(&self, prompt: &GradingPrompt) -> Result<String, MarkerError>;
}
