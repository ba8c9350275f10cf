//! Farm assistant - completion backend and reply service

mod openai;
mod service;

pub use openai::{OpenAiCompletion, DEFAULT_MODEL, DEFAULT_OPENAI_BASE_URL};
pub use service::{AssistantReply, AssistantService};
