//! Farm assistant - opaque text completion

use std::fmt::Debug;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::DomainError;
use super::locale::Language;

/// Remote text-completion backend
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TextCompletion: Send + Sync + Debug {
    /// Complete `message` under the given system instructions
    async fn complete(&self, system: &str, message: &str) -> Result<String, DomainError>;

    fn provider_name(&self) -> &'static str;
}

/// System instructions for a reply in `language`
pub fn system_prompt(language: Language) -> String {
    format!(
        "You are a helpful farm and rural life assistant for villagers in India. \
         Give short, practical answers in simple words. Respond in {}.",
        language.display_name()
    )
}
