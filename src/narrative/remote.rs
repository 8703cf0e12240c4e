//! LLM-backed narrator
//!
//! Owns a private current-thread runtime and blocks on each completion, so
//! the rest of the crate stays synchronous.

use crate::core::error::{DugoutError, Result};
use crate::narrative::client::LlmClient;
use crate::narrative::prompts;
use crate::narrative::{NarrativeProvider, NarrativeRequest};
use tokio::runtime::{Builder, Runtime};

pub struct RemoteNarrator {
    client: LlmClient,
    runtime: Runtime,
    name: String,
}

impl RemoteNarrator {
    pub fn new(client: LlmClient) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let name = format!("llm:{}", client.model());
        Ok(Self {
            client,
            runtime,
            name,
        })
    }
}

impl NarrativeProvider for RemoteNarrator {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, request: &NarrativeRequest) -> Result<String> {
        let (system, user) = prompts::build(request);
        tracing::debug!("Requesting narration from {}", self.name);

        let text = self
            .runtime
            .block_on(self.client.complete(&system, &user))?;
        let text = text.trim();
        if text.is_empty() {
            return Err(DugoutError::LlmError("Empty response".into()));
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::outcome::AtBatOutcome;
    use crate::game::state::GameState;
    use crate::narrative::PlayFacts;

    #[test]
    fn test_unreachable_endpoint_is_an_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let client = LlmClient::new(
            String::new(),
            "http://127.0.0.1:9/api/chat".into(),
            "llama3".into(),
        )
        .with_options(std::time::Duration::from_secs(2), 0.3, 64)
        .unwrap();
        let narrator = RemoteNarrator::new(client).unwrap();
        assert_eq!(narrator.name(), "llm:llama3");

        let request = NarrativeRequest::Commentary(PlayFacts {
            outcome: AtBatOutcome::Single,
            batter_name: "Rivera".into(),
            pitcher_name: "Okafor".into(),
            snapshot: GameState::new(7).snapshot(),
            runs_scored: 0,
        });
        assert!(matches!(
            narrator.render(&request),
            Err(DugoutError::LlmError(_))
        ));
    }
}
