//! Gemini implementation of the chat traits.
//!
//! Talks to the `generateContent` REST API. Each session is seeded with a
//! system instruction and a fixed sampling seed, and resends its full turn
//! history on every call — the API itself is stateless.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChatError, ChatResult};
use crate::traits::chat::{ChatProvider, ChatSession, ChatTurn, Role};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Fixed sampling seed so answers about the same company are repeatable.
const SAMPLING_SEED: i64 = 42;

/// Gemini-backed chat provider.
#[derive(Clone)]
pub struct GeminiChat {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    seed: i64,
}

impl GeminiChat {
    /// Create a provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            seed: SAMPLING_SEED,
        }
    }

    /// Create from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> ChatResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| ChatError::MissingApiKey {
            var: "GEMINI_API_KEY".to_string(),
        })?;
        Ok(Self::new(api_key))
    }

    /// Set the chat model (default: gemini-2.0-flash).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for proxies and tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the sampling seed.
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, system_prompt: &str, history: &[ChatTurn]) -> ChatResult<String> {
        let request = GenerateRequest::from_turns(system_prompt, history, self.seed);

        debug!(model = %self.model, turns = history.len(), "chat completion requested");

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::Api(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Api(Box::new(e)))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(ChatError::EmptyResponse)
    }
}

impl ChatProvider for GeminiChat {
    fn session(&self, system_prompt: &str) -> Box<dyn ChatSession> {
        Box::new(GeminiSession {
            provider: self.clone(),
            system_prompt: system_prompt.to_string(),
            history: Vec::new(),
        })
    }
}

/// One conversation against the Gemini API.
pub struct GeminiSession {
    provider: GeminiChat,
    system_prompt: String,
    history: Vec<ChatTurn>,
}

#[async_trait]
impl ChatSession for GeminiSession {
    async fn send(&mut self, text: &str) -> ChatResult<String> {
        self.history.push(ChatTurn::user(text));

        match self.provider.generate(&self.system_prompt, &self.history).await {
            Ok(reply) => {
                self.history.push(ChatTurn::assistant(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                // Drop the unanswered turn so a retry does not double it.
                self.history.pop();
                Err(e)
            }
        }
    }
}

// Wire types for the generateContent API.

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl GenerateRequest {
    fn from_turns(system_prompt: &str, history: &[ChatTurn], seed: i64) -> Self {
        let contents = history
            .iter()
            .map(|turn| Content {
                role: Some(
                    match turn.role {
                        Role::User => "user",
                        Role::Assistant => "model",
                    }
                    .to_string(),
                ),
                parts: vec![Part {
                    text: turn.content.clone(),
                }],
            })
            .collect();

        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: system_prompt.to_string(),
                }],
            },
            contents,
            generation_config: GenerationConfig { seed },
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    seed: i64,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_system_instruction_and_seed() {
        let history = vec![ChatTurn::user("who are you?")];
        let request = GenerateRequest::from_turns("be helpful", &history, 42);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json["systemInstruction"]["parts"][0]["text"],
            "be helpful"
        );
        assert_eq!(json["generationConfig"]["seed"], 42);
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "who are you?");
    }

    #[test]
    fn test_assistant_turns_map_to_model_role() {
        let history = vec![ChatTurn::user("q"), ChatTurn::assistant("a")];
        let request = GenerateRequest::from_turns("sys", &history, 1);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][1]["role"], "model");
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "hello"}]}}
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.candidates[0].content.parts[0].text, "hello");
    }

    #[test]
    fn test_empty_candidates_parse_to_empty_vec() {
        let parsed: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
    }
}
