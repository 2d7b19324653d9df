use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::CompletionConfig;
use crate::error::{Error, Result};
use crate::models::answer::CompletionResult;
use crate::services::prompt_service::Prompt;

pub const NO_ANALYSIS: &str = "Модель не вернула анализа.";

const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 3000;

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct Req<'a> {
    model: &'a str,
    messages: Vec<Msg<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct RespChoiceMsg {
    content: Option<String>,
}

#[derive(Deserialize)]
struct RespChoice {
    message: RespChoiceMsg,
}

#[derive(Deserialize)]
struct Resp {
    choices: Vec<RespChoice>,
}

/// Single-shot client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct CompletionService {
    client: Client,
    config: CompletionConfig,
}

impl CompletionService {
    pub fn new(config: CompletionConfig, client: Client) -> Self {
        Self { client, config }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.as_str().trim_end_matches('/')
        )
    }

    pub async fn complete(&self, prompt: &Prompt) -> Result<CompletionResult> {
        let req = Req {
            model: &self.config.model,
            messages: vec![
                Msg {
                    role: "system",
                    content: &prompt.system,
                },
                Msg {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        tracing::info!(
            provider = ?self.config.provider,
            model = %self.config.model,
            "Requesting completion"
        );

        let res = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&req)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Completion API returned an error");
            return Err(Error::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        extract_text(&text)
    }
}

/// A body that does not match the completion schema is an error; a well-formed
/// body without usable content yields the placeholder text.
pub fn extract_text(body: &str) -> Result<CompletionResult> {
    let parsed: Resp =
        serde_json::from_str(body).map_err(|e| Error::MalformedResponse(e.to_string()))?;

    let text = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty());

    match text {
        Some(text) => Ok(CompletionResult { text }),
        None => {
            tracing::warn!("Completion response carried no content");
            Ok(CompletionResult {
                text: NO_ANALYSIS.to_string(),
            })
        }
    }
}
