// HTTP backend for remote insight generation (chat-completion API) and the
// parser that turns model prose back into structured insights.
use std::future::Future;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::warn;

use crate::config::AppConfig;
use crate::model::{Insight, RemoteError};

pub const SYSTEM_PROMPT: &str =
    "You are an expert airline industry analyst. Provide clear, actionable insights based on market data.";

const MAX_TOKENS: u32 = 800;
const TEMPERATURE: f64 = 0.7;

/// Seam for the remote model call so the generation state machine can be
/// exercised against a stub in tests.
#[async_trait]
pub trait InsightBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, RemoteError>;
}

pub struct OpenAiBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    max_retries: u32,
}

impl OpenAiBackend {
    pub fn new(cfg: &AppConfig) -> Result<Self, RemoteError> {
        let api_key = cfg
            .openai_api_key
            .clone()
            .ok_or(RemoteError::NotConfigured)?;
        let client = reqwest::Client::builder()
            .timeout(cfg.request_timeout)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            api_key,
            model: cfg.openai_model.clone(),
            base_url: cfg.openai_base_url.clone(),
            max_retries: cfg.max_retries,
        })
    }

    async fn request_once(&self, prompt: &str) -> Result<String, RemoteError> {
        let payload = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        match response.status().as_u16() {
            200 => {
                let parsed: ChatResponse = response
                    .json()
                    .await
                    .map_err(|_| RemoteError::EmptyResponse)?;
                parsed
                    .choices
                    .into_iter()
                    .next()
                    .map(|c| c.message.content)
                    .ok_or(RemoteError::EmptyResponse)
            }
            429 => Err(RemoteError::RateLimited),
            code => Err(RemoteError::Status(code)),
        }
    }
}

#[async_trait]
impl InsightBackend for OpenAiBackend {
    async fn complete(&self, prompt: &str) -> Result<String, RemoteError> {
        with_retries(self.max_retries, || self.request_once(prompt)).await
    }
}

/// Retry policy around a single-attempt call: up to `max_retries`
/// attempts. Rate limits back off exponentially (2^attempt seconds)
/// before retrying; transport errors retry immediately; any other
/// non-200 status aborts at once.
async fn with_retries<F, Fut>(max_retries: u32, mut attempt_once: F) -> Result<String, RemoteError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String, RemoteError>>,
{
    let mut last_err = RemoteError::EmptyResponse;
    for attempt in 0..max_retries {
        match attempt_once().await {
            Ok(text) => return Ok(text),
            Err(RemoteError::RateLimited) => {
                warn!("Rate limit hit, attempt {}", attempt + 1);
                last_err = RemoteError::RateLimited;
                if attempt + 1 < max_retries {
                    sleep(std::time::Duration::from_secs(1 << attempt)).await;
                }
            }
            Err(RemoteError::Transport(e)) => {
                warn!("Request error attempt {}: {}", attempt + 1, e);
                last_err = RemoteError::Transport(e);
            }
            Err(e) => return Err(e),
        }
    }
    Err(last_err)
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatContent,
}

#[derive(Deserialize)]
struct ChatContent {
    content: String,
}

/// Parses model output into at most 4 insights. Headers are either
/// `**bold**` lines or `N.`-numbered lines; following text accumulates as
/// the insight content until the next header.
pub fn parse_insights(text: &str) -> Vec<Insight> {
    let mut insights = Vec::new();
    let mut title = String::new();
    let mut content = String::new();

    let mut flush = |title: &mut String, content: &mut String, insights: &mut Vec<Insight>| {
        if !title.is_empty() {
            insights.push(Insight {
                title: std::mem::take(title),
                content: std::mem::take(content).trim().to_string(),
            });
        }
    };

    for line in text.lines() {
        let line = line.trim();
        if let Some(bold) = bold_title(line) {
            flush(&mut title, &mut content, &mut insights);
            title = bold.to_string();
        } else if let Some(numbered) = numbered_title(line) {
            flush(&mut title, &mut content, &mut insights);
            title = numbered.to_string();
        } else if !line.is_empty() && !title.is_empty() {
            content.push_str(line);
            content.push(' ');
        }
    }
    flush(&mut title, &mut content, &mut insights);

    insights.truncate(4);
    insights
}

fn bold_title(line: &str) -> Option<&str> {
    if line.len() > 4 && line.starts_with("**") && line.ends_with("**") {
        Some(line.trim_matches('*').trim())
    } else {
        None
    }
}

fn numbered_title(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == line.len() {
        return None;
    }
    rest.strip_prefix('.').map(str::trim)
}
