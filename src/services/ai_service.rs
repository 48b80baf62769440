use std::time::Instant;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value as JsonValue};

use crate::config::GeminiSettings;
use crate::generation::CompletionModel;

const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

const ERROR_BODY_LIMIT: usize = 200;

/// Gemini `generateContent` client. Settings are fixed at construction and
/// every call uses the same generation profile.
#[derive(Clone)]
pub struct AIService {
    client: Client,
    settings: GeminiSettings,
}

impl AIService {
    pub fn new(settings: GeminiSettings, client: Client) -> Self {
        Self { client, settings }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    fn payload(&self, prompt: &str) -> JsonValue {
        let safety: Vec<JsonValue> = HARM_CATEGORIES
            .iter()
            .map(|category| {
                json!({
                    "category": category,
                    "threshold": self.settings.safety_threshold,
                })
            })
            .collect();

        json!({
            "contents": [
                { "role": "user", "parts": [{ "text": prompt }] }
            ],
            "generationConfig": {
                "temperature": self.settings.temperature,
                "topP": self.settings.top_p,
                "topK": self.settings.top_k,
                "maxOutputTokens": self.settings.max_output_tokens,
            },
            "safetySettings": safety,
        })
    }
}

#[async_trait]
impl CompletionModel for AIService {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        if self.settings.api_key.is_empty() {
            return Err(anyhow!("GEMINI_API_KEY is not configured"));
        }

        let started = Instant::now();
        let res = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&self.payload(prompt))
            .send()
            .await
            .context("Gemini request failed")?;

        let status = res.status();
        let raw = res.text().await.context("Gemini response body could not be read")?;
        if !status.is_success() {
            return Err(api_error(status, &raw));
        }

        let body: JsonValue = serde_json::from_str(&raw).context("Gemini returned a non-JSON body")?;
        let text = extract_text(&body)?;
        tracing::info!(
            model = %self.settings.model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            response_len = text.len(),
            "Gemini completion received"
        );
        Ok(text)
    }
}

/// Prefers Gemini's structured `error.message`; gateways and proxies may
/// answer with HTML or plain text, which is kept truncated.
fn api_error(status: StatusCode, raw: &str) -> anyhow::Error {
    let message = serde_json::from_str::<JsonValue>(raw)
        .ok()
        .and_then(|body| body.pointer("/error/message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                "no error message".to_string()
            } else {
                trimmed.chars().take(ERROR_BODY_LIMIT).collect()
            }
        });
    anyhow!("Gemini API error {}: {}", status, message)
}

/// Concatenated text parts of the first candidate.
fn extract_text(body: &JsonValue) -> anyhow::Result<String> {
    if let Some(reason) = body
        .pointer("/promptFeedback/blockReason")
        .and_then(|r| r.as_str())
    {
        return Err(anyhow!("Gemini blocked the prompt: {}", reason));
    }

    let text: String = body
        .pointer("/candidates/0/content/parts")
        .and_then(|p| p.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let finish = body
            .pointer("/candidates/0/finishReason")
            .and_then(|f| f.as_str())
            .unwrap_or("unknown");
        return Err(anyhow!("Gemini returned no text (finishReason: {})", finish));
    }
    Ok(text)
}
