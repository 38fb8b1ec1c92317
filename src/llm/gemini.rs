use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::provider::Provider;
use super::types::{LLMError, LLMRequest, LLMResponse, Role, StopReason, Usage};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Harm categories blocked at medium-and-above; content filtering is
/// enforced upstream, not re-checked locally.
const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Google Gemini provider
pub struct GeminiProvider {
    api_key: String,
    http_client: Client,
    default_model: String,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>, default_model: impl Into<String>, timeout: Duration) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            api_key: api_key.into(),
            http_client,
            default_model: default_model.into(),
        }
    }

    fn build_request_body(&self, request: &LLMRequest) -> serde_json::Value {
        let contents: Vec<serde_json::Value> = request
            .messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                };
                json!({
                    "role": role,
                    "parts": [{ "text": m.text }]
                })
            })
            .collect();

        let mut body = json!({
            "contents": contents,
        });

        if let Some(system) = &request.system {
            body["systemInstruction"] = json!({
                "parts": [{ "text": system }]
            });
        }

        let mut generation_config = json!({
            "responseMimeType": "text/plain",
        });

        if let Some(max_tokens) = request.max_tokens {
            generation_config["maxOutputTokens"] = json!(max_tokens);
        }
        if let Some(temp) = request.temperature {
            generation_config["temperature"] = json!(temp);
        }
        if let Some(top_p) = request.top_p {
            generation_config["topP"] = json!(top_p);
        }
        if let Some(top_k) = request.top_k {
            generation_config["topK"] = json!(top_k);
        }

        body["generationConfig"] = generation_config;

        let safety_settings: Vec<serde_json::Value> = SAFETY_CATEGORIES
            .iter()
            .map(|category| {
                json!({
                    "category": category,
                    "threshold": "BLOCK_MEDIUM_AND_ABOVE"
                })
            })
            .collect();
        body["safetySettings"] = json!(safety_settings);

        body
    }

    fn get_endpoint(&self, model: &str) -> String {
        format!("{}/{}:generateContent?key={}", GEMINI_API_URL, model, self.api_key)
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        "google"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    async fn complete(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        let model = if request.model.is_empty() {
            &self.default_model
        } else {
            &request.model
        };

        let body = self.build_request_body(&request);
        let url = self.get_endpoint(model);

        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LLMError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(parse_error_response(status.as_u16(), &text));
        }

        let resp: GeminiResponse = response.json().await.map_err(|e| LLMError::ParseError {
            message: e.to_string(),
        })?;

        Ok(convert_response(resp, model))
    }
}

fn parse_error_response(status: u16, body: &str) -> LLMError {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        let error = &json["error"];
        let message = error["message"]
            .as_str()
            .unwrap_or("Unknown error")
            .to_string();
        let status_code = error["code"].as_u64().unwrap_or(status as u64) as u16;

        match status {
            401 | 403 => LLMError::AuthError { message },
            429 => LLMError::RateLimit {
                retry_after_secs: 60,
            },
            400 => {
                if message.contains("API key") {
                    LLMError::AuthError { message }
                } else {
                    LLMError::InvalidRequest { message }
                }
            }
            404 => LLMError::ModelNotFound { model: message },
            _ => LLMError::ProviderError {
                status: status_code,
                message,
            },
        }
    } else {
        LLMError::ProviderError {
            status,
            message: body.to_string(),
        }
    }
}

fn convert_response(resp: GeminiResponse, model: &str) -> LLMResponse {
    let candidate = resp.candidates.into_iter().next().unwrap_or_default();

    let text = candidate
        .content
        .and_then(|c| c.parts)
        .map(|parts| {
            parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let stop_reason = match candidate.finish_reason.as_deref() {
        Some("MAX_TOKENS") => StopReason::MaxTokens,
        Some("SAFETY") | Some("RECITATION") => StopReason::ContentFilter,
        _ => StopReason::EndTurn,
    };

    let usage = resp.usage_metadata.map_or(Usage::default(), |u| Usage {
        input_tokens: u.prompt_token_count,
        output_tokens: u.candidates_token_count,
    });

    LLMResponse {
        id: resp.response_id.unwrap_or_default(),
        model: model.to_string(),
        text,
        stop_reason,
        usage,
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsageMetadata>,
    #[serde(default)]
    response_id: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    parts: Option<Vec<GeminiPart>>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    prompt_token_count: u32,
    candidates_token_count: u32,
}
