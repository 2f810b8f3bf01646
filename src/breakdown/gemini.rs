use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use super::{build_prompt, BreakdownClient, BreakdownError};
use crate::config::BreakdownConfig;
use crate::domain::Locale;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Gemini `generateContent` client that asks for a JSON array of strings
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &BreakdownConfig) -> Result<Self, BreakdownError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", GEMINI_API_BASE, self.model)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

fn request_body(title: &str, locale: Locale) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: Some(build_prompt(title, locale)),
            }],
        }],
        generation_config: json!({
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        }),
    }
}

/// Pull the list of step titles out of a `generateContent` response body.
///
/// A response without any text yields an empty list.
pub fn parse_response(body: &str) -> Result<Vec<String>, BreakdownError> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| BreakdownError::Parse(format!("invalid response body: {}", e)))?;

    let text = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text));

    let Some(text) = text else {
        return Ok(Vec::new());
    };

    serde_json::from_str::<Vec<String>>(text.trim())
        .map_err(|e| BreakdownError::Parse(format!("expected a JSON array of strings: {}", e)))
}

#[async_trait]
impl BreakdownClient for GeminiClient {
    async fn breakdown(&self, title: &str, locale: Locale) -> Result<Vec<String>, BreakdownError> {
        let api_key = self.api_key.as_deref().ok_or(BreakdownError::MissingApiKey)?;

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request_body(title, locale))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(BreakdownError::Status {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }

        let steps = parse_response(&body)?;
        tracing::debug!(model = %self.model, steps = steps.len(), "breakdown response parsed");
        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(request_body("Write essay", Locale::Fr)).unwrap();

        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.contains("French"));
        assert!(text.contains("Write essay"));
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "ARRAY");
        assert_eq!(body["generationConfig"]["responseSchema"]["items"]["type"], "STRING");
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "parts": [{ "text": "[\"Outline\", \"Draft\", \"Edit\"]" }],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        }"#;

        assert_eq!(
            parse_response(body).unwrap(),
            vec!["Outline".to_string(), "Draft".to_string(), "Edit".to_string()]
        );
    }

    #[test]
    fn test_parse_response_without_text_is_empty() {
        assert!(parse_response(r#"{"candidates": []}"#).unwrap().is_empty());
        assert!(parse_response("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_response_rejects_non_array_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"{\"steps\": 1}"}]}}]}"#;
        assert!(matches!(parse_response(body), Err(BreakdownError::Parse(_))));
        assert!(matches!(parse_response("not json"), Err(BreakdownError::Parse(_))));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let client = GeminiClient::new(&BreakdownConfig {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
        })
        .unwrap();

        let result = client.breakdown("Anything", Locale::En).await;
        assert!(matches!(result, Err(BreakdownError::MissingApiKey)));
    }

    #[test]
    fn test_endpoint_uses_model() {
        let client = GeminiClient::new(&BreakdownConfig {
            api_key: Some("k".to_string()),
            model: "gemini-test".to_string(),
        })
        .unwrap();
        assert!(client.endpoint().ends_with("/gemini-test:generateContent"));
    }
}
