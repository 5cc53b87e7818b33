use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{config::InsightConfig, item::InventoryRecord};

use super::{InsightError, InsightGenerator, build_prompt};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// [`InsightGenerator`] calling `{endpoint}/models/{model}:generateContent`.
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    client: reqwest::Client,
    config: InsightConfig,
}

impl GeminiGenerator {
    /// Builds a generator. A missing API key is not an error here; it is
    /// reported by every [`InsightGenerator::summarize`] call instead.
    pub fn new(config: InsightConfig) -> Result<Self, InsightError> {
        let mut builder = reqwest::Client::builder();
        if config.request_timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.request_timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|e| InsightError::Configuration(format!("http client: {e}")))?;
        Ok(Self { client, config })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint, self.config.model
        )
    }

    async fn request(&self, api_key: &str, prompt: &str) -> Result<String, InsightError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let resp = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| InsightError::Generation(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(InsightError::Generation(format!(
                "upstream returned {}: {}",
                status.as_u16(),
                detail.trim()
            )));
        }

        let parsed: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| InsightError::Generation(format!("malformed response: {e}")))?;
        parsed
            .into_text()
            .ok_or_else(|| InsightError::Generation("response contained no text".to_string()))
    }
}

impl InsightGenerator for GeminiGenerator {
    async fn summarize(&self, records: Vec<InventoryRecord>) -> Result<String, InsightError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(InsightError::Configuration(
                "API_KEY environment variable not set".to_string(),
            ));
        };

        let prompt = build_prompt(&self.config.business_name, &records);
        tracing::info!(model = %self.config.model, records = records.len(), "requesting inventory insights");
        let out = self.request(api_key, &prompt).await;
        if let Err(err) = &out {
            tracing::warn!(error = %err, "insight generation failed");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_text_concatenates_first_candidate_parts() {
        let raw = r###"{"candidates":[{"content":{"parts":[{"text":"## Summary\n"},{"text":"All good."}]}},{"content":{"parts":[{"text":"ignored"}]}}]}"###;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.into_text().as_deref(), Some("## Summary\nAll good."));
    }

    #[test]
    fn empty_response_has_no_text() {
        let parsed: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.into_text().is_none());
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let generator = GeminiGenerator::new(InsightConfig {
            endpoint: "http://127.0.0.1:1".to_string(),
            ..InsightConfig::default()
        })
        .unwrap();
        let err = generator.summarize(Vec::new()).await.unwrap_err();
        assert!(matches!(err, InsightError::Configuration(_)));
    }

    #[test]
    fn url_joins_endpoint_and_model() {
        let generator = GeminiGenerator::new(InsightConfig::default()).unwrap();
        assert_eq!(
            generator.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
