//! Model adapter: provider abstraction + Gemini REST client + canned mock.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde_json::json;

use crate::config::{mock_mode, GeminiConfig};
use crate::model::ModelResponse;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Something that turns a prompt into a (grounded) model answer.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<ModelResponse>;
    /// Provider name for diagnostics/logs.
    fn provider_name(&self) -> &'static str;
}

pub type DynModelClient = Arc<dyn ModelClient>;

/// Factory: mock when `AI_TEST_MODE=mock`, Gemini otherwise.
pub fn build_model_client(cfg: &GeminiConfig) -> Result<DynModelClient> {
    if mock_mode() {
        tracing::info!("AI_TEST_MODE=mock, using canned model answers");
        return Ok(Arc::new(StaticModel::sample()));
    }
    Ok(Arc::new(GeminiClient::new(cfg)?))
}

/// Gemini `generateContent` with Google Search grounding.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(cfg: &GeminiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("foundry-scout/0.1")
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("building reqwest client")?;
        Ok(Self {
            http,
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    /// Point at a different host (local proxy, fake server in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<ModelResponse> {
        if self.api_key.is_empty() {
            return Err(anyhow!("gemini api key is empty"));
        }

        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "tools": [{ "google_search": {} }],
        });

        let t0 = Instant::now();
        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("gemini generateContent request")?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            let detail: String = detail.chars().take(300).collect();
            return Err(anyhow!("gemini returned {status}: {detail}"));
        }

        let raw: serde_json::Value = resp.json().await.context("decoding gemini response")?;
        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        metrics::histogram!("scout_model_latency_ms").record(ms);
        tracing::debug!(model = %self.model, elapsed_ms = ms, "gemini answered");

        Ok(ModelResponse::from_value(raw))
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

/// Returns the same answer for every prompt.
#[derive(Clone)]
pub struct StaticModel {
    pub fixed: ModelResponse,
}

impl StaticModel {
    pub fn new(fixed: ModelResponse) -> Self {
        Self { fixed }
    }

    /// Grounded answer with two blocks, used by `AI_TEST_MODE=mock`.
    pub fn sample() -> Self {
        let text = "\
Headline: Azure AI Foundry Agent Service reaches GA
Summary: The agent runtime is generally available with managed threads and tool calling.
Link: https://learn.microsoft.com/azure/ai-foundry/agents/overview
Why it matters: Production SLAs for agent workloads.
---
Headline: New model router in preview
Summary: A router picks the best model per prompt to balance quality and cost.
Link: https://learn.microsoft.com/azure/ai-foundry/openai/concepts/model-router
---";
        Self::new(ModelResponse::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "uri": "https://azure.microsoft.com/updates", "title": "Azure Updates" } },
                        { "web": { "uri": "https://learn.microsoft.com/azure/ai-foundry/agents/overview" } }
                    ]
                }
            }]
        })))
    }
}

#[async_trait]
impl ModelClient for StaticModel {
    async fn generate(&self, _prompt: &str) -> Result<ModelResponse> {
        Ok(self.fixed.clone())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Always fails; exercises the upstream-failure path.
pub struct FailingModel;

#[async_trait]
impl ModelClient for FailingModel {
    async fn generate(&self, _prompt: &str) -> Result<ModelResponse> {
        Err(anyhow!("model unavailable"))
    }

    fn provider_name(&self) -> &'static str {
        "failing"
    }
}
