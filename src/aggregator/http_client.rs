use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::aggregator::types::{ApiEnvelope, BuildData, ExecutableTransaction, Quote, SwapRequest};
use crate::aggregator::AggregatorApi;
use crate::shared::config::AggregatorConfig;
use crate::shared::errors::SwapError;

/// HTTP client for the aggregator's quote and build endpoints
pub struct HypersonicClient {
    http_client: Client,
    base_url: String,
}

impl HypersonicClient {
    pub fn new(config: &AggregatorConfig) -> Result<Self, SwapError> {
        let http_client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(SwapError::Transport)?;
        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST a JSON body and decode the response envelope
    ///
    /// Non-2xx statuses and connection failures surface as `Transport`;
    /// envelope-level rejection is left to the caller since its meaning
    /// differs per endpoint.
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<ApiEnvelope<T>, SwapError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;
        let envelope = response.error_for_status()?.json::<ApiEnvelope<T>>().await?;
        Ok(envelope)
    }
}

#[async_trait]
impl AggregatorApi for HypersonicClient {
    async fn fetch_quote(&self, request: &SwapRequest) -> Result<Quote, SwapError> {
        info!("🔍 Requesting quote from {}/v1/quote", self.base_url);
        let envelope: ApiEnvelope<Quote> = self.post_json("/v1/quote", request).await?;
        match envelope {
            ApiEnvelope { success: true, data: Some(quote), .. } => Ok(quote),
            ApiEnvelope { message, .. } => Err(SwapError::QuoteRejected(
                message.unwrap_or_else(|| "aggregator declined the quote request".to_string()),
            )),
        }
    }

    async fn build_transaction(&self, quote: &Quote) -> Result<ExecutableTransaction, SwapError> {
        info!("🔨 Building transaction via {}/v1/build", self.base_url);
        let envelope: ApiEnvelope<BuildData> = self.post_json("/v1/build", quote).await?;
        match envelope {
            ApiEnvelope { success: true, data: Some(build), .. } => Ok(build.transaction),
            ApiEnvelope { message, .. } => Err(SwapError::BuildRejected(
                message.unwrap_or_else(|| "aggregator declined the build request".to_string()),
            )),
        }
    }
}
