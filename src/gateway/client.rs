//! reqwest implementation of the service gateway.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Gateway, GatewayError, Result};
use crate::config::ApiConfig;
use crate::domain::{
    ActivityLogEntry, BotSettings, CommandReply, Opportunity, OpportunityQuery, PortfolioSummary,
    Position, SettingsUpdate, StatusResponse, StrategyType,
};

/// `POST /settings` and `/settings/preset/{id}` answer either with the bare
/// settings or wrapped as `{"success": true, "settings": {...}}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum SettingsEcho {
    Wrapped { settings: BotSettings },
    Bare(BotSettings),
}

impl From<SettingsEcho> for BotSettings {
    fn from(echo: SettingsEcho) -> Self {
        match echo {
            SettingsEcho::Wrapped { settings } | SettingsEcho::Bare(settings) => settings,
        }
    }
}

#[derive(Serialize)]
struct StartRequest<'a> {
    preset: &'a str,
}

#[derive(Deserialize)]
struct HealthResponse {
    status: String,
}

/// HTTP gateway to the trading service.
/// Handles URL building, timeouts, the GET retry budget and error mapping.
pub struct HttpGateway {
    base_url: String,
    http_client: HttpClient,
    retries: u32,
}

impl HttpGateway {
    /// Creates a gateway from API settings.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Transport(format!("failed to build http client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
            retries: config.retries,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one request and returns the raw body of a 2xx response.
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, String)],
        body: Option<String>,
    ) -> Result<Vec<u8>> {
        let query: String = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let url = if query.is_empty() {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}{}?{}", self.base_url, endpoint, query)
        };

        let mut request = self.http_client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request
                .header("Content-Type", "application/json")
                .body(body);
        }

        debug!(method = %method, endpoint = %endpoint, "sending request");

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_client_error() || status.is_server_error() {
            return Err(parse_error_response(status, &body));
        }

        Ok(body.to_vec())
    }

    /// GET with retries on transport failures only.
    async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, String)]) -> Result<T> {
        let mut attempt = 0;
        loop {
            match self.request(Method::GET, endpoint, params, None).await {
                Ok(body) => return Ok(serde_json::from_slice(&body)?),
                Err(e) if e.is_transient() && attempt < self.retries => {
                    attempt += 1;
                    warn!(endpoint = %endpoint, attempt, error = %e, "retrying request");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// POST is never replayed.
    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| GatewayError::Validation(format!("failed to encode request: {}", e)))?;

        let response = self.request(Method::POST, endpoint, &[], body).await?;
        Ok(serde_json::from_slice(&response)?)
    }

    /// GET /portfolio
    pub async fn portfolio(&self) -> Result<PortfolioSummary> {
        self.get("/portfolio", &[]).await
    }

    /// POST /portfolio/positions/{token_id}/close
    pub async fn close_position(&self, token_id: &str) -> Result<serde_json::Value> {
        if token_id.trim().is_empty() {
            return Err(GatewayError::Validation("token id is required".into()));
        }
        let endpoint = format!("/portfolio/positions/{}/close", urlencoding::encode(token_id));
        self.post::<(), _>(&endpoint, None).await
    }

    /// POST /portfolio/update-prices
    pub async fn update_prices(&self) -> Result<serde_json::Value> {
        self.post::<(), _>("/portfolio/update-prices", None).await
    }

    /// GET /strategies/all: top opportunities of every enabled strategy.
    pub async fn scan_all(&self, limit: Option<u32>) -> Result<HashMap<String, Vec<Opportunity>>> {
        let params: Vec<(&str, String)> = limit.map(|l| ("limit", l.to_string())).into_iter().collect();
        self.get("/strategies/all", &params).await
    }

    /// POST /settings/preset/{preset}
    pub async fn apply_preset(&self, preset: &str) -> Result<BotSettings> {
        if preset.trim().is_empty() {
            return Err(GatewayError::Validation("preset id is required".into()));
        }
        let endpoint = format!("/settings/preset/{}", urlencoding::encode(preset));
        let echo: SettingsEcho = self.post::<(), _>(&endpoint, None).await?;
        Ok(echo.into())
    }

    /// GET /health. Returns the reported status string.
    pub async fn health(&self) -> Result<String> {
        let health: HealthResponse = self.get("/health", &[]).await?;
        Ok(health.status)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn status(&self) -> Result<StatusResponse> {
        self.get("/bot/status", &[]).await
    }

    async fn activity(&self, limit: Option<u32>) -> Result<Vec<ActivityLogEntry>> {
        let params: Vec<(&str, String)> = limit.map(|l| ("limit", l.to_string())).into_iter().collect();
        self.get("/bot/activity", &params).await
    }

    async fn opportunities(
        &self,
        strategy: StrategyType,
        query: &OpportunityQuery,
    ) -> Result<Vec<Opportunity>> {
        let endpoint = format!("/strategies/opportunities/{}", urlencoding::encode(strategy.as_str()));
        self.get(&endpoint, &query.to_params()).await
    }

    async fn positions(&self) -> Result<Vec<Position>> {
        self.get("/portfolio/positions", &[]).await
    }

    async fn settings(&self) -> Result<BotSettings> {
        self.get("/settings", &[]).await
    }

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<BotSettings> {
        let echo: SettingsEcho = self.post("/settings", Some(update)).await?;
        Ok(echo.into())
    }

    async fn start(&self, preset: &str) -> Result<CommandReply> {
        self.post("/bot/start", Some(&StartRequest { preset })).await
    }

    async fn stop(&self) -> Result<CommandReply> {
        self.post::<(), _>("/bot/stop", None).await
    }
}

/// Creates a GatewayError from an error response.
///
/// FastAPI puts the reason in `detail`, either as a string or a list of
/// validation problems.
fn parse_error_response(status: StatusCode, body: &[u8]) -> GatewayError {
    #[derive(Deserialize)]
    struct ErrorResponse {
        detail: Option<serde_json::Value>,
    }

    let message = match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            detail: Some(serde_json::Value::String(detail)),
        }) => detail,
        Ok(ErrorResponse {
            detail: Some(detail),
        }) => detail.to_string(),
        _ => String::from_utf8_lossy(body).to_string(),
    };

    warn!(status = status.as_u16(), message = %message, "api error");

    GatewayError::Status {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
