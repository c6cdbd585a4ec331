//! HTTP client for the Carter API.

use async_trait::async_trait;
use carter_core::api::{CarterApi, ChatResponse, OpenerResponse, PersonaliseResponse, Plugin};
use carter_core::error::{CarterError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

pub const DEFAULT_CARTER_URL: &str = "https://api.carterlabs.ai";

/// `CarterApi` over HTTPS.
///
/// Every endpoint is a JSON `POST` under `base_url`; the agent key travels
/// in the request body.
#[derive(Debug, Clone)]
pub struct CarterClient {
    client: Client,
    base_url: String,
}

impl CarterClient {
    /// Creates a client for the API at `base_url` (e.g. [`DEFAULT_CARTER_URL`]).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send_request<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!("[Carter] POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| CarterError::api(format!("Request to {} failed: {}", path, e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CarterError::api(format!(
                "{} answered {}: {}",
                path, status, error_text
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CarterError::api(format!("Failed to parse {} response: {}", path, e)))
    }

    /// Runs a slash command through `api/chat` without speech and returns its text.
    async fn command_text(&self, key: &str, user_id: &str, text: &str) -> Result<Option<String>> {
        let body = json!({
            "key": key,
            "text": text,
            "user_id": user_id,
            "speak": false,
        });
        let response: ChatResponse = self.send_request("api/chat", &body).await?;
        Ok(response.output.map(|output| output.text))
    }
}

#[async_trait]
impl CarterApi for CarterClient {
    async fn chat(&self, key: &str, user_id: &str, text: &str) -> Result<ChatResponse> {
        let body = json!({
            "key": key,
            "text": text,
            "user_id": user_id,
            "speak": true,
        });
        self.send_request("api/chat", &body).await
    }

    async fn opener(&self, key: &str, user_id: &str) -> Result<OpenerResponse> {
        let body = json!({
            "key": key,
            "user_id": user_id,
        });
        self.send_request("api/opener", &body).await
    }

    async fn personalise(
        &self,
        key: &str,
        user_id: &str,
        text: &str,
    ) -> Result<PersonaliseResponse> {
        let body = json!({
            "key": key,
            "text": text,
            "user_id": user_id,
            "speak": true,
        });
        self.send_request("api/personalise", &body).await
    }

    async fn plugins(&self, key: &str, user_id: &str) -> Result<Vec<Plugin>> {
        let Some(listing) = self.command_text(key, user_id, "/plugin list").await? else {
            return Ok(Vec::new());
        };

        let mut plugins = Vec::new();
        for plugin_id in parse_plugin_ids(&listing) {
            let info = self
                .command_text(key, user_id, &format!("/plugin info {}", plugin_id))
                .await?
                .ok_or_else(|| CarterError::api(format!("No info for plugin {}", plugin_id)))?;
            let plugin = parse_plugin_info(&info).ok_or_else(|| {
                CarterError::api(format!("Unrecognised info for plugin {}", plugin_id))
            })?;
            plugins.push(plugin);
        }
        Ok(plugins)
    }
}

/// Plugin ids from a `/plugin list` reply: one `<id> - <summary>` line per
/// plugin after a header line.
fn parse_plugin_ids(text: &str) -> Vec<String> {
    text.lines()
        .skip(1)
        .filter_map(|line| line.split(" - ").next())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a `/plugin info` reply:
///
/// ```text
/// Plugin #weather:
/// Name: Weather
/// Description: Current conditions
/// ```
fn parse_plugin_info(text: &str) -> Option<Plugin> {
    let mut lines = text.lines();

    let id = lines.next()?.split('#').nth(1)?.replace(':', "");
    let name = lines.next()?.split_once(": ")?.1.trim().to_string();
    let description = lines
        .filter_map(|line| line.split_once(": "))
        .find(|(key, _)| key.trim() == "Description")
        .map(|(_, value)| value.trim().to_string());

    Some(Plugin {
        id: id.trim().to_string(),
        name,
        description,
    })
}
