use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Body of a mint request.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest {
    pub recipient_address: String,
    #[serde(rename = "tokenURI")]
    pub token_uri: String,
}

/// Relay response for a mint request. `transaction_hash`, `block_number`,
/// and `token_id` are present on success; `error` on failure.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintResponse {
    pub success: bool,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub token_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Relay readiness report.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub status: String,
    pub chain_id: u64,
    #[serde(default)]
    pub contract: Option<String>,
}

/// Thin client over the relay's HTTP API.
pub struct MintRelayClient {
    client: Client,
    relay_url: String,
}

impl MintRelayClient {
    pub fn new(relay_url: &str) -> Self {
        Self {
            client: Client::new(),
            relay_url: relay_url.trim_end_matches('/').to_string(),
        }
    }

    /// Submit a mint request and wait for the relay's verdict. The call
    /// blocks through the relay's confirmation wait, so expect seconds to
    /// minutes of latency on a real chain.
    ///
    /// Both 200 and 4xx/5xx bodies deserialize into [`MintResponse`]; only
    /// transport-level failures and undecodable bodies are `Err`.
    pub async fn mint(
        &self,
        recipient_address: &str,
        token_uri: &str,
    ) -> Result<MintResponse, Box<dyn std::error::Error>> {
        let req = MintRequest {
            recipient_address: recipient_address.to_string(),
            token_uri: token_uri.to_string(),
        };

        let resp = self
            .client
            .post(format!("{}/api/mint", self.relay_url))
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        match serde_json::from_str::<MintResponse>(&text) {
            Ok(mint_resp) => Ok(mint_resp),
            Err(_) => Err(format!("Relay returned undecodable response ({}): {}", status, text).into()),
        }
    }

    /// Fetch the relay's readiness report.
    pub async fn status(&self) -> Result<ServiceStatus, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(format!("{}/api/mint", self.relay_url))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(format!("Relay returned error status {}", status).into());
        }

        Ok(resp.json::<ServiceStatus>().await?)
    }
}
