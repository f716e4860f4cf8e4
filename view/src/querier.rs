//! Remote chain querier.
//!
//! The trait is the seam the view core depends on; [`NodeClient`] is the
//! JSON-RPC HTTP implementation used against a full node.

use crate::error::ViewError;
use async_trait::async_trait;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use serde::Deserialize;
use shade_store::TransactionRecord;
use shade_types::{AssetId, IdentityKey, Metadata, Transaction, TransactionId, ValidatorInfo};
use std::time::Duration;

/// Chain queries the view core needs beyond the local record store.
#[async_trait]
pub trait ChainQuerier: Send + Sync {
    async fn asset_metadata_by_id(&self, id: &AssetId) -> Result<Option<Metadata>, ViewError>;

    /// Ordered stream of validator info. With `show_inactive` false, only
    /// the active set is yielded.
    async fn validator_info(
        &self,
        show_inactive: bool,
    ) -> Result<BoxStream<'static, Result<ValidatorInfo, ViewError>>, ViewError>;

    async fn latest_block_height(&self) -> Result<u64, ViewError>;

    /// Submit a transaction; returns the node's id for the submission.
    async fn submit_transaction(&self, transaction: &Transaction)
        -> Result<TransactionId, ViewError>;

    async fn get_transaction_by_id(
        &self,
        id: &TransactionId,
    ) -> Result<Option<TransactionRecord>, ViewError>;
}

// ── NodeClient ──────────────────────────────────────────────────────────

/// HTTP client for communicating with a full node via JSON-RPC.
///
/// Wraps `reqwest::Client` with the node's base URL and provides typed
/// methods for each RPC action the view layer needs.
#[derive(Clone)]
pub struct NodeClient {
    http: reqwest::Client,
    node_url: String,
}

impl NodeClient {
    /// Create a new NodeClient targeting the given base URL (e.g. `http://127.0.0.1:8317`).
    pub fn new(node_url: impl Into<String>) -> Result<Self, ViewError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ViewError::Querier(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            node_url: node_url.into(),
        })
    }

    /// The configured node URL.
    pub fn node_url(&self) -> &str {
        &self.node_url
    }

    /// Send a JSON-RPC request and return the `result` field.
    async fn rpc_call(
        &self,
        action: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ViewError> {
        let mut body = params;
        body.as_object_mut()
            .ok_or_else(|| ViewError::Querier("params must be a JSON object".into()))?
            .insert("action".to_string(), serde_json::json!(action));

        let response = self
            .http
            .post(&self.node_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ViewError::Querier(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ViewError::Querier(format!(
                "node returned HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ViewError::Querier(format!("invalid JSON response: {e}")))?;

        if let Some(err) = json.get("error").and_then(|e| e.as_str()) {
            return Err(ViewError::Querier(format!("node error: {err}")));
        }

        Ok(json.get("result").cloned().unwrap_or(json))
    }
}

/// Response from the `asset_metadata` RPC.
#[derive(Debug, Clone, Deserialize)]
struct AssetMetadataResult {
    metadata: Option<AssetMetadataEntry>,
}

/// A single asset metadata entry as the node encodes it.
#[derive(Debug, Clone, Deserialize)]
struct AssetMetadataEntry {
    asset_id: String,
    name: String,
    symbol: String,
    display: String,
    denom_exponent: u8,
    #[serde(default)]
    priority_score: u64,
}

impl AssetMetadataEntry {
    fn into_metadata(self) -> Result<Metadata, ViewError> {
        let asset_id = AssetId::parse(&self.asset_id)
            .ok_or_else(|| ViewError::Querier(format!("invalid asset id: {}", self.asset_id)))?;
        Ok(Metadata {
            asset_id,
            name: self.name,
            symbol: self.symbol,
            display: self.display,
            denom_exponent: self.denom_exponent,
            priority_score: self.priority_score,
        })
    }
}

/// Response from the `validator_info` RPC.
#[derive(Debug, Clone, Deserialize)]
struct ValidatorInfoResult {
    #[serde(default)]
    validators: Vec<ValidatorEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct ValidatorEntry {
    identity_key: String,
    name: String,
    #[serde(default)]
    active: bool,
}

impl ValidatorEntry {
    fn into_validator_info(self) -> Result<ValidatorInfo, ViewError> {
        let identity_key = IdentityKey::parse(&self.identity_key).ok_or_else(|| {
            ViewError::Querier(format!("invalid identity key: {}", self.identity_key))
        })?;
        Ok(ValidatorInfo {
            identity_key,
            name: self.name,
            active: self.active,
        })
    }
}

/// Response from the `chain_tip` RPC.
#[derive(Debug, Clone, Deserialize)]
struct ChainTipResult {
    height: u64,
}

/// Response from the `submit_transaction` RPC.
#[derive(Debug, Clone, Deserialize)]
struct SubmitResult {
    id: String,
}

/// Response from the `transaction_by_id` RPC.
#[derive(Debug, Clone, Deserialize)]
struct TransactionLookupResult {
    transaction: Option<TransactionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct TransactionEntry {
    id: String,
    height: u64,
}

#[async_trait]
impl ChainQuerier for NodeClient {
    async fn asset_metadata_by_id(&self, id: &AssetId) -> Result<Option<Metadata>, ViewError> {
        let result = self
            .rpc_call(
                "asset_metadata",
                serde_json::json!({ "asset_id": id.to_string() }),
            )
            .await?;

        let resp: AssetMetadataResult = serde_json::from_value(result)
            .map_err(|e| ViewError::Querier(format!("invalid asset_metadata response: {e}")))?;
        resp.metadata.map(AssetMetadataEntry::into_metadata).transpose()
    }

    async fn validator_info(
        &self,
        show_inactive: bool,
    ) -> Result<BoxStream<'static, Result<ValidatorInfo, ViewError>>, ViewError> {
        let result = self
            .rpc_call(
                "validator_info",
                serde_json::json!({ "show_inactive": show_inactive }),
            )
            .await?;

        let resp: ValidatorInfoResult = serde_json::from_value(result)
            .map_err(|e| ViewError::Querier(format!("invalid validator_info response: {e}")))?;

        let validators: Vec<Result<ValidatorInfo, ViewError>> = resp
            .validators
            .into_iter()
            .map(ValidatorEntry::into_validator_info)
            .collect();
        Ok(futures_util::stream::iter(validators).boxed())
    }

    async fn latest_block_height(&self) -> Result<u64, ViewError> {
        let result = self.rpc_call("chain_tip", serde_json::json!({})).await?;
        let resp: ChainTipResult = serde_json::from_value(result)
            .map_err(|e| ViewError::Querier(format!("invalid chain_tip response: {e}")))?;
        Ok(resp.height)
    }

    async fn submit_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<TransactionId, ViewError> {
        let result = self
            .rpc_call(
                "submit_transaction",
                serde_json::json!({ "transaction": hex::encode(transaction.as_bytes()) }),
            )
            .await?;

        let resp: SubmitResult = serde_json::from_value(result)
            .map_err(|e| ViewError::Querier(format!("invalid submit_transaction response: {e}")))?;
        TransactionId::parse(&resp.id)
            .ok_or_else(|| ViewError::Querier(format!("invalid transaction id: {}", resp.id)))
    }

    async fn get_transaction_by_id(
        &self,
        id: &TransactionId,
    ) -> Result<Option<TransactionRecord>, ViewError> {
        let result = self
            .rpc_call(
                "transaction_by_id",
                serde_json::json!({ "id": id.to_string() }),
            )
            .await?;

        let resp: TransactionLookupResult = serde_json::from_value(result)
            .map_err(|e| ViewError::Querier(format!("invalid transaction_by_id response: {e}")))?;

        resp.transaction
            .map(|entry| {
                let id = TransactionId::parse(&entry.id)
                    .ok_or_else(|| ViewError::Querier(format!("invalid transaction id: {}", entry.id)))?;
                Ok(TransactionRecord {
                    id,
                    height: entry.height,
                })
            })
            .transpose()
    }
}
