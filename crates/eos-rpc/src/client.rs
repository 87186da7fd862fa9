//! Async HTTP client for an EOS chain node.
//!
//! All chain-v1 endpoints are JSON-over-POST. The client surfaces node
//! error bodies (`{"code": 500, "error": {...}}`) as [`RpcError::Node`]
//! rather than failing on the JSON shape, so contract assertion messages
//! reach the caller intact.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use eos_chain::ChainError;
use eos_wallet::{HeadBlock, SignedTransaction};

use crate::error::RpcError;
use crate::types::{Block, ChainInfo, GetTableRowsRequest, NodeConfig, PushTransactionResult};

/// HTTP client for the chain node's v1 API.
#[derive(Debug, Clone)]
pub struct NodeClient {
    /// Client configuration.
    config: NodeConfig,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl NodeClient {
    /// Create a new client with the given configuration.
    ///
    /// # Arguments
    /// * `config` - Base URL and timeout.
    ///
    /// # Returns
    /// A new `NodeClient`.
    pub fn new(config: NodeConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    /// Create a client for a node URL with default settings.
    ///
    /// # Arguments
    /// * `base_url` - The node's base URL.
    ///
    /// # Returns
    /// A new `NodeClient`.
    pub fn for_url(base_url: &str) -> Self {
        Self::new(NodeConfig {
            base_url: base_url.to_string(),
            ..NodeConfig::default()
        })
    }

    /// Fetch chain metadata: chain id, head block, irreversible block.
    ///
    /// # Returns
    /// `Ok(ChainInfo)` on success.
    pub async fn get_info(&self) -> Result<ChainInfo, RpcError> {
        self.post("/v1/chain/get_info", &json!({})).await
    }

    /// Fetch the chain id as raw bytes, for signing domain separation.
    ///
    /// # Returns
    /// `Ok([u8; 32])` with the decoded chain id.
    pub async fn chain_id(&self) -> Result<[u8; 32], RpcError> {
        let info = self.get_info().await?;
        let bytes = hex::decode(&info.chain_id)
            .map_err(|e| ChainError::Serialization(format!("invalid chain id: {}", e)))?;
        bytes
            .try_into()
            .map_err(|_| ChainError::Serialization("chain id must be 32 bytes".to_string()).into())
    }

    /// Fetch the latest block height.
    ///
    /// # Arguments
    /// * `irreversible` - Report the last irreversible block rather than
    ///   the head block.
    ///
    /// # Returns
    /// `Ok(u32)` with the block number.
    pub async fn latest_height(&self, irreversible: bool) -> Result<u32, RpcError> {
        let info = self.get_info().await?;
        Ok(if irreversible {
            info.last_irreversible_block_num
        } else {
            info.head_block_num
        })
    }

    /// Fetch a block by number or id.
    ///
    /// # Arguments
    /// * `num_or_id` - A decimal block number or a hex block id.
    ///
    /// # Returns
    /// `Ok(Block)` on success.
    pub async fn get_block(&self, num_or_id: &str) -> Result<Block, RpcError> {
        self.post("/v1/chain/get_block", &json!({ "block_num_or_id": num_or_id }))
            .await
    }

    /// Fetch a recent block as the TAPOS reference for a new transaction.
    ///
    /// # Arguments
    /// * `blocks_behind` - How far behind the head to anchor; a few
    ///   blocks of slack keeps the reference valid across microforks.
    ///
    /// # Returns
    /// `Ok(HeadBlock)` with the reference block's number and id.
    pub async fn reference_block(&self, blocks_behind: u32) -> Result<HeadBlock, RpcError> {
        let info = self.get_info().await?;
        let num = info.head_block_num.saturating_sub(blocks_behind);
        let block = self.get_block(&num.to_string()).await?;
        HeadBlock::from_hex_id(block.block_num, &block.id)
            .map_err(|e| ChainError::Serialization(format!("invalid block id: {}", e)).into())
    }

    /// Fetch account metadata.
    ///
    /// # Arguments
    /// * `account` - The account name.
    ///
    /// # Returns
    /// `Ok(Value)` with the node's account object.
    pub async fn get_account(&self, account: &str) -> Result<Value, RpcError> {
        self.post("/v1/chain/get_account", &json!({ "account_name": account }))
            .await
    }

    /// Fetch a contract's ABI.
    ///
    /// # Arguments
    /// * `account` - The contract account.
    ///
    /// # Returns
    /// `Ok(Value)` with the node's ABI object.
    pub async fn get_abi(&self, account: &str) -> Result<Value, RpcError> {
        self.post("/v1/chain/get_abi", &json!({ "account_name": account }))
            .await
    }

    /// Fetch an account's balance rows for a token contract.
    ///
    /// # Arguments
    /// * `code` - The token contract account.
    /// * `account` - The balance owner.
    /// * `symbol` - The symbol code to query.
    ///
    /// # Returns
    /// `Ok(Vec<String>)` of asset display strings; empty if the account
    /// holds no balance row.
    pub async fn get_currency_balance(
        &self,
        code: &str,
        account: &str,
        symbol: &str,
    ) -> Result<Vec<String>, RpcError> {
        self.post(
            "/v1/chain/get_currency_balance",
            &json!({ "code": code, "account": account, "symbol": symbol }),
        )
        .await
    }

    /// Query rows from a contract table.
    ///
    /// # Arguments
    /// * `req` - The table, scope, bounds, and limit.
    ///
    /// # Returns
    /// `Ok(Value)` with the node's `{rows, more}` object.
    pub async fn get_table_rows(&self, req: &GetTableRowsRequest) -> Result<Value, RpcError> {
        let body = serde_json::to_value(req)?;
        self.post("/v1/chain/get_table_rows", &body).await
    }

    /// Fetch an account's action history from the node's history plugin.
    ///
    /// # Arguments
    /// * `account` - The account name.
    /// * `pos` - Start position; `-1` counts from the end.
    /// * `offset` - How many entries to take from `pos` (sign = direction).
    ///
    /// # Returns
    /// `Ok(Value)` with the node's `{actions, last_irreversible_block}`
    /// object.
    pub async fn get_actions(
        &self,
        account: &str,
        pos: i64,
        offset: i64,
    ) -> Result<Value, RpcError> {
        self.post(
            "/v1/history/get_actions",
            &json!({ "account_name": account, "pos": pos, "offset": offset }),
        )
        .await
    }

    /// Fetch an executed transaction by id from the history plugin.
    ///
    /// # Arguments
    /// * `id` - The transaction id as hex.
    ///
    /// # Returns
    /// `Ok(Value)` with the node's transaction record.
    pub async fn get_transaction(&self, id: &str) -> Result<Value, RpcError> {
        self.post("/v1/history/get_transaction", &json!({ "id": id }))
            .await
    }

    /// Broadcast a signed transaction.
    ///
    /// # Arguments
    /// * `tx` - The signed transaction bundle.
    ///
    /// # Returns
    /// `Ok(PushTransactionResult)` with the accepted id, or
    /// [`RpcError::Node`] carrying the node's rejection.
    pub async fn push_transaction(
        &self,
        tx: &SignedTransaction,
    ) -> Result<PushTransactionResult, RpcError> {
        self.post(
            "/v1/chain/push_transaction",
            &json!({
                "signatures": tx.signatures,
                "compression": 0,
                "packed_context_free_data": "",
                "packed_trx": tx.packed_trx,
            }),
        )
        .await
    }

    /// POST a JSON body and decode the response, promoting node error
    /// bodies to [`RpcError::Node`].
    async fn post<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T, RpcError> {
        let url = format!("{}{}", self.config.base_url, path);
        tracing::debug!(%url, "chain node request");

        let resp = self.client.post(&url).json(body).send().await?;
        let status = resp.status();
        let value: Value = resp.json().await?;

        if !status.is_success() || value.get("error").is_some() {
            tracing::debug!(status = status.as_u16(), "chain node error response");
            return Err(node_error(status.as_u16(), &value));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Map a node error body to [`RpcError::Node`], preferring the inner
/// assertion message over the outer summary.
fn node_error(http_status: u16, body: &Value) -> RpcError {
    let error = body.get("error");
    let code = error
        .and_then(|e| e.get("code"))
        .and_then(Value::as_i64)
        .or_else(|| body.get("code").and_then(Value::as_i64))
        .unwrap_or_else(|| i64::from(http_status));
    let message = error
        .and_then(|e| e.get("what"))
        .and_then(Value::as_str)
        .or_else(|| body.get("message").and_then(Value::as_str))
        .unwrap_or("unknown node error")
        .to_string();
    RpcError::Node { code, message }
}
