//! Chain-node RPC data types: configuration, requests, and responses.

use serde::{Deserialize, Serialize};

/// Configuration for a [`NodeClient`](crate::NodeClient).
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Base URL of the chain node (e.g. `https://eos.greymass.com`).
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://eos.greymass.com".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Response of `get_info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainInfo {
    /// The chain id (signing domain separator) as hex.
    pub chain_id: String,
    /// Current head block number.
    pub head_block_num: u32,
    /// Current head block id as hex.
    pub head_block_id: String,
    /// Head block timestamp.
    #[serde(default)]
    pub head_block_time: Option<String>,
    /// Newest block that can no longer fork out.
    pub last_irreversible_block_num: u32,
    /// Id of that block as hex.
    #[serde(default)]
    pub last_irreversible_block_id: Option<String>,
    /// Node software version string.
    #[serde(default)]
    pub server_version_string: Option<String>,
}

/// Response of `get_block`, reduced to the fields the SDK consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// The block number.
    pub block_num: u32,
    /// The block id as hex.
    pub id: String,
    /// The 32-bit TAPOS prefix the node derives from the id.
    pub ref_block_prefix: u32,
    /// Block production timestamp.
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Id of the preceding block as hex.
    #[serde(default)]
    pub previous: Option<String>,
    /// The producing account.
    #[serde(default)]
    pub producer: Option<String>,
}

/// Response of `push_transaction`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushTransactionResult {
    /// The accepted transaction's id as hex.
    pub transaction_id: String,
    /// The node's execution receipt.
    #[serde(default)]
    pub processed: Option<serde_json::Value>,
}

/// Request body for `get_table_rows`.
#[derive(Debug, Clone, Serialize)]
pub struct GetTableRowsRequest {
    /// The contract account owning the table.
    pub code: String,
    /// The table scope (often an account name).
    pub scope: String,
    /// The table name.
    pub table: String,
    /// Return rows as JSON rather than hex.
    pub json: bool,
    /// Lower bound of the primary key range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<String>,
    /// Upper bound of the primary key range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<String>,
    /// Maximum number of rows to return.
    pub limit: u32,
}

impl GetTableRowsRequest {
    /// Create a JSON-mode request over a whole table.
    ///
    /// # Arguments
    /// * `code` - The contract account.
    /// * `scope` - The table scope.
    /// * `table` - The table name.
    ///
    /// # Returns
    /// A request with no key bounds and a limit of 10.
    pub fn new(code: &str, scope: &str, table: &str) -> Self {
        GetTableRowsRequest {
            code: code.to_string(),
            scope: scope.to_string(),
            table: table.to_string(),
            json: true,
            lower_bound: None,
            upper_bound: None,
            limit: 10,
        }
    }
}
