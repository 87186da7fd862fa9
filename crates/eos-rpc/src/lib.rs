#![deny(missing_docs)]

//! # eos-rpc
//!
//! Async HTTP client for EOS chain nodes. Covers the chain-v1 endpoints
//! the SDK consumes: chain metadata for signing and replay protection,
//! block lookups, balance and table queries, contract ABIs, and signed
//! transaction broadcast.
//!
//! # Example
//!
//! ```no_run
//! use eos_rpc::{NodeClient, NodeConfig};
//!
//! let client = NodeClient::new(NodeConfig {
//!     base_url: "https://eos.greymass.com".to_string(),
//!     ..Default::default()
//! });
//! ```

pub mod client;
pub mod error;
pub mod types;


pub use client::NodeClient;
pub use error::RpcError;
pub use types::{Block, ChainInfo, GetTableRowsRequest, NodeConfig, PushTransactionResult};
