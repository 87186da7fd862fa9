/// EOS SDK - Chain data model and canonical serialization.
///
/// Provides the ledger's wire types: base32-compacted account names,
/// fixed-point assets, block timestamps, actions, transactions, and the
/// ABI-driven action codec with pluggable layout resolution.

pub mod name;
pub mod asset;
pub mod time;
pub mod action;
pub mod transaction;
pub mod abi;

mod error;
pub use error::ChainError;

pub use name::Name;
pub use asset::{Asset, Symbol};
pub use time::TimePointSec;
pub use action::{Action, ActionData, PermissionLevel};
pub use transaction::{Extension, Transaction};
pub use abi::{ActionCodec, ActionLayout, CachedResolver, LayoutResolver, StaticLayouts};
