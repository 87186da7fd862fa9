/// Error types for chain data model and serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// An account or method name uses invalid characters or length.
    #[error("invalid name: {0}")]
    InvalidName(String),
    /// A minor-unit amount string is not a valid integer or the precision
    /// is out of range.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// An asset string does not have the `<amount> <symbol>` shape.
    #[error("malformed asset: {0}")]
    MalformedAsset(String),
    /// A block timestamp string cannot be parsed.
    #[error("invalid time: {0}")]
    InvalidTime(String),
    /// No binary layout is registered for the `(account, name)` pair.
    #[error("unknown action layout: {account}::{name}")]
    UnknownActionLayout {
        /// The contract account.
        account: String,
        /// The action name.
        name: String,
    },
    /// A supplied value cannot be coerced to its declared field type.
    #[error("field type mismatch for '{field}': {detail}")]
    FieldTypeMismatch {
        /// The layout field name.
        field: String,
        /// What went wrong.
        detail: String,
    },
    /// Fewer bytes are present than the layout requires.
    #[error("truncated data")]
    TruncatedData,
    /// Excess bytes remain after decoding all fields.
    #[error("trailing data: {0} bytes")]
    TrailingData(usize),
    /// Action data must be pre-encoded to bytes before packing.
    #[error("action data is not encoded: {0}")]
    UnencodedActionData(String),
    /// A general serialization failure (bad hex, malformed structure).
    #[error("serialization error: {0}")]
    Serialization(String),
    /// An underlying primitives error.
    #[error("primitives error: {0}")]
    Primitives(#[from] eos_primitives::PrimitivesError),
}
