//! ABI-driven action argument codec.
//!
//! Contract methods declare their binary layout as an ordered field list.
//! `ActionCodec` serializes a JSON argument object against such a layout
//! (little-endian fixed widths, varuint32-prefixed variable fields) and
//! decodes strictly: short input fails, leftover bytes fail. Layouts come
//! from a [`LayoutResolver`], so callers can plug a static table, a remote
//! ABI source, or a caching wrapper around either.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

use eos_primitives::util::{ByteReader, ByteWriter};
use eos_primitives::PrimitivesError;

use crate::asset::{Asset, Symbol};
use crate::name::Name;
use crate::time::TimePointSec;
use crate::ChainError;

/// The primitive field types a layout can declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbiType {
    /// Base32-compacted account/method name (u64 LE).
    Name,
    /// Varuint32-length-prefixed UTF-8 string.
    String,
    /// Fixed-point amount with symbol (i64 LE + symbol).
    Asset,
    /// Precision byte + 7-byte code.
    Symbol,
    /// Single byte, 0 or 1.
    Bool,
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer, little-endian.
    U16,
    /// Unsigned 32-bit integer, little-endian.
    U32,
    /// Unsigned 64-bit integer, little-endian.
    U64,
    /// Signed 64-bit integer, little-endian.
    I64,
    /// Unsigned LEB128-encoded 32-bit integer.
    Varuint32,
    /// Varuint32-length-prefixed raw bytes, hex in JSON.
    Bytes,
    /// Fixed 32 bytes, hex in JSON.
    Checksum256,
    /// Seconds since epoch (u32 LE), node timestamp text in JSON.
    TimePointSec,
}

/// One field of an action layout: a name and a declared type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiField {
    /// The argument key in the JSON object.
    pub name: String,
    /// The declared wire type.
    #[serde(rename = "type")]
    pub kind: AbiType,
}

impl AbiField {
    /// Create a field descriptor.
    ///
    /// # Arguments
    /// * `name` - The argument key.
    /// * `kind` - The declared wire type.
    ///
    /// # Returns
    /// A new `AbiField`.
    pub fn new(name: &str, kind: AbiType) -> Self {
        AbiField {
            name: name.to_string(),
            kind,
        }
    }
}

/// The ordered binary layout of one action's arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLayout {
    /// Fields in wire order.
    pub fields: Vec<AbiField>,
}

impl ActionLayout {
    /// Create a layout from an ordered field list.
    ///
    /// # Arguments
    /// * `fields` - The fields in wire order.
    ///
    /// # Returns
    /// A new `ActionLayout`.
    pub fn new(fields: Vec<AbiField>) -> Self {
        ActionLayout { fields }
    }
}

// ---------------------------------------------------------------------------
// Layout resolution
// ---------------------------------------------------------------------------

/// Capability for looking up the layout registered for `(account, name)`.
///
/// Implementations may consult a static table or an external ABI source;
/// the codec itself never performs I/O.
pub trait LayoutResolver {
    /// Resolve the layout for an action.
    ///
    /// # Arguments
    /// * `account` - The contract account.
    /// * `name` - The action name.
    ///
    /// # Returns
    /// `Ok(ActionLayout)`, or `UnknownActionLayout` if the pair is not
    /// registered.
    fn resolve(&self, account: Name, name: Name) -> Result<ActionLayout, ChainError>;
}

/// An in-memory layout table.
#[derive(Clone, Debug, Default)]
pub struct StaticLayouts {
    layouts: HashMap<(Name, Name), ActionLayout>,
}

impl StaticLayouts {
    /// Create an empty table.
    ///
    /// # Returns
    /// A `StaticLayouts` with no registered layouts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table preloaded with the standard token contract's actions
    /// (`eosio.token`: transfer, issue, create, retire, open, close).
    ///
    /// # Returns
    /// A `StaticLayouts` covering the token contract.
    pub fn eosio_token() -> Self {
        let mut table = Self::new();
        let token: Name = "eosio.token".parse().expect("static name");

        table.register(
            token,
            "transfer".parse().expect("static name"),
            ActionLayout::new(vec![
                AbiField::new("from", AbiType::Name),
                AbiField::new("to", AbiType::Name),
                AbiField::new("quantity", AbiType::Asset),
                AbiField::new("memo", AbiType::String),
            ]),
        );
        table.register(
            token,
            "issue".parse().expect("static name"),
            ActionLayout::new(vec![
                AbiField::new("to", AbiType::Name),
                AbiField::new("quantity", AbiType::Asset),
                AbiField::new("memo", AbiType::String),
            ]),
        );
        table.register(
            token,
            "create".parse().expect("static name"),
            ActionLayout::new(vec![
                AbiField::new("issuer", AbiType::Name),
                AbiField::new("maximum_supply", AbiType::Asset),
            ]),
        );
        table.register(
            token,
            "retire".parse().expect("static name"),
            ActionLayout::new(vec![
                AbiField::new("quantity", AbiType::Asset),
                AbiField::new("memo", AbiType::String),
            ]),
        );
        table.register(
            token,
            "open".parse().expect("static name"),
            ActionLayout::new(vec![
                AbiField::new("owner", AbiType::Name),
                AbiField::new("symbol", AbiType::Symbol),
                AbiField::new("ram_payer", AbiType::Name),
            ]),
        );
        table.register(
            token,
            "close".parse().expect("static name"),
            ActionLayout::new(vec![
                AbiField::new("owner", AbiType::Name),
                AbiField::new("symbol", AbiType::Symbol),
            ]),
        );
        table
    }

    /// Register a layout for an `(account, name)` pair, replacing any
    /// previous registration.
    ///
    /// # Arguments
    /// * `account` - The contract account.
    /// * `name` - The action name.
    /// * `layout` - The layout to register.
    pub fn register(&mut self, account: Name, name: Name, layout: ActionLayout) {
        self.layouts.insert((account, name), layout);
    }
}

impl LayoutResolver for StaticLayouts {
    fn resolve(&self, account: Name, name: Name) -> Result<ActionLayout, ChainError> {
        self.layouts
            .get(&(account, name))
            .cloned()
            .ok_or_else(|| ChainError::UnknownActionLayout {
                account: account.to_string(),
                name: name.to_string(),
            })
    }
}

/// A memoizing wrapper around any resolver.
///
/// Successful lookups are cached by `(account, name)`, so a resolver
/// backed by an external ABI source is consulted at most once per action.
#[derive(Debug, Default)]
pub struct CachedResolver<R> {
    inner: R,
    cache: RwLock<HashMap<(Name, Name), ActionLayout>>,
}

impl<R: LayoutResolver> CachedResolver<R> {
    /// Wrap a resolver with an empty cache.
    ///
    /// # Arguments
    /// * `inner` - The resolver to memoize.
    ///
    /// # Returns
    /// A new `CachedResolver`.
    pub fn new(inner: R) -> Self {
        CachedResolver {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }
}

impl<R: LayoutResolver> LayoutResolver for CachedResolver<R> {
    fn resolve(&self, account: Name, name: Name) -> Result<ActionLayout, ChainError> {
        if let Ok(cache) = self.cache.read() {
            if let Some(layout) = cache.get(&(account, name)) {
                return Ok(layout.clone());
            }
        }
        let layout = self.inner.resolve(account, name)?;
        if let Ok(mut cache) = self.cache.write() {
            cache.insert((account, name), layout.clone());
        }
        Ok(layout)
    }
}

// ---------------------------------------------------------------------------
// ActionCodec
// ---------------------------------------------------------------------------

/// Serializes and deserializes action arguments against resolved layouts.
#[derive(Debug, Default)]
pub struct ActionCodec<R> {
    resolver: R,
}

impl<R: LayoutResolver> ActionCodec<R> {
    /// Create a codec over a layout resolver.
    ///
    /// # Arguments
    /// * `resolver` - The layout source.
    ///
    /// # Returns
    /// A new `ActionCodec`.
    pub fn new(resolver: R) -> Self {
        ActionCodec { resolver }
    }

    /// Encode a JSON argument object into action data bytes.
    ///
    /// Fields are serialized in the layout's declared order; keys the
    /// layout does not name are ignored.
    ///
    /// # Arguments
    /// * `account` - The contract account.
    /// * `name` - The action name.
    /// * `args` - The argument object.
    ///
    /// # Returns
    /// `Ok(Vec<u8>)` with the wire bytes, `UnknownActionLayout` if no
    /// layout is registered, or `FieldTypeMismatch` if a value is missing
    /// or cannot be coerced to its declared type.
    pub fn encode(&self, account: Name, name: Name, args: &Value) -> Result<Vec<u8>, ChainError> {
        let layout = self.resolver.resolve(account, name)?;
        let object = args.as_object().ok_or_else(|| ChainError::FieldTypeMismatch {
            field: "<arguments>".to_string(),
            detail: "arguments must be a JSON object".to_string(),
        })?;

        let mut writer = ByteWriter::with_capacity(64);
        for field in &layout.fields {
            let value = object.get(&field.name).ok_or_else(|| ChainError::FieldTypeMismatch {
                field: field.name.clone(),
                detail: "missing argument".to_string(),
            })?;
            encode_field(&mut writer, field, value)?;
        }
        Ok(writer.into_bytes())
    }

    /// Decode action data bytes into a JSON argument object.
    ///
    /// Strict inverse of [`encode`](Self::encode): short data fails with
    /// `TruncatedData`, leftover bytes with `TrailingData`.
    ///
    /// # Arguments
    /// * `account` - The contract account.
    /// * `name` - The action name.
    /// * `bytes` - The wire bytes.
    ///
    /// # Returns
    /// `Ok(Value)` with the argument object.
    pub fn decode(&self, account: Name, name: Name, bytes: &[u8]) -> Result<Value, ChainError> {
        let layout = self.resolver.resolve(account, name)?;
        let mut reader = ByteReader::new(bytes);

        let mut object = serde_json::Map::with_capacity(layout.fields.len());
        for field in &layout.fields {
            object.insert(field.name.clone(), decode_field(&mut reader, field)?);
        }
        if reader.remaining() != 0 {
            return Err(ChainError::TrailingData(reader.remaining()));
        }
        Ok(Value::Object(object))
    }

    /// Encode an action's structured arguments in place.
    ///
    /// An action already carrying raw bytes passes through unchanged.
    ///
    /// # Arguments
    /// * `action` - The action to encode.
    ///
    /// # Returns
    /// `Ok(Action)` in the packable byte form.
    pub fn encode_action(&self, action: crate::Action) -> Result<crate::Action, ChainError> {
        match &action.data {
            crate::ActionData::Raw(_) => Ok(action),
            crate::ActionData::Structured(args) => {
                let data = self.encode(action.account, action.name, args)?;
                Ok(crate::Action::new(
                    action.account,
                    action.name,
                    action.authorization,
                    data,
                ))
            }
        }
    }
}

/// Encode one field value per its declared type.
fn encode_field(writer: &mut ByteWriter, field: &AbiField, value: &Value) -> Result<(), ChainError> {
    let mismatch = |detail: String| ChainError::FieldTypeMismatch {
        field: field.name.clone(),
        detail,
    };

    match field.kind {
        AbiType::Name => {
            let s = value.as_str().ok_or_else(|| mismatch("expected a name string".into()))?;
            let name: Name = s.parse().map_err(|e| mismatch(format!("{}", e)))?;
            name.write_to(writer);
        }
        AbiType::String => {
            let s = value.as_str().ok_or_else(|| mismatch("expected a string".into()))?;
            writer.write_varuint32(s.len() as u32);
            writer.write_bytes(s.as_bytes());
        }
        AbiType::Asset => {
            let s = value.as_str().ok_or_else(|| mismatch("expected an asset string".into()))?;
            let asset: Asset = s.parse().map_err(|e| mismatch(format!("{}", e)))?;
            asset.write_to(writer);
        }
        AbiType::Symbol => {
            let s = value.as_str().ok_or_else(|| mismatch("expected a symbol string".into()))?;
            let symbol: Symbol = s.parse().map_err(|e| mismatch(format!("{}", e)))?;
            symbol.write_to(writer);
        }
        AbiType::Bool => {
            let b = value.as_bool().ok_or_else(|| mismatch("expected a bool".into()))?;
            writer.write_u8(u8::from(b));
        }
        AbiType::U8 => writer.write_u8(unsigned_field(value, u64::from(u8::MAX), &field.name)? as u8),
        AbiType::U16 => {
            writer.write_u16_le(unsigned_field(value, u64::from(u16::MAX), &field.name)? as u16)
        }
        AbiType::U32 => {
            writer.write_u32_le(unsigned_field(value, u64::from(u32::MAX), &field.name)? as u32)
        }
        AbiType::U64 => writer.write_u64_le(unsigned_field(value, u64::MAX, &field.name)?),
        AbiType::I64 => {
            let v = match value {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.parse().ok(),
                _ => None,
            }
            .ok_or_else(|| mismatch("expected a 64-bit signed integer".into()))?;
            writer.write_i64_le(v);
        }
        AbiType::Varuint32 => {
            writer.write_varuint32(unsigned_field(value, u64::from(u32::MAX), &field.name)? as u32)
        }
        AbiType::Bytes => {
            let s = value.as_str().ok_or_else(|| mismatch("expected a hex string".into()))?;
            let bytes = hex::decode(s).map_err(|e| mismatch(format!("invalid hex: {}", e)))?;
            writer.write_varuint32(bytes.len() as u32);
            writer.write_bytes(&bytes);
        }
        AbiType::Checksum256 => {
            let s = value.as_str().ok_or_else(|| mismatch("expected a hex string".into()))?;
            let bytes = hex::decode(s).map_err(|e| mismatch(format!("invalid hex: {}", e)))?;
            if bytes.len() != 32 {
                return Err(mismatch(format!("expected 32 bytes, got {}", bytes.len())));
            }
            writer.write_bytes(&bytes);
        }
        AbiType::TimePointSec => {
            let s = value.as_str().ok_or_else(|| mismatch("expected a timestamp string".into()))?;
            let t: TimePointSec = s.parse().map_err(|e| mismatch(format!("{}", e)))?;
            t.write_to(writer);
        }
    }
    Ok(())
}

/// Coerce a JSON number or decimal string to an unsigned integer within
/// `max`.
fn unsigned_field(value: &Value, max: u64, field: &str) -> Result<u64, ChainError> {
    let v = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
    .filter(|v| *v <= max)
    .ok_or_else(|| ChainError::FieldTypeMismatch {
        field: field.to_string(),
        detail: format!("expected an unsigned integer at most {}", max),
    })?;
    Ok(v)
}

/// Decode one field value per its declared type.
fn decode_field(reader: &mut ByteReader, field: &AbiField) -> Result<Value, ChainError> {
    let result = match field.kind {
        AbiType::Name => Name::read_from(reader).map(|n| Value::String(n.to_string())),
        AbiType::String => read_short_bytes(reader).and_then(|bytes| {
            String::from_utf8(bytes)
                .map(Value::String)
                .map_err(|_| ChainError::FieldTypeMismatch {
                    field: field.name.clone(),
                    detail: "string field is not valid UTF-8".to_string(),
                })
        }),
        AbiType::Asset => Asset::read_from(reader).map(|a| Value::String(a.to_string())),
        AbiType::Symbol => Symbol::read_from(reader).map(|s| Value::String(s.to_string())),
        AbiType::Bool => reader
            .read_u8()
            .map_err(ChainError::from)
            .map(|b| Value::Bool(b != 0)),
        AbiType::U8 => reader.read_u8().map_err(ChainError::from).map(Value::from),
        AbiType::U16 => reader.read_u16_le().map_err(ChainError::from).map(Value::from),
        AbiType::U32 => reader.read_u32_le().map_err(ChainError::from).map(Value::from),
        AbiType::U64 => reader.read_u64_le().map_err(ChainError::from).map(Value::from),
        AbiType::I64 => reader.read_i64_le().map_err(ChainError::from).map(Value::from),
        AbiType::Varuint32 => reader.read_varuint32().map_err(ChainError::from).map(Value::from),
        AbiType::Bytes => read_short_bytes(reader).map(|bytes| Value::String(hex::encode(bytes))),
        AbiType::Checksum256 => reader
            .read_bytes(32)
            .map_err(ChainError::from)
            .map(|bytes| Value::String(hex::encode(bytes))),
        AbiType::TimePointSec => {
            TimePointSec::read_from(reader).map(|t| Value::String(t.to_string()))
        }
    };

    // Running out of bytes mid-field means the data is truncated relative
    // to the layout, whatever the field type.
    result.map_err(|e| match e {
        ChainError::Primitives(PrimitivesError::UnexpectedEof) => ChainError::TruncatedData,
        other => other,
    })
}

/// Read a varuint32-length-prefixed byte run.
fn read_short_bytes(reader: &mut ByteReader) -> Result<Vec<u8>, ChainError> {
    let len = reader.read_varuint32()? as usize;
    Ok(reader.read_bytes(len)?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// The token transfer carried by the reference signed transaction.
    const TRANSFER_DATA_HEX: &str =
        "a026fd95de54ab49304460937af79c89c05701000000000004454f5300000000046d616d6f";

    fn codec() -> ActionCodec<StaticLayouts> {
        ActionCodec::new(StaticLayouts::eosio_token())
    }

    fn token() -> Name {
        "eosio.token".parse().unwrap()
    }

    fn transfer() -> Name {
        "transfer".parse().unwrap()
    }

    fn transfer_args() -> Value {
        json!({
            "from": "dappdropzone",
            "to": "laijiyong123",
            "quantity": "8.8000 EOS",
            "memo": "mamo"
        })
    }

    #[test]
    fn test_transfer_encode_vector() {
        let data = codec().encode(token(), transfer(), &transfer_args()).unwrap();
        assert_eq!(hex::encode(data), TRANSFER_DATA_HEX);
    }

    #[test]
    fn test_transfer_decode_vector() {
        let bytes = hex::decode(TRANSFER_DATA_HEX).unwrap();
        let args = codec().decode(token(), transfer(), &bytes).unwrap();
        assert_eq!(args, transfer_args());
    }

    #[test]
    fn test_roundtrip() {
        let c = codec();
        let data = c.encode(token(), transfer(), &transfer_args()).unwrap();
        let back = c.decode(token(), transfer(), &data).unwrap();
        assert_eq!(back, transfer_args());
    }

    #[test]
    fn test_unknown_layout() {
        let c = codec();
        let unknown: Name = "nosuchacct".parse().unwrap();
        assert!(matches!(
            c.encode(unknown, transfer(), &transfer_args()),
            Err(ChainError::UnknownActionLayout { .. })
        ));
        assert!(matches!(
            c.decode(token(), unknown, &[]),
            Err(ChainError::UnknownActionLayout { .. })
        ));
    }

    #[test]
    fn test_missing_and_mistyped_arguments() {
        let c = codec();

        let mut args = transfer_args();
        args.as_object_mut().unwrap().remove("memo");
        assert!(matches!(
            c.encode(token(), transfer(), &args),
            Err(ChainError::FieldTypeMismatch { ref field, .. }) if field == "memo"
        ));

        let mut args = transfer_args();
        args["quantity"] = json!(42);
        assert!(matches!(
            c.encode(token(), transfer(), &args),
            Err(ChainError::FieldTypeMismatch { ref field, .. }) if field == "quantity"
        ));

        let mut args = transfer_args();
        args["from"] = json!("NotAName");
        assert!(matches!(
            c.encode(token(), transfer(), &args),
            Err(ChainError::FieldTypeMismatch { ref field, .. }) if field == "from"
        ));

        assert!(c.encode(token(), transfer(), &json!("not an object")).is_err());
    }

    #[test]
    fn test_extra_arguments_are_ignored() {
        let mut args = transfer_args();
        args["surplus"] = json!("anything");
        let data = codec().encode(token(), transfer(), &args).unwrap();
        assert_eq!(hex::encode(data), TRANSFER_DATA_HEX);
    }

    #[test]
    fn test_truncated_and_trailing_data() {
        let c = codec();
        let bytes = hex::decode(TRANSFER_DATA_HEX).unwrap();

        assert!(matches!(
            c.decode(token(), transfer(), &bytes[..bytes.len() - 1]),
            Err(ChainError::TruncatedData)
        ));
        assert!(matches!(
            c.decode(token(), transfer(), &bytes[..10]),
            Err(ChainError::TruncatedData)
        ));

        let mut padded = bytes.clone();
        padded.extend_from_slice(&[0x00, 0x00]);
        assert!(matches!(
            c.decode(token(), transfer(), &padded),
            Err(ChainError::TrailingData(2))
        ));
    }

    #[test]
    fn test_integer_fields_accept_numbers_and_strings() {
        let mut table = StaticLayouts::new();
        let acct: Name = "testacct".parse().unwrap();
        let act: Name = "store".parse().unwrap();
        table.register(
            acct,
            act,
            ActionLayout::new(vec![
                AbiField::new("id", AbiType::U64),
                AbiField::new("count", AbiType::U16),
                AbiField::new("delta", AbiType::I64),
                AbiField::new("live", AbiType::Bool),
                AbiField::new("tag", AbiType::Varuint32),
            ]),
        );
        let c = ActionCodec::new(table);

        let data = c
            .encode(
                acct,
                act,
                &json!({
                    "id": "18446744073709551615",
                    "count": 300,
                    "delta": -88000,
                    "live": true,
                    "tag": 300
                }),
            )
            .unwrap();
        let back = c.decode(acct, act, &data).unwrap();
        assert_eq!(back["id"], json!(u64::MAX));
        assert_eq!(back["count"], json!(300));
        assert_eq!(back["delta"], json!(-88000));
        assert_eq!(back["live"], json!(true));
        assert_eq!(back["tag"], json!(300));

        // out-of-range value for the declared width
        assert!(matches!(
            c.encode(acct, act, &json!({
                "id": 1, "count": 70000, "delta": 0, "live": false, "tag": 0
            })),
            Err(ChainError::FieldTypeMismatch { ref field, .. }) if field == "count"
        ));
    }

    #[test]
    fn test_bytes_and_checksum_fields() {
        let mut table = StaticLayouts::new();
        let acct: Name = "testacct".parse().unwrap();
        let act: Name = "anchor".parse().unwrap();
        table.register(
            acct,
            act,
            ActionLayout::new(vec![
                AbiField::new("digest", AbiType::Checksum256),
                AbiField::new("payload", AbiType::Bytes),
                AbiField::new("at", AbiType::TimePointSec),
            ]),
        );
        let c = ActionCodec::new(table);

        let args = json!({
            "digest": "df2cd0fe9cbf585ad2a018a26bfa511145bd051ca13df545b4e71a5e40d25868",
            "payload": "deadbeef",
            "at": "2019-01-22T02:20:42.000"
        });
        let data = c.encode(acct, act, &args).unwrap();
        assert_eq!(data.len(), 32 + 1 + 4 + 4);
        assert_eq!(c.decode(acct, act, &data).unwrap(), args);

        // wrong checksum length
        assert!(c
            .encode(acct, act, &json!({
                "digest": "df2c", "payload": "", "at": "2019-01-22T02:20:42.000"
            }))
            .is_err());
    }

    #[test]
    fn test_cached_resolver_consults_inner_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        struct Counting<'a> {
            inner: &'a StaticLayouts,
            hits: &'a AtomicUsize,
        }
        impl LayoutResolver for Counting<'_> {
            fn resolve(&self, account: Name, name: Name) -> Result<ActionLayout, ChainError> {
                self.hits.fetch_add(1, Ordering::SeqCst);
                self.inner.resolve(account, name)
            }
        }

        let table = StaticLayouts::eosio_token();
        let hits = AtomicUsize::new(0);
        let cached = CachedResolver::new(Counting {
            inner: &table,
            hits: &hits,
        });

        for _ in 0..3 {
            cached.resolve(token(), transfer()).unwrap();
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        // Failures are not cached.
        let missing: Name = "nosuchacct".parse().unwrap();
        for _ in 0..2 {
            assert!(cached.resolve(missing, transfer()).is_err());
        }
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_layout_json_shape() {
        let layout = ActionLayout::new(vec![
            AbiField::new("from", AbiType::Name),
            AbiField::new("quantity", AbiType::Asset),
            AbiField::new("when", AbiType::TimePointSec),
        ]);
        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json["fields"][0]["type"], "name");
        assert_eq!(json["fields"][2]["type"], "time_point_sec");

        let back: ActionLayout = serde_json::from_value(json).unwrap();
        assert_eq!(back, layout);
    }

    #[test]
    fn test_encode_action_helper() {
        let c = codec();
        let structured = crate::Action::with_args(
            token(),
            transfer(),
            vec![crate::PermissionLevel::new(
                "laijiyong123".parse().unwrap(),
                "active".parse().unwrap(),
            )],
            transfer_args(),
        );

        let encoded = c.encode_action(structured).unwrap();
        assert_eq!(hex::encode(encoded.data.as_raw().unwrap()), TRANSFER_DATA_HEX);

        // raw data passes through untouched
        let again = c.encode_action(encoded.clone()).unwrap();
        assert_eq!(again, encoded);
    }
}
