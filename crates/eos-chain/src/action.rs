//! Contract actions and authorization levels.
//!
//! An action names a contract account, a method, the authorizing
//! permissions, and the method arguments. Arguments travel either as
//! pre-encoded bytes (hex in JSON) or as a structured JSON object waiting
//! to be encoded against the contract's layout; only the byte form can be
//! packed into a transaction.

use serde::{Deserialize, Serialize};

use eos_primitives::util::{ByteReader, ByteWriter};

use crate::name::Name;
use crate::ChainError;

/// Serde adapter rendering byte vectors as hex strings.
pub(crate) mod hex_bytes {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s).map_err(D::Error::custom)
    }
}

/// An actor/permission pair authorizing an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionLevel {
    /// The authorizing account.
    pub actor: Name,
    /// The permission level of that account (e.g. "active").
    pub permission: Name,
}

impl PermissionLevel {
    /// Create a permission level from actor and permission names.
    ///
    /// # Arguments
    /// * `actor` - The authorizing account.
    /// * `permission` - The permission name.
    ///
    /// # Returns
    /// A new `PermissionLevel`.
    pub fn new(actor: Name, permission: Name) -> Self {
        PermissionLevel { actor, permission }
    }

    /// Serialize to the wire (two u64 names).
    pub fn write_to(&self, writer: &mut ByteWriter) {
        self.actor.write_to(writer);
        self.permission.write_to(writer);
    }

    /// Deserialize from the wire.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, ChainError> {
        Ok(PermissionLevel {
            actor: Name::read_from(reader)?,
            permission: Name::read_from(reader)?,
        })
    }
}

/// Action arguments: raw wire bytes or a structured object awaiting
/// encoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionData {
    /// Pre-encoded argument bytes, shown as hex in JSON.
    Raw(#[serde(with = "hex_bytes")] Vec<u8>),
    /// Structured arguments to be encoded against the contract layout.
    Structured(serde_json::Value),
}

impl ActionData {
    /// Access the raw bytes, if already encoded.
    ///
    /// # Returns
    /// `Some(&[u8])` for the byte form, `None` for structured data.
    pub fn as_raw(&self) -> Option<&[u8]> {
        match self {
            ActionData::Raw(bytes) => Some(bytes),
            ActionData::Structured(_) => None,
        }
    }
}

/// A single contract invocation within a transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// The contract account.
    pub account: Name,
    /// The method name on that contract.
    pub name: Name,
    /// Ordered list of authorizations.
    pub authorization: Vec<PermissionLevel>,
    /// The method arguments.
    pub data: ActionData,
}

impl Action {
    /// Create an action with pre-encoded argument bytes.
    ///
    /// # Arguments
    /// * `account` - The contract account.
    /// * `name` - The method name.
    /// * `authorization` - The authorizing permissions, in order.
    /// * `data` - The encoded argument bytes.
    ///
    /// # Returns
    /// A new `Action` in the packable byte form.
    pub fn new(
        account: Name,
        name: Name,
        authorization: Vec<PermissionLevel>,
        data: Vec<u8>,
    ) -> Self {
        Action {
            account,
            name,
            authorization,
            data: ActionData::Raw(data),
        }
    }

    /// Create an action with structured arguments.
    ///
    /// The arguments must be encoded through an
    /// [`ActionCodec`](crate::abi::ActionCodec) before the action can be
    /// packed into a transaction.
    ///
    /// # Arguments
    /// * `account` - The contract account.
    /// * `name` - The method name.
    /// * `authorization` - The authorizing permissions, in order.
    /// * `args` - The structured argument object.
    ///
    /// # Returns
    /// A new `Action` in the structured form.
    pub fn with_args(
        account: Name,
        name: Name,
        authorization: Vec<PermissionLevel>,
        args: serde_json::Value,
    ) -> Self {
        Action {
            account,
            name,
            authorization,
            data: ActionData::Structured(args),
        }
    }

    /// Serialize the action to the wire.
    ///
    /// # Arguments
    /// * `writer` - The destination writer.
    ///
    /// # Returns
    /// `Ok(())`, or `UnencodedActionData` if the data is still structured.
    pub fn write_to(&self, writer: &mut ByteWriter) -> Result<(), ChainError> {
        let data = self.data.as_raw().ok_or_else(|| {
            ChainError::UnencodedActionData(format!("{}::{}", self.account, self.name))
        })?;

        self.account.write_to(writer);
        self.name.write_to(writer);
        writer.write_varuint32(self.authorization.len() as u32);
        for auth in &self.authorization {
            auth.write_to(writer);
        }
        writer.write_varuint32(data.len() as u32);
        writer.write_bytes(data);
        Ok(())
    }

    /// Deserialize an action from the wire.
    ///
    /// # Arguments
    /// * `reader` - The source reader.
    ///
    /// # Returns
    /// `Ok(Action)` in the byte form, or an error on truncation.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, ChainError> {
        let account = Name::read_from(reader)?;
        let name = Name::read_from(reader)?;

        let auth_count = reader.read_varuint32()?;
        let mut authorization = Vec::with_capacity(auth_count as usize);
        for _ in 0..auth_count {
            authorization.push(PermissionLevel::read_from(reader)?);
        }

        let data_len = reader.read_varuint32()? as usize;
        let data = reader.read_bytes(data_len)?.to_vec();

        Ok(Action {
            account,
            name,
            authorization,
            data: ActionData::Raw(data),
        })
    }
}
