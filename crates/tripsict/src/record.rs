//! Entity identity and the [`Record`] trait shared by trips and flights.

use std::cmp::Ordering;
use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

/// Opaque identifier of an entity within its sequence.
///
/// New ids are random v4 UUIDs. Ids read back from storage are kept as-is,
/// so sequences written by older clients (which used arbitrary strings) load
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generate a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A record kept in an entity sequence.
///
/// Implementors describe how a draft (a candidate record with every field
/// optional, as submitted by a form) becomes a new record, how it is merged
/// into an existing one, and how records are ordered within the sequence.
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned {
    /// Candidate record type submitted for create and update.
    type Draft: Clone + fmt::Debug + Default;

    /// Human-readable kind, used in logs and errors.
    const KIND: &'static str;

    /// Key under which the whole sequence is persisted.
    const STORAGE_KEY: &'static str;

    /// The record's id.
    fn id(&self) -> &EntityId;

    /// Build a new record with `id` from a draft.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingField`] if the draft lacks a required field.
    fn from_draft(id: EntityId, draft: Self::Draft) -> Result<Self>;

    /// Overwrite the fields present in `draft`, leaving the rest and the id untouched.
    fn merge(&mut self, draft: Self::Draft);

    /// Sequence ordering applied after every create and update.
    ///
    /// The default keeps insertion order.
    fn order(&self, _other: &Self) -> Ordering {
        Ordering::Equal
    }
}
