use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::models::device::DeviceId;

/// A JSON value the server encodes either as a single item or as a list.
///
/// Prime Infrastructure returns a bare object when a collection holds exactly
/// one element and an array otherwise. Decode through this type and call
/// [`OneOrMany::into_vec`] so the rest of the crate only ever sees a `Vec`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A list of items, possibly of length one.
    Many(Vec<T>),
    /// A single item sent without the surrounding list.
    One(T),
}

impl<T> OneOrMany<T> {
    /// Collapses both encodings into a vector.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        value.into_vec()
    }
}

/// Deserializes a scalar-or-list field straight into a `Vec`.
pub(crate) fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    OneOrMany::<T>::deserialize(deserializer).map(OneOrMany::into_vec)
}

/// Accepts `"@count"` as a string-encoded integer or as a bare number.
fn deserialize_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(u64),
        Text(String),
    }

    match Count::deserialize(deserializer)? {
        Count::Number(n) => Ok(n),
        Count::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid @count value: {text:?}"))),
    }
}

/// Top-level wrapper of every `data/` query response.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryEnvelope {
    #[serde(rename = "queryResponse")]
    pub query_response: QueryResponse,
}

/// The body of a device query: the match count and the matching identifiers.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    /// Number of entities matching the query.
    #[serde(rename = "@count", deserialize_with = "deserialize_count")]
    pub count: u64,

    /// Identifiers in server order. Absent when the count is zero.
    #[serde(rename = "entityId", default, deserialize_with = "one_or_many")]
    pub entity_ids: Vec<EntityId>,
}

impl QueryResponse {
    /// Identifiers of the matching devices, empty when the count is zero.
    pub fn into_device_ids(self) -> Vec<DeviceId> {
        if self.count == 0 {
            return Vec::new();
        }
        self.entity_ids.into_iter().map(|entity| entity.id).collect()
    }
}

/// One `entityId` entry of a query response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntityId {
    /// The device identifier.
    #[serde(rename = "$")]
    pub id: DeviceId,

    /// Detail URL for the entity, when the server includes it.
    #[serde(rename = "@url", default)]
    pub url: Option<String>,
}
