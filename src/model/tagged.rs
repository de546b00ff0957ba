//! Two-phase decoding of type-tagged JSON objects.
//!
//! Every polymorphic shape in the API looks like
//! `{"type": "<kind>", "<kind>": { ...payload... }, ...common fields}`.
//! Decoding reads the discriminant first, then hands only the payload under
//! that key to the kind's own decoder. Unknown kinds never fail: each union
//! has an `Unsupported` variant that keeps the tag and the raw payload.

use serde::de::DeserializeOwned;
use serde::ser::{Error as _, SerializeMap};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A closed set of kinds, discriminated by a tag field.
pub(crate) trait TaggedUnion: Sized {
    /// Build the variant for `tag` from the payload found under that key.
    ///
    /// A missing discriminant is passed as the empty string.
    fn decode(tag: &str, payload: Option<Value>) -> Result<Self, serde_json::Error>;

    /// The discriminant this variant is written with.
    fn tag(&self) -> &str;

    /// The value written under the discriminant's key.
    fn encode_payload(&self) -> Result<Value, serde_json::Error>;
}

/// Decode a struct-shaped payload; an absent payload decodes as `{}`.
pub(crate) fn object_payload<T: DeserializeOwned>(
    payload: Option<Value>,
) -> Result<T, serde_json::Error> {
    serde_json::from_value(payload.unwrap_or_else(|| Value::Object(Map::new())))
}

/// Decode a scalar- or list-shaped payload; an absent payload decodes as `null`.
pub(crate) fn value_payload<T: DeserializeOwned>(
    payload: Option<Value>,
) -> Result<T, serde_json::Error> {
    serde_json::from_value(payload.unwrap_or(Value::Null))
}

/// An empty `{}` payload, for kinds that carry no configuration.
pub(crate) fn empty_payload() -> Value {
    Value::Object(Map::new())
}

/// Object fields left over after the common fields are taken, plus the tag.
#[derive(Debug, Deserialize)]
pub(crate) struct Remainder {
    #[serde(rename = "type", default)]
    pub tag: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Remainder {
    pub fn decode<U: TaggedUnion>(mut self) -> Result<U, serde_json::Error> {
        let tag = self.tag.unwrap_or_default();
        let payload = self.fields.remove(&tag);
        U::decode(&tag, payload)
    }
}

/// Deserialize a union whose JSON object holds nothing but the tag and payload.
pub(crate) fn deserialize_union<'de, U, D>(deserializer: D) -> Result<U, D::Error>
where
    U: TaggedUnion,
    D: Deserializer<'de>,
{
    Remainder::deserialize(deserializer)?
        .decode()
        .map_err(serde::de::Error::custom)
}

/// Write `type` and the payload under its key, after any `extra` fields.
pub(crate) fn serialize_union<U, S>(
    union: &U,
    extra: &[(&str, Value)],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    U: TaggedUnion,
    S: Serializer,
{
    let payload = union.encode_payload().map_err(S::Error::custom)?;
    let mut map = serializer.serialize_map(Some(extra.len() + 2))?;
    for (key, value) in extra {
        map.serialize_entry(key, value)?;
    }
    map.serialize_entry("type", union.tag())?;
    map.serialize_entry(union.tag(), &payload)?;
    map.end()
}

/// Serialize a payload value, for use in `encode_payload` bodies.
pub(crate) fn to_payload<T: Serialize + ?Sized>(value: &T) -> Result<Value, serde_json::Error> {
    serde_json::to_value(value)
}
