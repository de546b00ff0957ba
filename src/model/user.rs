use super::tagged::{self, Remainder, TaggedUnion};
use crate::types::UserId;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// A workspace member or integration.
///
/// References embedded in other objects (`created_by`, people properties)
/// often carry only `object` and `id`; those decode with an
/// [`UserKind::Unsupported`] kind whose tag is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub kind: UserKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserKind {
    Person(Person),
    Bot(Bot),
    Unsupported {
        user_type: String,
        payload: Option<Value>,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Bot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Value>,
}

impl User {
    /// A bare reference, as used when assigning people in property updates.
    pub fn reference(id: UserId) -> Self {
        Self {
            id,
            name: None,
            avatar_url: None,
            kind: UserKind::Unsupported {
                user_type: String::new(),
                payload: None,
            },
        }
    }

    pub fn user_type(&self) -> &str {
        self.kind.tag()
    }

    pub fn email(&self) -> Option<&str> {
        match &self.kind {
            UserKind::Person(person) => person.email.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, self.email()) {
            (Some(name), _) => write!(f, "{}", name),
            (None, Some(email)) => write!(f, "{}", email),
            (None, None) => write!(f, "User {}", self.id),
        }
    }
}

impl TaggedUnion for UserKind {
    fn decode(tag: &str, payload: Option<Value>) -> Result<Self, serde_json::Error> {
        Ok(match tag {
            "person" => Self::Person(tagged::object_payload(payload)?),
            "bot" => Self::Bot(tagged::object_payload(payload)?),
            _ => Self::Unsupported {
                user_type: tag.to_string(),
                payload,
            },
        })
    }

    fn tag(&self) -> &str {
        match self {
            Self::Person(_) => "person",
            Self::Bot(_) => "bot",
            Self::Unsupported { user_type, .. } => user_type,
        }
    }

    fn encode_payload(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::Person(person) => tagged::to_payload(person),
            Self::Bot(bot) => tagged::to_payload(bot),
            Self::Unsupported { payload, .. } => {
                Ok(payload.clone().unwrap_or_else(tagged::empty_payload))
            }
        }
    }
}

#[derive(Deserialize)]
struct UserEnvelope {
    id: UserId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
    #[serde(rename = "type", default)]
    tag: Option<String>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let envelope = UserEnvelope::deserialize(deserializer)?;
        let kind: UserKind = Remainder {
            tag: envelope.tag,
            fields: envelope.fields,
        }
        .decode()
        .map_err(serde::de::Error::custom)?;

        Ok(Self {
            id: envelope.id,
            name: envelope.name,
            avatar_url: envelope.avatar_url,
            kind,
        })
    }
}

impl Serialize for User {
    /// Requests only ever reference users, so only `object` and `id` are written.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("object", "user")?;
        map.serialize_entry("id", &self.id)?;
        map.end()
    }
}
