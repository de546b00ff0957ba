use super::property_value::{PropertyValue, PropertyValueKind};
use super::rich_text::{self, RichText};
use super::tagged::{self, TaggedUnion};
use crate::types::{DatabaseId, NotionTime, PageId};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A page as returned by the pages, query and search endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: PageId,
    pub created_time: NotionTime,
    pub last_edited_time: NotionTime,
    pub archived: bool,
    pub url: Option<String>,
    pub parent: Parent,
    pub properties: PageProperties,
}

/// The container a page lives in. Exactly one kind is ever populated.
#[derive(Debug, Clone, PartialEq)]
pub enum Parent {
    Page(PageId),
    Database(DatabaseId),
    Workspace,
    Unsupported {
        parent_type: String,
        payload: Option<Value>,
    },
}

/// Property bag of a page; its shape follows the parent kind.
#[derive(Debug, Clone, PartialEq)]
pub enum PageProperties {
    /// Pages under another page (or the workspace) only have a title.
    Page { title: Vec<RichText> },
    /// Pages in a database hold one value per schema property, keyed by name.
    Database(IndexMap<String, PropertyValue>),
}

impl Parent {
    pub fn page_id(&self) -> Option<&PageId> {
        match self {
            Self::Page(id) => Some(id),
            _ => None,
        }
    }

    pub fn database_id(&self) -> Option<&DatabaseId> {
        match self {
            Self::Database(id) => Some(id),
            _ => None,
        }
    }
}

impl TaggedUnion for Parent {
    fn decode(tag: &str, payload: Option<Value>) -> Result<Self, serde_json::Error> {
        Ok(match tag {
            "page_id" => Self::Page(tagged::value_payload(payload)?),
            "database_id" => Self::Database(tagged::value_payload(payload)?),
            "workspace" => Self::Workspace,
            _ => Self::Unsupported {
                parent_type: tag.to_string(),
                payload,
            },
        })
    }

    fn tag(&self) -> &str {
        match self {
            Self::Page(_) => "page_id",
            Self::Database(_) => "database_id",
            Self::Workspace => "workspace",
            Self::Unsupported { parent_type, .. } => parent_type,
        }
    }

    fn encode_payload(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::Page(id) => tagged::to_payload(id),
            Self::Database(id) => tagged::to_payload(id),
            Self::Workspace => Ok(Value::Bool(true)),
            Self::Unsupported { payload, .. } => Ok(payload.clone().unwrap_or(Value::Null)),
        }
    }
}

impl<'de> Deserialize<'de> for Parent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        tagged::deserialize_union(deserializer)
    }
}

impl Serialize for Parent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        tagged::serialize_union(self, &[], serializer)
    }
}

impl PageProperties {
    fn from_values(parent: &Parent, mut values: IndexMap<String, PropertyValue>) -> Self {
        if matches!(parent, Parent::Database(_)) {
            return Self::Database(values);
        }
        let title = match values.shift_remove("title").map(|value| value.kind) {
            Some(PropertyValueKind::Title(title)) => title,
            _ => Vec::new(),
        };
        Self::Page { title }
    }

    /// The title spans, wherever the parent kind keeps them.
    pub fn title(&self) -> &[RichText] {
        match self {
            Self::Page { title } => title,
            Self::Database(values) => values
                .values()
                .find_map(|value| match &value.kind {
                    PropertyValueKind::Title(title) => Some(title.as_slice()),
                    _ => None,
                })
                .unwrap_or(&[]),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        match self {
            Self::Page { .. } => None,
            Self::Database(values) => values.get(name),
        }
    }
}

impl Page {
    /// Plain text of the page title.
    pub fn title(&self) -> String {
        rich_text::to_plain_text(self.properties.title())
    }
}

#[derive(Deserialize)]
struct PageEnvelope {
    id: PageId,
    #[serde(default)]
    created_time: NotionTime,
    #[serde(default)]
    last_edited_time: NotionTime,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    url: Option<String>,
    parent: Parent,
    #[serde(default)]
    properties: IndexMap<String, PropertyValue>,
}

impl<'de> Deserialize<'de> for Page {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let envelope = PageEnvelope::deserialize(deserializer)?;
        let properties = PageProperties::from_values(&envelope.parent, envelope.properties);
        Ok(Self {
            id: envelope.id,
            created_time: envelope.created_time,
            last_edited_time: envelope.last_edited_time,
            archived: envelope.archived,
            url: envelope.url,
            parent: envelope.parent,
            properties,
        })
    }
}
