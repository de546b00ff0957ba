use super::property_value::SelectOption;
use super::tagged::{self, Remainder, TaggedUnion};
use crate::types::DatabaseId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A database column: its ID, name and type-specific configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySchema {
    pub id: String,
    pub name: String,
    pub kind: PropertySchemaKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertySchemaKind {
    Title,
    RichText,
    Number(NumberConfig),
    Select(SelectConfig),
    MultiSelect(SelectConfig),
    Date,
    People,
    Files,
    Checkbox,
    Url,
    Email,
    PhoneNumber,
    Formula(FormulaConfig),
    Relation(RelationConfig),
    Rollup(RollupConfig),
    CreatedTime,
    CreatedBy,
    LastEditedTime,
    LastEditedBy,
    Unsupported {
        property_type: String,
        payload: Option<Value>,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NumberConfig {
    /// Display format such as `number`, `percent` or `dollar`.
    #[serde(default)]
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectConfig {
    #[serde(default)]
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormulaConfig {
    #[serde(default)]
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationConfig {
    pub database_id: DatabaseId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_property_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_property_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RollupConfig {
    #[serde(default)]
    pub relation_property_name: String,
    #[serde(default)]
    pub relation_property_id: String,
    #[serde(default)]
    pub rollup_property_name: String,
    #[serde(default)]
    pub rollup_property_id: String,
    #[serde(default)]
    pub function: String,
}

impl PropertySchema {
    pub fn property_type(&self) -> &str {
        self.kind.tag()
    }
}

impl TaggedUnion for PropertySchemaKind {
    fn decode(tag: &str, payload: Option<Value>) -> Result<Self, serde_json::Error> {
        use tagged::object_payload as object;
        Ok(match tag {
            "title" => Self::Title,
            "rich_text" => Self::RichText,
            "number" => Self::Number(object(payload)?),
            "select" => Self::Select(object(payload)?),
            "multi_select" => Self::MultiSelect(object(payload)?),
            "date" => Self::Date,
            "people" => Self::People,
            "files" => Self::Files,
            "checkbox" => Self::Checkbox,
            "url" => Self::Url,
            "email" => Self::Email,
            "phone_number" => Self::PhoneNumber,
            "formula" => Self::Formula(object(payload)?),
            "relation" => Self::Relation(object(payload)?),
            "rollup" => Self::Rollup(object(payload)?),
            "created_time" => Self::CreatedTime,
            "created_by" => Self::CreatedBy,
            "last_edited_time" => Self::LastEditedTime,
            "last_edited_by" => Self::LastEditedBy,
            _ => Self::Unsupported {
                property_type: tag.to_string(),
                payload,
            },
        })
    }

    fn tag(&self) -> &str {
        match self {
            Self::Title => "title",
            Self::RichText => "rich_text",
            Self::Number(_) => "number",
            Self::Select(_) => "select",
            Self::MultiSelect(_) => "multi_select",
            Self::Date => "date",
            Self::People => "people",
            Self::Files => "files",
            Self::Checkbox => "checkbox",
            Self::Url => "url",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
            Self::Formula(_) => "formula",
            Self::Relation(_) => "relation",
            Self::Rollup(_) => "rollup",
            Self::CreatedTime => "created_time",
            Self::CreatedBy => "created_by",
            Self::LastEditedTime => "last_edited_time",
            Self::LastEditedBy => "last_edited_by",
            Self::Unsupported { property_type, .. } => property_type,
        }
    }

    fn encode_payload(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::Number(config) => tagged::to_payload(config),
            Self::Select(config) | Self::MultiSelect(config) => tagged::to_payload(config),
            Self::Formula(config) => tagged::to_payload(config),
            Self::Relation(config) => tagged::to_payload(config),
            Self::Rollup(config) => tagged::to_payload(config),
            Self::Unsupported { payload, .. } => {
                Ok(payload.clone().unwrap_or_else(tagged::empty_payload))
            }
            _ => Ok(tagged::empty_payload()),
        }
    }
}

#[derive(Deserialize)]
struct SchemaEnvelope {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    tag: Option<String>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl<'de> Deserialize<'de> for PropertySchema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let envelope = SchemaEnvelope::deserialize(deserializer)?;
        let kind: PropertySchemaKind = Remainder {
            tag: envelope.tag,
            fields: envelope.fields,
        }
        .decode()
        .map_err(serde::de::Error::custom)?;
        Ok(Self {
            id: envelope.id,
            name: envelope.name,
            kind,
        })
    }
}

impl Serialize for PropertySchema {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let extra = [
            ("id", Value::String(self.id.clone())),
            ("name", Value::String(self.name.clone())),
        ];
        tagged::serialize_union(&self.kind, &extra, serializer)
    }
}
