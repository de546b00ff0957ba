use super::rich_text::RichText;
use super::tagged::{self, Remainder, TaggedUnion};
use super::user::User;
use crate::types::{Color, NotionTime, PageId};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A value held by a page for one of its database's properties.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue {
    /// Property ID; absent on values built client-side.
    pub id: Option<String>,
    pub kind: PropertyValueKind,
}

/// Property values, one per `type` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValueKind {
    Title(Vec<RichText>),
    RichText(Vec<RichText>),
    Number(Option<f64>),
    Select(Option<SelectOption>),
    MultiSelect(Vec<SelectOption>),
    Date(Option<DateRange>),
    Formula(FormulaValue),
    Relation(Vec<PageReference>),
    Rollup(RollupValue),
    People(Vec<User>),
    Files(Vec<FileReference>),
    Checkbox(bool),
    Url(Option<String>),
    Email(Option<String>),
    PhoneNumber(Option<String>),
    CreatedTime(NotionTime),
    CreatedBy(User),
    LastEditedTime(NotionTime),
    LastEditedBy(User),
    Unsupported {
        property_type: String,
        payload: Option<Value>,
    },
}

/// Select option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "is_default_color")]
    pub color: Color,
}

fn is_default_color(color: &Color) -> bool {
    *color == Color::Default
}

impl SelectOption {
    /// Refer to an option by name, as property updates do.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            color: Color::Default,
        }
    }
}

/// Date property payload: a start, optionally an end.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: NotionTime,
    #[serde(default)]
    pub end: NotionTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageReference {
    pub id: PageId,
}

/// Computed value of a formula property.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaValue {
    String(Option<String>),
    Number(Option<f64>),
    Boolean(Option<bool>),
    Date(Option<DateRange>),
    Unsupported {
        formula_type: String,
        payload: Option<Value>,
    },
}

/// Aggregated value of a rollup property.
#[derive(Debug, Clone, PartialEq)]
pub enum RollupValue {
    Number(Option<f64>),
    Date(Option<DateRange>),
    /// Items are property values without an `id`.
    Array(Vec<PropertyValue>),
    Unsupported {
        rollup_type: String,
        payload: Option<Value>,
    },
}

/// An entry of a files property.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReference {
    pub name: Option<String>,
    pub kind: FileKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileKind {
    /// Hosted by Notion; the URL expires.
    File { url: String, expiry_time: NotionTime },
    External { url: String },
    Unsupported {
        file_type: String,
        payload: Option<Value>,
    },
}

impl PropertyValue {
    pub fn new(kind: PropertyValueKind) -> Self {
        Self { id: None, kind }
    }

    pub fn title(text: Vec<RichText>) -> Self {
        Self::new(PropertyValueKind::Title(text))
    }

    pub fn rich_text(text: Vec<RichText>) -> Self {
        Self::new(PropertyValueKind::RichText(text))
    }

    pub fn number(value: f64) -> Self {
        Self::new(PropertyValueKind::Number(Some(value)))
    }

    pub fn select(name: impl Into<String>) -> Self {
        Self::new(PropertyValueKind::Select(Some(SelectOption::named(name))))
    }

    pub fn checkbox(checked: bool) -> Self {
        Self::new(PropertyValueKind::Checkbox(checked))
    }

    pub fn date(start: NotionTime) -> Self {
        Self::new(PropertyValueKind::Date(Some(DateRange {
            start,
            end: NotionTime::unset(),
        })))
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::new(PropertyValueKind::Url(Some(url.into())))
    }

    pub fn property_type(&self) -> &str {
        self.kind.tag()
    }
}

impl TaggedUnion for PropertyValueKind {
    fn decode(tag: &str, payload: Option<Value>) -> Result<Self, serde_json::Error> {
        use tagged::{object_payload as object, value_payload as value};
        Ok(match tag {
            "title" => Self::Title(value::<Option<_>>(payload)?.unwrap_or_default()),
            "rich_text" => Self::RichText(value::<Option<_>>(payload)?.unwrap_or_default()),
            "number" => Self::Number(value(payload)?),
            "select" => Self::Select(value(payload)?),
            "multi_select" => Self::MultiSelect(value::<Option<_>>(payload)?.unwrap_or_default()),
            "date" => Self::Date(value(payload)?),
            "formula" => Self::Formula(object(payload)?),
            "relation" => Self::Relation(value::<Option<_>>(payload)?.unwrap_or_default()),
            "rollup" => Self::Rollup(object(payload)?),
            "people" => Self::People(value::<Option<_>>(payload)?.unwrap_or_default()),
            "files" => Self::Files(value::<Option<_>>(payload)?.unwrap_or_default()),
            "checkbox" => Self::Checkbox(value::<Option<_>>(payload)?.unwrap_or_default()),
            "url" => Self::Url(value(payload)?),
            "email" => Self::Email(value(payload)?),
            "phone_number" => Self::PhoneNumber(value(payload)?),
            "created_time" => Self::CreatedTime(value(payload)?),
            "created_by" => Self::CreatedBy(object(payload)?),
            "last_edited_time" => Self::LastEditedTime(value(payload)?),
            "last_edited_by" => Self::LastEditedBy(object(payload)?),
            _ => Self::Unsupported {
                property_type: tag.to_string(),
                payload,
            },
        })
    }

    fn tag(&self) -> &str {
        match self {
            Self::Title(_) => "title",
            Self::RichText(_) => "rich_text",
            Self::Number(_) => "number",
            Self::Select(_) => "select",
            Self::MultiSelect(_) => "multi_select",
            Self::Date(_) => "date",
            Self::Formula(_) => "formula",
            Self::Relation(_) => "relation",
            Self::Rollup(_) => "rollup",
            Self::People(_) => "people",
            Self::Files(_) => "files",
            Self::Checkbox(_) => "checkbox",
            Self::Url(_) => "url",
            Self::Email(_) => "email",
            Self::PhoneNumber(_) => "phone_number",
            Self::CreatedTime(_) => "created_time",
            Self::CreatedBy(_) => "created_by",
            Self::LastEditedTime(_) => "last_edited_time",
            Self::LastEditedBy(_) => "last_edited_by",
            Self::Unsupported { property_type, .. } => property_type,
        }
    }

    fn encode_payload(&self) -> Result<Value, serde_json::Error> {
        use tagged::to_payload;
        match self {
            Self::Title(v) | Self::RichText(v) => to_payload(v),
            Self::Number(v) => to_payload(v),
            Self::Select(v) => to_payload(v),
            Self::MultiSelect(v) => to_payload(v),
            Self::Date(v) => to_payload(v),
            Self::Formula(v) => to_payload(v),
            Self::Relation(v) => to_payload(v),
            Self::Rollup(v) => to_payload(v),
            Self::People(v) => to_payload(v),
            Self::Files(v) => to_payload(v),
            Self::Checkbox(v) => to_payload(v),
            Self::Url(v) | Self::Email(v) | Self::PhoneNumber(v) => to_payload(v),
            Self::CreatedTime(v) | Self::LastEditedTime(v) => to_payload(v),
            Self::CreatedBy(v) | Self::LastEditedBy(v) => to_payload(v),
            Self::Unsupported { payload, .. } => Ok(payload.clone().unwrap_or(Value::Null)),
        }
    }
}

#[derive(Deserialize)]
struct PropertyValueEnvelope {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type", default)]
    tag: Option<String>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let envelope = PropertyValueEnvelope::deserialize(deserializer)?;
        let kind: PropertyValueKind = Remainder {
            tag: envelope.tag,
            fields: envelope.fields,
        }
        .decode()
        .map_err(serde::de::Error::custom)?;
        Ok(Self {
            id: envelope.id,
            kind,
        })
    }
}

impl Serialize for PropertyValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        tagged::serialize_union(&self.kind, &[], serializer)
    }
}

impl TaggedUnion for FormulaValue {
    fn decode(tag: &str, payload: Option<Value>) -> Result<Self, serde_json::Error> {
        use tagged::value_payload as value;
        Ok(match tag {
            "string" => Self::String(value(payload)?),
            "number" => Self::Number(value(payload)?),
            "boolean" => Self::Boolean(value(payload)?),
            "date" => Self::Date(value(payload)?),
            _ => Self::Unsupported {
                formula_type: tag.to_string(),
                payload,
            },
        })
    }

    fn tag(&self) -> &str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Date(_) => "date",
            Self::Unsupported { formula_type, .. } => formula_type,
        }
    }

    fn encode_payload(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::String(v) => tagged::to_payload(v),
            Self::Number(v) => tagged::to_payload(v),
            Self::Boolean(v) => tagged::to_payload(v),
            Self::Date(v) => tagged::to_payload(v),
            Self::Unsupported { payload, .. } => Ok(payload.clone().unwrap_or(Value::Null)),
        }
    }
}

impl TaggedUnion for RollupValue {
    fn decode(tag: &str, payload: Option<Value>) -> Result<Self, serde_json::Error> {
        use tagged::value_payload as value;
        Ok(match tag {
            "number" => Self::Number(value(payload)?),
            "date" => Self::Date(value(payload)?),
            "array" => Self::Array(value::<Option<_>>(payload)?.unwrap_or_default()),
            _ => Self::Unsupported {
                rollup_type: tag.to_string(),
                payload,
            },
        })
    }

    fn tag(&self) -> &str {
        match self {
            Self::Number(_) => "number",
            Self::Date(_) => "date",
            Self::Array(_) => "array",
            Self::Unsupported { rollup_type, .. } => rollup_type,
        }
    }

    fn encode_payload(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::Number(v) => tagged::to_payload(v),
            Self::Date(v) => tagged::to_payload(v),
            Self::Array(v) => tagged::to_payload(v),
            Self::Unsupported { payload, .. } => Ok(payload.clone().unwrap_or(Value::Null)),
        }
    }
}

#[derive(Deserialize)]
struct ExternalOrHostedFile {
    url: String,
    #[serde(default)]
    expiry_time: NotionTime,
}

impl TaggedUnion for FileKind {
    fn decode(tag: &str, payload: Option<Value>) -> Result<Self, serde_json::Error> {
        Ok(match tag {
            "file" => {
                let file: ExternalOrHostedFile = tagged::object_payload(payload)?;
                Self::File {
                    url: file.url,
                    expiry_time: file.expiry_time,
                }
            }
            "external" => {
                let file: ExternalOrHostedFile = tagged::object_payload(payload)?;
                Self::External { url: file.url }
            }
            _ => Self::Unsupported {
                file_type: tag.to_string(),
                payload,
            },
        })
    }

    fn tag(&self) -> &str {
        match self {
            Self::File { .. } => "file",
            Self::External { .. } => "external",
            Self::Unsupported { file_type, .. } => file_type,
        }
    }

    fn encode_payload(&self) -> Result<Value, serde_json::Error> {
        Ok(match self {
            Self::File { url, expiry_time } => {
                serde_json::json!({ "url": url, "expiry_time": expiry_time })
            }
            Self::External { url } => serde_json::json!({ "url": url }),
            Self::Unsupported { payload, .. } => {
                payload.clone().unwrap_or_else(tagged::empty_payload)
            }
        })
    }
}

macro_rules! bare_union_serde {
    ($($ty:ty),*) => {
        $(
            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    tagged::deserialize_union(deserializer)
                }
            }

            impl Serialize for $ty {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: Serializer,
                {
                    tagged::serialize_union(self, &[], serializer)
                }
            }
        )*
    };
}

bare_union_serde!(FormulaValue, RollupValue);

#[derive(Deserialize)]
struct FileEnvelope {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    tag: Option<String>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl<'de> Deserialize<'de> for FileReference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let envelope = FileEnvelope::deserialize(deserializer)?;
        let kind: FileKind = Remainder {
            tag: envelope.tag,
            fields: envelope.fields,
        }
        .decode()
        .map_err(serde::de::Error::custom)?;
        Ok(Self {
            name: envelope.name,
            kind,
        })
    }
}

impl Serialize for FileReference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let extra: Vec<(&str, Value)> = self
            .name
            .iter()
            .map(|name| ("name", Value::String(name.clone())))
            .collect();
        tagged::serialize_union(&self.kind, &extra, serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rich_text::to_plain_text;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decode_scalar_kinds() {
        let v: PropertyValue =
            serde_json::from_value(json!({"id": "a%3Ab", "type": "number", "number": 5})).unwrap();
        assert_eq!(v.id.as_deref(), Some("a%3Ab"));
        assert_eq!(v.kind, PropertyValueKind::Number(Some(5.0)));

        let v: PropertyValue =
            serde_json::from_value(json!({"id": "x", "type": "url", "url": null})).unwrap();
        assert_eq!(v.kind, PropertyValueKind::Url(None));

        let v: PropertyValue =
            serde_json::from_value(json!({"id": "c", "type": "checkbox", "checkbox": true})).unwrap();
        assert_eq!(v.kind, PropertyValueKind::Checkbox(true));
    }

    #[test]
    fn test_decode_select_and_date() {
        let v: PropertyValue = serde_json::from_value(json!({
            "id": "s",
            "type": "select",
            "select": {"id": "opt-1", "name": "In Progress", "color": "blue"}
        }))
        .unwrap();
        match v.kind {
            PropertyValueKind::Select(Some(option)) => {
                assert_eq!(option.name, "In Progress");
                assert_eq!(option.color, Color::Blue);
            }
            other => panic!("expected select, got {:?}", other),
        }

        let v: PropertyValue = serde_json::from_value(json!({
            "id": "d",
            "type": "date",
            "date": {"start": "2021-05-13", "end": null}
        }))
        .unwrap();
        match v.kind {
            PropertyValueKind::Date(Some(range)) => {
                assert_eq!(range.start.to_rfc3339().unwrap(), "2021-05-13T00:00:00Z");
                assert!(range.end.is_unset());
            }
            other => panic!("expected date, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_formula_and_rollup() {
        let v: PropertyValue = serde_json::from_value(json!({
            "id": "f",
            "type": "formula",
            "formula": {"type": "string", "string": "computed"}
        }))
        .unwrap();
        assert_eq!(
            v.kind,
            PropertyValueKind::Formula(FormulaValue::String(Some("computed".to_string())))
        );

        let v: PropertyValue = serde_json::from_value(json!({
            "id": "r",
            "type": "rollup",
            "rollup": {"type": "array", "function": "show_original", "array": [
                {"type": "title", "title": [{"type": "text", "text": {"content": "Row"}}]}
            ]}
        }))
        .unwrap();
        match v.kind {
            PropertyValueKind::Rollup(RollupValue::Array(items)) => match &items[0].kind {
                PropertyValueKind::Title(text) => assert_eq!(to_plain_text(text), "Row"),
                other => panic!("expected title item, got {:?}", other),
            },
            other => panic!("expected rollup array, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_files() {
        let v: PropertyValue = serde_json::from_value(json!({
            "id": "fl",
            "type": "files",
            "files": [
                {"name": "menu.pdf", "type": "file",
                 "file": {"url": "https://s3/menu.pdf", "expiry_time": "2021-05-14T10:00:00.000Z"}},
                {"name": "site", "type": "external", "external": {"url": "https://example.com"}}
            ]
        }))
        .unwrap();
        match v.kind {
            PropertyValueKind::Files(files) => {
                assert_eq!(files.len(), 2);
                assert!(matches!(files[0].kind, FileKind::File { .. }));
                assert_eq!(
                    files[1].kind,
                    FileKind::External {
                        url: "https://example.com".to_string()
                    }
                );
            }
            other => panic!("expected files, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_property_type_is_kept() {
        let v: PropertyValue = serde_json::from_value(json!({
            "id": "u",
            "type": "unique_id",
            "unique_id": {"prefix": "TASK", "number": 7}
        }))
        .unwrap();
        assert_eq!(v.property_type(), "unique_id");
        assert_eq!(
            v.kind,
            PropertyValueKind::Unsupported {
                property_type: "unique_id".to_string(),
                payload: Some(json!({"prefix": "TASK", "number": 7})),
            }
        );
    }

    #[test]
    fn test_encode_for_update() {
        assert_eq!(
            serde_json::to_value(PropertyValue::select("Done")).unwrap(),
            json!({"type": "select", "select": {"name": "Done"}})
        );
        assert_eq!(
            serde_json::to_value(PropertyValue::number(3.5)).unwrap(),
            json!({"type": "number", "number": 3.5})
        );
    }
}
