//! Typed views of the objects the API returns.

mod block;
mod database;
mod page;
mod property;
mod property_value;
pub mod rich_text;
pub(crate) mod tagged;
mod user;

pub use block::{
    Block, BlockKind, ChildPageBlock, HeadingLevel, CodeBlock, TextBlock, ToDoBlock, UnsupportedBlock,
};
pub use database::Database;
pub use page::{Page, PageProperties, Parent};
pub use property::{
    FormulaConfig, NumberConfig, PropertySchema, PropertySchemaKind, RelationConfig,
    RollupConfig, SelectConfig,
};
pub use property_value::{
    DateRange, FileKind, FileReference, FormulaValue, PageReference, PropertyValue,
    PropertyValueKind, RollupValue, SelectOption,
};
pub use rich_text::{Annotations, EquationContent, Link, RichText, RichTextKind, TextContent};
pub use user::{Bot, Person, User, UserKind};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaginatedList<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default, deserialize_with = "empty_cursor_as_none")]
    next_cursor: Option<String>,
}

impl<T> PaginatedList<T> {
    pub fn new(results: Vec<T>, next_cursor: Option<String>) -> Self {
        let next_cursor = next_cursor.filter(|cursor| !cursor.is_empty());
        Self {
            results,
            has_more: next_cursor.is_some(),
            next_cursor,
        }
    }

    /// Cursor for the following page, if the server issued one.
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }
}

fn empty_cursor_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let cursor = Option::<String>::deserialize(deserializer)?;
    Ok(cursor.filter(|cursor| !cursor.is_empty()))
}

/// An item returned by search, discriminated by its `object` field.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    Page(Page),
    Database(Database),
    Unsupported { object: String, payload: Value },
}

impl SearchResult {
    pub fn object_type(&self) -> &str {
        match self {
            Self::Page(_) => "page",
            Self::Database(_) => "database",
            Self::Unsupported { object, .. } => object,
        }
    }
}

impl<'de> Deserialize<'de> for SearchResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let payload = Value::deserialize(deserializer)?;
        let object = payload
            .get("object")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        match object.as_str() {
            "page" => serde_json::from_value(payload)
                .map(Self::Page)
                .map_err(serde::de::Error::custom),
            "database" => serde_json::from_value(payload)
                .map(Self::Database)
                .map_err(serde::de::Error::custom),
            _ => Ok(Self::Unsupported { object, payload }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_empty_cursor_means_last_page() {
        let list: PaginatedList<User> = serde_json::from_value(json!({
            "object": "list",
            "results": [],
            "has_more": false,
            "next_cursor": ""
        }))
        .unwrap();
        assert_eq!(list.next_cursor(), None);

        let list: PaginatedList<User> =
            serde_json::from_value(json!({"results": [], "has_more": true, "next_cursor": "fe2c"}))
                .unwrap();
        assert_eq!(list.next_cursor(), Some("fe2c"));
        assert!(list.has_more);
    }

    #[test]
    fn test_search_results_dispatch_on_object() {
        let list: PaginatedList<SearchResult> = serde_json::from_value(json!({
            "results": [
                {"object": "page", "id": "0367c2db381a4f8b9ce360f388a6b2e3",
                 "parent": {"type": "workspace", "workspace": true}, "properties": {}},
                {"object": "database", "id": "668d797c76fa49349b05ad288df2d136",
                 "title": [], "properties": {}},
                {"object": "comment", "id": "x"}
            ],
            "has_more": false,
            "next_cursor": null
        }))
        .unwrap();

        let kinds: Vec<&str> = list.results.iter().map(SearchResult::object_type).collect();
        assert_eq!(kinds, vec!["page", "database", "comment"]);
    }

    #[test]
    fn test_search_results_keep_property_order() {
        let bytes = br#"{
            "object": "list",
            "results": [{
                "object": "page",
                "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
                "parent": {"type": "database_id", "database_id": "668d797c-76fa-4934-9b05-ad288df2d136"},
                "properties": {
                    "Zeta": {"id": "z", "type": "number", "number": 1},
                    "Alpha": {"id": "title", "type": "title", "title": []},
                    "Mid": {"id": "m", "type": "checkbox", "checkbox": true}
                }
            }],
            "has_more": false,
            "next_cursor": null
        }"#;

        let list: PaginatedList<SearchResult> = serde_json::from_slice(bytes).unwrap();
        let page = match &list.results[0] {
            SearchResult::Page(page) => page,
            other => panic!("expected page, got {:?}", other),
        };
        let names: Vec<&str> = match &page.properties {
            PageProperties::Database(values) => values.keys().map(String::as_str).collect(),
            other => panic!("expected database properties, got {:?}", other),
        };
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }
}
