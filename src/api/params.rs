// src/api/params.rs
//! Typed parameters for the mutating and query endpoints.
//!
//! Each parameter type validates itself with a pure `validate()`; the client
//! calls it before building a request, so invalid input never reaches the
//! network.

use crate::model::{Block, Parent, PropertyValue, RichText};
use crate::types::{DatabaseId, PageId, ValidationError};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Parameters for creating a page under a page or in a database.
///
/// Exactly one of the two parent fields must be set. Pages under a page
/// need a `title`; pages in a database carry their title in `properties`
/// under the database's title column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreatePageParams {
    pub parent_page_id: Option<PageId>,
    pub parent_database_id: Option<DatabaseId>,
    pub title: Vec<RichText>,
    pub properties: IndexMap<String, PropertyValue>,
    pub children: Vec<Block>,
}

impl CreatePageParams {
    pub fn under_page(parent: PageId, title: Vec<RichText>) -> Self {
        Self {
            parent_page_id: Some(parent),
            title,
            ..Self::default()
        }
    }

    pub fn in_database(parent: DatabaseId, properties: IndexMap<String, PropertyValue>) -> Self {
        Self {
            parent_database_id: Some(parent),
            properties,
            ..Self::default()
        }
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match (&self.parent_page_id, &self.parent_database_id) {
            (None, None) => Err(ValidationError::MissingParent),
            (Some(_), Some(_)) => Err(ValidationError::ConflictingParents),
            (Some(_), None) if self.title.is_empty() => Err(ValidationError::MissingTitle),
            _ => Ok(()),
        }
    }

    fn parent(&self) -> Result<Parent, ValidationError> {
        self.validate()?;
        match (&self.parent_page_id, &self.parent_database_id) {
            (Some(page), None) => Ok(Parent::Page(page.clone())),
            (None, Some(database)) => Ok(Parent::Database(database.clone())),
            (None, None) => Err(ValidationError::MissingParent),
            (Some(_), Some(_)) => Err(ValidationError::ConflictingParents),
        }
    }

    /// The request body, after validation.
    pub(crate) fn to_body(&self) -> Result<CreatePageBody<'_>, ValidationError> {
        let parent = self.parent()?;
        let mut properties = serde_json::Map::new();
        for (name, value) in &self.properties {
            let encoded = serde_json::to_value(value).map_err(ValidationError::BodyEncoding)?;
            properties.insert(name.clone(), encoded);
        }
        if matches!(parent, Parent::Page(_)) {
            let title = serde_json::to_value(&self.title).map_err(ValidationError::BodyEncoding)?;
            properties.insert("title".to_string(), serde_json::json!({ "title": title }));
        }
        Ok(CreatePageBody {
            parent,
            properties,
            children: &self.children,
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreatePageBody<'a> {
    parent: Parent,
    properties: serde_json::Map<String, Value>,
    #[serde(skip_serializing_if = "<[Block]>::is_empty")]
    children: &'a [Block],
}

/// Property values to write on an existing page, and/or its archived flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdatePageParams {
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, PropertyValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl UpdatePageParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.properties.is_empty() && self.archived.is_none() {
            return Err(ValidationError::EmptyField("properties"));
        }
        if self.properties.keys().any(|name| name.trim().is_empty()) {
            return Err(ValidationError::EmptyField("property name"));
        }
        Ok(())
    }
}

/// Filter, sorts and pagination for a database query.
///
/// `filter` and `sorts` are passed through as JSON; only their outer shape
/// is checked here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatabaseQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorts: Option<Value>,
    #[serde(skip_serializing_if = "no_cursor")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub page_size: u32,
}

/// An empty cursor is the same as none.
fn no_cursor(cursor: &Option<String>) -> bool {
    cursor.as_deref().map_or(true, str::is_empty)
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl DatabaseQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn sorts(mut self, sorts: Value) -> Self {
        self.sorts = Some(sorts);
        self
    }

    pub fn start_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.start_cursor = Some(cursor.into());
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(filter) = &self.filter {
            if !filter.is_object() {
                return Err(ValidationError::MalformedQuery {
                    field: "filter",
                    reason: format!("expected a JSON object, got {}", json_kind(filter)),
                });
            }
        }
        if let Some(sorts) = &self.sorts {
            if !sorts.is_array() {
                return Err(ValidationError::MalformedQuery {
                    field: "sorts",
                    reason: format!("expected a JSON array, got {}", json_kind(sorts)),
                });
            }
        }
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Options for the search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SearchSort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<SearchFilter>,
    #[serde(skip_serializing_if = "no_cursor")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub page_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortTimestamp {
    LastEditedTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchSort {
    pub direction: SortDirection,
    pub timestamp: SortTimestamp,
}

/// Restricts results to one object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchFilter {
    pub value: SearchObjectType,
    pub property: SearchFilterProperty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchObjectType {
    Page,
    Database,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchFilterProperty {
    Object,
}

impl SearchFilter {
    pub fn object(value: SearchObjectType) -> Self {
        Self {
            value,
            property: SearchFilterProperty::Object,
        }
    }
}

impl SearchOpts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn sort(mut self, direction: SortDirection) -> Self {
        self.sort = Some(SearchSort {
            direction,
            timestamp: SortTimestamp::LastEditedTime,
        });
        self
    }

    pub fn only(mut self, object: SearchObjectType) -> Self {
        self.filter = Some(SearchFilter::object(object));
        self
    }

    pub fn start_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.start_cursor = Some(cursor.into());
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

/// Body of the append-children call.
#[derive(Debug, Serialize)]
pub(crate) struct AppendBlockChildren<'a> {
    children: &'a [Block],
}

impl<'a> AppendBlockChildren<'a> {
    pub fn new(children: &'a [Block]) -> Result<Self, ValidationError> {
        if children.is_empty() {
            return Err(ValidationError::EmptyField("children"));
        }
        Ok(Self { children })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn page_id() -> PageId {
        PageId::parse("b55c9c91384d452b81dbd1ef79372b75").unwrap()
    }

    fn database_id() -> DatabaseId {
        DatabaseId::parse("668d797c76fa49349b05ad288df2d136").unwrap()
    }

    #[test]
    fn test_exactly_one_parent() {
        let none = CreatePageParams {
            title: vec![RichText::text("t")],
            ..CreatePageParams::default()
        };
        assert!(matches!(none.validate(), Err(ValidationError::MissingParent)));

        let both = CreatePageParams {
            parent_page_id: Some(page_id()),
            parent_database_id: Some(database_id()),
            title: vec![RichText::text("t")],
            ..CreatePageParams::default()
        };
        assert!(matches!(
            both.validate(),
            Err(ValidationError::ConflictingParents)
        ));

        assert!(CreatePageParams::under_page(page_id(), vec![RichText::text("t")])
            .validate()
            .is_ok());
        assert!(CreatePageParams::in_database(database_id(), IndexMap::new())
            .validate()
            .is_ok());
    }

    #[test]
    fn test_page_parent_requires_title() {
        let params = CreatePageParams::under_page(page_id(), Vec::new());
        assert!(matches!(params.validate(), Err(ValidationError::MissingTitle)));
    }

    #[test]
    fn test_create_page_body_under_page() {
        let params = CreatePageParams::under_page(page_id(), vec![RichText::text("Notes")])
            .with_children(vec![Block::paragraph(vec![RichText::text("hi")])]);
        let body = serde_json::to_value(params.to_body().unwrap()).unwrap();

        assert_eq!(
            body["parent"],
            json!({"type": "page_id", "page_id": "b55c9c91-384d-452b-81db-d1ef79372b75"})
        );
        assert_eq!(
            body["properties"]["title"]["title"][0]["text"]["content"],
            json!("Notes")
        );
        assert_eq!(body["children"][0]["type"], json!("paragraph"));
    }

    #[test]
    fn test_create_page_body_in_database() {
        let mut properties = IndexMap::new();
        properties.insert(
            "Name".to_string(),
            PropertyValue::title(vec![RichText::text("Row")]),
        );
        let body =
            serde_json::to_value(CreatePageParams::in_database(database_id(), properties).to_body().unwrap())
                .unwrap();

        assert_eq!(body["parent"]["type"], json!("database_id"));
        assert_eq!(body["properties"]["Name"]["type"], json!("title"));
        assert!(body.get("children").is_none());
    }

    #[test]
    fn test_update_params_must_change_something() {
        assert!(matches!(
            UpdatePageParams::new().validate(),
            Err(ValidationError::EmptyField("properties"))
        ));
        let archive = UpdatePageParams::new().archived(true);
        assert!(archive.validate().is_ok());
        assert_eq!(serde_json::to_value(&archive).unwrap(), json!({"archived": true}));
    }

    #[test]
    fn test_query_body_only_has_set_fields() {
        let query = DatabaseQuery::new().start_cursor("abc").page_size(10);
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"start_cursor": "abc", "page_size": 10})
        );
        assert_eq!(serde_json::to_value(DatabaseQuery::new()).unwrap(), json!({}));
    }

    #[test]
    fn test_empty_cursor_is_omitted_from_bodies() {
        let query = DatabaseQuery::new().start_cursor("").page_size(5);
        assert_eq!(serde_json::to_value(&query).unwrap(), json!({"page_size": 5}));

        let opts = SearchOpts::new().start_cursor("");
        assert_eq!(serde_json::to_value(&opts).unwrap(), json!({}));
    }

    #[test]
    fn test_query_shape_checks() {
        let bad_filter = DatabaseQuery::new().filter(json!([1, 2]));
        assert!(matches!(
            bad_filter.validate(),
            Err(ValidationError::MalformedQuery { field: "filter", .. })
        ));
        let bad_sorts = DatabaseQuery::new().sorts(json!({"property": "Name"}));
        assert!(matches!(
            bad_sorts.validate(),
            Err(ValidationError::MalformedQuery { field: "sorts", .. })
        ));
        let ok = DatabaseQuery::new()
            .filter(json!({"property": "Done", "checkbox": {"equals": true}}))
            .sorts(json!([{"property": "Name", "direction": "ascending"}]));
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_search_body() {
        let opts = SearchOpts::new()
            .query("roadmap")
            .sort(SortDirection::Descending)
            .only(SearchObjectType::Database);
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            json!({
                "query": "roadmap",
                "sort": {"direction": "descending", "timestamp": "last_edited_time"},
                "filter": {"value": "database", "property": "object"}
            })
        );
    }

    #[test]
    fn test_append_requires_children() {
        assert!(matches!(
            AppendBlockChildren::new(&[]),
            Err(ValidationError::EmptyField("children"))
        ));
    }
}
