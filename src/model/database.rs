use super::property::PropertySchema;
use super::rich_text::{self, RichText};
use crate::types::{DatabaseId, NotionTime};
use indexmap::IndexMap;
use serde::Deserialize;

/// A database and its property schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Database {
    pub id: DatabaseId,
    #[serde(default)]
    pub created_time: NotionTime,
    #[serde(default)]
    pub last_edited_time: NotionTime,
    #[serde(default)]
    pub title: Vec<RichText>,
    /// Property descriptors keyed by property name, in server order.
    #[serde(default)]
    pub properties: IndexMap<String, PropertySchema>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Database {
    pub fn title_text(&self) -> String {
        rich_text::to_plain_text(&self.title)
    }

    /// The descriptor of the title column.
    pub fn title_property(&self) -> Option<(&String, &PropertySchema)> {
        self.properties
            .iter()
            .find(|(_, schema)| schema.property_type() == "title")
    }
}
