use super::rich_text::{self, RichText};
use super::tagged::{self, Remainder, TaggedUnion};
use crate::types::{BlockId, Color, NotionTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A unit of page content.
///
/// The payload lives in [`Block::kind`]; exactly one kind is ever present, and
/// it is chosen solely from the `type` field when decoding. Blocks built
/// client-side for [`append_block_children`](crate::NotionClient::append_block_children)
/// leave `id` unset.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: Option<BlockId>,
    pub created_time: NotionTime,
    pub last_edited_time: NotionTime,
    pub has_children: bool,
    pub archived: bool,
    pub kind: BlockKind,
}

/// Block payloads, one per `type` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Paragraph(TextBlock),
    Heading1(TextBlock),
    Heading2(TextBlock),
    Heading3(TextBlock),
    BulletedListItem(TextBlock),
    NumberedListItem(TextBlock),
    ToDo(ToDoBlock),
    Toggle(TextBlock),
    Quote(TextBlock),
    Code(CodeBlock),
    Divider,
    ChildPage(ChildPageBlock),
    ChildDatabase(ChildPageBlock),
    /// Anything this client has no payload type for, including the API's own
    /// `unsupported` tag. The tag and raw payload are kept as received.
    Unsupported(UnsupportedBlock),
}

/// Payload shared by paragraphs, headings, list items, toggles and quotes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(alias = "rich_text", default)]
    pub text: Vec<RichText>,
    #[serde(default, skip_serializing_if = "is_default_color")]
    pub color: Color,
    /// Nested content; only written on requests, the server reports it via `has_children`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToDoBlock {
    #[serde(alias = "rich_text", default)]
    pub text: Vec<RichText>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default, skip_serializing_if = "is_default_color")]
    pub color: Color,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodeBlock {
    #[serde(alias = "rich_text", default)]
    pub text: Vec<RichText>,
    #[serde(default)]
    pub language: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<RichText>,
}

/// Payload of `child_page` and `child_database` blocks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChildPageBlock {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedBlock {
    pub block_type: String,
    pub payload: Option<Value>,
}

fn is_default_color(color: &Color) -> bool {
    *color == Color::Default
}

/// The three heading sizes a page supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    One,
    Two,
    Three,
}

impl Block {
    /// A new block of the given kind, with no server-assigned fields.
    pub fn new(kind: BlockKind) -> Self {
        Self {
            id: None,
            created_time: NotionTime::unset(),
            last_edited_time: NotionTime::unset(),
            has_children: false,
            archived: false,
            kind,
        }
    }

    pub fn paragraph(text: Vec<RichText>) -> Self {
        Self::new(BlockKind::Paragraph(TextBlock {
            text,
            ..TextBlock::default()
        }))
    }

    pub fn heading(level: HeadingLevel, text: Vec<RichText>) -> Self {
        let payload = TextBlock {
            text,
            ..TextBlock::default()
        };
        Self::new(match level {
            HeadingLevel::One => BlockKind::Heading1(payload),
            HeadingLevel::Two => BlockKind::Heading2(payload),
            HeadingLevel::Three => BlockKind::Heading3(payload),
        })
    }

    pub fn to_do(text: Vec<RichText>, checked: bool) -> Self {
        Self::new(BlockKind::ToDo(ToDoBlock {
            text,
            checked,
            ..ToDoBlock::default()
        }))
    }

    /// The `type` tag this block was decoded from or will be written with.
    pub fn block_type(&self) -> &str {
        self.kind.tag()
    }

    /// The rich text of text-bearing kinds.
    pub fn text(&self) -> Option<&[RichText]> {
        match &self.kind {
            BlockKind::Paragraph(b)
            | BlockKind::Heading1(b)
            | BlockKind::Heading2(b)
            | BlockKind::Heading3(b)
            | BlockKind::BulletedListItem(b)
            | BlockKind::NumberedListItem(b)
            | BlockKind::Toggle(b)
            | BlockKind::Quote(b) => Some(&b.text),
            BlockKind::ToDo(b) => Some(&b.text),
            BlockKind::Code(b) => Some(&b.text),
            BlockKind::Divider
            | BlockKind::ChildPage(_)
            | BlockKind::ChildDatabase(_)
            | BlockKind::Unsupported(_) => None,
        }
    }

    /// Plain text of the block, or the title for child pages and databases.
    pub fn plain_text(&self) -> String {
        match &self.kind {
            BlockKind::ChildPage(b) | BlockKind::ChildDatabase(b) => b.title.clone(),
            _ => self.text().map(rich_text::to_plain_text).unwrap_or_default(),
        }
    }
}

impl TaggedUnion for BlockKind {
    fn decode(tag: &str, payload: Option<Value>) -> Result<Self, serde_json::Error> {
        Ok(match tag {
            "paragraph" => Self::Paragraph(tagged::object_payload(payload)?),
            "heading_1" => Self::Heading1(tagged::object_payload(payload)?),
            "heading_2" => Self::Heading2(tagged::object_payload(payload)?),
            "heading_3" => Self::Heading3(tagged::object_payload(payload)?),
            "bulleted_list_item" => Self::BulletedListItem(tagged::object_payload(payload)?),
            "numbered_list_item" => Self::NumberedListItem(tagged::object_payload(payload)?),
            "to_do" => Self::ToDo(tagged::object_payload(payload)?),
            "toggle" => Self::Toggle(tagged::object_payload(payload)?),
            "quote" => Self::Quote(tagged::object_payload(payload)?),
            "code" => Self::Code(tagged::object_payload(payload)?),
            "divider" => Self::Divider,
            "child_page" => Self::ChildPage(tagged::object_payload(payload)?),
            "child_database" => Self::ChildDatabase(tagged::object_payload(payload)?),
            _ => Self::Unsupported(UnsupportedBlock {
                block_type: tag.to_string(),
                payload,
            }),
        })
    }

    fn tag(&self) -> &str {
        match self {
            Self::Paragraph(_) => "paragraph",
            Self::Heading1(_) => "heading_1",
            Self::Heading2(_) => "heading_2",
            Self::Heading3(_) => "heading_3",
            Self::BulletedListItem(_) => "bulleted_list_item",
            Self::NumberedListItem(_) => "numbered_list_item",
            Self::ToDo(_) => "to_do",
            Self::Toggle(_) => "toggle",
            Self::Quote(_) => "quote",
            Self::Code(_) => "code",
            Self::Divider => "divider",
            Self::ChildPage(_) => "child_page",
            Self::ChildDatabase(_) => "child_database",
            Self::Unsupported(b) => &b.block_type,
        }
    }

    fn encode_payload(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::Paragraph(b)
            | Self::Heading1(b)
            | Self::Heading2(b)
            | Self::Heading3(b)
            | Self::BulletedListItem(b)
            | Self::NumberedListItem(b)
            | Self::Toggle(b)
            | Self::Quote(b) => tagged::to_payload(b),
            Self::ToDo(b) => tagged::to_payload(b),
            Self::Code(b) => tagged::to_payload(b),
            Self::Divider => Ok(tagged::empty_payload()),
            Self::ChildPage(b) | Self::ChildDatabase(b) => tagged::to_payload(b),
            Self::Unsupported(b) => Ok(b.payload.clone().unwrap_or_else(tagged::empty_payload)),
        }
    }
}

#[derive(Deserialize)]
struct BlockEnvelope {
    #[serde(default)]
    id: Option<BlockId>,
    #[serde(default)]
    created_time: NotionTime,
    #[serde(default)]
    last_edited_time: NotionTime,
    #[serde(default)]
    has_children: bool,
    #[serde(default)]
    archived: bool,
    #[serde(rename = "type", default)]
    tag: Option<String>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let envelope = BlockEnvelope::deserialize(deserializer)?;
        let kind: BlockKind = Remainder {
            tag: envelope.tag,
            fields: envelope.fields,
        }
        .decode()
        .map_err(serde::de::Error::custom)?;

        Ok(Self {
            id: envelope.id,
            created_time: envelope.created_time,
            last_edited_time: envelope.last_edited_time,
            has_children: envelope.has_children,
            archived: envelope.archived,
            kind,
        })
    }
}

impl Serialize for Block {
    /// Writes the request shape `{"object": "block", "type": .., <type>: payload}`.
    /// Server-assigned fields are never sent.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        tagged::serialize_union(
            &self.kind,
            &[("object", Value::String("block".to_string()))],
            serializer,
        )
    }
}
