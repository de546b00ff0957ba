use super::tagged::{self, Remainder, TaggedUnion};
use crate::types::Color;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// One span of formatted text.
#[derive(Debug, Clone, PartialEq)]
pub struct RichText {
    pub kind: RichTextKind,
    pub annotations: Annotations,
    /// Server-rendered text of the span; empty on spans built client-side.
    pub plain_text: String,
    pub href: Option<String>,
}

/// The kind of rich text content, keyed by the `type` field.
#[derive(Debug, Clone, PartialEq)]
pub enum RichTextKind {
    Text(TextContent),
    Equation(EquationContent),
    /// Mentions and anything added server-side later.
    Unsupported {
        rich_text_type: String,
        payload: Option<Value>,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
    #[serde(default)]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EquationContent {
    pub expression: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

impl Annotations {
    fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

impl RichText {
    /// An unannotated text span.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: RichTextKind::Text(TextContent {
                content: content.into(),
                link: None,
            }),
            annotations: Annotations::default(),
            plain_text: String::new(),
            href: None,
        }
    }

    /// A text span linking to `url`.
    pub fn link(content: impl Into<String>, url: impl Into<String>) -> Self {
        let mut span = Self::text(content);
        if let RichTextKind::Text(text) = &mut span.kind {
            text.link = Some(Link { url: url.into() });
        }
        span
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Text of the span, preferring the server rendering.
    pub fn plain_text(&self) -> &str {
        if !self.plain_text.is_empty() {
            return &self.plain_text;
        }
        match &self.kind {
            RichTextKind::Text(text) => &text.content,
            RichTextKind::Equation(eq) => &eq.expression,
            RichTextKind::Unsupported { .. } => "",
        }
    }

    pub fn rich_text_type(&self) -> &str {
        self.kind.tag()
    }
}

/// Concatenated plain text of a span sequence.
pub fn to_plain_text(spans: &[RichText]) -> String {
    spans.iter().map(RichText::plain_text).collect()
}

impl TaggedUnion for RichTextKind {
    fn decode(tag: &str, payload: Option<Value>) -> Result<Self, serde_json::Error> {
        Ok(match tag {
            "text" => Self::Text(tagged::object_payload(payload)?),
            "equation" => Self::Equation(tagged::object_payload(payload)?),
            _ => Self::Unsupported {
                rich_text_type: tag.to_string(),
                payload,
            },
        })
    }

    fn tag(&self) -> &str {
        match self {
            Self::Text(_) => "text",
            Self::Equation(_) => "equation",
            Self::Unsupported { rich_text_type, .. } => rich_text_type,
        }
    }

    fn encode_payload(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::Text(text) => tagged::to_payload(text),
            Self::Equation(eq) => tagged::to_payload(eq),
            Self::Unsupported { payload, .. } => {
                Ok(payload.clone().unwrap_or_else(tagged::empty_payload))
            }
        }
    }
}

#[derive(Deserialize)]
struct RichTextEnvelope {
    #[serde(default)]
    annotations: Annotations,
    #[serde(default)]
    plain_text: String,
    #[serde(default)]
    href: Option<String>,
    #[serde(rename = "type", default)]
    tag: Option<String>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl<'de> Deserialize<'de> for RichText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let envelope = RichTextEnvelope::deserialize(deserializer)?;
        let kind: RichTextKind = Remainder {
            tag: envelope.tag,
            fields: envelope.fields,
        }
        .decode()
        .map_err(serde::de::Error::custom)?;

        Ok(Self {
            kind,
            annotations: envelope.annotations,
            plain_text: envelope.plain_text,
            href: envelope.href,
        })
    }
}

impl Serialize for RichText {
    /// Writes the request shape: the discriminant, its payload, and
    /// annotations only when they differ from the defaults.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut extra = Vec::new();
        if !self.annotations.is_plain() {
            let annotations =
                serde_json::to_value(self.annotations).map_err(serde::ser::Error::custom)?;
            extra.push(("annotations", annotations));
        }
        tagged::serialize_union(&self.kind, &extra, serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decode_text_span() {
        let span: RichText = serde_json::from_value(json!({
            "type": "text",
            "text": {"content": "Hello", "link": {"url": "https://example.com"}},
            "annotations": {"bold": true, "italic": false, "strikethrough": false,
                            "underline": false, "code": false, "color": "red"},
            "plain_text": "Hello",
            "href": "https://example.com"
        }))
        .unwrap();

        assert_eq!(span.plain_text(), "Hello");
        assert!(span.annotations.bold);
        assert_eq!(span.annotations.color, Color::Red);
        match &span.kind {
            RichTextKind::Text(text) => {
                assert_eq!(text.link.as_ref().unwrap().url, "https://example.com")
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_mention_falls_back_to_unsupported() {
        let span: RichText = serde_json::from_value(json!({
            "type": "mention",
            "mention": {"type": "user", "user": {"id": "u1"}},
            "plain_text": "@Someone"
        }))
        .unwrap();

        assert_eq!(span.rich_text_type(), "mention");
        assert_eq!(span.plain_text(), "@Someone");
        assert!(matches!(
            span.kind,
            RichTextKind::Unsupported { payload: Some(_), .. }
        ));
    }

    #[test]
    fn test_encode_emits_only_tag_and_payload() {
        let encoded = serde_json::to_value(RichText::text("a title")).unwrap();
        assert_eq!(
            encoded,
            json!({"type": "text", "text": {"content": "a title", "link": null}})
        );
    }

    #[test]
    fn test_encode_keeps_non_default_annotations() {
        let span = RichText::text("x").with_annotations(Annotations {
            code: true,
            ..Annotations::default()
        });
        let encoded = serde_json::to_value(span).unwrap();
        assert_eq!(encoded["annotations"]["code"], json!(true));
    }

    #[test]
    fn test_to_plain_text_concatenates() {
        let spans = vec![RichText::text("foo "), RichText::link("bar", "https://x.y")];
        assert_eq!(to_plain_text(&spans), "foo bar");
    }
}
