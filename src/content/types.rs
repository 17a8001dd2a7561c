//! Block and page types
//!
//! Wire shape of a block is `{ id, position, type, ...payload }`: the shared
//! fields live on [`Block`] and the per-variant payload is flattened in from
//! [`BlockBody`].

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single typed content unit within a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Unique identifier, stable across reorders
    pub id: String,
    /// Dense 1-based rank within the owning page
    pub position: u32,
    /// Variant payload, tagged by `type` on the wire
    #[serde(flatten)]
    pub body: BlockBody,
}

/// Per-variant block payload
///
/// An unknown `type` tag in an inbound payload deserializes to
/// [`BlockBody::Unsupported`] rather than failing, so a newer client's
/// content degrades to a marked placeholder. The placeholder keeps the
/// original tag and payload, so echoing a page back out reproduces the
/// foreign block byte-for-value.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockBody {
    Paragraph {
        content: String,
        style: Option<BlockStyle>,
    },
    Heading {
        content: String,
        /// Heading level, 1-6
        level: u8,
    },
    Image {
        url: String,
        alt: Option<String>,
        caption: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
    },
    Code {
        code: String,
        language: String,
        caption: Option<String>,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        caption: Option<String>,
    },
    Video {
        url: String,
        caption: Option<String>,
        autoplay: Option<bool>,
        controls: Option<bool>,
    },
    Audio {
        url: String,
        caption: Option<String>,
        autoplay: Option<bool>,
        controls: Option<bool>,
    },
    Markdown {
        content: String,
    },
    /// Placeholder for a block variant this build does not know about
    Unsupported {
        /// The original `type` tag
        kind: String,
        /// The original payload, preserved for lossless round-trips
        payload: serde_json::Map<String, serde_json::Value>,
    },
}

/// The tags this build knows how to edit
const KNOWN_TAGS: [&str; 8] = [
    "paragraph", "heading", "image", "code", "table", "video", "audio", "markdown",
];

/// Serde mirror of the known variants; the public enum adds the lossless
/// unsupported placeholder on top of this
#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum KnownBody {
    Paragraph {
        content: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<BlockStyle>,
    },
    Heading {
        content: String,
        level: u8,
    },
    Image {
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        width: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        height: Option<u32>,
    },
    Code {
        code: String,
        language: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    Video {
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        autoplay: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        controls: Option<bool>,
    },
    Audio {
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        autoplay: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        controls: Option<bool>,
    },
    Markdown {
        content: String,
    },
}

impl From<KnownBody> for BlockBody {
    fn from(known: KnownBody) -> Self {
        match known {
            KnownBody::Paragraph { content, style } => BlockBody::Paragraph { content, style },
            KnownBody::Heading { content, level } => BlockBody::Heading { content, level },
            KnownBody::Image {
                url,
                alt,
                caption,
                width,
                height,
            } => BlockBody::Image {
                url,
                alt,
                caption,
                width,
                height,
            },
            KnownBody::Code {
                code,
                language,
                caption,
            } => BlockBody::Code {
                code,
                language,
                caption,
            },
            KnownBody::Table {
                headers,
                rows,
                caption,
            } => BlockBody::Table {
                headers,
                rows,
                caption,
            },
            KnownBody::Video {
                url,
                caption,
                autoplay,
                controls,
            } => BlockBody::Video {
                url,
                caption,
                autoplay,
                controls,
            },
            KnownBody::Audio {
                url,
                caption,
                autoplay,
                controls,
            } => BlockBody::Audio {
                url,
                caption,
                autoplay,
                controls,
            },
            KnownBody::Markdown { content } => BlockBody::Markdown { content },
        }
    }
}

impl Serialize for BlockBody {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.clone() {
            BlockBody::Unsupported { kind, payload } => {
                let mut map = serializer.serialize_map(Some(payload.len() + 1))?;
                map.serialize_entry("type", &kind)?;
                for (key, value) in &payload {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            BlockBody::Paragraph { content, style } => {
                KnownBody::Paragraph { content, style }.serialize(serializer)
            }
            BlockBody::Heading { content, level } => {
                KnownBody::Heading { content, level }.serialize(serializer)
            }
            BlockBody::Image {
                url,
                alt,
                caption,
                width,
                height,
            } => KnownBody::Image {
                url,
                alt,
                caption,
                width,
                height,
            }
            .serialize(serializer),
            BlockBody::Code {
                code,
                language,
                caption,
            } => KnownBody::Code {
                code,
                language,
                caption,
            }
            .serialize(serializer),
            BlockBody::Table {
                headers,
                rows,
                caption,
            } => KnownBody::Table {
                headers,
                rows,
                caption,
            }
            .serialize(serializer),
            BlockBody::Video {
                url,
                caption,
                autoplay,
                controls,
            } => KnownBody::Video {
                url,
                caption,
                autoplay,
                controls,
            }
            .serialize(serializer),
            BlockBody::Audio {
                url,
                caption,
                autoplay,
                controls,
            } => KnownBody::Audio {
                url,
                caption,
                autoplay,
                controls,
            }
            .serialize(serializer),
            BlockBody::Markdown { content } => {
                KnownBody::Markdown { content }.serialize(serializer)
            }
        }
    }
}

impl<'de> Deserialize<'de> for BlockBody {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        let tag = value
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| de::Error::missing_field("type"))?;

        if KNOWN_TAGS.contains(&tag) {
            // A known tag with a malformed payload is still an error
            return KnownBody::deserialize(value)
                .map(BlockBody::from)
                .map_err(de::Error::custom);
        }

        let serde_json::Value::Object(mut payload) = value else {
            return Err(de::Error::custom("block body must be an object"));
        };
        let kind = match payload.remove("type") {
            Some(serde_json::Value::String(kind)) => kind,
            _ => return Err(de::Error::missing_field("type")),
        };
        Ok(BlockBody::Unsupported { kind, payload })
    }
}

/// Inline style for paragraph blocks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Fieldless block discriminant, used to request a new block of a given kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Paragraph,
    Heading,
    Image,
    Code,
    Table,
    Video,
    Audio,
    Markdown,
}

impl Block {
    /// Create a block of the given kind with its fixed default payload
    pub fn new(kind: BlockKind, position: u32) -> Self {
        let body = match kind {
            BlockKind::Paragraph => BlockBody::Paragraph {
                content: String::new(),
                style: None,
            },
            BlockKind::Heading => BlockBody::Heading {
                content: String::new(),
                level: 2,
            },
            BlockKind::Image => BlockBody::Image {
                url: String::new(),
                alt: None,
                caption: None,
                width: None,
                height: None,
            },
            BlockKind::Code => BlockBody::Code {
                code: String::new(),
                language: "javascript".to_string(),
                caption: None,
            },
            BlockKind::Table => BlockBody::Table {
                headers: vec!["Column 1".to_string(), "Column 2".to_string()],
                rows: vec![vec![String::new(), String::new()]],
                caption: None,
            },
            BlockKind::Video => BlockBody::Video {
                url: String::new(),
                caption: None,
                autoplay: None,
                controls: Some(true),
            },
            BlockKind::Audio => BlockBody::Audio {
                url: String::new(),
                caption: None,
                autoplay: None,
                controls: Some(true),
            },
            BlockKind::Markdown => BlockBody::Markdown {
                content: String::new(),
            },
        };

        Self {
            id: Uuid::new_v4().to_string(),
            position,
            body,
        }
    }

    /// The discriminant this block was created with, if it is a known kind
    pub fn kind(&self) -> Option<BlockKind> {
        match self.body {
            BlockBody::Paragraph { .. } => Some(BlockKind::Paragraph),
            BlockBody::Heading { .. } => Some(BlockKind::Heading),
            BlockBody::Image { .. } => Some(BlockKind::Image),
            BlockBody::Code { .. } => Some(BlockKind::Code),
            BlockBody::Table { .. } => Some(BlockKind::Table),
            BlockBody::Video { .. } => Some(BlockKind::Video),
            BlockBody::Audio { .. } => Some(BlockKind::Audio),
            BlockBody::Markdown { .. } => Some(BlockKind::Markdown),
            BlockBody::Unsupported { .. } => None,
        }
    }

    /// Plain text carried by this block, for word counts and previews
    pub fn text_content(&self) -> &str {
        match &self.body {
            BlockBody::Paragraph { content, .. } => content,
            BlockBody::Heading { content, .. } => content,
            BlockBody::Markdown { content } => content,
            BlockBody::Code { code, .. } => code,
            _ => "",
        }
    }
}

/// An ordered container of blocks within an ebook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Unique identifier
    pub id: String,
    /// Page title shown in navigation
    pub title: String,
    /// Ordered blocks; positions are dense and 1-based
    #[serde(default)]
    pub blocks: Vec<Block>,
    /// Dense 1-based rank within the owning ebook
    pub position: u32,
}

impl Page {
    /// Create an empty page at the given position
    pub fn new(position: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: "Untitled Page".to_string(),
            blocks: Vec::new(),
            position,
        }
    }

    /// Find a block by id
    pub fn block(&self, block_id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == block_id)
    }

    /// Find a block by id, mutably
    pub fn block_mut(&mut self, block_id: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == block_id)
    }

    /// Reassign block positions to match array order (dense, 1-based)
    pub fn renumber_blocks(&mut self) {
        for (index, block) in self.blocks.iter_mut().enumerate() {
            block.position = index as u32 + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_wire_shape() {
        let mut block = Block::new(BlockKind::Paragraph, 1);
        block.body = BlockBody::Paragraph {
            content: "hello".to_string(),
            style: Some(BlockStyle {
                text_align: Some(TextAlign::Center),
                font_weight: None,
            }),
        };

        let json = serde_json::to_string(&block).unwrap();
        assert!(json.contains("\"type\":\"paragraph\""));
        assert!(json.contains("\"textAlign\":\"center\""));
        assert!(!json.contains("fontWeight"));

        let parsed: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, block);
    }

    #[test]
    fn test_unknown_type_degrades_to_unsupported() {
        let json = r#"{"id":"b1","position":1,"type":"diagram","nodes":[]}"#;
        let parsed: Block = serde_json::from_str(json).unwrap();

        match &parsed.body {
            BlockBody::Unsupported { kind, payload } => {
                assert_eq!(kind, "diagram");
                assert!(payload.contains_key("nodes"));
            }
            other => panic!("expected unsupported placeholder, got {:?}", other),
        }
        assert_eq!(parsed.kind(), None);
        assert_eq!(parsed.id, "b1");
    }

    #[test]
    fn test_unsupported_round_trips_losslessly() {
        // A foreign block must come back out with its tag and payload intact
        let json = r#"{"id":"b1","position":1,"type":"diagram","nodes":[{"x":1,"y":2}],"theme":"dark"}"#;
        let parsed: Block = serde_json::from_str(json).unwrap();

        let echoed = serde_json::to_string(&parsed).unwrap();
        let original: serde_json::Value = serde_json::from_str(json).unwrap();
        let round_tripped: serde_json::Value = serde_json::from_str(&echoed).unwrap();
        assert_eq!(round_tripped, original);

        // And it survives a second pass through the model unchanged
        let reparsed: Block = serde_json::from_str(&echoed).unwrap();
        assert_eq!(reparsed, parsed);
    }

    #[test]
    fn test_known_tag_with_bad_payload_is_an_error() {
        // "heading" is a known tag, so a malformed payload must fail rather
        // than degrade to the unsupported placeholder
        let json = r#"{"id":"b1","position":1,"type":"heading","content":"hi"}"#;
        assert!(serde_json::from_str::<Block>(json).is_err());
    }

    #[test]
    fn test_missing_tag_is_an_error() {
        let json = r#"{"id":"b1","position":1,"content":"hi"}"#;
        assert!(serde_json::from_str::<Block>(json).is_err());
    }

    #[test]
    fn test_code_defaults_to_javascript() {
        let block = Block::new(BlockKind::Code, 3);
        match &block.body {
            BlockBody::Code { language, code, .. } => {
                assert_eq!(language, "javascript");
                assert!(code.is_empty());
            }
            other => panic!("expected code block, got {:?}", other),
        }
        assert_eq!(block.position, 3);
    }

    #[test]
    fn test_new_blocks_get_unique_ids() {
        let a = Block::new(BlockKind::Image, 1);
        let b = Block::new(BlockKind::Image, 2);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_renumber_blocks() {
        let mut page = Page::new(1);
        page.blocks = vec![
            Block::new(BlockKind::Paragraph, 7),
            Block::new(BlockKind::Heading, 2),
            Block::new(BlockKind::Code, 9),
        ];
        page.renumber_blocks();

        let positions: Vec<u32> = page.blocks.iter().map(|b| b.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }
}
