//! Block patching
//!
//! Each block variant has a patch shape with every field optional. Applying a
//! patch merges the present fields onto the existing payload and never
//! changes the `type` discriminant: a patch for a different variant is a
//! no-op. Replacing a block's type is done by delete + add in the page
//! editor.

use serde::{Deserialize, Serialize};

use crate::content::{Block, BlockBody, BlockStyle};

/// A partial update for one block variant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockPatch {
    Paragraph {
        #[serde(default)]
        content: Option<String>,
        #[serde(default)]
        style: Option<BlockStyle>,
    },
    Heading {
        #[serde(default)]
        content: Option<String>,
        #[serde(default)]
        level: Option<u8>,
    },
    Image {
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        alt: Option<String>,
        #[serde(default)]
        caption: Option<String>,
        #[serde(default)]
        width: Option<u32>,
        #[serde(default)]
        height: Option<u32>,
    },
    Code {
        #[serde(default)]
        code: Option<String>,
        #[serde(default)]
        language: Option<String>,
        #[serde(default)]
        caption: Option<String>,
    },
    Table {
        #[serde(default)]
        headers: Option<Vec<String>>,
        #[serde(default)]
        rows: Option<Vec<Vec<String>>>,
        #[serde(default)]
        caption: Option<String>,
    },
    Video {
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        caption: Option<String>,
        #[serde(default)]
        autoplay: Option<bool>,
        #[serde(default)]
        controls: Option<bool>,
    },
    Audio {
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        caption: Option<String>,
        #[serde(default)]
        autoplay: Option<bool>,
        #[serde(default)]
        controls: Option<bool>,
    },
    Markdown {
        #[serde(default)]
        content: Option<String>,
    },
}

fn merge<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn merge_opt<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

impl Block {
    /// Merge a patch onto this block
    ///
    /// Returns whether the patch applied. A patch whose variant does not
    /// match the block's discriminant leaves the block untouched, as does any
    /// patch against an [`BlockBody::Unsupported`] placeholder.
    pub fn apply(&mut self, patch: BlockPatch) -> bool {
        match (&mut self.body, patch) {
            (
                BlockBody::Paragraph { content, style },
                BlockPatch::Paragraph {
                    content: new_content,
                    style: new_style,
                },
            ) => {
                merge(content, new_content);
                merge_opt(style, new_style);
                true
            }
            (
                BlockBody::Heading { content, level },
                BlockPatch::Heading {
                    content: new_content,
                    level: new_level,
                },
            ) => {
                merge(content, new_content);
                if let Some(new_level) = new_level {
                    *level = new_level.clamp(1, 6);
                }
                true
            }
            (
                BlockBody::Image {
                    url,
                    alt,
                    caption,
                    width,
                    height,
                },
                BlockPatch::Image {
                    url: new_url,
                    alt: new_alt,
                    caption: new_caption,
                    width: new_width,
                    height: new_height,
                },
            ) => {
                merge(url, new_url);
                merge_opt(alt, new_alt);
                merge_opt(caption, new_caption);
                merge_opt(width, new_width);
                merge_opt(height, new_height);
                true
            }
            (
                BlockBody::Code {
                    code,
                    language,
                    caption,
                },
                BlockPatch::Code {
                    code: new_code,
                    language: new_language,
                    caption: new_caption,
                },
            ) => {
                merge(code, new_code);
                merge(language, new_language);
                merge_opt(caption, new_caption);
                true
            }
            (
                BlockBody::Table {
                    headers,
                    rows,
                    caption,
                },
                BlockPatch::Table {
                    headers: new_headers,
                    rows: new_rows,
                    caption: new_caption,
                },
            ) => {
                merge(headers, new_headers);
                merge(rows, new_rows);
                merge_opt(caption, new_caption);
                true
            }
            (
                BlockBody::Video {
                    url,
                    caption,
                    autoplay,
                    controls,
                },
                BlockPatch::Video {
                    url: new_url,
                    caption: new_caption,
                    autoplay: new_autoplay,
                    controls: new_controls,
                },
            ) => {
                merge(url, new_url);
                merge_opt(caption, new_caption);
                merge_opt(autoplay, new_autoplay);
                merge_opt(controls, new_controls);
                true
            }
            (
                BlockBody::Audio {
                    url,
                    caption,
                    autoplay,
                    controls,
                },
                BlockPatch::Audio {
                    url: new_url,
                    caption: new_caption,
                    autoplay: new_autoplay,
                    controls: new_controls,
                },
            ) => {
                merge(url, new_url);
                merge_opt(caption, new_caption);
                merge_opt(autoplay, new_autoplay);
                merge_opt(controls, new_controls);
                true
            }
            (BlockBody::Markdown { content }, BlockPatch::Markdown { content: new_content }) => {
                merge(content, new_content);
                true
            }
            (body, patch) => {
                tracing::debug!(block = ?body, patch = ?patch, "patch variant mismatch, ignoring");
                false
            }
        }
    }

    /// Short display label for listings and the editor sidebar
    pub fn label(&self) -> &'static str {
        match &self.body {
            BlockBody::Paragraph { .. } => "Paragraph",
            BlockBody::Heading { .. } => "Heading",
            BlockBody::Image { .. } => "Image",
            BlockBody::Code { .. } => "Code",
            BlockBody::Table { .. } => "Table",
            BlockBody::Video { .. } => "Video",
            BlockBody::Audio { .. } => "Audio",
            BlockBody::Markdown { .. } => "Markdown",
            BlockBody::Unsupported { .. } => "Unsupported block",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BlockKind, FontWeight, TextAlign};

    fn paragraph(content: &str) -> Block {
        let mut block = Block::new(BlockKind::Paragraph, 1);
        block.body = BlockBody::Paragraph {
            content: content.to_string(),
            style: Some(BlockStyle {
                text_align: Some(TextAlign::Left),
                font_weight: Some(FontWeight::Bold),
            }),
        };
        block
    }

    #[test]
    fn test_merge_preserves_absent_fields() {
        let mut block = paragraph("original");
        let applied = block.apply(BlockPatch::Paragraph {
            content: Some("edited".to_string()),
            style: None,
        });

        assert!(applied);
        match &block.body {
            BlockBody::Paragraph { content, style } => {
                assert_eq!(content, "edited");
                // Style untouched by a content-only patch
                assert_eq!(style.as_ref().unwrap().font_weight, Some(FontWeight::Bold));
            }
            other => panic!("expected paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_patch_cannot_change_discriminant() {
        let mut block = paragraph("original");
        let applied = block.apply(BlockPatch::Heading {
            content: Some("now a heading?".to_string()),
            level: Some(1),
        });

        assert!(!applied);
        assert!(matches!(block.body, BlockBody::Paragraph { .. }));
        assert_eq!(block.text_content(), "original");
    }

    #[test]
    fn test_heading_level_clamped() {
        let mut block = Block::new(BlockKind::Heading, 1);
        block.apply(BlockPatch::Heading {
            content: None,
            level: Some(9),
        });
        match block.body {
            BlockBody::Heading { level, .. } => assert_eq!(level, 6),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_unsupported_accepts_no_patch() {
        let mut block: Block =
            serde_json::from_str(r#"{"id":"b1","position":1,"type":"mystery"}"#).unwrap();
        let applied = block.apply(BlockPatch::Markdown {
            content: Some("text".to_string()),
        });

        assert!(!applied);
        assert_eq!(block.label(), "Unsupported block");
    }

    #[test]
    fn test_patch_from_json_omits_absent_fields() {
        let patch: BlockPatch =
            serde_json::from_str(r#"{"type":"code","language":"rust"}"#).unwrap();
        let mut block = Block::new(BlockKind::Code, 1);
        assert!(block.apply(patch));

        match &block.body {
            BlockBody::Code { language, code, .. } => {
                assert_eq!(language, "rust");
                assert!(code.is_empty());
            }
            _ => unreachable!(),
        }
    }
}
