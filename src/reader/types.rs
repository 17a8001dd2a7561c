//! Reading-session data types
//!
//! Highlights and bookmarks belong to exactly one (user, ebook) pair; there
//! is no sharing, so no owner fields appear here. The draft types carry the
//! caller-supplied fields; ids and timestamps are generated when the draft is
//! admitted into the session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default highlight color (yellow)
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#ffff00";

/// A text highlight within an ebook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    /// Unique identifier (UUID)
    pub id: String,
    /// The highlighted text
    pub text: String,
    /// Start character offset within the page
    pub start_offset: usize,
    /// End character offset within the page
    pub end_offset: usize,
    /// Highlight color (CSS color value)
    pub color: String,
    /// Optional attached note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Page the highlight lives on (1-indexed)
    pub page_number: u32,
}

/// Caller-supplied fields for a new highlight
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightDraft {
    pub text: String,
    pub start_offset: usize,
    pub end_offset: usize,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    pub page_number: u32,
}

impl Highlight {
    /// Admit a draft: generate id and timestamp, default the color
    pub fn from_draft(draft: HighlightDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: draft.text,
            start_offset: draft.start_offset,
            end_offset: draft.end_offset,
            color: draft
                .color
                .unwrap_or_else(|| DEFAULT_HIGHLIGHT_COLOR.to_string()),
            note: draft.note,
            created_at: Utc::now(),
            page_number: draft.page_number,
        }
    }
}

/// A position marker within an ebook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    /// Unique identifier (UUID)
    pub id: String,
    /// Character offset the bookmark anchors to
    pub position: usize,
    /// User-facing label
    pub title: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Page the bookmark lives on (1-indexed)
    pub page_number: u32,
}

/// Caller-supplied fields for a new bookmark
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkDraft {
    pub position: usize,
    pub title: String,
    pub page_number: u32,
}

impl Bookmark {
    /// Admit a draft: generate id and timestamp
    pub fn from_draft(draft: BookmarkDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            position: draft.position,
            title: draft.title,
            created_at: Utc::now(),
            page_number: draft.page_number,
        }
    }
}

/// The full state of one reading session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderState {
    /// Current page, always within `[1, max_page]`
    pub current_page: u32,
    /// Last page of the ebook, at least 1
    pub max_page: u32,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
    /// At most one selected highlight or bookmark id
    #[serde(default)]
    pub active_item_id: Option<String>,
}

impl ReaderState {
    /// Fresh session at page 1
    pub fn new(max_page: u32) -> Self {
        Self {
            current_page: 1,
            max_page: max_page.max(1),
            highlights: Vec::new(),
            bookmarks: Vec::new(),
            active_item_id: None,
        }
    }

    /// Session resumed at a stored page, clamped into range
    pub fn resumed_at(max_page: u32, current_page: u32) -> Self {
        let mut state = Self::new(max_page);
        state.current_page = current_page.clamp(1, state.max_page);
        state
    }

    /// Progress snapshot for the persistence collaborator
    pub fn progress(&self) -> ProgressUpdate {
        ProgressUpdate {
            current_page: self.current_page,
            progress_percentage: f64::from(self.current_page) / f64::from(self.max_page) * 100.0,
            is_completed: self.current_page == self.max_page,
        }
    }
}

/// Progress payload emitted after page-changing events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub current_page: u32,
    pub progress_percentage: f64,
    pub is_completed: bool,
}
