//! Reader dataset
//!
//! The inbound payload the surrounding application assembles when a reading
//! view opens: the ebook, its pages, and the user's highlights, bookmarks,
//! reviews, and stored progress. The core defaults absent collections and
//! otherwise takes the payload as-is; anything stricter belongs to the data
//! layer that produced it.

use serde::{Deserialize, Serialize};

use crate::content::{Ebook, Page};
use crate::error::Result;
use crate::reader::{Bookmark, Highlight, ReaderSession, ReaderState};

/// Everything a reading view needs, in one payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderDataset {
    pub ebook: Ebook,
    /// Pages delivered alongside the ebook row; may duplicate `ebook.pages`
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub progress: Option<ReadingProgress>,
}

/// A store review, carried as inert data for the reading view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    /// Star rating, 1-5
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub reviewer: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Stored reading progress, as the surrounding application persisted it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingProgress {
    pub current_page: u32,
    pub progress_percentage: f64,
    pub is_completed: bool,
    #[serde(default)]
    pub last_read_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl ReaderDataset {
    /// Decode a payload from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the payload to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The page collection to read from
    ///
    /// Prefers the standalone `pages` array; falls back to the pages embedded
    /// in the ebook row when the loader inlined them there.
    pub fn pages(&self) -> &[Page] {
        if self.pages.is_empty() {
            &self.ebook.pages
        } else {
            &self.pages
        }
    }

    /// Seed a session from this payload
    ///
    /// Resumes at the stored page, clamped into the actual page range, and
    /// loads the user's highlights and bookmarks into the initial state.
    pub fn into_session(self) -> ReaderSession {
        let max_page = self.pages().len().max(1) as u32;
        let current_page = self.progress.as_ref().map_or(1, |p| p.current_page);

        let mut state = ReaderState::resumed_at(max_page, current_page);
        state.highlights = self.highlights;
        state.bookmarks = self.bookmarks;

        ReaderSession::new(state)
    }
}
