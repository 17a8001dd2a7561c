//! Ebook aggregate
//!
//! Metadata plus the ordered page collection. The stored `page_count` column
//! is what the catalog listing was last told; the pages themselves are the
//! source of truth for anything reader-facing, so display paths should use
//! [`Ebook::actual_page_count`]. The two are not reconciled automatically.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Page;

/// Average adult reading speed, used for the reading-time estimate
const WORDS_PER_MINUTE: usize = 200;

/// An ebook: metadata and its ordered pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ebook {
    /// Unique identifier
    pub id: String,

    /// Ebook title
    pub title: String,

    /// Description/summary shown on the store page
    pub description: Option<String>,

    /// Cover image URL
    pub cover_url: Option<String>,

    /// Page count as stored in the catalog (not auto-synced to `pages`)
    pub page_count: u32,

    /// Language code (e.g., "en", "es")
    pub language: Option<String>,

    /// Price in the store's base currency
    pub price: f64,

    /// Publication status
    pub status: EbookStatus,

    /// Ordered pages; positions are dense and 1-based
    #[serde(default)]
    pub pages: Vec<Page>,

    /// When the ebook was created
    pub created_at: DateTime<Utc>,

    /// When the ebook was last updated
    pub updated_at: DateTime<Utc>,
}

/// Publication status of an ebook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EbookStatus {
    Draft,
    Published,
    Archived,
}

impl Ebook {
    /// Create a new draft ebook with no pages
    pub fn new(title: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: None,
            cover_url: None,
            page_count: 0,
            language: None,
            price: 0.0,
            status: EbookStatus::Draft,
            pages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Number of pages actually present, regardless of the stored count
    pub fn actual_page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_published(&self) -> bool {
        self.status == EbookStatus::Published
    }

    /// Total words across all text-bearing blocks
    pub fn word_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|page| page.blocks.iter())
            .map(|block| block.text_content().split_whitespace().count())
            .sum()
    }

    /// Rough reading time, never reported as less than a minute
    pub fn estimated_reading_minutes(&self) -> usize {
        (self.word_count() / WORDS_PER_MINUTE).max(1)
    }
}
