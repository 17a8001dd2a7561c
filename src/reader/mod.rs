//! Reading session
//!
//! A reading session is a pure reducer over `(state, event)` pairs
//! ([`session`]), plus the collaborator seam that observes state changes and
//! persists them out of band. UI preferences ([`prefs`]) are an independent
//! controller with no coupling to session state.

pub mod prefs;
mod session;
mod types;

pub use prefs::ReaderPreferences;
pub use session::{reduce, ReaderEvent, ReaderObserver, ReaderSession};
pub use types::{Bookmark, BookmarkDraft, Highlight, HighlightDraft, ProgressUpdate, ReaderState};
