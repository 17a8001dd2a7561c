//! Reading-session state machine
//!
//! A single-state machine: every event has a defined effect while reading,
//! and there is no terminal state. [`reduce`] is a pure function over
//! `(state, event)` with no I/O; anything that needs to outlive the session
//! is persisted by a [`ReaderObserver`] registered on the [`ReaderSession`],
//! which watches the state change and writes out of band. Mutations apply
//! optimistically; there is no rollback if a write later fails.

use crate::reader::types::{
    Bookmark, BookmarkDraft, Highlight, HighlightDraft, ProgressUpdate, ReaderState,
};

/// Events accepted while reading
#[derive(Debug, Clone)]
pub enum ReaderEvent {
    NextPage,
    PrevPage,
    JumpToPage(u32),
    AddHighlight(HighlightDraft),
    DeleteHighlight(String),
    UpdateHighlightNote { id: String, note: String },
    AddBookmark(BookmarkDraft),
    DeleteBookmark(String),
    SetActiveItem(Option<String>),
}

/// Apply one event to the session state
///
/// Total over [`ReaderEvent`]: navigation clamps into `[1, max_page]`,
/// deletes of absent ids leave the state unchanged, and note updates on
/// absent highlights are ignored.
pub fn reduce(state: ReaderState, event: ReaderEvent) -> ReaderState {
    let mut state = state;
    match event {
        ReaderEvent::NextPage => {
            // max(1) keeps the reducer total even on a hand-built state that
            // violated the max_page >= 1 invariant
            state.current_page = state
                .current_page
                .saturating_add(1)
                .min(state.max_page.max(1));
        }
        ReaderEvent::PrevPage => {
            state.current_page = state.current_page.saturating_sub(1).max(1);
        }
        ReaderEvent::JumpToPage(page) => {
            state.current_page = page.clamp(1, state.max_page.max(1));
        }
        ReaderEvent::AddHighlight(draft) => {
            state.highlights.push(Highlight::from_draft(draft));
        }
        ReaderEvent::DeleteHighlight(id) => {
            state.highlights.retain(|h| h.id != id);
        }
        ReaderEvent::UpdateHighlightNote { id, note } => {
            match state.highlights.iter_mut().find(|h| h.id == id) {
                Some(highlight) => highlight.note = Some(note),
                None => tracing::debug!(id, "note update for unknown highlight, ignoring"),
            }
        }
        ReaderEvent::AddBookmark(draft) => {
            state.bookmarks.push(Bookmark::from_draft(draft));
        }
        ReaderEvent::DeleteBookmark(id) => {
            state.bookmarks.retain(|b| b.id != id);
        }
        ReaderEvent::SetActiveItem(id) => {
            state.active_item_id = id;
        }
    }
    state
}

/// Collaborator seam: persistence hooks invoked after state changes
///
/// All methods default to no-ops so an observer only implements the writes
/// it cares about.
pub trait ReaderObserver {
    fn progress_changed(&mut self, _progress: &ProgressUpdate) {}
    fn highlight_added(&mut self, _highlight: &Highlight) {}
    fn highlight_deleted(&mut self, _id: &str) {}
    fn note_updated(&mut self, _id: &str, _note: &str) {}
    fn bookmark_added(&mut self, _bookmark: &Bookmark) {}
    fn bookmark_deleted(&mut self, _id: &str) {}
}

/// Owns the session state and distributes changes to observers
///
/// The session is the dependency-injection point for reading state: callers
/// hold the session, dispatch events through it, and register observers for
/// persistence. There is no global instance.
pub struct ReaderSession {
    state: ReaderState,
    observers: Vec<Box<dyn ReaderObserver>>,
}

impl ReaderSession {
    pub fn new(state: ReaderState) -> Self {
        Self {
            state,
            observers: Vec::new(),
        }
    }

    pub fn observe(&mut self, observer: Box<dyn ReaderObserver>) {
        self.observers.push(observer);
    }

    pub fn state(&self) -> &ReaderState {
        &self.state
    }

    /// Run one event through the reducer and notify observers of what changed
    ///
    /// Effective changes only: a navigation event clamped back to the same
    /// page, or a delete of an absent id, notifies nobody.
    pub fn dispatch(&mut self, event: ReaderEvent) {
        tracing::trace!(?event, "dispatch");
        let previous = self.state.clone();
        self.state = reduce(previous.clone(), event);
        self.notify(&previous);
    }

    fn notify(&mut self, previous: &ReaderState) {
        let state = &self.state;

        if state.current_page != previous.current_page {
            let progress = state.progress();
            for observer in &mut self.observers {
                observer.progress_changed(&progress);
            }
        }

        if state.highlights.len() > previous.highlights.len() {
            // Adds append, so the new entry is last
            if let Some(added) = state.highlights.last() {
                for observer in &mut self.observers {
                    observer.highlight_added(added);
                }
            }
        }
        for gone in previous
            .highlights
            .iter()
            .filter(|h| !state.highlights.iter().any(|cur| cur.id == h.id))
        {
            for observer in &mut self.observers {
                observer.highlight_deleted(&gone.id);
            }
        }
        for (before, after) in previous.highlights.iter().filter_map(|h| {
            state
                .highlights
                .iter()
                .find(|cur| cur.id == h.id)
                .map(|cur| (h, cur))
        }) {
            if before.note != after.note {
                let note = after.note.as_deref().unwrap_or_default();
                for observer in &mut self.observers {
                    observer.note_updated(&after.id, note);
                }
            }
        }

        if state.bookmarks.len() > previous.bookmarks.len() {
            if let Some(added) = state.bookmarks.last() {
                for observer in &mut self.observers {
                    observer.bookmark_added(added);
                }
            }
        }
        for gone in previous
            .bookmarks
            .iter()
            .filter(|b| !state.bookmarks.iter().any(|cur| cur.id == b.id))
        {
            for observer in &mut self.observers {
                observer.bookmark_deleted(&gone.id);
            }
        }
    }
}
