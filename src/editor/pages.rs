//! Page editor
//!
//! Owns the ordered page collection for one ebook while it is being authored.
//! Every mutation keeps the position invariant (dense, 1-based, matching
//! array order) and reports the full page slice to the `on_change` callback,
//! which is where the surrounding application persists.
//!
//! Lookups by id degrade to no-ops on miss: a stale id means the UI and the
//! collection drifted apart, not a domain violation, so nothing is surfaced
//! beyond a debug log.

use crate::content::{Block, BlockKind, Page};
use crate::editor::BlockPatch;

/// Callback invoked with the full page slice after every effective mutation
pub type PagesChanged = Box<dyn FnMut(&[Page]) + Send>;

/// Stateful editor over an ebook's pages
pub struct PageEditor {
    pages: Vec<Page>,
    editable: bool,
    on_change: Option<PagesChanged>,
}

impl PageEditor {
    /// Create an editor over an existing page collection
    ///
    /// Page and block positions are renumbered up front so the invariant
    /// holds even if the loaded collection arrived with gaps.
    pub fn new(pages: Vec<Page>, editable: bool) -> Self {
        let mut editor = Self {
            pages,
            editable,
            on_change: None,
        };
        editor.renumber_pages();
        for page in &mut editor.pages {
            page.renumber_blocks();
        }
        editor
    }

    /// Register the persistence callback
    pub fn on_change(&mut self, callback: PagesChanged) {
        self.on_change = Some(callback);
    }

    /// Current pages, in order
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// Find a page by id
    pub fn page(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    /// Append a new empty page; returns its id
    pub fn add_page(&mut self) -> Option<String> {
        if !self.check_editable() {
            return None;
        }

        let page = Page::new(self.pages.len() as u32 + 1);
        let id = page.id.clone();
        self.pages.push(page);
        self.notify();
        Some(id)
    }

    /// Append a default block of the given kind to a page; returns its id
    pub fn add_block(&mut self, page_id: &str, kind: BlockKind) -> Option<String> {
        if !self.check_editable() {
            return None;
        }

        let Some(page) = self.page_mut(page_id) else {
            tracing::debug!(page_id, "add_block on unknown page, ignoring");
            return None;
        };

        let block = Block::new(kind, page.blocks.len() as u32 + 1);
        let id = block.id.clone();
        page.blocks.push(block);
        self.notify();
        Some(id)
    }

    /// Merge a patch onto a block, preserving its type discriminant
    pub fn update_block(&mut self, page_id: &str, block_id: &str, patch: BlockPatch) {
        if !self.check_editable() {
            return;
        }

        let Some(block) = self
            .page_mut(page_id)
            .and_then(|page| page.block_mut(block_id))
        else {
            tracing::debug!(page_id, block_id, "update_block target not found, ignoring");
            return;
        };

        if block.apply(patch) {
            self.notify();
        }
    }

    /// Remove a block and renumber its siblings
    pub fn remove_block(&mut self, page_id: &str, block_id: &str) {
        if !self.check_editable() {
            return;
        }

        let Some(page) = self.page_mut(page_id) else {
            tracing::debug!(page_id, "remove_block on unknown page, ignoring");
            return;
        };

        let before = page.blocks.len();
        page.blocks.retain(|b| b.id != block_id);
        if page.blocks.len() == before {
            tracing::debug!(block_id, "remove_block on unknown block, ignoring");
            return;
        }

        page.renumber_blocks();
        self.notify();
    }

    /// Remove a page and renumber the remainder
    pub fn remove_page(&mut self, page_id: &str) {
        if !self.check_editable() {
            return;
        }

        let before = self.pages.len();
        self.pages.retain(|p| p.id != page_id);
        if self.pages.len() == before {
            tracing::debug!(page_id, "remove_page on unknown page, ignoring");
            return;
        }

        self.renumber_pages();
        self.notify();
    }

    /// Replace a page's title
    pub fn update_page_title(&mut self, page_id: &str, title: &str) {
        if !self.check_editable() {
            return;
        }

        let Some(page) = self.page_mut(page_id) else {
            tracing::debug!(page_id, "update_page_title on unknown page, ignoring");
            return;
        };

        page.title = title.to_string();
        self.notify();
    }

    /// Move a page from one index to another (drag end)
    ///
    /// Out-of-range indices are a no-op. All page positions are renumbered to
    /// match the new order.
    pub fn move_page(&mut self, from: usize, to: usize) {
        if !self.check_editable() {
            return;
        }
        if from == to || from >= self.pages.len() || to >= self.pages.len() {
            tracing::debug!(from, to, "move_page out of range, ignoring");
            return;
        }

        let page = self.pages.remove(from);
        self.pages.insert(to, page);
        self.renumber_pages();
        self.notify();
    }

    /// Move a block within a page from one index to another (drag end)
    pub fn move_block(&mut self, page_id: &str, from: usize, to: usize) {
        if !self.check_editable() {
            return;
        }

        let Some(page) = self.page_mut(page_id) else {
            tracing::debug!(page_id, "move_block on unknown page, ignoring");
            return;
        };
        if from == to || from >= page.blocks.len() || to >= page.blocks.len() {
            tracing::debug!(from, to, "move_block out of range, ignoring");
            return;
        }

        let block = page.blocks.remove(from);
        page.blocks.insert(to, block);
        page.renumber_blocks();
        self.notify();
    }

    fn page_mut(&mut self, page_id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == page_id)
    }

    fn renumber_pages(&mut self) {
        for (index, page) in self.pages.iter_mut().enumerate() {
            page.position = index as u32 + 1;
        }
    }

    fn check_editable(&self) -> bool {
        if !self.editable {
            tracing::debug!("editor is read-only, ignoring mutation");
        }
        self.editable
    }

    fn notify(&mut self) {
        if let Some(callback) = &mut self.on_change {
            callback(&self.pages);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn editor_with_pages(count: usize) -> PageEditor {
        let pages = (0..count).map(|i| Page::new(i as u32 + 1)).collect();
        PageEditor::new(pages, true)
    }

    #[test]
    fn test_add_page_appends_with_next_position() {
        let mut editor = editor_with_pages(2);
        let id = editor.add_page().unwrap();

        assert_eq!(editor.pages().len(), 3);
        let added = editor.page(&id).unwrap();
        assert_eq!(added.position, 3);
        assert_eq!(added.title, "Untitled Page");
        assert!(added.blocks.is_empty());
    }

    #[test]
    fn test_add_block_appends_default() {
        let mut editor = editor_with_pages(1);
        let page_id = editor.pages()[0].id.clone();

        let block_id = editor.add_block(&page_id, BlockKind::Code).unwrap();
        let page = editor.page(&page_id).unwrap();
        assert_eq!(page.blocks.len(), 1);
        assert_eq!(page.blocks[0].id, block_id);
        assert_eq!(page.blocks[0].position, 1);
        assert_eq!(page.blocks[0].label(), "Code");
    }

    #[test]
    fn test_add_block_to_unknown_page_is_noop() {
        let mut editor = editor_with_pages(1);
        assert!(editor.add_block("nope", BlockKind::Paragraph).is_none());
        assert!(editor.pages()[0].blocks.is_empty());
    }

    #[test]
    fn test_remove_block_renumbers_survivors() {
        let mut editor = editor_with_pages(1);
        let page_id = editor.pages()[0].id.clone();
        editor.add_block(&page_id, BlockKind::Paragraph);
        let middle = editor.add_block(&page_id, BlockKind::Heading).unwrap();
        editor.add_block(&page_id, BlockKind::Image);

        editor.remove_block(&page_id, &middle);

        let page = editor.page(&page_id).unwrap();
        let positions: Vec<u32> = page.blocks.iter().map(|b| b.position).collect();
        assert_eq!(positions, vec![1, 2]);
        assert_eq!(page.blocks[0].label(), "Paragraph");
        assert_eq!(page.blocks[1].label(), "Image");
    }

    #[test]
    fn test_remove_page_renumbers_remainder() {
        let mut editor = editor_with_pages(3);
        let first_id = editor.pages()[0].id.clone();
        let last_id = editor.pages()[2].id.clone();

        editor.remove_page(&first_id);

        let positions: Vec<u32> = editor.pages().iter().map(|p| p.position).collect();
        assert_eq!(positions, vec![1, 2]);
        assert_eq!(editor.pages()[1].id, last_id);
    }

    #[test]
    fn test_move_block_renumbers_in_new_order() {
        let mut editor = editor_with_pages(1);
        let page_id = editor.pages()[0].id.clone();
        let a = editor.add_block(&page_id, BlockKind::Paragraph).unwrap();
        let b = editor.add_block(&page_id, BlockKind::Heading).unwrap();
        let c = editor.add_block(&page_id, BlockKind::Image).unwrap();

        // Drag the third block to the front
        editor.move_block(&page_id, 2, 0);

        let page = editor.page(&page_id).unwrap();
        let ids: Vec<&str> = page.blocks.iter().map(|blk| blk.id.as_str()).collect();
        let positions: Vec<u32> = page.blocks.iter().map(|blk| blk.position).collect();
        assert_eq!(ids, vec![c.as_str(), a.as_str(), b.as_str()]);
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn test_move_page_out_of_range_is_noop() {
        let mut editor = editor_with_pages(2);
        let order: Vec<String> = editor.pages().iter().map(|p| p.id.clone()).collect();

        editor.move_page(0, 5);

        let after: Vec<String> = editor.pages().iter().map(|p| p.id.clone()).collect();
        assert_eq!(order, after);
    }

    #[test]
    fn test_read_only_rejects_all_mutations() {
        let pages = vec![Page::new(1)];
        let page_id = pages[0].id.clone();
        let mut editor = PageEditor::new(pages, false);

        assert!(editor.add_page().is_none());
        assert!(editor.add_block(&page_id, BlockKind::Paragraph).is_none());
        editor.update_page_title(&page_id, "changed");
        editor.remove_page(&page_id);

        assert_eq!(editor.pages().len(), 1);
        assert_eq!(editor.pages()[0].title, "Untitled Page");
    }

    #[test]
    fn test_on_change_fires_per_effective_mutation() {
        let mut editor = editor_with_pages(1);
        let page_id = editor.pages()[0].id.clone();

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        editor.on_change(Box::new(move |_pages| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        editor.add_page();
        editor.update_page_title(&page_id, "Chapter 1");
        // Miss: should not notify
        editor.remove_block(&page_id, "missing-block");

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_new_renumbers_gapped_input() {
        let mut first = Page::new(4);
        first.title = "a".to_string();
        let second = Page::new(9);
        let editor = PageEditor::new(vec![first, second], true);

        let positions: Vec<u32> = editor.pages().iter().map(|p| p.position).collect();
        assert_eq!(positions, vec![1, 2]);
    }

    #[test]
    fn test_new_renumbers_gapped_blocks() {
        let mut page = Page::new(1);
        page.blocks = vec![
            Block::new(BlockKind::Paragraph, 3),
            Block::new(BlockKind::Heading, 8),
        ];
        let editor = PageEditor::new(vec![page], false);

        let positions: Vec<u32> = editor.pages()[0].blocks.iter().map(|b| b.position).collect();
        assert_eq!(positions, vec![1, 2]);
    }
}
