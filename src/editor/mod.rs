//! Authoring editor
//!
//! Stateless block patching ([`blocks`]) and the stateful page editor
//! ([`pages`]) that owns the ordered page/block collections.

mod blocks;
mod pages;

pub use blocks::BlockPatch;
pub use pages::{PageEditor, PagesChanged};
