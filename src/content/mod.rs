//! Content model
//!
//! The closed set of block variants that make up a page, the page container,
//! and the ebook aggregate. Blocks are discriminated by a `type` tag on the
//! wire; in Rust the tag is the [`BlockBody`] enum, so variant dispatch is
//! exhaustive at compile time.

mod ebook;
mod types;

pub use ebook::{Ebook, EbookStatus};
pub use types::{Block, BlockBody, BlockKind, BlockStyle, FontWeight, Page, TextAlign};
