//! Librillo
//!
//! The authoring and reading core of an ebook platform: the page/block
//! content model, the page editor, and the reading-session state machine.
//!
//! This crate owns no wire protocol and performs no I/O. Its boundary is the
//! JSON dataset the surrounding application loads into it ([`dataset`]) and
//! the observer callbacks it emits when state changes ([`reader`]).
//! Persistence is the collaborator's job.
//!
//! # Modules
//!
//! - `content`: block/page/ebook content model (tagged block variants)
//! - `editor`: block patching and the page editor (ordering, CRUD)
//! - `reader`: reading-session reducer, observers, and UI preferences
//! - `dataset`: the load payload exchanged with the surrounding application

pub mod content;
pub mod dataset;
pub mod editor;
pub mod error;
pub mod reader;

pub use error::{CoreError, Result};
