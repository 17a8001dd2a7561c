//! Reader UI preferences
//!
//! Independent of session state and not persisted by the core: sidebar
//! visibility, font size, line height. Every setter clamps; nothing is ever
//! rejected.

use serde::{Deserialize, Serialize};

pub const FONT_SIZE_MIN: u8 = 12;
pub const FONT_SIZE_MAX: u8 = 24;
pub const FONT_SIZE_STEP: u8 = 1;

pub const LINE_HEIGHT_MIN: f32 = 1.0;
pub const LINE_HEIGHT_MAX: f32 = 2.5;
pub const LINE_HEIGHT_STEP: f32 = 0.1;

/// Per-view reading preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderPreferences {
    pub font_size: u8,
    pub line_height: f32,
    pub sidebar_open: bool,
}

impl Default for ReaderPreferences {
    fn default() -> Self {
        Self {
            font_size: 16,
            line_height: 1.5,
            sidebar_open: false,
        }
    }
}

impl ReaderPreferences {
    pub fn set_font_size(&mut self, size: u8) {
        self.font_size = size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX);
    }

    pub fn increase_font_size(&mut self) {
        self.set_font_size(self.font_size.saturating_add(FONT_SIZE_STEP));
    }

    pub fn decrease_font_size(&mut self) {
        self.set_font_size(self.font_size.saturating_sub(FONT_SIZE_STEP));
    }

    pub fn set_line_height(&mut self, height: f32) {
        self.line_height = height.clamp(LINE_HEIGHT_MIN, LINE_HEIGHT_MAX);
    }

    pub fn increase_line_height(&mut self) {
        self.set_line_height(self.line_height + LINE_HEIGHT_STEP);
    }

    pub fn decrease_line_height(&mut self) {
        self.set_line_height(self.line_height - LINE_HEIGHT_STEP);
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }
}
