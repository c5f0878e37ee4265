//! Highlight-role color themes
//!
//! Cores speak in semantic [`HighlightRole`]s; the theme is the single place
//! where roles become colors. Projectors never hardcode a color.

use serde::{Deserialize, Serialize};
use stepscope_core::HighlightRole;

use crate::scene::Color;

/// Color assignment for every role a step can carry, plus the neutral
/// colors scenes are built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Un-highlighted elements.
    pub base: Color,
    /// [`HighlightRole::Primary`].
    pub primary: Color,
    /// [`HighlightRole::Secondary`].
    pub secondary: Color,
    /// [`HighlightRole::Eliminated`].
    pub eliminated: Color,
    /// [`HighlightRole::Result`].
    pub result: Color,
    /// Scene background.
    pub background: Color,
    /// Label text.
    pub text: Color,
}

impl Theme {
    /// Dark default theme.
    pub fn dark() -> Self {
        Self {
            base: Color::rgb(96, 112, 128),
            primary: Color::rgb(255, 179, 0),
            secondary: Color::rgb(66, 165, 245),
            eliminated: Color::rgba(96, 112, 128, 90),
            result: Color::rgb(102, 187, 106),
            background: Color::rgb(18, 20, 24),
            text: Color::rgb(230, 234, 238),
        }
    }

    /// Color for an element carrying `role`, falling back to the base color.
    pub fn color_for(&self, role: Option<HighlightRole>) -> Color {
        match role {
            None => self.base,
            Some(HighlightRole::Primary) => self.primary,
            Some(HighlightRole::Secondary) => self.secondary,
            Some(HighlightRole::Eliminated) => self.eliminated,
            Some(HighlightRole::Result) => self.result,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
