//! Renderer options.
//!
//! Options are plain values with defaults that reproduce the documentation
//! site's panel. [`RenderOptions::from_env`] layers `CODE_BLOCK_THEME` on top
//! of the defaults.

use crate::highlighting::{CodeTheme, detect_code_theme};
use crate::lines::DEFAULT_CACHE_CAPACITY;
use crate::style::PanelStyle;

/// Options shared by every panel a renderer produces.
///
/// ## Examples
///
/// ```
/// use code_block::{CodeTheme, RenderOptions};
///
/// let options = RenderOptions {
///     theme: CodeTheme::Gruvbox,
///     ..Default::default()
/// };
/// assert_eq!(options.theme, CodeTheme::Gruvbox);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Token colors.
    pub theme: CodeTheme,
    /// Panel, gutter and line-number constants.
    pub panel: PanelStyle,
    /// Distinct highlight specifications memoized before the cache resets.
    pub line_cache_capacity: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: CodeTheme::default(),
            panel: PanelStyle::default(),
            line_cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl RenderOptions {
    /// Defaults with the theme read from `CODE_BLOCK_THEME`.
    pub fn from_env() -> Self {
        Self {
            theme: detect_code_theme(),
            ..Default::default()
        }
    }

    pub fn with_theme(mut self, theme: CodeTheme) -> Self {
        self.theme = theme;
        self
    }
}
