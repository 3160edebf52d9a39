//! Syntax highlighting infrastructure for code panels.
//!
//! Grammar registration happens once per process (see [`LanguageRegistry`]);
//! a [`CodeHighlighter`] only holds the theme chosen for a renderer.

mod grammars;
mod themes;

pub use grammars::{LanguageRegistry, registration_count};
pub use themes::{CodeTheme, THEME_ENV_VAR, detect_code_theme};

use syntect::highlighting::{Color, Theme as SyntectTheme};
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Fallback foreground when a theme does not define one.
const DEFAULT_FOREGROUND: Color = Color { r: 248, g: 248, b: 242, a: 255 };

/// Fallback background when a theme does not define one.
const DEFAULT_BACKGROUND: Color = Color { r: 39, g: 40, b: 34, a: 255 };

/// A loaded theme plus access to the shared grammars.
///
/// ## Examples
///
/// ```
/// use code_block::highlighting::CodeHighlighter;
/// use code_block::CodeTheme;
///
/// let highlighter = CodeHighlighter::new(CodeTheme::Nord);
/// assert_eq!(highlighter.syntax_for("py").name, "Python");
/// ```
#[derive(Debug)]
pub struct CodeHighlighter {
    theme: SyntectTheme,
    code_theme: CodeTheme,
}

impl CodeHighlighter {
    /// Creates a highlighter coloring tokens with `code_theme`.
    pub fn new(code_theme: CodeTheme) -> Self {
        Self {
            theme: themes::load_theme(code_theme),
            code_theme,
        }
    }

    /// Returns the shared syntax set.
    pub fn syntax_set(&self) -> &'static SyntaxSet {
        LanguageRegistry::global().syntax_set()
    }

    /// Returns the grammar registered for a tag, plain text otherwise.
    pub fn syntax_for(&self, tag: &str) -> &'static SyntaxReference {
        LanguageRegistry::global().syntax_for(tag)
    }

    /// Returns a reference to the current theme.
    pub fn theme(&self) -> &SyntectTheme {
        &self.theme
    }

    pub fn code_theme(&self) -> CodeTheme {
        self.code_theme
    }

    /// The theme's default text color.
    pub fn foreground(&self) -> Color {
        self.theme.settings.foreground.unwrap_or(DEFAULT_FOREGROUND)
    }

    /// The theme's background color.
    pub fn background(&self) -> Color {
        self.theme.settings.background.unwrap_or(DEFAULT_BACKGROUND)
    }
}

impl Default for CodeHighlighter {
    fn default() -> Self {
        Self::new(CodeTheme::default())
    }
}

/// Formats a syntect color as a CSS hex color.
pub fn css_hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}
