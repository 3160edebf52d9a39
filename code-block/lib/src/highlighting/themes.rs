//! Token color themes for the panel surface.
//!
//! The panel always paints its own dark surface (`#181818` by default), so
//! only themes whose foreground reads on a dark background are offered.
//! Every entry maps onto a theme bundled with `two-face`.

use lazy_static::lazy_static;
use syntect::highlighting::Theme as SyntectTheme;
use two_face::theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes};

use crate::error::CodeBlockError;

/// Environment variable naming the token theme for code panels.
pub const THEME_ENV_VAR: &str = "CODE_BLOCK_THEME";

/// Token color theme for a panel.
///
/// ## Examples
///
/// ```
/// use code_block::CodeTheme;
///
/// let theme = CodeTheme::try_from("one-half").unwrap();
/// assert_eq!(theme, CodeTheme::OneHalf);
/// assert_eq!(theme.name(), "one-half");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodeTheme {
    /// Warm Monokai tokens, the documentation site's look.
    #[default]
    Monokai,
    Dracula,
    Nord,
    OneHalf,
    Gruvbox,
    TwoDark,
}

/// One row of the theme catalogue.
struct CatalogueEntry {
    theme: CodeTheme,
    name: &'static str,
    aliases: &'static [&'static str],
    embedded: EmbeddedThemeName,
    blurb: &'static str,
}

const CATALOGUE: &[CatalogueEntry] = &[
    CatalogueEntry {
        theme: CodeTheme::Monokai,
        name: "monokai",
        aliases: &["monokai-extended"],
        embedded: EmbeddedThemeName::MonokaiExtended,
        blurb: "default panel look; yellow strings and pink keywords on the flat surface",
    },
    CatalogueEntry {
        theme: CodeTheme::Dracula,
        name: "dracula",
        aliases: &[],
        embedded: EmbeddedThemeName::Dracula,
        blurb: "purple keywords with green strings; loudest of the set",
    },
    CatalogueEntry {
        theme: CodeTheme::Nord,
        name: "nord",
        aliases: &[],
        embedded: EmbeddedThemeName::Nord,
        blurb: "muted frost blues; suits long panels read in one sitting",
    },
    CatalogueEntry {
        theme: CodeTheme::OneHalf,
        name: "one-half",
        aliases: &["onehalf", "one-half-dark"],
        embedded: EmbeddedThemeName::OneHalfDark,
        blurb: "Atom-style palette; the dimmed lines keep the most contrast",
    },
    CatalogueEntry {
        theme: CodeTheme::Gruvbox,
        name: "gruvbox",
        aliases: &["gruvbox-dark"],
        embedded: EmbeddedThemeName::GruvboxDark,
        blurb: "earthy oranges; pairs with sites that avoid pure blue",
    },
    CatalogueEntry {
        theme: CodeTheme::TwoDark,
        name: "two-dark",
        aliases: &["twodark"],
        embedded: EmbeddedThemeName::TwoDark,
        blurb: "cool blues and reds close to common editor defaults",
    },
];

impl CodeTheme {
    fn entry(self) -> &'static CatalogueEntry {
        CATALOGUE
            .iter()
            .find(|entry| entry.theme == self)
            .unwrap_or(&CATALOGUE[0])
    }

    /// Kebab-case name accepted by `--theme` and `CODE_BLOCK_THEME`.
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// One-line note on how the theme sits on the panel.
    pub fn description(self) -> &'static str {
        self.entry().blurb
    }

    /// Every theme, default first.
    pub fn all() -> impl Iterator<Item = CodeTheme> {
        CATALOGUE.iter().map(|entry| entry.theme)
    }

    /// Parses a theme name, returning the default theme on failure.
    ///
    /// ## Examples
    ///
    /// ```
    /// use code_block::CodeTheme;
    ///
    /// assert_eq!(CodeTheme::from_str_or_default("nord"), CodeTheme::Nord);
    /// assert_eq!(CodeTheme::from_str_or_default("neon"), CodeTheme::Monokai);
    /// ```
    pub fn from_str_or_default(s: &str) -> Self {
        Self::try_from(s).unwrap_or_default()
    }
}

impl TryFrom<&str> for CodeTheme {
    type Error = CodeBlockError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        CATALOGUE
            .iter()
            .find(|entry| entry.name == wanted || entry.aliases.contains(&wanted.as_str()))
            .map(|entry| entry.theme)
            .ok_or_else(|| CodeBlockError::InvalidThemeName(s.to_string()))
    }
}

lazy_static! {
    static ref THEME_SET: EmbeddedLazyThemeSet = extra_themes();
}

/// Loads the syntect theme behind `theme`.
pub(crate) fn load_theme(theme: CodeTheme) -> SyntectTheme {
    THEME_SET.get(theme.entry().embedded).clone()
}

/// Reads the token theme from `CODE_BLOCK_THEME`.
///
/// Unknown names fall back to the default theme with a warning.
pub fn detect_code_theme() -> CodeTheme {
    let Ok(value) = std::env::var(THEME_ENV_VAR) else {
        return CodeTheme::default();
    };

    match CodeTheme::try_from(value.as_str()) {
        Ok(theme) => {
            tracing::info!(theme = theme.name(), env_var = THEME_ENV_VAR, "Using code theme from environment");
            theme
        }
        Err(_) => {
            tracing::warn!(value = %value, env_var = THEME_ENV_VAR, "Unknown code theme, using default");
            CodeTheme::default()
        }
    }
}
