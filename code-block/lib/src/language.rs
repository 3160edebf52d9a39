//! Language tag resolution.
//!
//! A panel's language comes from, in order: an explicit `lang` prop, a
//! CSS-class-like fallback (`language-python`), or the JavaScript default.
//! JSX and TSX are highlighted with the plain JavaScript and TypeScript
//! grammars.
//!
//! Unknown tags are not an error. They are handed to the highlighter as-is and
//! end up rendered as plain text.

/// Prefix stripped from a class name to derive a language tag.
pub const CLASS_NAME_PREFIX: &str = "language-";

/// Tag used when neither `lang` nor a class name is provided.
pub const DEFAULT_LANGUAGE_TAG: &str = "js";

/// Tag for shell transcripts; panels with this tag render without line numbers.
pub const CLI_TAG: &str = "cli";

/// The languages with a registered grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Sql,
}

impl Language {
    /// Returns the short tag the language is registered under.
    ///
    /// ## Examples
    ///
    /// ```
    /// use code_block::language::Language;
    ///
    /// assert_eq!(Language::Python.tag(), "py");
    /// ```
    pub fn tag(self) -> &'static str {
        match self {
            Language::JavaScript => "js",
            Language::TypeScript => "ts",
            Language::Python => "py",
            Language::Sql => "sql",
        }
    }

    /// Looks up a language by its short tag or its long name.
    ///
    /// ## Examples
    ///
    /// ```
    /// use code_block::language::Language;
    ///
    /// assert_eq!(Language::from_tag("ts"), Some(Language::TypeScript));
    /// assert_eq!(Language::from_tag("python"), Some(Language::Python));
    /// assert_eq!(Language::from_tag("rust"), None);
    /// ```
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "js" | "javascript" => Some(Language::JavaScript),
            "ts" | "typescript" => Some(Language::TypeScript),
            "py" | "python" => Some(Language::Python),
            "sql" => Some(Language::Sql),
            _ => None,
        }
    }

    /// Long-name aliases registered alongside the short tag.
    pub(crate) fn aliases(self) -> &'static [&'static str] {
        match self {
            Language::JavaScript => &["javascript"],
            Language::TypeScript => &["typescript"],
            Language::Python => &["python"],
            Language::Sql => &[],
        }
    }

    /// Name of the grammar in the two-face syntax set.
    pub(crate) fn syntax_name(self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Python => "Python",
            Language::Sql => "SQL",
        }
    }

    /// Returns every language with a registered grammar.
    pub fn all() -> &'static [Language] {
        &[
            Language::JavaScript,
            Language::TypeScript,
            Language::Python,
            Language::Sql,
        ]
    }
}

/// Resolves the effective language tag for a panel.
///
/// Empty strings count as absent. The JSX/TSX aliases are normalized no
/// matter which source the tag came from.
///
/// ## Examples
///
/// ```
/// use code_block::resolve_language;
///
/// assert_eq!(resolve_language(Some("jsx"), None), "js");
/// assert_eq!(resolve_language(None, Some("language-python")), "python");
/// assert_eq!(resolve_language(None, None), "js");
/// ```
pub fn resolve_language(lang: Option<&str>, class_name: Option<&str>) -> String {
    let lang = lang.filter(|l| !l.is_empty());
    let class_name = class_name.filter(|c| !c.is_empty());

    let tag = match (lang, class_name) {
        (Some(lang), _) => lang.to_string(),
        (None, Some(class_name)) => class_name.replacen(CLASS_NAME_PREFIX, "", 1),
        (None, None) => DEFAULT_LANGUAGE_TAG.to_string(),
    };

    let resolved = normalize_alias(tag);
    tracing::debug!(
        lang = lang,
        class_name = class_name,
        resolved = %resolved,
        "Resolved language tag"
    );
    resolved
}

/// JSX and TSX are highlighted with their base grammars.
fn normalize_alias(tag: String) -> String {
    match tag.as_str() {
        "jsx" => "js".to_string(),
        "tsx" => "ts".to_string(),
        _ => tag,
    }
}
