//! Input configuration for a single code panel.

use serde::Deserialize;

use crate::error::CodeBlockResult;

/// Cosmetic size hint.
///
/// Accepted for compatibility with existing callers; every size currently
/// renders at the standard scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    #[default]
    Medium,
    Large,
}

impl TryFrom<&str> for Size {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "small" => Ok(Size::Small),
            "medium" => Ok(Size::Medium),
            "large" => Ok(Size::Large),
            other => Err(format!("unknown size '{other}' (expected small, medium or large)")),
        }
    }
}

/// Props for one panel.
///
/// Field names deserialize in camelCase so props written for a web page can
/// be loaded unchanged.
///
/// ## Examples
///
/// ```
/// use code_block::CodeBlockProps;
///
/// let props = CodeBlockProps::from_json(
///     r#"{ "lang": "sql", "children": "SELECT 1;", "highlightLines": "1" }"#,
/// ).unwrap();
/// assert_eq!(props.lang.as_deref(), Some("sql"));
/// assert_eq!(props.highlight_lines.as_deref(), Some("1"));
/// assert!(!props.hide_copy);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodeBlockProps {
    /// Explicit language tag.
    pub lang: Option<String>,
    /// Class-name fallback such as `language-python`.
    pub class_name: Option<String>,
    /// First displayed line number; defaults to 1.
    pub starting_line_number: Option<usize>,
    /// Suppresses the copy control.
    pub hide_copy: bool,
    pub size: Option<Size>,
    /// Highlight specification, e.g. `"3,5,9..12"`.
    pub highlight_lines: Option<String>,
    /// The source text.
    pub children: Option<String>,
}

impl CodeBlockProps {
    /// Creates props for a snippet with every option unset.
    pub fn new(children: impl Into<String>) -> Self {
        Self {
            children: Some(children.into()),
            ..Default::default()
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_starting_line_number(mut self, line: usize) -> Self {
        self.starting_line_number = Some(line);
        self
    }

    pub fn with_hide_copy(mut self, hide_copy: bool) -> Self {
        self.hide_copy = hide_copy;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_highlight_lines(mut self, spec: impl Into<String>) -> Self {
        self.highlight_lines = Some(spec.into());
        self
    }

    /// Parses props from JSON.
    ///
    /// ## Errors
    ///
    /// Returns `CodeBlockError::PropsParse` if the JSON does not match the props shape.
    pub fn from_json(json: &str) -> CodeBlockResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses props from YAML.
    ///
    /// ## Errors
    ///
    /// Returns `CodeBlockError::PropsParse` if the YAML does not match the props shape.
    pub fn from_yaml(yaml: &str) -> CodeBlockResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// The source text, or an empty string when absent.
    pub fn source(&self) -> &str {
        self.children.as_deref().unwrap_or("")
    }

    /// First displayed line number.
    pub fn first_line_number(&self) -> usize {
        self.starting_line_number.unwrap_or(1)
    }
}
