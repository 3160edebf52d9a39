//! Inline styles for the panel and per-line emphasis.
//!
//! The per-line decision has three outcomes:
//!
//! | Highlight spec | Line in set | Result |
//! |----------------|-------------|--------|
//! | absent         | -           | no override (lines are not wrapped) |
//! | present        | yes         | [`LineStyle::Highlighted`] |
//! | present        | no          | [`LineStyle::Dimmed`] |
//!
//! A present but empty specification therefore dims every line.

use crate::lines::LineSet;

/// Transition applied to every wrapped line so emphasis changes animate.
pub const LINE_TRANSITION: &str = "filter 500ms ease, opacity 500ms ease";

/// Filter applied to lines outside the highlight set.
pub const DIMMED_FILTER: &str = "grayscale(75%)";

/// Opacity applied to lines outside the highlight set.
pub const DIMMED_OPACITY: &str = "0.5";

/// Emphasis applied to a single wrapped line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Full opacity, no filter.
    Highlighted,
    /// Desaturated and partially transparent.
    Dimmed,
}

impl LineStyle {
    /// Inline CSS declarations for this line.
    ///
    /// ## Examples
    ///
    /// ```
    /// use code_block::LineStyle;
    ///
    /// assert!(LineStyle::Dimmed.css().contains("opacity: 0.5"));
    /// assert!(!LineStyle::Highlighted.css().contains("opacity"));
    /// ```
    pub fn css(self) -> String {
        match self {
            LineStyle::Highlighted => format!("transition: {LINE_TRANSITION}"),
            LineStyle::Dimmed => format!(
                "transition: {LINE_TRANSITION}; filter: {DIMMED_FILTER}; opacity: {DIMMED_OPACITY}"
            ),
        }
    }
}

/// Decides the emphasis for a line given the parsed highlight set.
///
/// `None` for the set means no specification was given, which disables
/// per-line overrides entirely.
///
/// ## Examples
///
/// ```
/// use code_block::{LineSet, LineStyle, line_style};
///
/// let set = LineSet::parse("2");
/// assert_eq!(line_style(2, Some(&set)), Some(LineStyle::Highlighted));
/// assert_eq!(line_style(1, Some(&set)), Some(LineStyle::Dimmed));
/// assert_eq!(line_style(1, None), None);
/// ```
pub fn line_style(line: usize, highlight: Option<&LineSet>) -> Option<LineStyle> {
    let set = highlight?;
    if set.contains(line) {
        Some(LineStyle::Highlighted)
    } else {
        Some(LineStyle::Dimmed)
    }
}

/// Visual constants for the line-number gutter.
#[derive(Debug, Clone, PartialEq)]
pub struct LineNumberStyle {
    pub min_width_px: u16,
    pub background: String,
    pub padding_left_px: u16,
    pub margin_right_px: u16,
    pub color: String,
    pub font_size_px: u16,
    pub padding_vertical_px: u16,
}

impl Default for LineNumberStyle {
    fn default() -> Self {
        Self {
            min_width_px: 48,
            background: "#1e1e1e".to_string(),
            padding_left_px: 21,
            margin_right_px: 12,
            color: "#828282".to_string(),
            font_size_px: 12,
            padding_vertical_px: 4,
        }
    }
}

impl LineNumberStyle {
    /// Declarations for one line-number cell.
    pub fn css(&self) -> String {
        format!(
            "display: inline-block; min-width: {}px; background: {}; padding-left: {}px; \
             margin-right: {}px; color: {}; font-size: {}px; padding-top: {}px; \
             padding-bottom: {}px; text-align: right; user-select: none",
            self.min_width_px,
            self.background,
            self.padding_left_px,
            self.margin_right_px,
            self.color,
            self.font_size_px,
            self.padding_vertical_px,
            self.padding_vertical_px,
        )
    }
}

/// Visual constants for the panel itself.
///
/// The defaults reproduce the documentation site's code panel: a flat
/// `#181818` surface with a thin top border and a 12px monospace scale.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelStyle {
    pub font_size_px: u16,
    pub line_height: f32,
    pub border_top: String,
    /// Overrides the theme background when set.
    pub background: Option<String>,
    pub line_numbers: LineNumberStyle,
    /// Top padding of the detached line-number column.
    pub line_number_container_padding_top_px: u16,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            font_size_px: 12,
            line_height: 1.2,
            border_top: "1px solid #393939".to_string(),
            background: Some("#181818".to_string()),
            line_numbers: LineNumberStyle::default(),
            line_number_container_padding_top_px: 128,
        }
    }
}

impl PanelStyle {
    /// Declarations for the `<pre>` element.
    ///
    /// `theme_background` is used when no background override is set.
    pub fn pre_css(&self, foreground: &str, theme_background: &str) -> String {
        let background = self.background.as_deref().unwrap_or(theme_background);
        format!(
            "display: block; overflow-x: auto; padding: 0; margin: 0; color: {foreground}; \
             background: {background}; font-size: {}px; line-height: {}; border-top: {}",
            self.font_size_px, self.line_height, self.border_top,
        )
    }

    /// Declarations for the detached line-number column.
    pub fn line_number_container_css(&self) -> String {
        format!(
            "float: left; padding-right: 10px; padding-top: {}px",
            self.line_number_container_padding_top_px
        )
    }
}
