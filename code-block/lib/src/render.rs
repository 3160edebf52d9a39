//! The render pass: props in, HTML fragment out.
//!
//! ## Markup
//!
//! ```text
//! <div class="relative">
//!   <pre class="code-block" style="…">
//!     <code class="linenumber-container">…</code>   (only without a highlight spec)
//!     <code class="language-js">
//!       tokens…                                    (no highlight spec)
//!       <span class="code-line" style="…">…</span>  (one per line with a highlight spec)
//!     </code>
//!   </pre>
//!   <div class="absolute right-2 top-2 dark"><button …>Copy</button></div>
//! </div>
//! ```
//!
//! Rendering never fails. Unknown languages render as plain text and a line
//! the highlighter chokes on is emitted as escaped text.

use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style};
use syntect::util::LinesWithEndings;

use crate::clipboard::Clipboard;
use crate::config::RenderOptions;
use crate::highlighting::{CodeHighlighter, css_hex};
use crate::language::{CLI_TAG, resolve_language};
use crate::lines::{LineSet, LineSetCache};
use crate::props::CodeBlockProps;
use crate::style::{PanelStyle, line_style};

/// Renders code panels with a fixed theme and panel style.
///
/// The renderer owns the highlight specification cache, so reuse one
/// renderer across renders to avoid re-parsing.
///
/// ## Examples
///
/// ```
/// use code_block::{CodeBlockProps, CodeBlockRenderer, RenderOptions};
///
/// let renderer = CodeBlockRenderer::new(RenderOptions::default());
/// let panel = renderer.render(&CodeBlockProps::new("print('hi')").with_lang("py"));
/// assert_eq!(panel.language(), "py");
/// assert!(panel.html().contains("language-py"));
/// ```
#[derive(Debug)]
pub struct CodeBlockRenderer {
    highlighter: CodeHighlighter,
    panel: PanelStyle,
    line_cache: LineSetCache,
}

impl CodeBlockRenderer {
    /// Creates a renderer from options.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            highlighter: CodeHighlighter::new(options.theme),
            panel: options.panel,
            line_cache: LineSetCache::with_capacity(options.line_cache_capacity),
        }
    }

    /// The highlighter this renderer colors tokens with.
    pub fn highlighter(&self) -> &CodeHighlighter {
        &self.highlighter
    }

    /// The memoized highlight specifications.
    pub fn line_cache(&self) -> &LineSetCache {
        &self.line_cache
    }

    /// Renders one panel.
    pub fn render(&self, props: &CodeBlockProps) -> RenderedCodeBlock {
        let language = resolve_language(props.lang.as_deref(), props.class_name.as_deref());
        let show_line_numbers = language != CLI_TAG;
        let highlight = props
            .highlight_lines
            .as_deref()
            .map(|spec| self.line_cache.get_or_parse(spec));
        let source = props.source();
        let first_line = props.first_line_number();

        if let Some(size) = props.size {
            tracing::trace!(size = ?size, "Size hint ignored; rendering at standard scale");
        }

        let lines: Vec<&str> = LinesWithEndings::from(source).collect();

        let mut html = String::new();
        html.push_str(r#"<div class="relative">"#);
        html.push_str(&format!(
            r#"<pre class="code-block" style="{}">"#,
            self.panel.pre_css(
                &css_hex(self.highlighter.foreground()),
                &css_hex(self.highlighter.background()),
            )
        ));

        if show_line_numbers && highlight.is_none() {
            html.push_str(&self.line_number_column(first_line, lines.len()));
        }

        html.push_str(&format!(
            r#"<code class="language-{}" style="white-space: pre">"#,
            html_escape::encode_double_quoted_attribute(&language)
        ));

        let syntax = self.highlighter.syntax_for(&language);
        let mut hl = HighlightLines::new(syntax, self.highlighter.theme());

        for (idx, line) in lines.iter().enumerate() {
            let number = display_number(first_line, idx);
            let tokens = self.highlight_line(&mut hl, line);

            match highlight.as_deref() {
                None => push_tokens(&mut html, &tokens, false),
                Some(set) => self.push_wrapped_line(&mut html, number, set, &tokens, show_line_numbers),
            }
        }

        html.push_str("</code></pre>");

        let copy_control = CopyControl::for_props(props);
        if let Some(control) = &copy_control {
            html.push_str(&control.html());
        }
        html.push_str("</div>");

        tracing::debug!(
            language = %language,
            lines = lines.len(),
            highlighted = highlight.as_ref().map(|set| set.len()),
            copy = copy_control.is_some(),
            "Rendered code block"
        );

        RenderedCodeBlock {
            html,
            language,
            line_count: lines.len(),
            copy_control,
        }
    }

    /// Highlights one line, degrading to unstyled text on failure.
    fn highlight_line<'a>(&self, hl: &mut HighlightLines<'_>, line: &'a str) -> Vec<(Option<Style>, &'a str)> {
        match hl.highlight_line(line, self.highlighter.syntax_set()) {
            Ok(ranges) => ranges.into_iter().map(|(style, text)| (Some(style), text)).collect(),
            Err(e) => {
                tracing::warn!(error = %e, "Syntax highlighting failed; emitting plain line");
                vec![(None, line)]
            }
        }
    }

    fn push_wrapped_line(
        &self,
        html: &mut String,
        number: usize,
        set: &LineSet,
        tokens: &[(Option<Style>, &str)],
        show_line_numbers: bool,
    ) {
        let style = line_style(number, Some(set))
            .map(|s| s.css())
            .unwrap_or_default();
        html.push_str(&format!(
            r#"<span class="code-line" data-line="{number}" style="display: block; {style}">"#
        ));
        if show_line_numbers {
            html.push_str(&format!(
                r#"<span class="linenumber" style="{}">{number}</span>"#,
                self.panel.line_numbers.css()
            ));
        }
        push_tokens(html, tokens, true);
        html.push_str("</span>");
    }

    fn line_number_column(&self, first_line: usize, count: usize) -> String {
        let cell_css = self.panel.line_numbers.css();
        let mut column = format!(
            r#"<code class="linenumber-container" style="{}">"#,
            self.panel.line_number_container_css()
        );
        for number in (0..count).map(|idx| display_number(first_line, idx)) {
            column.push_str(&format!(
                "<span class=\"linenumber\" style=\"{cell_css}\">{number}\n</span>"
            ));
        }
        column.push_str("</code>");
        column
    }
}

/// Displayed number of the line at `idx`, pinned at `usize::MAX`.
fn display_number(first_line: usize, idx: usize) -> usize {
    first_line.saturating_add(idx)
}

impl Default for CodeBlockRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

/// Appends highlighted tokens as styled spans.
///
/// Wrapped lines are block elements, so their trailing newline is dropped.
fn push_tokens(html: &mut String, tokens: &[(Option<Style>, &str)], strip_newline: bool) {
    for &(style, text) in tokens {
        let text = if strip_newline {
            text.trim_end_matches(['\n', '\r'])
        } else {
            text
        };
        if text.is_empty() {
            continue;
        }

        match style {
            Some(style) => html.push_str(&format!(
                r#"<span style="{}">{}</span>"#,
                token_css(&style),
                html_escape::encode_text(text)
            )),
            None => html.push_str(&html_escape::encode_text(text)),
        }
    }
}

fn token_css(style: &Style) -> String {
    let mut css = format!("color: {};", css_hex(style.foreground));
    if style.font_style.contains(FontStyle::BOLD) {
        css.push_str(" font-weight: bold;");
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        css.push_str(" font-style: italic;");
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        css.push_str(" text-decoration: underline;");
    }
    css
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCodeBlock {
    html: String,
    language: String,
    line_count: usize,
    copy_control: Option<CopyControl>,
}

impl RenderedCodeBlock {
    /// The HTML fragment.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// The resolved language tag handed to the highlighter.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Number of source lines rendered.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// The copy control, when one was rendered.
    pub fn copy_control(&self) -> Option<&CopyControl> {
        self.copy_control.as_ref()
    }
}

/// The `Copy` button and the exact text it copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyControl {
    text: String,
}

impl CopyControl {
    /// Button label.
    pub const LABEL: &'static str = "Copy";

    /// Builds the control unless it is hidden or there is nothing to copy.
    ///
    /// ## Examples
    ///
    /// ```
    /// use code_block::{CodeBlockProps, CopyControl};
    ///
    /// assert!(CopyControl::for_props(&CodeBlockProps::new("x")).is_some());
    /// assert!(CopyControl::for_props(&CodeBlockProps::new("")).is_none());
    /// assert!(CopyControl::for_props(&CodeBlockProps::new("x").with_hide_copy(true)).is_none());
    /// ```
    pub fn for_props(props: &CodeBlockProps) -> Option<Self> {
        match props.children.as_deref() {
            Some(text) if !props.hide_copy && !text.is_empty() => Some(Self {
                text: text.to_string(),
            }),
            _ => None,
        }
    }

    /// The text the control copies.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Markup for the control.
    pub fn html(&self) -> String {
        format!(
            r#"<div class="absolute right-2 top-2 dark"><button type="button" class="copy-button" data-clipboard-text="{}">{}</button></div>"#,
            html_escape::encode_double_quoted_attribute(&self.text),
            Self::LABEL
        )
    }

    /// Sends the text to `clipboard` unchanged.
    ///
    /// Clipboard failures are logged and otherwise ignored.
    pub fn activate(&self, clipboard: &dyn Clipboard) {
        match clipboard.write_text(&self.text) {
            Ok(()) => tracing::debug!(bytes = self.text.len(), "Copied code block to clipboard"),
            Err(e) => tracing::warn!(error = %e, "Clipboard write failed"),
        }
    }
}

/// Wraps rendered panels in a complete HTML page.
///
/// The page carries the stylesheet for the panel's class names and a script
/// that wires every copy button to the browser clipboard.
///
/// ## Examples
///
/// ```
/// use code_block::{CodeBlockProps, CodeBlockRenderer, standalone_document};
///
/// let renderer = CodeBlockRenderer::default();
/// let panel = renderer.render(&CodeBlockProps::new("let a = 1;"));
/// let page = standalone_document("Snippet", &[panel]);
/// assert!(page.starts_with("<!DOCTYPE html>"));
/// assert!(page.contains("navigator.clipboard"));
/// ```
pub fn standalone_document(title: &str, panels: &[RenderedCodeBlock]) -> String {
    let body: String = panels.iter().map(|panel| panel.html()).collect::<Vec<_>>().join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{
    background: #121212;
    margin: 2em;
}}

.relative {{
    position: relative;
    margin-bottom: 1.5em;
}}

.absolute {{
    position: absolute;
}}

.right-2 {{
    right: 0.5rem;
}}

.top-2 {{
    top: 0.5rem;
}}

.code-block code {{
    font-family: 'Monaco', 'Menlo', 'Ubuntu Mono', monospace;
}}

.copy-button {{
    background: #2a2a2a;
    color: #ededed;
    border: 1px solid #393939;
    border-radius: 4px;
    padding: 0.25em 0.75em;
    font-size: 12px;
    cursor: pointer;
}}
</style>
</head>
<body>
{body}
<script>
document.querySelectorAll('[data-clipboard-text]').forEach(function (button) {{
    button.addEventListener('click', function () {{
        navigator.clipboard.writeText(button.getAttribute('data-clipboard-text'));
    }});
}});
</script>
</body>
</html>
"#,
        title = html_escape::encode_text(title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::error::{CodeBlockError, CodeBlockResult};
    use crate::style::{DIMMED_FILTER, LINE_TRANSITION};
    use tracing_test::traced_test;

    struct DeniedClipboard;

    impl Clipboard for DeniedClipboard {
        fn write_text(&self, _text: &str) -> CodeBlockResult<()> {
            Err(CodeBlockError::Unsupported("permission denied".to_string()))
        }
    }

    fn render(props: CodeBlockProps) -> RenderedCodeBlock {
        CodeBlockRenderer::default().render(&props)
    }

    #[test]
    fn test_sql_single_highlighted_line() {
        let panel = render(
            CodeBlockProps::new("SELECT 1;")
                .with_lang("sql")
                .with_highlight_lines("1"),
        );
        assert_eq!(panel.line_count(), 1);
        assert_eq!(panel.language(), "sql");
        assert!(panel.html().contains(r#"data-line="1""#));
        assert!(panel.html().contains(LINE_TRANSITION));
        assert!(!panel.html().contains(DIMMED_FILTER));
        assert!(panel.copy_control().is_some());
    }

    #[test]
    fn test_empty_children_has_no_copy_control() {
        let panel = render(CodeBlockProps::new("").with_lang("py").with_hide_copy(false));
        assert!(panel.copy_control().is_none());
        assert!(!panel.html().contains("copy-button"));
    }

    #[test]
    fn test_absent_children_has_no_copy_control() {
        let panel = render(CodeBlockProps::default());
        assert!(panel.copy_control().is_none());
        assert_eq!(panel.line_count(), 0);
    }

    #[test]
    fn test_hide_copy_suppresses_control() {
        let panel = render(CodeBlockProps::new("x = 1").with_hide_copy(true));
        assert!(panel.copy_control().is_none());
    }

    #[test]
    fn test_without_spec_lines_are_not_wrapped() {
        let panel = render(CodeBlockProps::new("a\nb\nc\n").with_lang("js"));
        assert!(!panel.html().contains("code-line"));
        assert!(!panel.html().contains("transition"));
        assert!(panel.html().contains("linenumber-container"));
        assert_eq!(panel.line_count(), 3);
    }

    #[test]
    fn test_only_listed_lines_stay_undimmed() {
        let panel = render(
            CodeBlockProps::new("one\ntwo\nthree\nfour\n")
                .with_lang("py")
                .with_highlight_lines("2,4"),
        );
        assert_eq!(panel.html().matches("code-line").count(), 4);
        assert_eq!(panel.html().matches(DIMMED_FILTER).count(), 2);
    }

    #[test]
    fn test_empty_spec_dims_every_line() {
        let panel = render(
            CodeBlockProps::new("one\ntwo\n")
                .with_lang("py")
                .with_highlight_lines(""),
        );
        assert_eq!(panel.html().matches(DIMMED_FILTER).count(), 2);
    }

    #[test]
    fn test_starting_line_number_offsets_numbers_and_matching() {
        let panel = render(
            CodeBlockProps::new("a\nb\n")
                .with_starting_line_number(10)
                .with_highlight_lines("11"),
        );
        assert!(panel.html().contains(r#"data-line="10""#));
        assert!(panel.html().contains(r#"data-line="11""#));
        assert_eq!(panel.html().matches(DIMMED_FILTER).count(), 1);
    }

    #[test]
    fn test_gutter_counts_from_starting_line() {
        let panel = render(CodeBlockProps::new("a\nb\n").with_starting_line_number(7));
        assert!(panel.html().contains(">7\n</span>"));
        assert!(panel.html().contains(">8\n</span>"));
    }

    #[test]
    fn test_largest_starting_line_number_pins_gutter() {
        let max = usize::MAX;
        let panel = render(CodeBlockProps::new("a\nb\nc\n").with_starting_line_number(max));
        assert_eq!(panel.line_count(), 3);
        assert_eq!(panel.html().matches(&format!(">{max}\n</span>")).count(), 3);
    }

    #[test]
    fn test_largest_starting_line_number_with_highlight() {
        let max = usize::MAX;
        let panel = render(
            CodeBlockProps::new("a\nb\n")
                .with_starting_line_number(max)
                .with_highlight_lines("1"),
        );
        assert_eq!(panel.html().matches(&format!(r#"data-line="{max}""#)).count(), 2);
        assert_eq!(panel.html().matches(DIMMED_FILTER).count(), 2);
    }

    #[test]
    fn test_cli_tag_hides_line_numbers() {
        let panel = render(CodeBlockProps::new("npm install").with_lang("cli"));
        assert!(!panel.html().contains("linenumber"));
    }

    #[test]
    fn test_unknown_language_still_renders() {
        let panel = render(CodeBlockProps::new("IDENTIFICATION DIVISION.").with_lang("cobol"));
        assert_eq!(panel.language(), "cobol");
        assert!(panel.html().contains("IDENTIFICATION DIVISION."));
    }

    #[test]
    fn test_source_is_escaped() {
        let panel = render(
            CodeBlockProps::new("<script>alert('x')</script>")
                .with_lang("js")
                .with_hide_copy(true),
        );
        assert!(!panel.html().contains("<script>"));
    }

    #[test]
    fn test_highlight_spec_is_memoized_across_renders() {
        let renderer = CodeBlockRenderer::default();
        let props = CodeBlockProps::new("a\nb\n").with_highlight_lines("1..2");
        renderer.render(&props);
        renderer.render(&props);
        assert_eq!(renderer.line_cache().len(), 1);
    }

    #[test]
    fn test_copy_sends_exact_text() {
        let source = "  SELECT *\n\tFROM t;  \n";
        let panel = render(CodeBlockProps::new(source).with_lang("sql"));
        let clipboard = MemoryClipboard::new();
        panel.copy_control().unwrap().activate(&clipboard);
        assert_eq!(clipboard.contents().as_deref(), Some(source));
    }

    #[test]
    #[traced_test]
    fn test_copy_failure_is_absorbed() {
        let panel = render(CodeBlockProps::new("x"));
        panel.copy_control().unwrap().activate(&DeniedClipboard);
        assert!(logs_contain("Clipboard write failed"));
    }

    #[test]
    fn test_copy_attribute_is_escaped() {
        let control = CopyControl::for_props(&CodeBlockProps::new(r#"a "quoted" <b>"#)).unwrap();
        assert!(!control.html().contains(r#""quoted""#));
        assert_eq!(control.text(), r#"a "quoted" <b>"#);
    }

    #[test]
    fn test_size_does_not_change_output() {
        let small = render(CodeBlockProps::new("x").with_size(crate::props::Size::Small));
        let large = render(CodeBlockProps::new("x").with_size(crate::props::Size::Large));
        assert_eq!(small.html(), large.html());
    }

    #[test]
    fn test_standalone_document_escapes_title() {
        let page = standalone_document("<b>", &[]);
        assert!(!page.contains("<title><b>"));
    }
}
