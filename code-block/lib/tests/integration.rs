//! Integration tests for the code-block library.
//!
//! These exercise the public API the way a page renderer would: props in,
//! HTML and a copy control out.

use std::io::Write;
use std::sync::{Arc, Mutex};

use code_block::clipboard::osc52_sequence;
use code_block::highlighting::registration_count;
use code_block::{
    ClipboardTarget, CodeBlockProps, CodeBlockRenderer, CodeTheme, LineSet, MemoryClipboard,
    Osc52Clipboard, RenderOptions, resolve_language,
};

/// Writer whose bytes stay readable after the clipboard takes ownership.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// Language resolution
// ============================================================================

#[test]
fn test_language_resolution_table() {
    assert_eq!(resolve_language(Some("jsx"), None), "js");
    assert_eq!(resolve_language(Some("tsx"), None), "ts");
    assert_eq!(resolve_language(None, Some("language-python")), "python");
    assert_eq!(resolve_language(None, None), "js");
}

#[test]
fn test_rendered_language_matches_resolution() {
    let renderer = CodeBlockRenderer::default();
    let props = CodeBlockProps::new("const el = <div />;").with_lang("jsx");
    assert_eq!(renderer.render(&props).language(), "js");

    let props = CodeBlockProps::new("x = 1").with_class_name("language-python");
    assert_eq!(renderer.render(&props).language(), "python");
}

// ============================================================================
// Highlight specifications
// ============================================================================

#[test]
fn test_highlight_spec_examples() {
    assert_eq!(LineSet::parse("2,4").iter().collect::<Vec<_>>(), vec![2, 4]);
    assert_eq!(LineSet::parse("5..7").iter().collect::<Vec<_>>(), vec![5, 6, 7]);
    assert!(LineSet::parse("").is_empty());
}

#[test]
fn test_parsing_twice_yields_equal_sets() {
    let first = LineSet::parse("3,5,9..12");
    let second = LineSet::parse("3,5,9..12");
    assert_eq!(first, second);
    assert!(first.iter().eq(second.iter()));
}

#[test]
fn test_absent_and_empty_specs_differ() {
    let renderer = CodeBlockRenderer::default();
    let source = "a = 1\nb = 2\n";

    let absent = renderer.render(&CodeBlockProps::new(source).with_lang("py"));
    let empty = renderer.render(&CodeBlockProps::new(source).with_lang("py").with_highlight_lines(""));

    assert!(!absent.html().contains("grayscale"));
    assert_eq!(empty.html().matches("grayscale(75%)").count(), 2);
}

// ============================================================================
// Copy affordance
// ============================================================================

#[test]
fn test_copy_control_visibility() {
    let renderer = CodeBlockRenderer::default();

    assert!(renderer.render(&CodeBlockProps::new("x")).copy_control().is_some());
    assert!(
        renderer
            .render(&CodeBlockProps::new("x").with_hide_copy(true))
            .copy_control()
            .is_none()
    );
    assert!(renderer.render(&CodeBlockProps::new("")).copy_control().is_none());
    assert!(renderer.render(&CodeBlockProps::default()).copy_control().is_none());
}

#[test]
fn test_copy_fidelity() {
    let source = "def f():\n    return \"<tag>\" & 'x'\n\n";
    let panel = CodeBlockRenderer::default().render(&CodeBlockProps::new(source).with_lang("py"));
    let clipboard = MemoryClipboard::new();

    panel.copy_control().expect("copy control").activate(&clipboard);

    assert_eq!(clipboard.writes(), vec![source.to_string()]);
}

#[test]
fn test_copy_through_osc52_backend() {
    let buffer = SharedBuffer::default();
    let clipboard = Osc52Clipboard::new(buffer.clone());
    let panel = CodeBlockRenderer::default().render(&CodeBlockProps::new("SELECT 1;"));

    panel.copy_control().expect("copy control").activate(&clipboard);

    assert_eq!(buffer.contents(), osc52_sequence("SELECT 1;", ClipboardTarget::Clipboard));
}

#[test]
fn test_copy_through_osc52_primary_selection() {
    let buffer = SharedBuffer::default();
    let clipboard = Osc52Clipboard::new(buffer.clone()).with_target(ClipboardTarget::Both);
    let source = "x = 1\ny = 2\n";
    let panel = CodeBlockRenderer::default().render(&CodeBlockProps::new(source).with_lang("py"));

    panel.copy_control().expect("copy control").activate(&clipboard);

    assert_eq!(buffer.contents(), osc52_sequence(source, ClipboardTarget::Both));
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn test_sql_scenario() {
    let props = CodeBlockProps::from_json(
        r#"{ "lang": "sql", "children": "SELECT 1;", "highlightLines": "1" }"#,
    )
    .unwrap();
    let panel = CodeBlockRenderer::default().render(&props);

    assert_eq!(panel.line_count(), 1);
    assert!(panel.html().contains("transition: filter 500ms ease, opacity 500ms ease"));
    assert!(!panel.html().contains("grayscale"));
    assert!(panel.copy_control().is_some());
    assert!(panel.html().contains(">Copy</button>"));
}

#[test]
fn test_empty_python_scenario() {
    let props = CodeBlockProps::from_json(r#"{ "lang": "py", "children": "", "hideCopy": false }"#).unwrap();
    let panel = CodeBlockRenderer::default().render(&props);

    assert!(panel.copy_control().is_none());
    assert!(!panel.html().contains("copy-button"));
}

#[test]
fn test_every_theme_renders() {
    for theme in CodeTheme::all() {
        let renderer = CodeBlockRenderer::new(RenderOptions::default().with_theme(theme));
        let panel = renderer.render(&CodeBlockProps::new("let x = 1;").with_lang("ts"));
        assert!(panel.html().contains("code-block"), "{theme:?} failed to render");
        assert!(panel.html().contains("background: #181818"), "{theme:?} lost the panel surface");
    }
}

#[test]
fn test_huge_starting_line_number_renders() {
    let props = CodeBlockProps::from_json(&format!(
        r#"{{ "lang": "js", "children": "a();\nb();\n", "startingLineNumber": {} }}"#,
        u64::MAX
    ))
    .unwrap();
    let panel = CodeBlockRenderer::default().render(&props);
    assert_eq!(panel.line_count(), 2);
    assert!(panel.html().contains(&format!(">{}\n</span>", usize::MAX)));
}

#[test]
fn test_grammars_register_once_across_renderers() {
    for _ in 0..3 {
        let renderer = CodeBlockRenderer::default();
        renderer.render(&CodeBlockProps::new("x = 1").with_lang("py"));
    }
    assert_eq!(registration_count(), 1);
}
