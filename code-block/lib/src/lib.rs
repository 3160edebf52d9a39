//! # code-block
//!
//! Syntax-highlighted code panels rendered to HTML.
//!
//! A panel takes a snippet of source text plus a handful of display props and
//! produces an HTML fragment with:
//!
//! - **Highlighting**: tokens colored by syntect using grammars and themes from two-face
//! - **Line numbers**: a gutter offset by an optional starting line number
//! - **Line emphasis**: a highlight specification (`"3,5,9..12"`) that dims every other line
//! - **Copy affordance**: a `Copy` button carrying the exact source text
//!
//! ## Quick Start
//!
//! ```
//! use code_block::{CodeBlockProps, CodeBlockRenderer, RenderOptions};
//!
//! let renderer = CodeBlockRenderer::new(RenderOptions::default());
//! let props = CodeBlockProps::new("SELECT 1;")
//!     .with_lang("sql")
//!     .with_highlight_lines("1");
//!
//! let panel = renderer.render(&props);
//! assert_eq!(panel.line_count(), 1);
//! assert!(panel.copy_control().is_some());
//! assert!(panel.html().contains("code-block"));
//! ```
//!
//! ## Modules
//!
//! - [`language`] - Language tag resolution and alias normalization
//! - [`highlighting`] - Grammar registry and the token theme catalogue
//! - [`lines`] - Highlight specification parsing and memoization
//! - [`style`] - Panel constants and per-line style decisions
//! - [`props`] - The input configuration for a single panel
//! - [`render`] - The render pass and the copy control
//! - [`clipboard`] - Clipboard backends (OSC52 and in-memory)
//! - [`config`] - Renderer options, including environment detection

pub mod clipboard;
pub mod config;
pub mod error;
pub mod highlighting;
pub mod language;
pub mod lines;
pub mod props;
pub mod render;
pub mod style;

pub use clipboard::{Clipboard, ClipboardTarget, MemoryClipboard, Osc52Clipboard};
pub use config::RenderOptions;
pub use error::{CodeBlockError, CodeBlockResult};
pub use highlighting::CodeTheme;
pub use language::resolve_language;
pub use lines::{LineSet, LineSetCache};
pub use props::{CodeBlockProps, Size};
pub use render::{CodeBlockRenderer, CopyControl, RenderedCodeBlock, standalone_document};
pub use style::{LineStyle, line_style};
