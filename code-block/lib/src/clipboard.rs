//! Clipboard backends for the copy control.
//!
//! The panel never talks to a platform clipboard directly; it hands the
//! source text to a [`Clipboard`]. Two backends ship with the crate:
//!
//! - [`Osc52Clipboard`] writes an OSC52 escape sequence, which the terminal
//!   intercepts and forwards to the system clipboard
//! - [`MemoryClipboard`] records writes in memory
//!
//! ## OSC52 format
//!
//! ```text
//! ESC ] 52 ; <target> ; <base64-data> BEL
//! ```

use std::io::{IsTerminal, Write};
use std::sync::{Mutex, PoisonError};

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

use crate::error::{CodeBlockError, CodeBlockResult};

/// Environment variables that mark a CI run, where no terminal will
/// intercept the sequence.
const CI_ENV_VARS: &[&str] = &["CI", "GITHUB_ACTIONS", "GITLAB_CI", "BUILDKITE", "JENKINS_URL"];

/// A place the copy control can send text to.
pub trait Clipboard {
    /// Writes `text` to the clipboard unchanged.
    fn write_text(&self, text: &str) -> CodeBlockResult<()>;
}

/// OSC52 clipboard target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardTarget {
    /// System clipboard (Ctrl+V paste)
    #[default]
    Clipboard,
    /// X11 primary selection (middle-click paste)
    Primary,
    /// Both clipboard and primary selection
    Both,
}

impl TryFrom<&str> for ClipboardTarget {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "clipboard" | "c" => Ok(ClipboardTarget::Clipboard),
            "primary" | "p" => Ok(ClipboardTarget::Primary),
            "both" | "pc" => Ok(ClipboardTarget::Both),
            other => Err(format!("unknown clipboard target '{other}' (expected clipboard, primary or both)")),
        }
    }
}

impl ClipboardTarget {
    fn as_specifier(self) -> &'static str {
        match self {
            ClipboardTarget::Clipboard => "c",
            ClipboardTarget::Primary => "p",
            ClipboardTarget::Both => "pc",
        }
    }
}

/// Builds the OSC52 sequence that sets `content` on `target`.
///
/// ## Examples
///
/// ```
/// use code_block::clipboard::{osc52_sequence, ClipboardTarget};
///
/// assert_eq!(osc52_sequence("hi", ClipboardTarget::Clipboard), "\x1b]52;c;aGk=\x07");
/// ```
pub fn osc52_sequence(content: &str, target: ClipboardTarget) -> String {
    format!("\x1b]52;{};{}\x07", target.as_specifier(), BASE64.encode(content))
}

/// Clipboard backend that emits OSC52 escape sequences.
pub struct Osc52Clipboard {
    writer: Mutex<Box<dyn Write + Send>>,
    target: ClipboardTarget,
}

impl std::fmt::Debug for Osc52Clipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Osc52Clipboard")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl Osc52Clipboard {
    /// Writes sequences to an arbitrary writer.
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            target: ClipboardTarget::default(),
        }
    }

    /// Writes sequences to stdout.
    ///
    /// ## Errors
    ///
    /// Returns `CodeBlockError::Unsupported` when stdout is not a terminal or
    /// the process runs under CI, since nothing would intercept the sequence.
    pub fn stdout() -> CodeBlockResult<Self> {
        if !std::io::stdout().is_terminal() {
            return Err(CodeBlockError::Unsupported("stdout is not a terminal".to_string()));
        }
        if CI_ENV_VARS.iter().any(|var| std::env::var_os(var).is_some()) {
            return Err(CodeBlockError::Unsupported("running under CI".to_string()));
        }
        Ok(Self::new(std::io::stdout()))
    }

    /// Selects which clipboard the sequence targets.
    pub fn with_target(mut self, target: ClipboardTarget) -> Self {
        self.target = target;
        self
    }
}

impl Clipboard for Osc52Clipboard {
    fn write_text(&self, text: &str) -> CodeBlockResult<()> {
        let sequence = osc52_sequence(text, self.target);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer
            .write_all(sequence.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(CodeBlockError::Clipboard)?;
        tracing::debug!(bytes = text.len(), target = ?self.target, "Wrote OSC52 clipboard sequence");
        Ok(())
    }
}

/// Clipboard backend that keeps every write in memory.
///
/// ## Examples
///
/// ```
/// use code_block::{Clipboard, MemoryClipboard};
///
/// let clipboard = MemoryClipboard::new();
/// clipboard.write_text("  keep my spaces\n").unwrap();
/// assert_eq!(clipboard.contents().as_deref(), Some("  keep my spaces\n"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    writes: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent write.
    pub fn contents(&self) -> Option<String> {
        self.writes().pop()
    }

    /// Every write, oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> CodeBlockResult<()> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
        Ok(())
    }
}
