//! Grammar registration for the highlighter.
//!
//! The two-face syntax set and the tag → grammar table are built once per
//! process, on first use, and never torn down. Rendering only performs
//! lookups.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use lazy_static::lazy_static;
use syntect::parsing::{SyntaxReference, SyntaxSet};
use two_face::syntax::extra_newlines as extra_syntax_set;

use crate::language::Language;

static REGISTRATIONS: AtomicUsize = AtomicUsize::new(0);

lazy_static! {
    /// Syntax set from two-face with extended grammars.
    ///
    /// Includes syntect's default grammars plus the bat project's additions
    /// (TypeScript among them).
    static ref SYNTAX_SET: SyntaxSet = extra_syntax_set();

    static ref REGISTRY: LanguageRegistry = LanguageRegistry::register(&*SYNTAX_SET);
}

/// Maps language tags to grammars in the shared syntax set.
#[derive(Debug)]
pub struct LanguageRegistry {
    grammars: HashMap<&'static str, &'static SyntaxReference>,
}

impl LanguageRegistry {
    fn register(syntax_set: &'static SyntaxSet) -> Self {
        REGISTRATIONS.fetch_add(1, Ordering::SeqCst);

        let mut grammars = HashMap::new();
        for language in Language::all() {
            let Some(syntax) = syntax_set
                .find_syntax_by_name(language.syntax_name())
                .or_else(|| syntax_set.find_syntax_by_extension(language.tag()))
            else {
                tracing::warn!(
                    language = language.tag(),
                    grammar = language.syntax_name(),
                    "Grammar missing from syntax set; language will render as plain text"
                );
                continue;
            };
            grammars.insert(language.tag(), syntax);
            for alias in language.aliases() {
                grammars.insert(*alias, syntax);
            }
        }

        tracing::debug!(registered = grammars.len(), "Registered highlighter grammars");
        Self { grammars }
    }

    /// Returns the process-wide registry, registering grammars on first call.
    pub fn global() -> &'static Self {
        &REGISTRY
    }

    /// Returns the shared syntax set.
    pub fn syntax_set(&self) -> &'static SyntaxSet {
        &SYNTAX_SET
    }

    /// Whether a tag has a registered grammar.
    pub fn is_registered(&self, tag: &str) -> bool {
        self.grammars.contains_key(tag)
    }

    /// Returns the grammar for a tag, or the plain-text grammar for unknown tags.
    pub fn syntax_for(&self, tag: &str) -> &'static SyntaxReference {
        match self.grammars.get(tag) {
            Some(&syntax) => syntax,
            None => {
                tracing::debug!(tag = tag, "No grammar registered for tag; using plain text");
                self.syntax_set().find_syntax_plain_text()
            }
        }
    }
}

/// Number of times grammar registration has run in this process.
pub fn registration_count() -> usize {
    REGISTRATIONS.load(Ordering::SeqCst)
}
