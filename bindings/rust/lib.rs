//! Rust bindings for the `tree-sitter-amble` grammar.
//!
//! Amble is the world-definition DSL of the Amble text adventure engine:
//! rooms, items, NPCs, triggers, spinners and goals. This crate links the
//! generated parser and hands out a `tree_sitter::Language` for it.
//!
//! ```
//! let mut parser = tree_sitter::Parser::new();
//! parser
//!     .set_language(&tree_sitter_amble::language())
//!     .expect("Error loading Amble grammar");
//! let tree = parser.parse("room foyer { name \"The Foyer\" }", None).unwrap();
//! assert!(!tree.root_node().has_error());
//! ```

use tree_sitter::{ffi::TSLanguage, Language};

extern "C" {
    fn tree_sitter_amble() -> *const TSLanguage;
}

/// Name the grammar is registered under.
pub const GRAMMAR_NAME: &str = "amble";

/// The syntax highlighting query for Amble.
pub const HIGHLIGHTS_QUERY: &str = include_str!("../../queries/highlights.scm");

/// Reasons a language handle could not be obtained.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("Error loading Amble grammar: the loader returned a null language")]
    Null,
    #[error(
        "Error loading Amble grammar: ABI version {version} is outside the supported range {min}..={max}"
    )]
    IncompatibleVersion {
        version: usize,
        min: usize,
        max: usize,
    },
}

/// Returns the Tree-sitter [`Language`] for this grammar.
pub fn language() -> Language {
    unsafe { Language::from_raw(tree_sitter_amble()) }
}

/// Returns the [`Language`] after checking that the handle is usable by the
/// linked tree-sitter runtime.
pub fn try_language() -> Result<Language, LoadError> {
    unsafe { language_from_raw(tree_sitter_amble()) }
}

/// Like [`try_language`], but reports failure as `None`.
pub fn load_language() -> Option<Language> {
    try_language().ok()
}

/// Wraps a raw language pointer into a [`Language`].
///
/// A null pointer and a language whose ABI version the runtime cannot load
/// are both rejected.
///
/// # Safety
///
/// `ptr` must be null or point to a `TSLanguage` that stays valid for the
/// rest of the program, as the static tables emitted by `tree-sitter
/// generate` do.
pub unsafe fn language_from_raw(ptr: *const TSLanguage) -> Result<Language, LoadError> {
    if ptr.is_null() {
        tracing::warn!(grammar = GRAMMAR_NAME, "language loader returned null");
        return Err(LoadError::Null);
    }

    let language = Language::from_raw(ptr);
    let version = language.version();
    check_version(version)?;

    tracing::debug!(
        grammar = GRAMMAR_NAME,
        version,
        node_kinds = language.node_kind_count(),
        "loaded language"
    );
    Ok(language)
}

/// Checks an ABI version against the range the linked runtime can load.
pub fn check_version(version: usize) -> Result<(), LoadError> {
    let (min, max) = (
        tree_sitter::MIN_COMPATIBLE_LANGUAGE_VERSION,
        tree_sitter::LANGUAGE_VERSION,
    );
    if !(min..=max).contains(&version) {
        tracing::warn!(grammar = GRAMMAR_NAME, version, min, max, "incompatible language ABI");
        return Err(LoadError::IncompatibleVersion { version, min, max });
    }
    Ok(())
}
