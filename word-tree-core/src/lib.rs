//! Frequency-ranked word completion over an in-memory prefix tree.
//!
//! This crate builds a character trie from a sorted vocabulary file in a
//! single streaming pass and answers "best N completions for this prefix"
//! queries. It provides:
//! - A streaming vocabulary cursor over `(word, frequency)` records
//! - A one-pass trie builder relying on sorted input
//! - Bounded, frequency-ranked completion queries
//! - A process-wide index and a thin C boundary for foreign hosts
//!
//! Low-level pieces (tokenizer, builder internals) stay internal.

/// Error type shared by every layer of the crate.
pub mod error;

/// Vocabulary cursor, trie and completion engine.
///
/// `WordTree` is the high-level entry point.
pub mod model;

/// Process-wide index, initialized once and queried read-only.
pub mod global;

/// C-compatible exports (`set_tree`, `get_autocomplete`, `free_autocomplete`).
pub mod ffi;

/// I/O utilities (buffered file opening, whitespace tokenizer).
///
/// Not exposed
pub(crate) mod io;

pub use error::{Error, Result};
pub use model::completion_input::{format_completions, Completion, CompletionInput, Framing, Ranking};
pub use model::word_tree::WordTree;
