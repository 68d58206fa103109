//! Top-level module for the word completion system.
//!
//! This module provides:
//! - A streaming reader over sorted `(word, frequency)` records (`VocabularyCursor`)
//! - The trie node and its one-pass builder (`TrieNode`)
//! - The bounded candidate set used while ranking (`WorkingSet`)
//! - Query configuration and result framing (`CompletionInput`)
//! - A high-level index interface (`WordTree`)

/// Sequential reader over the sorted vocabulary.
///
/// Tracks the declared record budget and validates each record.
pub mod cursor;

/// Trie node and the single-pass, prefix-grouped builder.
///
/// This module is not exposed publicly.
mod trie_node;

/// Bounded, insert-then-evict candidate set.
///
/// Internal to the completion traversal.
mod working_set;

/// Query parameters, ranking and framing policies, and the result type.
pub mod completion_input;

/// Built index: construction entry points and completion queries.
pub mod word_tree;
