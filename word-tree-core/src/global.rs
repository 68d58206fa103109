//! Process-wide index.
//!
//! The index is built once by `initialize` and then only read. Queries
//! issued before a successful `initialize` fail with `NotInitialized`.

use std::path::Path;
use std::sync::{Mutex, OnceLock};

use crate::error::{Error, Result};
use crate::model::completion_input::{format_completions, Completion, CompletionInput, Framing};
use crate::model::word_tree::WordTree;

static WORD_TREE: OnceLock<WordTree> = OnceLock::new();

/// Serializes builds so two initializers never race.
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Builds the process-wide index from a vocabulary file.
///
/// # Errors
/// - `AlreadyInitialized` if an index is already installed.
/// - Any build error. The index stays uninitialized and a later call may
///   try again.
pub fn initialize<P: AsRef<Path>>(filepath: P) -> Result<()> {
	install(|| WordTree::new(filepath))
}

/// Installs an already built index.
pub fn install_tree(tree: WordTree) -> Result<()> {
	install(|| Ok(tree))
}

fn install<F: FnOnce() -> Result<WordTree>>(build: F) -> Result<()> {
	let _guard = INIT_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
	if WORD_TREE.get().is_some() {
		return Err(Error::AlreadyInitialized);
	}
	WORD_TREE.set(build()?).map_err(|_| Error::AlreadyInitialized)
}

pub fn is_initialized() -> bool {
	WORD_TREE.get().is_some()
}

/// The installed index.
pub fn get() -> Result<&'static WordTree> {
	WORD_TREE.get().ok_or(Error::NotInitialized)
}

/// Completions of `prefix` with the default ranking.
pub fn query(prefix: &str, limit: usize) -> Result<Vec<Completion>> {
	Ok(get()?.complete(prefix, &CompletionInput::with_limit(limit)))
}

/// Completions of `prefix` rendered as one line with `Framing::DropLastChar`.
pub fn query_line(prefix: &str, limit: usize) -> Result<String> {
	Ok(format_completions(&query(prefix, limit)?, Framing::DropLastChar))
}
