use std::io::BufRead;

use log::warn;

use super::cursor::{VocabularyCursor, VocabularyRecord};
use crate::error::Result;

/// A node of the prefix tree.
///
/// The path of characters from the root (excluded) to a node spells a
/// prefix of at least one vocabulary word. `rank` is set exactly when that
/// path spells a complete word.
///
/// # Invariants
/// - Each child is owned by exactly one parent (strict tree)
/// - Children keep insertion order, which is the sorted input order
///
/// Depth equals the longest word, so nothing walking the tree recurses.
pub(crate) struct TrieNode {
	/// Single byte carried by this edge. `0` on the root.
	pub(crate) character: u8,
	/// Frequency of the word ending here, `None` when no word ends here
	pub(crate) rank: Option<u64>,
	pub(crate) children: Vec<TrieNode>,
}

impl TrieNode {
	pub(crate) fn new(character: u8) -> Self {
		Self { character, rank: None, children: Vec::new() }
	}

	/// Root sentinel, never matched against input.
	pub(crate) fn root() -> Self {
		Self::new(0)
	}

	/// Linear scan for the child carrying `character`.
	pub(crate) fn child(&self, character: u8) -> Option<&TrieNode> {
		self.children.iter().find(|child| child.character == character)
	}

	/// Number of nodes in this subtree, this node included.
	pub(crate) fn subtree_size(&self) -> usize {
		let mut size = 0;
		let mut stack = vec![self];
		while let Some(node) = stack.pop() {
			size += 1;
			stack.extend(&node.children);
		}
		size
	}
}

impl Drop for TrieNode {
	// Flattens the subtree so dropping a deep chain never recurses
	fn drop(&mut self) {
		let mut stack = std::mem::take(&mut self.children);
		while let Some(mut node) = stack.pop() {
			stack.append(&mut node.children);
		}
	}
}

/// Outcome of a build, kept for statistics and logging.
#[derive(Debug)]
pub(crate) struct BuildSummary {
	pub(crate) words: usize,
	pub(crate) records_consumed: usize,
	pub(crate) records_total: usize,
}

/// One-pass trie builder driven by a single lookahead record.
///
/// The lookahead (`target`) stays one step ahead of the tree being built
/// and advances only when the branch under construction spells its word.
/// This relies on ascending input: once the lookahead leaves a branch, no
/// later record returns to it.
///
/// The record budget is checked only between root-level branches; inside a
/// branch the lookahead keeps advancing until it leaves the branch.
struct TrieBuilder<'c, R> {
	cursor: &'c mut VocabularyCursor<R>,
	target: Option<VocabularyRecord>,
	words: usize,
}

impl<'c, R: BufRead> TrieBuilder<'c, R> {
	fn new(cursor: &'c mut VocabularyCursor<R>) -> Result<Self> {
		let mut builder = Self { cursor, target: None, words: 0 };
		builder.target = builder.read_record()?;
		Ok(builder)
	}

	/// Reads the next record, mapping end of input to `None`.
	fn read_record(&mut self) -> Result<Option<VocabularyRecord>> {
		match self.cursor.next() {
			Ok(record) => Ok(Some(record)),
			Err(e) if e.is_end_of_input() => Ok(None),
			Err(e) => Err(e),
		}
	}

	/// Moves the lookahead past the word just placed in the tree.
	///
	/// Consecutive copies of that word are skipped; the first frequency wins.
	fn advance(&mut self, placed: &[u8]) -> Result<()> {
		loop {
			self.target = self.read_record()?;
			match &self.target {
				Some(record) if record.word.as_bytes() == placed => {
					warn!("skipping duplicate word {:?}", record.word);
				}
				_ => return Ok(()),
			}
		}
	}

	/// Next character of the lookahead when `built` is a strict prefix of it.
	fn next_character(&self, built: &[u8]) -> Option<u8> {
		let word = self.target.as_ref()?.word.as_bytes();
		if word.len() > built.len() && word.starts_with(built) {
			Some(word[built.len()])
		} else {
			None
		}
	}

	/// Opens a node for `character` on top of `frames`, ranking it when the
	/// path now spells the lookahead.
	fn open(&mut self, frames: &mut Vec<TrieNode>, built: &mut Vec<u8>, character: u8) -> Result<()> {
		let mut node = TrieNode::new(character);
		built.push(character);

		let completes_target = matches!(&self.target, Some(record) if record.word.as_bytes() == built.as_slice());
		if completes_target {
			node.rank = self.target.as_ref().map(|record| record.frequency);
			self.words += 1;
			self.advance(built)?;
		}

		frames.push(node);
		Ok(())
	}

	/// Builds one root-level branch along `first`.
	///
	/// `frames` holds the open nodes from the branch head down to the node
	/// being extended, one per character of `built`. The top frame grows
	/// while the lookahead stays inside its path, then closes into its parent.
	fn extend(&mut self, root: &mut TrieNode, first: u8) -> Result<()> {
		let mut frames = Vec::new();
		let mut built = Vec::new();
		self.open(&mut frames, &mut built, first)?;

		while !frames.is_empty() {
			// Re-evaluated against the current lookahead after every child
			if let Some(next) = self.next_character(&built) {
				self.open(&mut frames, &mut built, next)?;
				continue;
			}
			built.pop();
			if let Some(node) = frames.pop() {
				match frames.last_mut() {
					Some(parent) => parent.children.push(node),
					None => root.children.push(node),
				}
			}
		}
		Ok(())
	}

	/// Drains the cursor into `root` until the budget is spent or the input
	/// ends. The budget only counts reads, the first lookahead included.
	fn build(mut self, root: &mut TrieNode) -> Result<BuildSummary> {
		while self.cursor.within_budget() {
			let Some(first) = self.target.as_ref().and_then(|record| record.word.bytes().next()) else {
				break;
			};
			self.extend(root, first)?;
		}

		Ok(BuildSummary {
			words: self.words,
			records_consumed: self.cursor.records_consumed(),
			records_total: self.cursor.records_total(),
		})
	}
}

/// Builds a trie from a freshly opened cursor.
///
/// # Errors
/// Propagates any cursor error other than end of input. A failed build
/// yields no tree.
pub(crate) fn build_trie<R: BufRead>(cursor: &mut VocabularyCursor<R>) -> Result<(TrieNode, BuildSummary)> {
	let mut root = TrieNode::root();
	let summary = TrieBuilder::new(cursor)?.build(&mut root)?;
	Ok((root, summary))
}
