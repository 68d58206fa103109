use std::fmt;
use std::io::BufRead;
use std::path::Path;
use std::thread;

use log::{debug, info};

use super::completion_input::{Completion, CompletionInput};
use super::cursor::VocabularyCursor;
use super::trie_node::{build_trie, TrieNode};
use super::working_set::WorkingSet;
use crate::error::Result;
use crate::io;

/// A built, read-only completion index.
///
/// # Responsibilities
/// - Build the prefix tree from a sorted vocabulary in one pass
/// - Answer bounded, frequency-ranked completion queries
/// - Share the tree read-only across concurrent queries
///
/// Once built the tree is never mutated, so `&WordTree` can be used from
/// any number of threads.
pub struct WordTree {
	name: String,
	root: TrieNode,
	words: usize,
	nodes: usize,
}

impl WordTree {
	/// Builds an index from a vocabulary file.
	///
	/// The index is named after the file stem.
	///
	/// # Errors
	/// - Returns an error if the file cannot be opened or read.
	/// - Returns an error if the header or a record is malformed, or the
	///   words are not sorted.
	pub fn new<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let name = io::get_filename(&filepath)?;
		let reader = io::open_file(&filepath)?;
		Self::from_reader(name, reader)
	}

	/// Builds an index from any buffered reader holding the vocabulary.
	pub fn from_reader<R: BufRead>(name: impl Into<String>, reader: R) -> Result<Self> {
		let name = name.into();
		let mut cursor = VocabularyCursor::new(reader)?;
		let (root, summary) = build_trie(&mut cursor)?;
		let nodes = root.subtree_size() - 1;

		info!(
			"built word tree {:?}: {} words, {} nodes ({} of {} declared records read)",
			name, summary.words, nodes, summary.records_consumed, summary.records_total
		);
		Ok(Self { name, root, words: summary.words, nodes })
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Number of distinct words in the index.
	pub fn len(&self) -> usize {
		self.words
	}

	pub fn is_empty(&self) -> bool {
		self.words == 0
	}

	/// Number of trie nodes, root excluded.
	pub fn node_count(&self) -> usize {
		self.nodes
	}

	/// Exact lookup of a word's frequency.
	pub fn frequency(&self, word: &str) -> Option<u64> {
		word.bytes().try_fold(&self.root, |node, c| node.child(c))?.rank
	}

	/// Every `(word, frequency)` pair in traversal order.
	pub fn entries(&self) -> Vec<Completion> {
		let mut entries = Vec::with_capacity(self.words);
		for child in &self.root.children {
			Self::visit(child, Vec::new(), |completion| entries.push(completion));
		}
		entries
	}

	/// Completions of `prefix` according to `input`.
	///
	/// # Behavior
	/// - Only the branch spelling `prefix` is explored; other branches are
	///   pruned character by character.
	/// - Every word in that branch (the prefix itself included) is offered
	///   to a bounded working set of size `input.limit`.
	/// - The survivors are returned sorted by the active `Ranking`.
	///
	/// An empty prefix, an unknown prefix or a zero limit give an empty result.
	pub fn complete(&self, prefix: &str, input: &CompletionInput) -> Vec<Completion> {
		let prefix = prefix.as_bytes();
		let Some(&first) = prefix.first() else {
			return Vec::new();
		};
		let Some(start) = self.root.child(first) else {
			debug!("no completion for {:?}: unknown first character", String::from_utf8_lossy(prefix));
			return Vec::new();
		};

		let mut set = WorkingSet::new(input.limit, input.ranking);
		// Walk down the literal prefix
		let mut node = start;
		let mut path = vec![first];
		while path.len() < prefix.len() {
			match node.child(prefix[path.len()]) {
				Some(child) => {
					path.push(child.character);
					node = child;
				}
				None => return Vec::new(),
			}
		}
		Self::visit(node, path[..path.len() - 1].to_vec(), |completion| set.insert(completion));

		let completions = set.into_sorted();
		debug!(
			"completed {:?} (limit {}): {} results",
			String::from_utf8_lossy(prefix),
			input.limit,
			completions.len()
		);
		completions
	}

	/// Answers a batch of independent queries in parallel.
	///
	/// The batch is split into chunks spread over scoped threads, each
	/// borrowing the tree read-only. Results keep the order of `prefixes`.
	pub fn complete_many<S: AsRef<str> + Sync>(&self, prefixes: &[S], input: &CompletionInput) -> Vec<Vec<Completion>> {
		if prefixes.is_empty() {
			return Vec::new();
		}
		let threads = num_cpus::get().max(1);
		let chunk_size = prefixes.len().div_ceil(threads);

		thread::scope(|scope| {
			let handles: Vec<_> = prefixes
				.chunks(chunk_size)
				.map(|chunk| {
					scope.spawn(move || {
						chunk
							.iter()
							.map(|prefix| self.complete(prefix.as_ref(), input))
							.collect::<Vec<_>>()
					})
				})
				.collect();

			handles
				.into_iter()
				.flat_map(|handle| match handle.join() {
					Ok(results) => results,
					Err(panic) => std::panic::resume_unwind(panic),
				})
				.collect()
		})
	}

	/// Pre-order walk of `node`'s subtree, emitting every complete word.
	///
	/// `path` spells the characters above `node`. Uses an explicit stack;
	/// children are visited in insertion order.
	fn visit<F: FnMut(Completion)>(node: &TrieNode, mut path: Vec<u8>, mut emit: F) {
		let base = path.len();
		let mut stack = vec![(node, base)];
		while let Some((node, depth)) = stack.pop() {
			path.truncate(depth);
			path.push(node.character);
			if let Some(frequency) = node.rank {
				emit(Completion { word: String::from_utf8_lossy(&path).into_owned(), frequency });
			}
			stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
		}
	}
}

impl fmt::Debug for WordTree {
	// Summary only: the tree itself can be as deep as the longest word
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("WordTree")
			.field("name", &self.name)
			.field("words", &self.words)
			.field("nodes", &self.nodes)
			.finish()
	}
}
