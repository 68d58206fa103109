use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Opens a file for buffered, streaming reads.
pub(crate) fn open_file<P: AsRef<Path>>(filename: P) -> io::Result<BufReader<File>> {
	Ok(BufReader::new(File::open(filename)?))
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/word_list.txt"` → `"word_list"`
/// - `"word_list.txt"` → `"word_list"`
pub(crate) fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Whitespace-delimited tokens read lazily from a `BufRead`.
///
/// Only the current line is buffered, so arbitrarily large inputs are
/// consumed in constant memory (apart from the longest line).
pub(crate) struct Tokens<R> {
	reader: R,
	line: String,
	pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
	pub(crate) fn new(reader: R) -> Self {
		Self { reader, line: String::new(), pending: VecDeque::new() }
	}

	/// Returns the next token, or `None` once the input is exhausted.
	pub(crate) fn next_token(&mut self) -> io::Result<Option<String>> {
		while self.pending.is_empty() {
			self.line.clear();
			if self.reader.read_line(&mut self.line)? == 0 {
				return Ok(None);
			}
			self.pending.extend(self.line.split_whitespace().map(str::to_owned));
		}
		Ok(self.pending.pop_front())
	}
}
