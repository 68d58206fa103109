//! Error types for word-tree-core

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
	/// The vocabulary could not be opened or read
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// The input holds no declared record count
	#[error("Missing record count header")]
	MissingHeader,

	/// The declared record count is not an integer
	#[error("Invalid record count header: {0:?}")]
	InvalidHeader(String),

	/// A word has no frequency after it
	#[error("Missing frequency after word {word:?}")]
	MissingFrequency { word: String },

	/// A frequency token is not a non-negative integer
	#[error("Invalid frequency {token:?} for word {word:?}")]
	InvalidFrequency { word: String, token: String },

	/// Records are not in ascending lexicographic order
	#[error("Unsorted input: {word:?} follows {previous:?}")]
	UnsortedInput { previous: String, word: String },

	/// No more declared (or available) records
	#[error("End of input")]
	EndOfInput,

	/// Query issued before the process-wide index was built
	#[error("Word tree not initialized")]
	NotInitialized,

	/// Process-wide index built twice
	#[error("Word tree already initialized")]
	AlreadyInitialized,

	/// Null or non UTF-8 string received at the C boundary
	#[error("Invalid string argument")]
	InvalidArgument,
}

impl Error {
	/// True for the end-of-stream condition that terminates a build normally.
	pub fn is_end_of_input(&self) -> bool {
		matches!(self, Error::EndOfInput)
	}
}
