use std::io::BufRead;

use log::warn;

use crate::error::{Error, Result};
use crate::io::Tokens;

/// Records subtracted from the declared header count before use.
///
/// Guards against trailing or malformed lines near the end of the file.
pub const DECLARED_MARGIN: i64 = 10;

/// One `(word, frequency)` entry of the vocabulary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocabularyRecord {
	pub word: String,
	pub frequency: u64,
}

/// Forward-only reader producing one `VocabularyRecord` at a time.
///
/// The input starts with an integer header (`declared_count`) followed by
/// alternating word and frequency tokens, sorted ascending by word.
///
/// The cursor only reports the record budget (`records_total`); reads stop
/// at the real end of the stream. Enforcing the budget is up to the caller.
///
/// # Invariants
/// - Every record returned sorts at or after the previous one
pub struct VocabularyCursor<R> {
	tokens: Tokens<R>,
	/// Most recently read record
	current_record: Option<VocabularyRecord>,
	records_consumed: usize,
	/// Declared count minus `DECLARED_MARGIN`, floored at zero
	records_total: usize,
	exhausted: bool,
}

impl<R: BufRead> VocabularyCursor<R> {
	/// Reads the header and prepares the cursor.
	///
	/// # Errors
	/// Returns `MissingHeader` on empty input and `InvalidHeader` when the
	/// first token is not an integer.
	pub fn new(reader: R) -> Result<Self> {
		let mut tokens = Tokens::new(reader);
		let header = tokens.next_token()?.ok_or(Error::MissingHeader)?;
		let declared: i64 = header.parse().map_err(|_| Error::InvalidHeader(header.clone()))?;
		let records_total = usize::try_from(declared.saturating_sub(DECLARED_MARGIN)).unwrap_or(0);

		Ok(Self { tokens, current_record: None, records_consumed: 0, records_total, exhausted: false })
	}

	/// Reads the next record.
	///
	/// # Errors
	/// - `EndOfInput` once the stream holds no more records
	/// - `MissingFrequency` / `InvalidFrequency` on a malformed pair
	/// - `UnsortedInput` when the word sorts before the previous one
	pub fn next(&mut self) -> Result<VocabularyRecord> {
		if self.exhausted {
			return Err(Error::EndOfInput);
		}

		let Some(word) = self.tokens.next_token()? else {
			if self.records_consumed < self.records_total {
				warn!(
					"vocabulary ended after {} of {} declared records",
					self.records_consumed, self.records_total
				);
			}
			self.exhausted = true;
			return Err(Error::EndOfInput);
		};
		let token = self
			.tokens
			.next_token()?
			.ok_or_else(|| Error::MissingFrequency { word: word.clone() })?;
		let frequency = token
			.parse()
			.map_err(|_| Error::InvalidFrequency { word: word.clone(), token })?;

		if let Some(previous) = &self.current_record {
			if word < previous.word {
				return Err(Error::UnsortedInput { previous: previous.word.clone(), word });
			}
		}

		let record = VocabularyRecord { word, frequency };
		self.current_record = Some(record.clone());
		self.records_consumed += 1;
		Ok(record)
	}

	/// The most recently read record, if any.
	pub fn current_record(&self) -> Option<&VocabularyRecord> {
		self.current_record.as_ref()
	}

	/// Records read so far.
	pub fn records_consumed(&self) -> usize {
		self.records_consumed
	}

	/// Declared budget, margin already applied.
	pub fn records_total(&self) -> usize {
		self.records_total
	}

	/// True while fewer records were read than the budget allows.
	pub fn within_budget(&self) -> bool {
		self.records_consumed < self.records_total
	}
}
