use serde::{Deserialize, Serialize};

/// A word returned by a completion query.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Completion {
	pub word: String,
	pub frequency: u64,
}

/// Which end of the frequency scale a query keeps.
///
/// # Variants
/// - `LeastFrequent`: on overflow the largest frequency is evicted and the
///   survivors are returned in ascending order. This is the historical
///   behavior of the index and the default.
/// - `MostFrequent`: on overflow the smallest frequency is evicted and the
///   survivors are returned in descending order.
///
/// Among equal frequencies the candidate inserted first is evicted first.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Ranking {
	#[default]
	LeastFrequent,
	MostFrequent,
}

impl std::str::FromStr for Ranking {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"least_frequent" | "least" => Ok(Ranking::LeastFrequent),
			"most_frequent" | "most" => Ok(Ranking::MostFrequent),
			other => Err(format!("Unknown ranking: {other}")),
		}
	}
}

/// How a result set is rendered into a single line.
///
/// # Variants
/// - `DropLastChar`: words joined by single spaces, then the final
///   character removed. The historical C interface removed one byte; this
///   is the same for ASCII, while a multi-byte final character (`é` in
///   `café`) is removed whole so the line stays valid UTF-8.
/// - `Plain`: words joined by single spaces.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Framing {
	#[default]
	DropLastChar,
	Plain,
}

/// Parameters of a completion query.
///
/// # Invariants
/// - `limit` is the maximum number of completions returned; zero yields
///   an empty result
pub struct CompletionInput {
	/// Maximum number of completions.
	pub limit: usize,

	/// Eviction and ordering policy.
	pub ranking: Ranking,

	/// Rendering used by `format_completions` callers.
	pub framing: Framing,
}

impl Default for CompletionInput {
	fn default() -> Self {
		Self { limit: 5, ranking: Ranking::default(), framing: Framing::default() }
	}
}

impl CompletionInput {
	/// Default ranking and framing with the given limit.
	pub fn with_limit(limit: usize) -> Self {
		Self { limit, ..Self::default() }
	}

	/// Sets the completion limit.
	///
	/// # Errors
	/// Returns an error if `limit` is zero.
	pub fn set_limit(&mut self, limit: usize) -> Result<(), String> {
		if limit == 0 {
			return Err("Limit must be at least 1".to_owned());
		}
		self.limit = limit;
		Ok(())
	}
}

/// Renders completions as a single space-separated line.
///
/// With `Framing::DropLastChar` the last `char` of the joined line is
/// always removed, whatever it is (one byte for ASCII, the whole code point
/// otherwise). An empty result renders as `""`.
pub fn format_completions(completions: &[Completion], framing: Framing) -> String {
	let mut line = completions
		.iter()
		.map(|completion| completion.word.as_str())
		.collect::<Vec<_>>()
		.join(" ");
	if framing == Framing::DropLastChar {
		line.pop();
	}
	line
}

#[cfg(test)]
mod tests {
	use super::*;

	fn completions(words: &[&str]) -> Vec<Completion> {
		words.iter().map(|w| Completion { word: (*w).to_owned(), frequency: 1 }).collect()
	}

	#[test]
	fn drop_last_char_cuts_into_last_word() {
		let line = format_completions(&completions(&["cart", "car"]), Framing::DropLastChar);
		assert_eq!(line, "cart ca");
	}

	#[test]
	fn drop_last_char_removes_a_whole_multibyte_char() {
		let line = format_completions(&completions(&["cafés", "café"]), Framing::DropLastChar);
		assert_eq!(line, "cafés caf");
		assert_eq!(format_completions(&completions(&["é"]), Framing::DropLastChar), "");
	}

	#[test]
	fn plain_framing_keeps_every_word() {
		let line = format_completions(&completions(&["cart", "car"]), Framing::Plain);
		assert_eq!(line, "cart car");
	}

	#[test]
	fn empty_result_renders_empty() {
		assert_eq!(format_completions(&[], Framing::DropLastChar), "");
		assert_eq!(format_completions(&[], Framing::Plain), "");
	}

	#[test]
	fn limit_must_be_positive() {
		let mut input = CompletionInput::default();
		assert_eq!(input.limit, 5);
		assert!(input.set_limit(0).is_err());
		input.set_limit(2).unwrap();
		assert_eq!(input.limit, 2);
	}

	#[test]
	fn ranking_parses_from_query_strings() {
		assert_eq!("most".parse::<Ranking>().unwrap(), Ranking::MostFrequent);
		assert_eq!("Least_Frequent".parse::<Ranking>().unwrap(), Ranking::LeastFrequent);
		assert!("best".parse::<Ranking>().is_err());
	}
}
