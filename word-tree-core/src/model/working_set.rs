use super::completion_input::{Completion, Ranking};

/// Size-limited candidate set maintained by insert-then-evict.
///
/// After each insertion that pushes the set past `capacity`, one linear
/// scan removes the candidate at the "wrong" end of the frequency scale
/// for the active `Ranking`. Survivors therefore depend on visit order when
/// frequencies tie at the eviction boundary.
pub(crate) struct WorkingSet {
	capacity: usize,
	ranking: Ranking,
	candidates: Vec<Completion>,
}

impl WorkingSet {
	pub(crate) fn new(capacity: usize, ranking: Ranking) -> Self {
		Self { capacity, ranking, candidates: Vec::new() }
	}

	pub(crate) fn insert(&mut self, candidate: Completion) {
		self.candidates.push(candidate);
		if self.candidates.len() > self.capacity {
			if let Some(index) = self.eviction_index() {
				self.candidates.remove(index);
			}
		}
	}

	/// First candidate holding the extreme frequency to evict.
	fn eviction_index(&self) -> Option<usize> {
		let mut selected: Option<(usize, u64)> = None;
		for (index, candidate) in self.candidates.iter().enumerate() {
			let replace = match (selected, self.ranking) {
				(None, _) => true,
				(Some((_, best)), Ranking::LeastFrequent) => candidate.frequency > best,
				(Some((_, best)), Ranking::MostFrequent) => candidate.frequency < best,
			};
			if replace {
				selected = Some((index, candidate.frequency));
			}
		}
		selected.map(|(index, _)| index)
	}

	/// Survivors in result order: ascending for `LeastFrequent`, descending
	/// for `MostFrequent`. The sort is stable.
	pub(crate) fn into_sorted(mut self) -> Vec<Completion> {
		match self.ranking {
			Ranking::LeastFrequent => self.candidates.sort_by_key(|c| c.frequency),
			Ranking::MostFrequent => self.candidates.sort_by(|a, b| b.frequency.cmp(&a.frequency)),
		}
		self.candidates.truncate(self.capacity);
		self.candidates
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn completion(word: &str, frequency: u64) -> Completion {
		Completion { word: word.to_owned(), frequency }
	}

	fn words(set: WorkingSet) -> Vec<String> {
		set.into_sorted().into_iter().map(|c| c.word).collect()
	}

	#[test]
	fn keeps_lowest_frequencies_by_default() {
		let mut set = WorkingSet::new(2, Ranking::LeastFrequent);
		set.insert(completion("car", 30));
		set.insert(completion("cart", 10));
		set.insert(completion("cat", 50));
		assert_eq!(words(set), ["cart", "car"]);
	}

	#[test]
	fn keeps_highest_frequencies_when_asked() {
		let mut set = WorkingSet::new(2, Ranking::MostFrequent);
		set.insert(completion("car", 30));
		set.insert(completion("cart", 10));
		set.insert(completion("cat", 50));
		assert_eq!(words(set), ["cat", "car"]);
	}

	#[test]
	fn ties_evict_the_first_inserted() {
		let mut set = WorkingSet::new(1, Ranking::LeastFrequent);
		set.insert(completion("a", 7));
		set.insert(completion("b", 7));
		assert_eq!(words(set), ["b"]);

		let mut set = WorkingSet::new(1, Ranking::LeastFrequent);
		set.insert(completion("b", 7));
		set.insert(completion("a", 7));
		assert_eq!(words(set), ["a"]);
	}

	#[test]
	fn zero_capacity_keeps_nothing() {
		let mut set = WorkingSet::new(0, Ranking::LeastFrequent);
		set.insert(completion("a", 1));
		assert!(set.into_sorted().is_empty());
	}

	#[test]
	fn stable_sort_preserves_visit_order_for_ties() {
		let mut set = WorkingSet::new(3, Ranking::LeastFrequent);
		set.insert(completion("x", 2));
		set.insert(completion("y", 1));
		set.insert(completion("z", 2));
		assert_eq!(words(set), ["y", "x", "z"]);
	}
}
