use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::frequency::{FrequencyModel, FrequencyTable};
use super::generation_input::GenerationInput;
use crate::corpus;
use crate::io::{build_output_path, read_file};

/// One slot of a ranked distribution: either a concrete symbol or the
/// synthetic escape to a shorter context.
///
/// Escape stays a tagged variant rather than a sentinel character so it can
/// never leak into generated output.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entry {
	Symbol(char),
	Escape,
}

/// Ranked cumulative distribution for one (order, context) pair.
///
/// Weights are the observed counts plus one escape entry weighted by the
/// number of distinct symbols in the context (PPM "Method C"). Entries are
/// ordered descending by weight; ties keep reverse-of-encounter order. The
/// exact rule is: stable sort ascending by weight over first-encounter
/// order (escape appended last), then reverse the whole sequence. An
/// unstable sort here would silently change which strings get generated.
///
/// # Invariants
/// - `total` equals the sum of all entry weights
/// - `total >= 1` (the escape weight alone is never zero once the context
///   has been observed)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RankedDistribution {
	entries: Vec<(Entry, u32)>,
	total: u32,
}

impl RankedDistribution {
	/// Derives the ranked distribution from a raw frequency table.
	pub fn from_table(table: &FrequencyTable) -> Self {
		let mut entries: Vec<(Entry, u32)> = table
			.iter()
			.map(|(symbol, count)| (Entry::Symbol(symbol), count))
			.collect();
		entries.push((Entry::Escape, table.distinct() as u32));

		entries.sort_by_key(|(_, weight)| *weight);
		entries.reverse();

		let total = entries.iter().map(|(_, weight)| weight).sum();
		Self { entries, total }
	}

	/// Sum of all entry weights.
	pub fn total(&self) -> u32 {
		self.total
	}

	/// Weight of the escape entry.
	pub fn escape_weight(&self) -> u32 {
		self.entries
			.iter()
			.find(|(entry, _)| *entry == Entry::Escape)
			.map(|(_, weight)| *weight)
			.unwrap_or(0)
	}

	/// Iterates over (entry, weight) pairs in rank order.
	pub fn entries(&self) -> impl Iterator<Item = (Entry, u32)> + '_ {
		self.entries.iter().copied()
	}

	/// Decodes a coordinate in [0,1) against this distribution.
	///
	/// Scales the coordinate by `total` and walks the ranked entries,
	/// subtracting each weight until the slot containing the target is
	/// found.
	///
	/// # Returns
	/// - `Some((symbol, renormalized))` for a concrete symbol, where the
	///   new coordinate is the target renormalized within that symbol's
	///   slice.
	/// - `None` when the escape entry is hit; the caller retries at the
	///   next shorter context.
	pub fn select(&self, coordinate: f64) -> Option<(char, f64)> {
		let mut target = coordinate * self.total as f64;
		for (entry, weight) in &self.entries {
			let weight = *weight as f64;
			if target < weight {
				return match entry {
					Entry::Symbol(symbol) => Some((*symbol, target / weight)),
					Entry::Escape => None,
				};
			}
			target -= weight;
		}
		// coordinate * total can round up to total itself; treat it as an
		// escape so decoding stays total
		None
	}
}

/// The frozen generation model: one ranked distribution per observed
/// (order, context) pair.
///
/// Built once from a `FrequencyModel` and never mutated afterwards, which
/// makes concurrent read-side sharing safe without locking.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Model {
	max_order: usize,
	orders: Vec<HashMap<String, RankedDistribution>>,
}

impl Model {
	/// Freezes a raw frequency model into ranked distributions.
	pub fn build(frequency: FrequencyModel) -> Self {
		let (max_order, raw_orders) = frequency.into_parts();
		let orders = raw_orders
			.into_iter()
			.map(|contexts| {
				contexts
					.into_iter()
					.map(|(context, table)| (context, RankedDistribution::from_table(&table)))
					.collect()
			})
			.collect();
		Self { max_order, orders }
	}

	/// Returns the order bound.
	pub fn max_order(&self) -> usize {
		self.max_order
	}

	/// Looks up the distribution for one (order, context) pair.
	pub fn distribution(&self, order: usize, context: &str) -> Option<&RankedDistribution> {
		self.orders.get(order)?.get(context)
	}

	/// True if the model was built from an empty training set.
	pub fn is_empty(&self) -> bool {
		self.orders.iter().all(HashMap::is_empty)
	}

	/// Loads a side's model from a corpus file, building it if no cache
	/// exists yet.
	///
	/// # Behavior
	/// - Checks for a postcard cache at
	///   `<corpus>.<side>.m<order>.d<division>.bin` and loads it when
	///   present. The build parameters are part of the cache name:
	///   changing the order bound or the division fraction builds a fresh
	///   model instead of silently reusing one built with old parameters.
	/// - Otherwise reads the corpus, runs corpus preparation for the
	///   configured side, builds the frequency model in parallel, freezes
	///   it and writes the cache for future fast loading.
	///
	/// # Errors
	/// Returns an error on file I/O or deserialization failure, or if the
	/// configured order bound is zero.
	pub fn from_corpus_file<P: AsRef<Path>>(
		path: P,
		input: &GenerationInput,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let cache_path = build_output_path(
			&path,
			&format!(
				"{}.m{}.d{:.3}.bin",
				input.side.tag(),
				input.max_order,
				input.division()
			),
		)?;
		if cache_path.exists() {
			let bytes = fs::read(cache_path)?;
			return Ok(postcard::from_bytes(&bytes)?);
		}

		let lines = read_file(&path)?;
		let fragments = corpus::prepare(&lines, input.side, input.division());
		let frequency = FrequencyModel::build_parallel(&fragments, input.max_order)?;
		let model = Self::build(frequency);

		let bytes = postcard::to_stdvec(&model)?;
		fs::write(cache_path, bytes)?;

		Ok(model)
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use super::*;
	use crate::corpus::Side;
	use crate::model::frequency::TERMINATOR;

	fn table(records: &[char]) -> FrequencyTable {
		let mut model = FrequencyModel::new(1).unwrap();
		// Build through a real model so encounter order matches usage
		let line: String = records.iter().collect();
		model.add_line(&line);
		model.table(0, "").unwrap().clone()
	}

	fn lines(raw: &[&str]) -> Vec<String> {
		raw.iter().map(|s| (*s).to_owned()).collect()
	}

	#[test]
	fn escape_weight_is_the_distinct_symbol_count() {
		// "\naaab\n": '\n' x2, 'a' x3, 'b' x1
		let dist = RankedDistribution::from_table(&table(&['a', 'a', 'a', 'b']));
		assert_eq!(dist.escape_weight(), 3);
		assert_eq!(dist.total(), 9);

		let weights: u32 = dist.entries().map(|(_, w)| w).sum();
		assert_eq!(weights, dist.total());
	}

	#[test]
	fn ranking_is_descending_with_reversed_tie_break() {
		// '\n' x2, 'x' x1, 'y' x1, escape 3: ascending stable keeps
		// x before y, reversal flips the tie to reverse-encounter order
		let dist = RankedDistribution::from_table(&table(&['x', 'y']));
		let ranked: Vec<(Entry, u32)> = dist.entries().collect();
		assert_eq!(
			ranked,
			vec![
				(Entry::Escape, 3),
				(Entry::Symbol(TERMINATOR), 2),
				(Entry::Symbol('y'), 1),
				(Entry::Symbol('x'), 1),
			]
		);
	}

	#[test]
	fn select_walks_the_ranked_entries() {
		// "\naaab\n" order 0: '\n' x2, 'a' x3, 'b' x1, escape 3, total 9
		// Ranked: [(esc,3),(a,3),(\n,2),(b,1)]
		let dist = RankedDistribution::from_table(&table(&['a', 'a', 'a', 'b']));
		let ranked: Vec<(Entry, u32)> = dist.entries().collect();
		assert_eq!(
			ranked,
			vec![
				(Entry::Escape, 3),
				(Entry::Symbol('a'), 3),
				(Entry::Symbol(TERMINATOR), 2),
				(Entry::Symbol('b'), 1),
			]
		);

		// target 0.0 lands in the escape slot
		assert_eq!(dist.select(0.0), None);
		// target 4.5 lands in the 'a' slot, renormalized to (4.5-3)/3
		let (symbol, renormalized) = dist.select(0.5).unwrap();
		assert_eq!(symbol, 'a');
		assert!((renormalized - 0.5).abs() < 1e-9);
		// target 8.5 lands in the last slot, renormalized to 0.5
		let (symbol, renormalized) = dist.select(8.5 / 9.0).unwrap();
		assert_eq!(symbol, 'b');
		assert!((renormalized - 0.5).abs() < 1e-9);
	}

	#[test]
	fn building_is_deterministic() {
		let corpus = lines(&["abc", "abd", "bcd", "abc"]);
		let a = Model::build(FrequencyModel::from_lines(&corpus, 3).unwrap());
		let b = Model::build(FrequencyModel::from_lines(&corpus, 3).unwrap());
		assert_eq!(a, b);
	}

	#[test]
	fn model_round_trips_through_postcard() {
		let corpus = lines(&["abc", "abd"]);
		let model = Model::build(FrequencyModel::from_lines(&corpus, 3).unwrap());
		let bytes = postcard::to_stdvec(&model).unwrap();
		let restored: Model = postcard::from_bytes(&bytes).unwrap();
		assert_eq!(model, restored);
	}

	#[test]
	fn from_corpus_file_builds_and_caches() {
		let dir = tempfile::tempdir().unwrap();
		let corpus_path = dir.path().join("corpus.txt");
		let mut file = std::fs::File::create(&corpus_path).unwrap();
		writeln!(file, "abc").unwrap();
		writeln!(file, "abd").unwrap();
		drop(file);

		let input = GenerationInput::new(Side::Left);
		let built = Model::from_corpus_file(&corpus_path, &input).unwrap();
		assert!(dir.path().join("corpus.left.m5.d0.400.bin").exists());

		let cached = Model::from_corpus_file(&corpus_path, &input).unwrap();
		assert_eq!(built, cached);
	}

	#[test]
	fn changed_build_parameters_bypass_the_cache() {
		let dir = tempfile::tempdir().unwrap();
		let corpus_path = dir.path().join("corpus.txt");
		let mut file = std::fs::File::create(&corpus_path).unwrap();
		writeln!(file, "abcdef").unwrap();
		writeln!(file, "abcxyz").unwrap();
		drop(file);

		// Populate the cache with the default order bound
		let mut input = GenerationInput::new(Side::Left);
		let default_order = Model::from_corpus_file(&corpus_path, &input).unwrap();
		assert_eq!(default_order.max_order(), 5);

		// A different order bound must build fresh, not load the cache
		input.max_order = 2;
		let low_order = Model::from_corpus_file(&corpus_path, &input).unwrap();
		assert_eq!(low_order.max_order(), 2);

		// A different division sees different fragments
		input.max_order = 5;
		input.set_division(1.0).unwrap();
		let full_lines = Model::from_corpus_file(&corpus_path, &input).unwrap();
		assert!(full_lines.distribution(1, "f").is_some());
		assert!(default_order.distribution(1, "f").is_none());
	}
}
