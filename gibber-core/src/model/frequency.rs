use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

/// Symbol that brackets every training line and ends a generated string.
pub const TERMINATOR: char = '\n';

/// Observed next-symbol counts for one (order, context) pair.
///
/// Counts are kept in first-encounter order: the ranking applied later
/// breaks weight ties by reverse-of-encounter order, so the order symbols
/// were first seen in is part of the deterministic contract. Tables hold a
/// handful of symbols at most, so the linear probe is cheaper than hashing.
///
/// # Invariants
/// - Every stored count is >= 1
/// - Counts only grow while the model is being built
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
	counts: Vec<(char, u32)>,
}

impl FrequencyTable {
	pub(crate) fn new() -> Self {
		Self { counts: Vec::new() }
	}

	/// Records one occurrence of `symbol` after this table's context.
	pub(crate) fn record(&mut self, symbol: char) {
		if let Some(entry) = self.counts.iter_mut().find(|(c, _)| *c == symbol) {
			entry.1 += 1;
		} else {
			self.counts.push((symbol, 1));
		}
	}

	/// Sums another table's counts into this one.
	///
	/// Symbols unknown to this table are appended in the other table's
	/// order, which keeps global first-encounter order intact as long as
	/// partial tables are merged in corpus order.
	pub(crate) fn merge(&mut self, other: &Self) {
		for (symbol, count) in &other.counts {
			if let Some(entry) = self.counts.iter_mut().find(|(c, _)| c == symbol) {
				entry.1 += count;
			} else {
				self.counts.push((*symbol, *count));
			}
		}
	}

	/// Number of distinct symbols seen after this context.
	pub fn distinct(&self) -> usize {
		self.counts.len()
	}

	/// Sum of all observation counts.
	pub fn total(&self) -> u32 {
		self.counts.iter().map(|(_, count)| count).sum()
	}

	/// Observation count for one symbol (0 if never seen).
	pub fn count(&self, symbol: char) -> u32 {
		self.counts
			.iter()
			.find(|(c, _)| *c == symbol)
			.map(|(_, count)| *count)
			.unwrap_or(0)
	}

	/// Iterates over (symbol, count) pairs in first-encounter order.
	pub fn iter(&self) -> impl Iterator<Item = (char, u32)> + '_ {
		self.counts.iter().copied()
	}
}

/// Raw per-order frequency model built from training lines.
///
/// For every order `m` in `0..max_order`, maps each context (the `m`
/// symbols preceding a position) to a `FrequencyTable` of observed next
/// symbols. Order 0 uses the empty context and applies globally.
///
/// # Responsibilities
/// - Bracket each training line with `TERMINATOR` on both ends
/// - Accumulate next-symbol counts for every order and position
/// - Merge with another model of the same order bound
/// - Build from a full line collection, sequentially or in parallel
///
/// # Invariants
/// - `max_order` is always >= 1
/// - An empty training set yields empty tables for every order, which is a
///   valid degenerate model (decoding then falls through to raw bytes)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyModel {
	/// Number of orders tracked (contexts of length `0..max_order`)
	max_order: usize,

	/// One context -> table mapping per order
	orders: Vec<HashMap<String, FrequencyTable>>,
}

impl FrequencyModel {
	/// Creates an empty frequency model with the given order bound.
	///
	/// # Errors
	/// Returns an error if `max_order == 0`.
	pub fn new(max_order: usize) -> Result<Self, String> {
		if max_order == 0 {
			return Err("max_order must be >= 1".to_owned());
		}
		Ok(Self {
			max_order,
			orders: (0..max_order).map(|_| HashMap::new()).collect(),
		})
	}

	/// Returns the order bound.
	pub fn max_order(&self) -> usize {
		self.max_order
	}

	/// Folds one training line into the model.
	///
	/// The line is bracketed with `TERMINATOR` on both ends; for every
	/// position `i` and every order `m` with `i >= m`, the symbol at `i` is
	/// counted after the `m` symbols immediately preceding it.
	pub fn add_line(&mut self, line: &str) {
		let mut bracketed: Vec<char> = Vec::with_capacity(line.len() + 2);
		bracketed.push(TERMINATOR);
		bracketed.extend(line.chars());
		bracketed.push(TERMINATOR);

		for i in 0..bracketed.len() {
			for m in 0..self.max_order {
				if i < m {
					continue;
				}
				let context: String = bracketed[i - m..i].iter().collect();
				let table = self.orders[m].entry(context).or_insert_with(FrequencyTable::new);
				table.record(bracketed[i]);
			}
		}
	}

	/// Looks up the table for one (order, context) pair.
	pub fn table(&self, order: usize, context: &str) -> Option<&FrequencyTable> {
		self.orders.get(order)?.get(context)
	}

	/// Number of distinct contexts observed at one order.
	pub fn context_count(&self, order: usize) -> usize {
		self.orders.get(order).map(HashMap::len).unwrap_or(0)
	}

	/// True if no training line has been folded in.
	pub fn is_empty(&self) -> bool {
		self.orders.iter().all(HashMap::is_empty)
	}

	/// Merges another frequency model into this one.
	///
	/// # Notes
	/// - Both models must have the same order bound.
	/// - Counts for matching (order, context, symbol) triples are summed.
	/// - Merging chunk models in corpus order reproduces the table ordering
	///   of a sequential build exactly.
	///
	/// # Errors
	/// Returns an error if the order bounds do not match.
	pub fn merge(&mut self, other: &Self) -> Result<(), String> {
		if self.max_order != other.max_order {
			return Err("Order bound mismatch".to_owned());
		}

		for (contexts, other_contexts) in self.orders.iter_mut().zip(&other.orders) {
			for (context, table) in other_contexts {
				if let Some(existing) = contexts.get_mut(context) {
					existing.merge(table);
				} else {
					contexts.insert(context.clone(), table.clone());
				}
			}
		}

		Ok(())
	}

	/// Builds a model sequentially from a collection of training lines.
	pub fn from_lines(lines: &[String], max_order: usize) -> Result<Self, String> {
		let mut model = Self::new(max_order)?;
		for line in lines {
			model.add_line(line);
		}
		Ok(model)
	}

	/// Builds a model from training lines using all available cores.
	///
	/// # Behavior
	/// - Splits the lines into chunks (based on CPU cores * factor).
	/// - Spawns threads to build partial models for each chunk.
	/// - Collects the partials over an MPSC channel, then merges them in
	///   chunk order, not arrival order: first-encounter order inside each
	///   table must match a sequential build for the ranking tie-break to
	///   be reproducible.
	///
	/// # Errors
	/// Returns an error if `max_order == 0`.
	pub fn build_parallel(lines: &[String], max_order: usize) -> Result<Self, String> {
		let mut model = Self::new(max_order)?;
		if lines.is_empty() {
			return Ok(model);
		}

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = (lines.len() + chunks - 1) / chunks;

		let (tx, rx) = mpsc::channel();
		for (index, chunk) in lines.chunks(chunk_size).enumerate() {
			let tx = tx.clone();
			let chunk: Vec<String> = chunk.to_vec();

			thread::spawn(move || {
				// Cannot fail: max_order was validated above
				let partial = FrequencyModel::from_lines(&chunk, max_order)
					.expect("order bound already validated");
				tx.send((index, partial)).expect("Failed to send from thread");
			});
		}
		drop(tx);

		let mut partials: Vec<(usize, FrequencyModel)> = rx.iter().collect();
		partials.sort_by_key(|(index, _)| *index);
		for (_, partial) in &partials {
			model.merge(partial)?;
		}

		Ok(model)
	}

	pub(crate) fn into_parts(self) -> (usize, Vec<HashMap<String, FrequencyTable>>) {
		(self.max_order, self.orders)
	}
}
