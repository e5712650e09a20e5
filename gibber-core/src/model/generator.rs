use std::collections::HashSet;

use super::distribution::Model;
use super::frequency::TERMINATOR;
use super::generation_input::GenerationInput;
use super::indexer::top;
use super::sampler::Sampler;
use crate::corpus::Side;
use crate::error::GenerateError;

/// Drives a frozen `Model` to produce strings.
///
/// # Responsibilities
/// - Extend a string one decoded symbol at a time until it terminates or
///   hits the length cap
/// - Enumerate the low-discrepancy index sequence to produce an
///   arbitrarily large stream of unique strings
/// - Deduplicate emitted strings within one run and detect runs whose
///   target cannot be reached
#[derive(Debug)]
pub struct Generator {
	model: Model,
}

impl Generator {
	pub fn new(model: Model) -> Self {
		Self { model }
	}

	/// Read-only access to the underlying model.
	pub fn model(&self) -> &Model {
		&self.model
	}

	/// Generates one string from a coordinate in [0,1).
	///
	/// Starts from the bracket context and repeatedly decodes, feeding each
	/// renormalized coordinate into the next step, until the appended
	/// symbol is `TERMINATOR` or the accumulated length reaches `max_len`.
	///
	/// # Returns
	/// The accumulated string, bracket-inclusive (leading terminator, and a
	/// trailing one unless the cap cut generation short).
	pub fn generate(&self, coordinate: f64, max_len: usize) -> String {
		let sampler = Sampler::new(&self.model);
		let mut line = String::new();
		line.push(TERMINATOR);
		let mut length = 1;
		let mut coordinate = coordinate;

		while length < max_len {
			let (symbol, next) = sampler.decode(&line, coordinate);
			line.push(symbol);
			length += 1;
			coordinate = next;
			if symbol == TERMINATOR {
				break;
			}
		}

		line
	}

	/// Emits `input.target` unique strings, driven by the low-discrepancy
	/// index sequence.
	///
	/// # Behavior
	/// - For index 0, 1, 2, ...: generate from `top(index)`, trim
	///   whitespace, and reverse the string for `Side::Right` (back to
	///   natural orientation).
	/// - A string already emitted in this run is skipped; the index
	///   advances regardless. Duplicates are expected to dominate as the
	///   reachable space saturates.
	/// - The run's unique set lives exactly as long as the run.
	///
	/// # Errors
	/// Returns `GenerateError::TargetUnreachable` when `stall_limit`
	/// consecutive indices produce no new unique string, so a saturated
	/// space surfaces as an explicit condition instead of an endless loop.
	pub fn generate_unique(&self, input: &GenerationInput) -> Result<Vec<String>, GenerateError> {
		let mut seen: HashSet<String> = HashSet::new();
		let mut emitted: Vec<String> = Vec::with_capacity(input.target);
		let mut index: u64 = 0;
		let mut stalled: u64 = 0;

		while emitted.len() < input.target {
			let coordinate = top(index);
			let mut guess = self.generate(coordinate, input.max_len).trim().to_owned();
			if input.side == Side::Right {
				guess = guess.chars().rev().collect();
			}
			index += 1;

			if seen.insert(guess.clone()) {
				emitted.push(guess);
				stalled = 0;
			} else {
				stalled += 1;
				if stalled >= input.stall_limit {
					return Err(GenerateError::TargetUnreachable {
						target: input.target,
						produced: emitted.len(),
						indices: index,
					});
				}
			}
		}

		Ok(emitted)
	}
}
