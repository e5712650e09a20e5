use crate::corpus::Side;

/// Input parameters for one generation run.
///
/// `GenerationInput` carries both **model parameters** (order bound,
/// division fraction) and **run parameters** (unique-output target, length
/// cap, stall limit) for one side.
///
/// # Responsibilities
/// - Track the side being generated and its unique-output target
/// - Hold the corpus division fraction behind a validated setter
/// - Bound runaway generation (`max_len`) and saturated runs
///   (`stall_limit`)
///
/// # Invariants
/// - `division` is always in [0.0, 1.0]
/// - `stall_limit` should be >= 1; a run that makes no progress for that
///   many consecutive indices is declared unreachable
#[derive(Clone, Debug)]
pub struct GenerationInput {
	/// Which half of each corpus line this run models and emits.
	pub side: Side,

	/// Order bound of the model (contexts of length `0..max_order`).
	pub max_order: usize,

	/// Number of unique strings to emit before the run ends.
	pub target: usize,

	/// Hard cap on generated string length, counting the leading bracket.
	pub max_len: usize,

	/// Consecutive duplicate indices tolerated before giving up.
	pub stall_limit: u64,

	/// Fraction of each corpus line kept on the left side.
	division: f64,
}

impl GenerationInput {
	/// Creates a run input with the defaults for one side.
	///
	/// Defaults: order bound 5, division 0.4, length cap 50, stall limit
	/// 1,000,000; the unique target is 250,000 for `Side::Left` and
	/// 1,000,000 for `Side::Right`.
	pub fn new(side: Side) -> Self {
		Self {
			side,
			max_order: 5,
			target: match side {
				Side::Left => 250_000,
				Side::Right => 1_000_000,
			},
			max_len: 50,
			stall_limit: 1_000_000,
			division: 0.4,
		}
	}

	/// Returns the current division fraction.
	pub fn division(&self) -> f64 {
		self.division
	}

	/// Sets the division fraction (0.0..1.0).
	///
	/// # Errors
	/// Returns an error if the value is outside the valid range.
	pub fn set_division(&mut self, division: f64) -> Result<(), String> {
		if !(0.0..=1.0).contains(&division) {
			return Err("Division must be between 0.0 and 1.0".to_owned());
		}
		self.division = division;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn per_side_defaults() {
		let left = GenerationInput::new(Side::Left);
		assert_eq!(left.target, 250_000);
		assert_eq!(left.max_order, 5);
		assert_eq!(left.max_len, 50);
		assert_eq!(left.division(), 0.4);

		let right = GenerationInput::new(Side::Right);
		assert_eq!(right.target, 1_000_000);
	}

	#[test]
	fn run_parameters_are_debuggable() {
		let input = GenerationInput::new(Side::Left);
		let printed = format!("{:?}", input.clone());
		assert!(printed.contains("division: 0.4"));
		assert!(printed.contains("max_order: 5"));
	}

	#[test]
	fn division_is_validated() {
		let mut input = GenerationInput::new(Side::Left);
		assert!(input.set_division(0.0).is_ok());
		assert!(input.set_division(1.0).is_ok());
		assert!(input.set_division(-0.1).is_err());
		assert!(input.set_division(1.1).is_err());
		assert_eq!(input.division(), 1.0);
	}
}
