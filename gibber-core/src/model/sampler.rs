use super::distribution::Model;

const BYTE_RANGE: f64 = 256.0;

/// Keeps a coordinate inside [0,1).
///
/// Repeated renormalization can drift a coordinate onto the boundary;
/// values are clamped rather than trusted. NaN collapses to 0.
fn clamp_unit(coordinate: f64) -> f64 {
	if coordinate >= 1.0 {
		1.0 - f64::EPSILON
	} else if coordinate >= 0.0 {
		coordinate
	} else {
		0.0
	}
}

/// Returns the last `n` characters of a string (UTF-8 safe).
fn last_n_chars(s: &str, n: usize) -> String {
	if n > s.chars().count() {
		return s.to_owned();
	}
	s.chars()
		.rev()
		.take(n)
		.collect::<Vec<_>>()
		.into_iter()
		.rev()
		.collect()
}

/// Order-descending decoder over a frozen `Model`.
///
/// # Responsibilities
/// - Prefer the most specific statistics: walk orders from `max_order - 1`
///   down to 0, using the trailing characters of the supplied context
/// - On an escape, retry the next shorter context with the original, not
///   yet rescaled coordinate (the escape slice's consumed mass is
///   discarded)
/// - When every order escapes or is unobserved, decode one of the 256 byte
///   values uniformly
///
/// # Invariants
/// - Decoding is total: it always returns a symbol, even for an empty model
/// - Returned coordinates always lie in [0,1)
pub struct Sampler<'a> {
	model: &'a Model,
}

impl<'a> Sampler<'a> {
	pub fn new(model: &'a Model) -> Self {
		Self { model }
	}

	/// Decodes one symbol from a context and a coordinate in [0,1).
	///
	/// # Returns
	/// The decoded symbol and the renormalized coordinate reflecting the
	/// probability mass consumed by it.
	pub fn decode(&self, context: &str, coordinate: f64) -> (char, f64) {
		let coordinate = clamp_unit(coordinate);
		let context_len = context.chars().count();

		for order in (0..self.model.max_order()).rev() {
			if order > context_len {
				continue;
			}
			let trailing = last_n_chars(context, order);
			let Some(distribution) = self.model.distribution(order, &trailing) else {
				continue;
			};
			if let Some((symbol, renormalized)) = distribution.select(coordinate) {
				return (symbol, clamp_unit(renormalized));
			}
			// Escape: fall through to the next shorter context
		}

		let scaled = coordinate * BYTE_RANGE;
		let byte = (scaled as u32).min(255) as u8;
		(char::from(byte), clamp_unit(scaled - f64::from(byte)))
	}
}
