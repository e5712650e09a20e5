use std::collections::HashSet;

/// Which half of each corpus line a model is built from, and therefore which
/// orientation the generated strings come out in.
///
/// # Variants
/// - `Left`: keep the head of each line up to the division point; generated
///   strings are emitted as-is.
/// - `Right`: keep the tail of each line from the division point, reversed so
///   the model predicts it back-to-front; generated strings are reversed back
///   to natural orientation before emission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
	Left,
	Right,
}

impl Side {
	/// Short label used for cache file names and logging.
	pub fn tag(&self) -> &'static str {
		match self {
			Side::Left => "left",
			Side::Right => "right",
		}
	}
}

/// Prepares raw corpus lines for model construction.
///
/// # Behavior
/// - Trims surrounding whitespace and lowercases every line.
/// - Deduplicates, preserving first-occurrence order.
/// - Cuts each line at `floor(chars * division)`: `Side::Left` keeps the
///   head, `Side::Right` keeps the tail reversed.
/// - Deduplicates the cut fragments again, so repeated truncations do not
///   double-count in the frequency tables.
///
/// # Notes
/// - First-occurrence order is preserved throughout; the downstream ranking
///   tie-break depends on it.
/// - `division` is expected in [0.0, 1.0] (validated by `GenerationInput`);
///   out-of-range values are clamped at the line length.
/// - UTF-8 safe: the cut point counts characters, not bytes.
pub fn prepare(lines: &[String], side: Side, division: f64) -> Vec<String> {
	let mut seen = HashSet::new();
	let mut cleaned = Vec::new();
	for line in lines {
		let line = line.trim().to_lowercase();
		if seen.insert(line.clone()) {
			cleaned.push(line);
		}
	}

	let mut seen = HashSet::new();
	let mut fragments = Vec::new();
	for line in cleaned {
		let chars: Vec<char> = line.chars().collect();
		let cut = ((chars.len() as f64 * division) as usize).min(chars.len());
		let fragment: String = match side {
			Side::Left => chars[..cut].iter().collect(),
			Side::Right => chars[cut..].iter().rev().collect(),
		};
		if seen.insert(fragment.clone()) {
			fragments.push(fragment);
		}
	}
	fragments
}

#[cfg(test)]
mod tests {
	use super::*;

	fn lines(raw: &[&str]) -> Vec<String> {
		raw.iter().map(|s| (*s).to_owned()).collect()
	}

	#[test]
	fn left_side_trims_dedups_and_cuts() {
		// "abc" appears twice (once padded, once mixed-case); both cuts collide
		let prepared = prepare(&lines(&["  AbC  ", "abc", "abd"]), Side::Left, 0.5);
		assert_eq!(prepared, vec!["a".to_owned()]);
	}

	#[test]
	fn right_side_reverses_the_tail() {
		let prepared = prepare(&lines(&["abcd"]), Side::Right, 0.25);
		assert_eq!(prepared, vec!["dcb".to_owned()]);
	}

	#[test]
	fn first_occurrence_order_is_preserved() {
		let prepared = prepare(&lines(&["zz", "aa", "zz", "mm"]), Side::Left, 1.0);
		assert_eq!(prepared, vec!["zz".to_owned(), "aa".to_owned(), "mm".to_owned()]);
	}

	#[test]
	fn division_bounds() {
		let prepared = prepare(&lines(&["abc"]), Side::Left, 1.0);
		assert_eq!(prepared, vec!["abc".to_owned()]);

		let prepared = prepare(&lines(&["abc"]), Side::Right, 1.0);
		assert_eq!(prepared, vec!["".to_owned()]);

		let prepared = prepare(&lines(&["abc"]), Side::Right, 0.0);
		assert_eq!(prepared, vec!["cba".to_owned()]);
	}
}
