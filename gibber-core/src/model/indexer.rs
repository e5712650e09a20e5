/// Maps a non-negative index to a coordinate in [0,1) by bit reversal.
///
/// Bit `k` of the index contributes `2^-(k+1)` to the result: the index's
/// binary digits, least significant first, become the output's fractional
/// binary digits, most significant first. This is the van der Corput base-2
/// sequence; enumerating indices 0, 1, 2, ... visits [0,1) in a
/// low-discrepancy order (well spread, distinct for distinct indices) with
/// no randomness source, so a generation run is fully reproducible and can
/// be resumed or sharded by index range.
pub fn top(index: u64) -> f64 {
	let mut fraction = 0.0;
	let mut scale = 1.0;
	let mut index = index;
	while index != 0 {
		scale *= 0.5;
		if index & 1 == 1 {
			fraction += scale;
		}
		index >>= 1;
	}
	fraction
}
