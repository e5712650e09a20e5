use thiserror::Error;

/// Errors surfaced by a generation run.
///
/// Parameter validation keeps plain `Result<_, String>` returns; this enum
/// covers the conditions a caller needs to match on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
	/// The requested unique-output target exceeds what the model can reach
	/// under the length cap. Detected when `stall_limit` consecutive indices
	/// produce no new unique string, rather than looping forever.
	#[error("target of {target} unique strings unreachable: {produced} produced after {indices} indices")]
	TargetUnreachable {
		target: usize,
		produced: usize,
		indices: u64,
	},
}
