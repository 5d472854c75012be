//! Optional observability helpers for profile retrieval.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `cognito_profile.build` with the `provider`
//!   and `stage` (call site) fields.
//! - Enable `metrics` to increment the `cognito_profile_build_total` counter for every
//!   attempt/success/failure, labeled by `provider` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each profile build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProfileOutcome {
	/// Entry to `build_profile`.
	Attempt,
	/// Profile returned to the caller.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl ProfileOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ProfileOutcome::Attempt => "attempt",
			ProfileOutcome::Success => "success",
			ProfileOutcome::Failure => "failure",
		}
	}
}
impl Display for ProfileOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
