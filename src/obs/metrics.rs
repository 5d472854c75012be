// self
use crate::{auth::ProviderId, obs::ProfileOutcome};

/// Records a profile build outcome via the global metrics recorder (when enabled).
pub fn record_profile_outcome(provider: &ProviderId, outcome: ProfileOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"cognito_profile_build_total",
			"provider" => provider.to_string(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (provider, outcome);
	}
}
