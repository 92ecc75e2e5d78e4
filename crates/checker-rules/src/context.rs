use checker_types::{Network, ReferenceSnapshot};
use chrono::{DateTime, Utc};

/// Everything a section validator may read besides the document itself.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
	pub network: Network,
	pub snapshot: &'a ReferenceSnapshot,
	/// Lower bound for checks against the current time.
	pub now: DateTime<Utc>,
}

impl<'a> ValidationContext<'a> {
	pub fn new(snapshot: &'a ReferenceSnapshot, now: DateTime<Utc>) -> Self {
		Self {
			network: snapshot.network,
			snapshot,
			now,
		}
	}
}
