//! Built-in section validators.

mod banners;
mod general;
mod markets;
mod pools;
mod tokens;
mod transfers;

pub use banners::*;
pub use general::*;
pub use markets::*;
pub use pools::*;
pub use tokens::*;
pub use transfers::*;

use crate::registry::SectionValidator;
use checker_types::{Finding, Violation, ViolationKind};

/// Every built-in validator in reporting order.
pub fn default_validators() -> Vec<Box<dyn SectionValidator>> {
	vec![
		Box::new(NetworkFieldValidator),
		Box::new(MarketListsValidator),
		Box::new(BlacklistedPoolsValidator),
		Box::new(BlacklistedTokensValidator),
		Box::new(TransferDisabledTokensValidator),
		Box::new(TokenNameOverrideValidator),
		Box::new(CrossSellingTokensValidator),
		Box::new(TransferOptionsValidator),
		Box::new(NetworkFeesValidator),
		Box::new(DemexPointsValidator),
		Box::new(PerpPoolPromoValidator),
		Box::new(TypeformWidgetValidator),
		Box::new(PerpPoolsValidator),
		Box::new(WswthContractValidator),
		Box::new(MarketBannersValidator),
		Box::new(MarketPromoValidator),
		Box::new(SpotPoolConfigValidator),
		Box::new(ExternalChainChannelsValidator),
		Box::new(AdditionalIbcTokenValidator),
		Box::new(TradingLeagueValidator),
		Box::new(TransferBannerValidator),
		Box::new(QuickSelectDepositValidator),
		Box::new(AnnouncementBannerValidator),
		Box::new(NpsConfigValidator),
		Box::new(LstNativeAprsValidator),
	]
}

/// Collects the findings of one section.
pub(crate) struct SectionFindings {
	section: &'static str,
	findings: Vec<Finding>,
}

impl SectionFindings {
	pub(crate) fn new(section: &'static str) -> Self {
		Self {
			section,
			findings: Vec::new(),
		}
	}

	/// Records `violation` under `rule` if there is one.
	pub(crate) fn check(&mut self, rule: &str, violation: Option<Violation>, message: impl Into<String>) {
		if let Some(violation) = violation {
			self.findings
				.push(Finding::from_violation(self.section, rule, violation, message));
		}
	}

	/// Records grouped time-window violations; `subject` names what the labels are.
	pub(crate) fn windows(&mut self, rule: &str, violations: Vec<Violation>, subject: &str) {
		for violation in violations {
			let message = match violation.kind {
				ViolationKind::UnparseableTimestamp => {
					format!("{} with an unparseable start or end time", subject)
				}
				_ => format!("{} ending before they start", subject),
			};
			self.check(rule, Some(violation), message);
		}
	}

	pub(crate) fn finish(self) -> Vec<Finding> {
		self.findings
	}
}
