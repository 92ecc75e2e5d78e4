//! Time-boxed UI widgets: surveys, the announcement banner and the NPS prompt.

use super::SectionFindings;
use crate::context::ValidationContext;
use crate::predicates::{check_duplicates, check_not_expired, check_time_windows};
use crate::registry::SectionValidator;
use checker_config::ConfigDocument;
use checker_types::{Finding, Violation, ViolationKind};

/// `typeform_widget_config`.
///
/// End times are compared against the run's `now`, not against a start time.
pub struct TypeformWidgetValidator;

impl SectionValidator for TypeformWidgetValidator {
	fn name(&self) -> &'static str {
		"typeform_widget_config"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.typeform_widget_config.is_some()
	}

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		let Some(widgets) = &document.typeform_widget_config else {
			return out.finish();
		};

		let mut expired = Vec::new();
		let mut unparseable = Vec::new();
		for widget in widgets {
			if let Some(violation) = check_not_expired(&widget.end_time, ctx.now) {
				match violation.kind {
					ViolationKind::UnparseableTimestamp => unparseable.push(widget.survey_link.clone()),
					_ => expired.push(widget.survey_link.clone()),
				}
			}
		}
		out.check(
			"end_time.not_expired",
			Violation::from_entries(ViolationKind::ExpiredTimeWindow, expired),
			"surveys have already ended",
		);
		out.check(
			"end_time.not_expired",
			Violation::from_entries(ViolationKind::UnparseableTimestamp, unparseable),
			"surveys have an unparseable end time",
		);

		out.check(
			"survey_link.unique",
			check_duplicates(widgets.iter().map(|w| w.survey_link.as_str())),
			"surveys repeat survey links",
		);
		out.check(
			"pages.unique",
			check_duplicates(widgets.iter().flat_map(|w| w.pages.iter())),
			"surveys are shown on the same page more than once",
		);

		out.finish()
	}
}

pub struct AnnouncementBannerValidator;

impl SectionValidator for AnnouncementBannerValidator {
	fn name(&self) -> &'static str {
		"announcement_banner"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.announcement_banner.is_some()
	}

	fn validate(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		if let Some(banner) = &document.announcement_banner {
			if let (Some(from), Some(until)) = (&banner.show_from, &banner.show_until) {
				out.windows(
					"show_window",
					check_time_windows([("announcement_banner", from.as_str(), until.as_str())]),
					"announcement banners",
				);
			}
		}
		out.finish()
	}
}

pub struct NpsConfigValidator;

impl SectionValidator for NpsConfigValidator {
	fn name(&self) -> &'static str {
		"nps_config"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.nps_config.is_some()
	}

	fn validate(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		if let Some(window) = &document.nps_config {
			out.windows(
				"window",
				check_time_windows([("nps_config", window.start.as_str(), window.end.as_str())]),
				"NPS prompts",
			);
		}
		out.finish()
	}
}
