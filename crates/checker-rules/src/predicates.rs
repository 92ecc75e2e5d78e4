//! Primitive predicates shared by every section validator.
//!
//! Each predicate is a pure function returning `None` on success or a
//! [`Violation`] listing the offending entries in first-seen order.

use checker_types::{Violation, ViolationKind};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::OnceLock;

/// IBC channel id, e.g. `channel-12`.
pub fn channel_regex() -> &'static Regex {
	static CHANNEL: OnceLock<Regex> = OnceLock::new();
	CHANNEL.get_or_init(|| Regex::new(r"^channel-[0-9]+$").expect("valid channel regex"))
}

/// `0x` followed by 40 hex digits.
pub fn evm_address_regex() -> &'static Regex {
	static EVM_ADDRESS: OnceLock<Regex> = OnceLock::new();
	EVM_ADDRESS.get_or_init(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("valid address regex"))
}

/// Every item absent from `reference`, repeats included.
pub fn check_membership<I>(items: I, reference: &BTreeSet<String>) -> Option<Violation>
where
	I: IntoIterator,
	I::Item: AsRef<str>,
{
	let missing = items
		.into_iter()
		.filter(|item| !reference.contains(item.as_ref()))
		.map(|item| item.as_ref().to_string())
		.collect();
	Violation::from_entries(ViolationKind::InvalidEntry, missing)
}

/// Every repeat occurrence: a value seen three times contributes two entries.
pub fn check_duplicates<I>(items: I) -> Option<Violation>
where
	I: IntoIterator,
	I::Item: AsRef<str>,
{
	let mut seen = HashSet::new();
	let mut repeats = Vec::new();
	for item in items {
		let item = item.as_ref();
		if !seen.insert(item.to_string()) {
			repeats.push(item.to_string());
		}
	}
	let count = repeats.len();
	Violation::from_entries(ViolationKind::DuplicateEntry { count }, repeats)
}

/// Every item of `items` that also appears in `other`.
pub fn check_disjoint<I, J>(items: I, other: J) -> Option<Violation>
where
	I: IntoIterator,
	I::Item: AsRef<str>,
	J: IntoIterator,
	J::Item: AsRef<str>,
{
	let other: HashSet<String> = other.into_iter().map(|item| item.as_ref().to_string()).collect();
	let overlap = items
		.into_iter()
		.filter(|item| other.contains(item.as_ref()))
		.map(|item| item.as_ref().to_string())
		.collect();
	Violation::from_entries(ViolationKind::Overlap, overlap)
}

/// Every item that does not fully match `pattern`.
pub fn check_pattern<I>(items: I, pattern: &Regex) -> Option<Violation>
where
	I: IntoIterator,
	I::Item: AsRef<str>,
{
	let mismatched = items
		.into_iter()
		.filter(|item| !pattern.is_match(item.as_ref()))
		.map(|item| item.as_ref().to_string())
		.collect();
	Violation::from_entries(ViolationKind::PatternMismatch, mismatched)
}

/// Parses the timestamp forms config documents use.
///
/// RFC 3339 keeps its offset; naive date-times and bare dates are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
	let raw = raw.trim();

	if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
		return Some(parsed.with_timezone(&Utc));
	}

	// Minute precision with `Z` or an offset.
	if let Ok(parsed) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%#z") {
		return Some(parsed.with_timezone(&Utc));
	}

	for format in [
		"%Y-%m-%dT%H:%M:%S%.f",
		"%Y-%m-%d %H:%M:%S%.f",
		"%Y-%m-%dT%H:%M",
		"%Y-%m-%d %H:%M",
	] {
		if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
			return Some(parsed.and_utc());
		}
	}

	NaiveDate::parse_from_str(raw, "%Y-%m-%d")
		.ok()
		.and_then(|date| date.and_hms_opt(0, 0, 0))
		.map(|midnight| midnight.and_utc())
}

/// Fails when `end` lies strictly before `start`.
///
/// Unparseable inputs are reported as [`ViolationKind::UnparseableTimestamp`]
/// listing the raw strings that failed.
pub fn check_time_window(start: &str, end: &str) -> Option<Violation> {
	match (parse_timestamp(start), parse_timestamp(end)) {
		(Some(start_time), Some(end_time)) => {
			if end_time < start_time {
				Some(Violation::new(
					ViolationKind::InvalidTimeWindow,
					vec![start.to_string(), end.to_string()],
				))
			} else {
				None
			}
		}
		(start_time, end_time) => {
			let mut raw = Vec::new();
			if start_time.is_none() {
				raw.push(start.to_string());
			}
			if end_time.is_none() {
				raw.push(end.to_string());
			}
			Violation::from_entries(ViolationKind::UnparseableTimestamp, raw)
		}
	}
}

/// Fails when `end` already lies before `now`.
pub fn check_not_expired(end: &str, now: DateTime<Utc>) -> Option<Violation> {
	match parse_timestamp(end) {
		Some(end_time) if end_time < now => Some(Violation::new(
			ViolationKind::ExpiredTimeWindow,
			vec![end.to_string()],
		)),
		Some(_) => None,
		None => Some(Violation::new(
			ViolationKind::UnparseableTimestamp,
			vec![end.to_string()],
		)),
	}
}

/// Runs [`check_time_window`] over labelled windows and groups the labels of
/// failing windows by violation kind.
pub fn check_time_windows<'a, I>(windows: I) -> Vec<Violation>
where
	I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
{
	let mut inverted = Vec::new();
	let mut unparseable = Vec::new();

	for (label, start, end) in windows {
		if let Some(violation) = check_time_window(start, end) {
			match violation.kind {
				ViolationKind::UnparseableTimestamp => unparseable.push(label.to_string()),
				_ => inverted.push(label.to_string()),
			}
		}
	}

	[
		Violation::from_entries(ViolationKind::InvalidTimeWindow, inverted),
		Violation::from_entries(ViolationKind::UnparseableTimestamp, unparseable),
	]
	.into_iter()
	.flatten()
	.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	fn set(items: &[&str]) -> BTreeSet<String> {
		items.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn test_membership_reports_missing_in_order() {
		let reference = set(&["a", "b"]);
		assert!(check_membership(["a", "b", "a"], &reference).is_none());
		assert!(check_membership(Vec::<String>::new(), &reference).is_none());

		let violation = check_membership(["z", "a", "y", "z"], &reference).unwrap();
		assert_eq!(violation.kind, ViolationKind::InvalidEntry);
		assert_eq!(violation.entries, vec!["z", "y", "z"]);
	}

	#[test]
	fn test_duplicates_report_every_repeat() {
		assert!(check_duplicates(["a", "b", "c"]).is_none());

		let violation = check_duplicates(["a", "b", "a", "a", "b"]).unwrap();
		assert_eq!(violation.kind, ViolationKind::DuplicateEntry { count: 3 });
		assert_eq!(violation.entries, vec!["a", "a", "b"]);
	}

	#[test]
	fn test_duplicate_count_matches_excess_occurrences() {
		let samples: [&[&str]; 4] = [
			&["x"],
			&["x", "x"],
			&["x", "y", "x", "y", "x"],
			&["p", "q", "r", "q"],
		];
		for items in samples {
			let distinct: HashSet<&&str> = items.iter().collect();
			let expected = items.len() - distinct.len();
			let reported = check_duplicates(items.iter()).map_or(0, |v| v.entries.len());
			assert_eq!(reported, expected, "{:?}", items);
		}
	}

	#[test]
	fn test_disjoint() {
		assert!(check_disjoint(["a"], ["b"]).is_none());
		let violation = check_disjoint(["a", "b", "c"], ["c", "a"]).unwrap();
		assert_eq!(violation.kind, ViolationKind::Overlap);
		assert_eq!(violation.entries, vec!["a", "c"]);
	}

	#[test]
	fn test_channel_pattern() {
		assert!(check_pattern(["channel-0", "channel-12"], channel_regex()).is_none());
		let violation = check_pattern(["channel-", "chan-1", "channel-1a", "channel-3"], channel_regex()).unwrap();
		assert_eq!(violation.entries, vec!["channel-", "chan-1", "channel-1a"]);
	}

	#[test]
	fn test_channel_pattern_rejects_non_ascii_digits() {
		let violation = check_pattern(["channel-\u{661}\u{662}", "channel-\u{ff11}"], channel_regex()).unwrap();
		assert_eq!(violation.entries, vec!["channel-\u{661}\u{662}", "channel-\u{ff11}"]);
	}

	#[test]
	fn test_evm_address_pattern() {
		let valid = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
		assert!(check_pattern([valid], evm_address_regex()).is_none());
		assert!(check_pattern(["0x5FbDB2315678afecb367f032d93F642f64180aa"], evm_address_regex()).is_some());
		assert!(check_pattern(["5FbDB2315678afecb367f032d93F642f64180aa31"], evm_address_regex()).is_some());
		assert!(check_pattern(["0xZZbDB2315678afecb367f032d93F642f64180aa3"], evm_address_regex()).is_some());
	}

	#[test]
	fn test_parse_timestamp_forms() {
		let expected = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
		assert_eq!(parse_timestamp("2024-01-10"), Some(expected));
		assert_eq!(parse_timestamp("2024-01-10T00:00:00Z"), Some(expected));
		assert_eq!(parse_timestamp("2024-01-10T08:00:00+08:00"), Some(expected));
		assert_eq!(parse_timestamp("2024-01-10T00:00:00"), Some(expected));
		assert_eq!(parse_timestamp("2024-01-10 00:00:00"), Some(expected));
		assert_eq!(parse_timestamp("2024-01-10T00:00:00.000"), Some(expected));
		assert!(parse_timestamp("next tuesday").is_none());
		assert!(parse_timestamp("2024-01-10T00").is_none());
		assert!(parse_timestamp("2024-13-40").is_none());
	}

	#[test]
	fn test_parse_timestamp_minute_precision() {
		let expected = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
		assert_eq!(parse_timestamp("2024-01-10T00:00"), Some(expected));
		assert_eq!(parse_timestamp("2024-01-10 00:00"), Some(expected));
		assert_eq!(parse_timestamp("2024-01-10T00:00Z"), Some(expected));
		assert_eq!(parse_timestamp("2024-01-10T08:00+08:00"), Some(expected));
		assert!(check_time_window("2024-01-10T00:00Z", "2024-01-11T00:00").is_none());
	}

	#[test]
	fn test_time_window() {
		assert!(check_time_window("2024-01-01", "2024-01-10").is_none());
		assert!(check_time_window("2024-01-01T00:00:00Z", "2024-01-01T00:00:00Z").is_none());

		let violation = check_time_window("2024-01-10", "2024-01-01").unwrap();
		assert_eq!(violation.kind, ViolationKind::InvalidTimeWindow);

		let violation = check_time_window("soon", "2024-01-01").unwrap();
		assert_eq!(violation.kind, ViolationKind::UnparseableTimestamp);
		assert_eq!(violation.entries, vec!["soon"]);
	}

	#[test]
	fn test_not_expired() {
		let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
		assert!(check_not_expired("2024-06-01T00:00:00Z", now).is_none());
		assert!(check_not_expired("2030-01-01", now).is_none());
		assert_eq!(
			check_not_expired("2024-05-31", now).unwrap().kind,
			ViolationKind::ExpiredTimeWindow
		);
		assert_eq!(
			check_not_expired("never", now).unwrap().kind,
			ViolationKind::UnparseableTimestamp
		);
	}

	#[test]
	fn test_time_windows_group_labels() {
		let violations = check_time_windows([
			("7", "2024-01-10", "2024-01-01"),
			("8", "2024-01-01", "2024-01-10"),
			("9", "bad", "2024-01-10"),
			("10", "2024-02-10", "2024-02-01"),
		]);
		assert_eq!(violations.len(), 2);
		assert_eq!(violations[0].kind, ViolationKind::InvalidTimeWindow);
		assert_eq!(violations[0].entries, vec!["7", "10"]);
		assert_eq!(violations[1].kind, ViolationKind::UnparseableTimestamp);
		assert_eq!(violations[1].entries, vec!["9"]);
	}
}
