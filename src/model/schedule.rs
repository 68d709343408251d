use std::collections::BTreeMap;

use super::{END, START, display_name, normalize_event_name};

/// Name to integer date or slack, as returned by the backend.
pub type DateMap = BTreeMap<String, i64>;

/// Results of one calculation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleResult {
	pub earliest: DateMap,
	pub latest: DateMap,
	pub slack: DateMap,
	pub critical_path: Vec<String>,
}

impl ScheduleResult {
	/// Copy with grouped multi-letter keys split into single letters.
	pub fn with_grouped_dates_expanded(&self) -> Self {
		Self {
			earliest: expand_grouped_dates(&self.earliest),
			latest: expand_grouped_dates(&self.latest),
			slack: expand_grouped_dates(&self.slack),
			critical_path: self.critical_path.clone(),
		}
	}

	pub fn critical(&self) -> CriticalPath {
		CriticalPath::new(&self.critical_path)
	}

	pub fn earliest_for(&self, node_id: &str) -> i64 {
		lookup_date(&self.earliest, node_id)
	}

	pub fn latest_for(&self, node_id: &str) -> i64 {
		lookup_date(&self.latest, node_id)
	}

	pub fn slack_for(&self, name: &str) -> i64 {
		self.slack.get(name).copied().unwrap_or(0)
	}
}

/// Event and task date lookup tolerant of the backend's key conventions.
///
/// START reads `debut` then `START`, END reads `fin` then `END`. A task
/// reads its own key; when that is absent or zero, the first key that
/// contains the id, or is contained in it, is used instead.
fn lookup_date(dates: &DateMap, node_id: &str) -> i64 {
	let first_nonzero = |keys: &[&str]| {
		keys.iter()
			.filter_map(|key| dates.get(*key).copied())
			.find(|value| *value != 0)
			.unwrap_or(0)
	};
	match node_id {
		START => first_nonzero(&["debut", START]),
		END => first_nonzero(&["fin", END]),
		_ => match dates.get(node_id).copied() {
			Some(value) if value != 0 => value,
			_ => dates
				.iter()
				.find(|(key, _)| key.contains(node_id) || node_id.contains(key.as_str()))
				.map(|(_, value)| *value)
				.unwrap_or(0),
		},
	}
}

/// Splits keys like `"EG"` into `"E"` and `"G"` sharing the value.
///
/// Only keys made solely of ASCII uppercase letters and longer than one
/// letter are split; anything else is copied as is.
pub fn expand_grouped_dates(dates: &DateMap) -> DateMap {
	let mut expanded = DateMap::new();
	for (key, value) in dates {
		let grouped = key.len() > 1 && key.chars().all(|c| c.is_ascii_uppercase());
		if grouped {
			for letter in key.chars() {
				expanded.insert(letter.to_string(), *value);
			}
		} else {
			expanded.insert(key.clone(), *value);
		}
	}
	expanded
}

/// Critical sequence with event names normalized to `START`/`END`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CriticalPath {
	sequence: Vec<String>,
}

impl CriticalPath {
	pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
		Self {
			sequence: names
				.iter()
				.map(|name| normalize_event_name(name.as_ref()).to_string())
				.collect(),
		}
	}

	pub fn sequence(&self) -> &[String] {
		&self.sequence
	}

	pub fn is_empty(&self) -> bool {
		self.sequence.is_empty()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.sequence.iter().any(|step| step == name)
	}

	/// True when `to` immediately follows `from` in the sequence.
	pub fn is_critical_edge(&self, from: &str, to: &str) -> bool {
		self.sequence
			.windows(2)
			.any(|pair| pair[0] == from && pair[1] == to)
	}

	/// `DÉBUT → A → B → FIN`, for display.
	pub fn display(&self) -> String {
		self.sequence
			.iter()
			.map(|step| display_name(step))
			.collect::<Vec<_>>()
			.join(" → ")
	}
}
