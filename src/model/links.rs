use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::START;

/// Backend marker meaning "no predecessor".
pub const NO_PREDECESSOR: &str = "-";

/// One source of a dependency, as returned by `POST /auto`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Predecessor {
	/// The project start event.
	Start,
	Task(String),
}

impl Predecessor {
	/// Node id this predecessor is drawn from.
	pub fn node_id(&self) -> &str {
		match self {
			Self::Start => START,
			Self::Task(name) => name,
		}
	}

	pub fn is_start(&self) -> bool {
		matches!(self, Self::Start)
	}
}

impl From<String> for Predecessor {
	fn from(raw: String) -> Self {
		if raw.trim() == NO_PREDECESSOR {
			Self::Start
		} else {
			Self::Task(raw)
		}
	}
}

impl From<&str> for Predecessor {
	fn from(raw: &str) -> Self {
		Self::from(raw.to_string())
	}
}

impl From<Predecessor> for String {
	fn from(pred: Predecessor) -> Self {
		match pred {
			Predecessor::Start => NO_PREDECESSOR.to_string(),
			Predecessor::Task(name) => name,
		}
	}
}

/// Task name to its predecessors.
pub type Links = BTreeMap<String, Vec<Predecessor>>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sentinel_becomes_start() {
		let links: Links = serde_json::from_str(r#"{"A":["-"],"B":["A"],"C":["A","B"]}"#).unwrap();
		assert_eq!(links["A"], vec![Predecessor::Start]);
		assert_eq!(links["C"], vec![Predecessor::from("A"), Predecessor::from("B")]);
		assert_eq!(links["A"][0].node_id(), START);
	}

	#[test]
	fn start_serializes_back_to_sentinel() {
		let json = serde_json::to_string(&vec![Predecessor::Start, Predecessor::from("X")]).unwrap();
		assert_eq!(json, r#"["-","X"]"#);
	}
}
