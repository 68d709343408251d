//! Tasks, backend results, and the editor state machines built on them.

pub mod editor;
pub mod links;
pub mod schedule;
pub mod task;

pub use editor::{FormEditor, GraphEditor};
pub use links::{Links, Predecessor};
pub use schedule::{CriticalPath, DateMap, ScheduleResult, expand_grouped_dates};
pub use task::{NameCase, Task, TaskDraft, TaskList};

/// Synthetic project start event.
pub const START: &str = "START";
/// Synthetic project end event.
pub const END: &str = "END";

/// Maps the backend's event spellings onto [`START`] and [`END`].
pub fn normalize_event_name(name: &str) -> &str {
	match name {
		"Début" | "début" | "debut" | "DEBUT" | "DÉBUT" => START,
		"fin" | "Fin" | "FIN" => END,
		other => other,
	}
}

/// Display text for a node id.
pub fn display_name(node_id: &str) -> &str {
	match node_id {
		START => "DÉBUT",
		END => "FIN",
		other => other,
	}
}
