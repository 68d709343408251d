//! Runtime configuration: backend location and layout spacing.

/// Base path of the scheduling service when `CPM_API_BASE` is not set at build time.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api/tache";

/// Top-level configuration, provided to the component tree as context.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
	pub api_base: String,
	pub layout: LayoutConfig,
}

impl AppConfig {
	/// Reads build-time overrides, falling back to defaults.
	pub fn from_env() -> Self {
		let api_base = option_env!("CPM_API_BASE")
			.filter(|base| !base.trim().is_empty())
			.unwrap_or(DEFAULT_API_BASE);
		Self {
			api_base: api_base.trim_end_matches('/').to_string(),
			layout: LayoutConfig::default(),
		}
	}
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base: DEFAULT_API_BASE.to_string(),
			layout: LayoutConfig::default(),
		}
	}
}

/// Spacing used by the layout strategies, in world units.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Horizontal distance between breadth-first layers.
	pub layer_spacing: f64,
	/// Vertical distance between nodes of one layer.
	pub slot_spacing: f64,
	/// Offset of the first layer and first slot.
	pub origin: f64,
	/// Node box used by the layered layout.
	pub event_node_size: (f64, f64),
	/// Node box used by the hierarchical layout.
	pub task_node_size: (f64, f64),
	/// Gap between neighbours inside one rank.
	pub node_separation: f64,
	/// Gap between consecutive ranks.
	pub rank_separation: f64,
	/// Simulation steps run by the force layout.
	pub force_ticks: usize,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			layer_spacing: 250.0,
			slot_spacing: 150.0,
			origin: 100.0,
			event_node_size: (160.0, 100.0),
			task_node_size: (220.0, 180.0),
			node_separation: 50.0,
			rank_separation: 50.0,
			force_ticks: 300,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_base_has_no_trailing_slash() {
		let config = AppConfig::default();
		assert!(!config.api_base.ends_with('/'));
		assert_eq!(config.layout.layer_spacing, 250.0);
	}

	#[test]
	fn from_env_yields_usable_base() {
		let config = AppConfig::from_env();
		assert!(config.api_base.starts_with("http") || config.api_base.starts_with('/'));
	}
}
