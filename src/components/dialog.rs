//! Blocking browser dialogs used for validation feedback and confirmations.

use log::warn;

pub fn alert(message: &str) {
	let Some(window) = web_sys::window() else {
		warn!("No window for alert: {}", message);
		return;
	};
	if window.alert_with_message(message).is_err() {
		warn!("Alert failed: {}", message);
	}
}

/// False when the user declines or no dialog could be shown.
pub fn confirm(message: &str) -> bool {
	web_sys::window()
		.and_then(|window| window.confirm_with_message(message).ok())
		.unwrap_or(false)
}
