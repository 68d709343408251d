//! Error types for local validation and backend calls.

use thiserror::Error;

/// A task draft or editor action was rejected before reaching the backend.
///
/// Messages are user-facing and shown in a blocking alert.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
	#[error("Le nom de la tâche est requis.")]
	MissingName,

	#[error("La durée doit être un entier d'au moins 1 (reçu : {0:?}).")]
	InvalidDuration(String),

	#[error("{0:?} désigne le début ou la fin du projet et ne peut pas nommer une tâche.")]
	ReservedName(String),

	#[error("Une tâche avec le nom {0:?} existe déjà.")]
	DuplicateName(String),

	#[error("Aucune tâche nommée {0:?}.")]
	UnknownTask(String),

	#[error("Index de tâche invalide : {0}.")]
	InvalidIndex(usize),

	#[error("Ajoutez au moins une tâche avant d'envoyer.")]
	EmptyTaskList,

	#[error("Terminez ou annulez la modification en cours.")]
	EditInProgress,

	#[error("Veuillez d'abord envoyer les données avant de calculer.")]
	NotSent,
}

/// A call to the scheduling backend failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
	#[error("network error: {0}")]
	Network(String),

	#[error("request to {url} failed with status {status}")]
	Status {
		url: String,
		status: u16,
		/// `message` field of the JSON error body, when the server sent one.
		message: Option<String>,
	},

	#[error("failed to decode response from {url}: {reason}")]
	Decode { url: String, reason: String },
}

impl ApiError {
	/// The server-provided message if any, otherwise `fallback`.
	pub fn user_message(&self, fallback: &str) -> String {
		match self {
			Self::Status {
				message: Some(message),
				..
			} if !message.trim().is_empty() => message.clone(),
			_ => fallback.to_string(),
		}
	}
}

impl From<gloo_net::Error> for ApiError {
	fn from(err: gloo_net::Error) -> Self {
		Self::Network(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn server_message_wins_over_fallback() {
		let err = ApiError::Status {
			url: "/auto".into(),
			status: 400,
			message: Some("Cycle détecté".into()),
		};
		assert_eq!(err.user_message("Erreur lors du calcul"), "Cycle détecté");
	}

	#[test]
	fn fallback_used_without_message() {
		let err = ApiError::Status {
			url: "/marge".into(),
			status: 500,
			message: None,
		};
		assert_eq!(err.user_message("Erreur lors du calcul"), "Erreur lors du calcul");

		let blank = ApiError::Status {
			url: "/marge".into(),
			status: 500,
			message: Some("  ".into()),
		};
		assert_eq!(blank.user_message("x"), "x");

		let net = ApiError::Network("connection refused".into());
		assert_eq!(net.user_message("x"), "x");
	}

	#[test]
	fn validation_messages_name_the_offender() {
		let err = ValidationError::DuplicateName("A".into());
		assert!(err.to_string().contains("\"A\""));
	}
}
