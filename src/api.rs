//! HTTP client for the scheduling backend.
//!
//! Every call is a single JSON request/response with no retry. The four
//! result endpoints are fetched concurrently by [`CpmClient::fetch_schedule`];
//! the first failure aborts the group.

use gloo_net::http::{Request, Response};
use log::{debug, error};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::model::{DateMap, Links, ScheduleResult, Task};

pub const SAVE_PATH: &str = "auto";
pub const EARLIEST_PATH: &str = "dateTot";
pub const LATEST_PATH: &str = "dateTard";
pub const SLACK_PATH: &str = "marge";
pub const CRITICAL_PATH: &str = "critique";

/// Shape of the backend's error bodies.
#[derive(Debug, Deserialize)]
struct ErrorBody {
	message: Option<String>,
}

/// Extracts `message` from a JSON error body, if present.
pub fn error_message(body: &str) -> Option<String> {
	serde_json::from_str::<ErrorBody>(body)
		.ok()
		.and_then(|parsed| parsed.message)
		.filter(|message| !message.trim().is_empty())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CpmClient {
	base: String,
}

impl CpmClient {
	pub fn new(base: impl Into<String>) -> Self {
		let base = base.into();
		Self {
			base: base.trim_end_matches('/').to_string(),
		}
	}

	pub fn url(&self, path: &str) -> String {
		format!("{}/{}", self.base, path)
	}

	/// Posts the task list; the backend answers with each task's predecessors.
	pub async fn save_tasks(&self, tasks: &[Task]) -> Result<Links, ApiError> {
		let url = self.url(SAVE_PATH);
		let request = Request::post(&url).json(&tasks)?;
		let response = request.send().await?;
		decode(&url, response).await
	}

	pub async fn earliest_dates(&self) -> Result<DateMap, ApiError> {
		self.get(EARLIEST_PATH).await
	}

	pub async fn latest_dates(&self) -> Result<DateMap, ApiError> {
		self.get(LATEST_PATH).await
	}

	pub async fn slack(&self) -> Result<DateMap, ApiError> {
		self.get(SLACK_PATH).await
	}

	pub async fn critical_path(&self) -> Result<Vec<String>, ApiError> {
		self.get(CRITICAL_PATH).await
	}

	/// Fetches all four result sets at once.
	pub async fn fetch_schedule(&self) -> Result<ScheduleResult, ApiError> {
		let (earliest, critical_path, latest, slack) = futures::try_join!(
			self.earliest_dates(),
			self.critical_path(),
			self.latest_dates(),
			self.slack()
		)?;
		debug!(
			"API responses: dateTot={:?} critique={:?} dateTard={:?} marge={:?}",
			earliest, critical_path, latest, slack
		);
		Ok(ScheduleResult {
			earliest,
			latest,
			slack,
			critical_path,
		})
	}

	async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
		let url = self.url(path);
		let response = Request::get(&url).send().await?;
		decode(&url, response).await
	}
}

async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, ApiError> {
	if !response.ok() {
		let status = response.status();
		let body = response.text().await.unwrap_or_default();
		error!("{} answered {}: {}", url, status, body);
		return Err(ApiError::Status {
			url: url.to_string(),
			status,
			message: error_message(&body),
		});
	}
	response.json::<T>().await.map_err(|err| ApiError::Decode {
		url: url.to_string(),
		reason: err.to_string(),
	})
}
