use shared::models::{Activity, ActivityType, NewActivity};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::ActivityApi;

/// Raw form input. Numbers stay as typed until validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityDraft {
    pub activity_type: ActivityType,
    pub duration: String,
    pub calories_burned: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in all required fields!")]
    MissingFields,
    #[error("Duration must be a whole number of minutes.")]
    InvalidDuration,
    #[error("Calories burned must be a whole number.")]
    InvalidCalories,
    #[error("Failed to add activity. Please try again.")]
    Submit(String),
}

impl ActivityDraft {
    /// Checks the draft and turns it into a create payload.
    pub fn validate(&self) -> Result<NewActivity, FormError> {
        let duration = self.duration.trim();
        let calories = self.calories_burned.trim();
        if duration.is_empty() || calories.is_empty() {
            return Err(FormError::MissingFields);
        }
        let duration = duration
            .parse::<u32>()
            .map_err(|_| FormError::InvalidDuration)?;
        let calories = calories
            .parse::<u32>()
            .map_err(|_| FormError::InvalidCalories)?;
        Ok(NewActivity::new(self.activity_type, duration, calories))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn alert_class(self) -> &'static str {
        match self {
            Self::Success => "alert-success",
            Self::Error => "alert-error",
        }
    }
}

/// Dismissible message shown under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

impl From<&FormError> for Notification {
    fn from(err: &FormError) -> Self {
        Self::error(err.to_string())
    }
}

pub const ADDED_MESSAGE: &str = "Activity added successfully!";

/// Validates `draft` and creates the activity. Invalid drafts never reach the API.
pub async fn submit_activity(
    api: &dyn ActivityApi,
    draft: &ActivityDraft,
) -> Result<Activity, FormError> {
    let payload = draft.validate().inspect_err(|err| {
        warn!(%err, "activity form rejected");
    })?;
    match api.add_activity(&payload).await {
        Ok(activity) => {
            info!(id = %activity.id, "activity added");
            Ok(activity)
        }
        Err(err) => {
            error!(%err, "failed to add activity");
            Err(FormError::Submit(err.to_string()))
        }
    }
}
