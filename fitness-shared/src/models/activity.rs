use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};
use strum::{EnumIter, IntoEnumIterator};

use super::Timestamp;

/// Kind of workout recorded by the activity service.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, EnumIter,
)]
#[serde(from = "String")]
pub enum ActivityType {
    /// Running or jogging.
    #[default]
    Running,
    /// Walking.
    Walking,
    /// Cycling.
    Cycling,
    /// Swimming.
    Swimming,
    /// Strength training with weights.
    #[serde(rename = "Weight_Training")]
    WeightTraining,
    /// Yoga.
    Yoga,
    /// Stretching.
    Stretching,
    /// Other cardio work.
    Cardio,
    /// Anything the service does not classify.
    Other,
}

impl ActivityType {
    /// Canonical wire name, as the backend enum spells it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Walking => "Walking",
            Self::Cycling => "Cycling",
            Self::Swimming => "Swimming",
            Self::WeightTraining => "Weight_Training",
            Self::Yoga => "Yoga",
            Self::Stretching => "Stretching",
            Self::Cardio => "Cardio",
            Self::Other => "Other",
        }
    }

    /// Label shown to users.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::WeightTraining => "Weight Training",
            other => other.as_str(),
        }
    }

    /// Emoji shown next to the activity.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Running => "🏃",
            Self::Walking => "🚶",
            Self::Cycling => "🚴",
            Self::Swimming => "🏊",
            Self::WeightTraining => "🏋️",
            Self::Yoga => "🧘",
            Self::Stretching => "🤸",
            Self::Cardio => "❤️",
            Self::Other => "💪",
        }
    }

    /// Accent colour used by cards and the form picker.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Running => "#ff5722",
            Self::Walking => "#4caf50",
            Self::Cycling => "#2196f3",
            Self::Swimming => "#00bcd4",
            Self::WeightTraining => "#ff9800",
            Self::Yoga => "#9c27b0",
            Self::Stretching => "#e91e63",
            Self::Cardio => "#f44336",
            Self::Other => "#667eea",
        }
    }

    /// Every selectable type, in picker order.
    #[must_use]
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ActivityType {
    type Err = std::convert::Infallible;

    /// Lenient parse: case-insensitive names, a few common aliases, and
    /// [`ActivityType::Other`] for everything else.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        let parsed = match normalized.as_str() {
            "running" | "run" | "jogging" => Self::Running,
            "walking" | "walk" => Self::Walking,
            "cycling" | "bike" | "biking" => Self::Cycling,
            "swimming" | "swim" => Self::Swimming,
            "weight_training" | "weighttraining" | "weights" | "weightlifting"
            | "strength_training" => Self::WeightTraining,
            "yoga" => Self::Yoga,
            "stretching" | "stretch" => Self::Stretching,
            "cardio" => Self::Cardio,
            _ => Self::Other,
        };
        Ok(parsed)
    }
}

impl From<String> for ActivityType {
    fn from(value: String) -> Self {
        let Ok(parsed) = value.parse::<Self>();
        parsed
    }
}

/// A recorded workout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Identifier assigned by the activity service.
    pub id: String,
    /// Owner, as recorded by the activity service.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Kind of workout.
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Minutes.
    pub duration: u32,
    /// Calories burned during the workout.
    pub calories_burned: u32,
    /// When the workout started, if recorded.
    #[serde(default)]
    pub start_time: Option<Timestamp>,
    /// Free-form extra measurements such as distance.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub additional_metrics: Map<String, Value>,
    /// Creation time reported by the service.
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    /// Last update reported by the service.
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    /// Analysis text some backends inline on the activity itself.
    #[serde(default)]
    pub recommendation: Option<String>,
    /// Improvement hints some backends inline on the activity.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub improvements: Vec<String>,
    /// Suggestions some backends inline on the activity.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub suggestions: Vec<String>,
}

impl Activity {
    /// Intensity bucket for this workout.
    #[must_use]
    pub fn calorie_level(&self) -> CalorieLevel {
        CalorieLevel::from_calories(self.calories_burned)
    }
}

/// Payload for `POST /activities`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    /// Kind of workout.
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Minutes.
    pub duration: u32,
    /// Calories burned during the workout.
    pub calories_burned: u32,
    /// Free-form extra measurements; sent as an empty object by the form.
    pub additional_metrics: Map<String, Value>,
}

impl NewActivity {
    /// A new activity without extra metrics.
    #[must_use]
    pub fn new(activity_type: ActivityType, duration: u32, calories_burned: u32) -> Self {
        Self {
            activity_type,
            duration,
            calories_burned,
            additional_metrics: Map::new(),
        }
    }
}

/// Intensity bucket derived from calories burned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalorieLevel {
    /// 300 kcal or less.
    Light,
    /// Above 300 kcal.
    Medium,
    /// Above 500 kcal.
    High,
}

impl CalorieLevel {
    /// Buckets calories: above 500 is high, above 300 medium.
    #[must_use]
    pub fn from_calories(calories: u32) -> Self {
        match calories {
            c if c > 500 => Self::High,
            c if c > 300 => Self::Medium,
            _ => Self::Light,
        }
    }

    /// Human readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Fill percentage for the intensity bar.
    #[must_use]
    pub fn progress(self) -> u8 {
        match self {
            Self::Light => 40,
            Self::Medium => 70,
            Self::High => 100,
        }
    }

    /// CSS colour used for the level.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Light => "#4caf50",
            Self::Medium => "#ff9800",
            Self::High => "#ff5722",
        }
    }
}
