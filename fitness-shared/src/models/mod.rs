/// Workouts, their types and calorie levels.
pub mod activity;
/// Backend error bodies.
pub mod errors;
/// AI recommendations.
pub mod recommendation;
/// Aggregates shown on the dashboard.
pub mod stats;
/// Backend timestamps.
pub mod timestamp;
/// The signed-in user.
pub mod user;

pub use activity::{Activity, ActivityType, CalorieLevel, NewActivity};
pub use errors::ErrorResponse;
pub use recommendation::Recommendation;
pub use stats::{ActivitySummary, OverviewStats};
pub use timestamp::Timestamp;
pub use user::UserProfile;

use serde::{Deserialize, Deserializer};

/// Reads an explicit `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
