use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::HashSet;

use super::Activity;

/// Totals shown above the activity list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivitySummary {
    /// Number of activities.
    pub count: usize,
    /// Calories over all activities.
    pub total_calories: u64,
    /// Minutes over all activities.
    pub total_minutes: u64,
}

impl ActivitySummary {
    /// Sums up `activities`.
    #[must_use]
    pub fn from_activities(activities: &[Activity]) -> Self {
        activities.iter().fold(Self::default(), |mut summary, activity| {
            summary.count += 1;
            summary.total_calories += u64::from(activity.calories_burned);
            summary.total_minutes += u64::from(activity.duration);
            summary
        })
    }
}

/// Headline numbers on the dashboard overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverviewStats {
    /// Number of activities ever recorded.
    pub total_activities: usize,
    /// Activities created within the trailing seven days.
    pub this_week: usize,
    /// Calories over all activities.
    pub calories_burned: u64,
    /// Distinct calendar days with at least one activity in the trailing seven days.
    pub active_days: usize,
}

impl OverviewStats {
    /// Length of the trailing window, in days.
    pub const WINDOW_DAYS: i64 = 7;

    /// Computes the overview relative to `now`.
    ///
    /// Activities without a creation time count towards the totals but never
    /// towards the weekly figures.
    #[must_use]
    pub fn compute(activities: &[Activity], now: NaiveDateTime) -> Self {
        let window_start = now - Duration::days(Self::WINDOW_DAYS);
        let recent: Vec<NaiveDateTime> = activities
            .iter()
            .filter_map(|activity| activity.created_at.map(|created| created.0))
            .filter(|created| *created > window_start && *created <= now)
            .collect();
        let active_days: HashSet<NaiveDate> = recent.iter().map(NaiveDateTime::date).collect();

        Self {
            total_activities: activities.len(),
            this_week: recent.len(),
            calories_burned: ActivitySummary::from_activities(activities).total_calories,
            active_days: active_days.len(),
        }
    }
}
