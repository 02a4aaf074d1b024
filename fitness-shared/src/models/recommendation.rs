use serde::{Deserialize, Serialize};

/// AI-generated feedback for a single activity.
///
/// Recommendations are produced asynchronously by the AI service, so an
/// activity without one is normal and not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Identifier assigned by the AI service.
    #[serde(default)]
    pub id: Option<String>,
    /// Activity the recommendation belongs to.
    #[serde(default)]
    pub activity_id: Option<String>,
    /// Activity type as the AI service saw it.
    #[serde(default)]
    pub activity_type: Option<String>,
    /// Free-form analysis. Older payloads call this field `text`.
    #[serde(default, alias = "text")]
    pub recommendation: Option<String>,
    /// Things to improve next time.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub improvements: Vec<String>,
    /// Ideas for future workouts.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub suggestions: Vec<String>,
    /// Safety guidelines.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub safety: Vec<String>,
}

impl Recommendation {
    /// Analysis text, if it carries any visible content.
    #[must_use]
    pub fn analysis(&self) -> Option<&str> {
        self.recommendation
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// True when there is nothing worth rendering.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.analysis().is_none()
            && self.improvements.is_empty()
            && self.suggestions.is_empty()
            && self.safety.is_empty()
    }

    /// Builds a recommendation from the fields some services inline on the activity.
    #[must_use]
    pub fn from_activity(activity: &super::Activity) -> Option<Self> {
        let inline = Self {
            activity_id: Some(activity.id.clone()),
            recommendation: activity.recommendation.clone(),
            improvements: activity.improvements.clone(),
            suggestions: activity.suggestions.clone(),
            ..Self::default()
        };
        (!inline.is_empty()).then_some(inline)
    }
}
