use futures::join;
use shared::models::{Activity, Recommendation};
use std::rc::Rc;
use tracing::{error, info};
use yew::Reducible;

use crate::api::ActivityApi;

/// Progress of a single remote resource.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Detail view state. The activity and its recommendation load independently.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActivityDetailState {
    /// `Loaded(None)` when the backend has no such activity.
    pub activity: FetchState<Option<Activity>>,
    pub recommendation: FetchState<Option<Recommendation>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailAction {
    Reset,
    ActivityLoaded(Option<Activity>),
    ActivityFailed(String),
    RecommendationLoaded(Option<Recommendation>),
    RecommendationFailed(String),
}

impl ActivityDetailState {
    pub fn apply(&mut self, action: DetailAction) {
        match action {
            DetailAction::Reset => *self = Self::default(),
            DetailAction::ActivityLoaded(activity) => self.activity = FetchState::Loaded(activity),
            DetailAction::ActivityFailed(message) => self.activity = FetchState::Failed(message),
            DetailAction::RecommendationLoaded(recommendation) => {
                self.recommendation = FetchState::Loaded(recommendation);
            }
            DetailAction::RecommendationFailed(message) => {
                self.recommendation = FetchState::Failed(message);
            }
        }
    }

    /// Recommendation to show once loading settles: the fetched one, otherwise
    /// the improvements and suggestions embedded in the activity.
    pub fn effective_recommendation(&self) -> Option<Recommendation> {
        match &self.recommendation {
            FetchState::Loading => None,
            FetchState::Loaded(Some(recommendation)) if !recommendation.is_empty() => {
                Some(recommendation.clone())
            }
            _ => self
                .activity
                .loaded()
                .and_then(Option::as_ref)
                .and_then(Recommendation::from_activity),
        }
    }
}

impl Reducible for ActivityDetailState {
    type Action = DetailAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

/// Fetches an activity and its recommendation concurrently, reporting each
/// result through `dispatch` as soon as it arrives.
pub async fn load_detail<F>(api: &dyn ActivityApi, id: &str, dispatch: F)
where
    F: Fn(DetailAction),
{
    let activity = async {
        match api.get_activity(id).await {
            Ok(activity) => dispatch(DetailAction::ActivityLoaded(Some(activity))),
            Err(err) if err.is_not_found() => dispatch(DetailAction::ActivityLoaded(None)),
            Err(err) => {
                error!(%err, "Error fetching activity details");
                dispatch(DetailAction::ActivityFailed(err.user_message()));
            }
        }
    };
    let recommendation = async {
        match api.get_recommendation(id).await {
            Ok(recommendation) => {
                if recommendation.is_none() {
                    info!(activity_id = id, "no recommendation available yet");
                }
                dispatch(DetailAction::RecommendationLoaded(recommendation));
            }
            Err(err) => {
                error!(%err, "Error fetching recommendation");
                dispatch(DetailAction::RecommendationFailed(err.user_message()));
            }
        }
    };
    join!(activity, recommendation);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use shared::models::{ActivityType, NewActivity};
    use std::cell::RefCell;

    fn activity(id: &str) -> Activity {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "type": "CYCLING",
            "duration": 45,
            "caloriesBurned": 420,
            "improvements": ["Keep a steady cadence"],
            "suggestions": ["Try intervals"]
        }))
        .unwrap()
    }

    /// Serves the activity immediately and holds the recommendation until released.
    struct GatedApi {
        release: RefCell<Option<oneshot::Receiver<Option<Recommendation>>>>,
    }

    #[async_trait(?Send)]
    impl ActivityApi for GatedApi {
        async fn list_activities(&self) -> Result<Vec<Activity>, ApiError> {
            Ok(Vec::new())
        }

        async fn add_activity(&self, _activity: &NewActivity) -> Result<Activity, ApiError> {
            Ok(activity("new"))
        }

        async fn get_activity(&self, id: &str) -> Result<Activity, ApiError> {
            Ok(activity(id))
        }

        async fn get_recommendation(&self, _id: &str) -> Result<Option<Recommendation>, ApiError> {
            let receiver = self.release.borrow_mut().take();
            match receiver {
                Some(receiver) => Ok(receiver.await.unwrap_or(None)),
                None => Ok(None),
            }
        }
    }

    #[test]
    fn test_activity_renders_before_slow_recommendation() {
        let (release, receiver) = oneshot::channel();
        let api = Rc::new(GatedApi {
            release: RefCell::new(Some(receiver)),
        });
        let state = Rc::new(RefCell::new(ActivityDetailState::default()));

        let mut pool = LocalPool::new();
        {
            let api = api.clone();
            let state = state.clone();
            pool.spawner()
                .spawn_local(async move {
                    load_detail(api.as_ref(), "a1", |action| state.borrow_mut().apply(action))
                        .await;
                })
                .unwrap();
        }
        pool.run_until_stalled();

        {
            let current = state.borrow();
            let loaded = current.activity.loaded().cloned().flatten().unwrap();
            assert_eq!(loaded.activity_type, ActivityType::Cycling);
            assert!(current.recommendation.is_loading());
        }

        let recommendation = Recommendation {
            recommendation: Some("Great ride".to_string()),
            ..Recommendation::default()
        };
        release.send(Some(recommendation.clone())).unwrap();
        pool.run_until_stalled();

        assert_eq!(
            state.borrow().recommendation,
            FetchState::Loaded(Some(recommendation))
        );
    }

    #[test]
    fn test_effective_recommendation_falls_back_to_activity() {
        let mut state = ActivityDetailState::default();
        state.apply(DetailAction::ActivityLoaded(Some(activity("a1"))));
        assert!(state.effective_recommendation().is_none(), "still loading");

        state.apply(DetailAction::RecommendationLoaded(None));
        let fallback = state.effective_recommendation().unwrap();
        assert_eq!(fallback.improvements, vec!["Keep a steady cadence".to_string()]);
        assert_eq!(fallback.suggestions, vec!["Try intervals".to_string()]);
    }

    #[test]
    fn test_reset_returns_to_loading() {
        let mut state = ActivityDetailState::default();
        state.apply(DetailAction::ActivityFailed("boom".to_string()));
        assert_eq!(state.activity.error(), Some("boom"));
        state.apply(DetailAction::Reset);
        assert!(state.activity.is_loading());
        assert!(state.recommendation.is_loading());
    }

    #[test]
    fn test_reducible_applies_action() {
        let state = Rc::new(ActivityDetailState::default());
        let next = state.reduce(DetailAction::RecommendationFailed("down".to_string()));
        assert_eq!(next.recommendation.error(), Some("down"));
        assert!(next.activity.is_loading());
    }
}
