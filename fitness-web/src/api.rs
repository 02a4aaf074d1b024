use async_trait::async_trait;
use once_cell::unsync::OnceCell;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::models::{Activity, ErrorResponse, NewActivity, Recommendation};
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::FrontendConfig;
use crate::storage::{BrowserStorage, KeyValueStore, TOKEN_KEY, USER_ID_KEY};

pub const USER_ID_HEADER: &str = "X-User-ID";

thread_local! {
    static SHARED_CLIENT: OnceCell<FitnessClient> = OnceCell::new();
}

/// Failure of a backend call. Callers decide how to surface it.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{status} from {url}")]
    Status {
        status: StatusCode,
        url: String,
        body: String,
    },
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport(err) => err.status(),
            Self::Status { status, .. } => Some(*status),
            Self::Decode(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Message suitable for an inline error banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Unable to reach the server. Please try again.".to_string(),
            Self::Status { status, body, .. } => ErrorResponse::from_body(body)
                .and_then(|parsed| parsed.summary().map(str::to_string))
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .map_or_else(|| status.to_string(), str::to_string)
                }),
            Self::Decode(_) => "The server sent an unexpected response.".to_string(),
        }
    }
}

/// Operations the views need from the activity and AI services.
#[async_trait(?Send)]
pub trait ActivityApi {
    async fn list_activities(&self) -> Result<Vec<Activity>, ApiError>;
    async fn add_activity(&self, activity: &NewActivity) -> Result<Activity, ApiError>;
    async fn get_activity(&self, id: &str) -> Result<Activity, ApiError>;
    /// `Ok(None)` when the AI service has not produced a recommendation yet.
    async fn get_recommendation(&self, activity_id: &str)
    -> Result<Option<Recommendation>, ApiError>;
}

/// REST client that stamps every request with the stored identity.
#[derive(Clone)]
pub struct FitnessClient {
    base_url: String,
    client: Client,
    storage: Rc<dyn KeyValueStore>,
}

impl std::fmt::Debug for FitnessClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FitnessClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl FitnessClient {
    pub fn new(base_url: &str, storage: Rc<dyn KeyValueStore>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            storage,
        }
    }

    /// Browser-wide instance backed by `localStorage`.
    pub fn shared() -> Self {
        SHARED_CLIENT.with(|cell| {
            cell.get_or_init(|| {
                let config = FrontendConfig::new();
                Self::new(config.api_base_url(), Rc::new(BrowserStorage))
            })
            .clone()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Starts a request with `X-User-ID` and the bearer token attached when stored.
    pub fn prepare(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self.client.request(method, self.api_url(path));
        if let Some(user_id) = self.storage.get_non_empty(USER_ID_KEY) {
            request = request.header(USER_ID_HEADER, user_id);
        }
        if let Some(token) = self.storage.get_non_empty(TOKEN_KEY) {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().to_string();
        info!("API Request: {method} {url}");
        debug!(
            user_id = request.headers().contains_key(USER_ID_HEADER),
            token = request.headers().contains_key(reqwest::header::AUTHORIZATION),
            "identity headers attached"
        );

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                error!("API Error: {} {url} {err}", err.status().map_or(0, |s| s.as_u16()));
                return Err(ApiError::Transport(err));
            }
        };

        let status = response.status();
        if status.is_success() {
            info!("API Response: {} {url}", status.as_u16());
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            error!("API Error: {} {url} {body}", status.as_u16());
            Err(ApiError::Status { status, url, body })
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait(?Send)]
impl ActivityApi for FitnessClient {
    async fn list_activities(&self) -> Result<Vec<Activity>, ApiError> {
        let response = self.send(self.prepare(Method::GET, "activities")).await?;
        Self::read_json(response).await
    }

    async fn add_activity(&self, activity: &NewActivity) -> Result<Activity, ApiError> {
        let request = self.prepare(Method::POST, "activities").json(activity);
        let response = self.send(request).await?;
        Self::read_json(response).await
    }

    async fn get_activity(&self, id: &str) -> Result<Activity, ApiError> {
        let response = self
            .send(self.prepare(Method::GET, &format!("activities/{id}")))
            .await?;
        Self::read_json(response).await
    }

    async fn get_recommendation(
        &self,
        activity_id: &str,
    ) -> Result<Option<Recommendation>, ApiError> {
        let request = self.prepare(
            Method::GET,
            &format!("recommendations/activity/{activity_id}"),
        );
        let response = match self.send(request).await {
            Ok(response) => response,
            Err(err) if err.is_not_found() => return Ok(None),
            Err(err) => return Err(err),
        };
        let body = response.text().await?;
        if body.trim().is_empty() || body.trim() == "null" {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&body)?))
    }
}
