//! In-process identity provider token endpoint for host tests.

use axum::{Form, Json, Router, extract::State, http::StatusCode, routing::post};
use serde_json::{Value, json};
use shared::token::encode_unsigned;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config::OAuthSettings;

/// Token request forms received so far, in order.
pub type Forms = Arc<Mutex<Vec<HashMap<String, String>>>>;

/// Refresh token the provider accepts.
pub const ACTIVE_REFRESH_TOKEN: &str = "refresh-1";

/// Access token issued for a refresh grant.
pub fn renewed_access_token() -> String {
    encode_unsigned(&json!({
        "sub": "kc-123",
        "name": "Jane Doe",
        "email": "jane@example.com"
    }))
}

pub fn settings(token_endpoint: &str) -> OAuthSettings {
    OAuthSettings {
        client_id: "oauth2-pkce-client".to_string(),
        authorization_endpoint: "http://idp.test/auth".to_string(),
        token_endpoint: token_endpoint.to_string(),
        redirect_uri: "http://localhost:5173".to_string(),
        scopes: vec!["openid".to_string(), "offline_access".to_string()],
    }
}

async fn token(
    State(forms): State<Forms>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    forms.lock().unwrap().push(form.clone());
    match form.get("grant_type").map(String::as_str) {
        Some("authorization_code") => Ok(Json(json!({
            "access_token": "access-1",
            "token_type": "Bearer",
            "expires_in": 300,
            "refresh_token": ACTIVE_REFRESH_TOKEN
        }))),
        Some("refresh_token")
            if form.get("refresh_token").map(String::as_str) == Some(ACTIVE_REFRESH_TOKEN) =>
        {
            Ok(Json(json!({
                "access_token": renewed_access_token(),
                "token_type": "Bearer",
                "expires_in": 300
            })))
        }
        _ => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_grant",
                "error_description": "Token is not active"
            })),
        )),
    }
}

/// Serves `/token` on an ephemeral port and returns its URL.
pub async fn spawn_provider() -> (String, Forms) {
    let forms: Forms = Arc::default();
    let app = Router::new()
        .route("/token", post(token))
        .with_state(forms.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{address}/token"), forms)
}
