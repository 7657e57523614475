use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{
    config, management::TokenManager, proxy::ProxyClient, types::PendingLogin, warning,
};

/// Local redirect target of the CLI login.
///
/// Checks the `state` round-tripped through Spotify, then lets the proxy
/// exchange the code. The outcome lands in the shared [`PendingLogin`] the
/// login command is waiting on.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PendingLogin>>>>,
) -> Html<&'static str> {
    let mut pending = shared_state.lock().await;
    let Some(login) = pending.as_mut() else {
        return Html("<h4>No login in progress.</h4>");
    };

    if params.get("state") != Some(&login.state) {
        login.failure = Some("State mismatch in OAuth callback".to_string());
        return Html("<h4>Login failed: state mismatch.</h4>");
    }

    if let Some(reason) = params.get("error") {
        login.failure = Some(format!("Authorization denied: {reason}"));
        return Html("<h4>Login cancelled.</h4>");
    }

    let Some(code) = params.get("code") else {
        login.failure = Some("Missing authorization code".to_string());
        return Html("<h4>Missing authorization code.</h4>");
    };

    let proxy = ProxyClient::from_env();
    match proxy
        .exchange_code(code, &config::callback_redirect_uri())
        .await
    {
        Ok(response) => match TokenManager::from_response(&response) {
            Some(manager) => {
                login.token = Some(manager.current_token().clone());
                Html("<h2>Authentication successful.</h2><p>Close this browser window.</p>")
            }
            None => {
                login.failure = Some(format!("Unexpected token answer: {response}"));
                Html("<h4>Login failed.</h4>")
            }
        },
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            login.failure = Some(e.reason());
            Html("<h4>Login failed.</h4>")
        }
    }
}
