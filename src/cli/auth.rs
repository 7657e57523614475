use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::{
    config, error, info,
    management::{TokenManager, VolumeMemory},
    proxy::ProxyClient,
    server::start_callback_server,
    success,
    types::{PendingLogin, Token},
    utils, warning,
};

/// Logs in through the proxy.
///
/// A local listener receives Spotify's redirect; the browser is sent to the
/// proxy's login route, which holds the client id. The code is exchanged by
/// the proxy as well, so the client secret never reaches this machine.
pub async fn auth(shared_state: Arc<Mutex<Option<PendingLogin>>>) {
    let state = utils::generate_state();

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        if let Err(e) = start_callback_server(server_state).await {
            warning!("Callback listener stopped: {}", e);
        }
    });

    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PendingLogin {
            state: state.clone(),
            token: None,
            failure: None,
        });
    }

    let proxy = ProxyClient::from_env();
    let Some(login_url) = proxy.login_url(&config::callback_redirect_uri(), &state) else {
        error!("Invalid proxy URL: {}", proxy.base_url());
    };

    info!("Waiting for Spotify authorization...");
    if webbrowser::open(&login_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            login_url
        )
    }

    match wait_for_token(shared_state).await {
        Ok(token) => {
            let token_manager = TokenManager::new(token);
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }
            success!("Authentication successful!");
        }
        Err(reason) => error!("Authentication failed: {}", reason),
    }
}

/// Polls the shared login for up to a minute.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PendingLogin>>>) -> Result<Token, String> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(login) = lock.as_ref() {
            if let Some(token) = &login.token {
                return Ok(token.clone());
            }
            if let Some(failure) = &login.failure {
                return Err(failure.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    Err("timed out".to_string())
}

/// Forgets the cached token.
pub async fn logout() {
    if let Err(e) = TokenManager::clear().await {
        error!("Failed to remove cached token: {}", e);
    }
    if let Err(e) = VolumeMemory::default_location().forget().await {
        warning!("Failed to remove remembered volume: {}", e);
    }
    success!("Logged out.");
}

/// Access token of the current session, exiting when there is none.
pub(crate) async fn require_token() -> String {
    let manager = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => error!(
            "Not logged in. Please run {} auth\n Error: {}",
            env!("CARGO_PKG_NAME"),
            e
        ),
    };
    if manager.is_expired() {
        error!(
            "Session expired. Please run {} auth again.",
            env!("CARGO_PKG_NAME")
        );
    }
    manager.access_token().to_string()
}

/// Access token of the current session, if any.
pub(crate) async fn optional_token() -> Option<String> {
    TokenManager::load()
        .await
        .ok()
        .filter(|manager| !manager.is_expired())
        .map(|manager| manager.access_token().to_string())
}
