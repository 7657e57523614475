use crate::{config::ServerConfig, error, server::start_api_server};

/// Runs the backend proxy in the foreground.
pub async fn serve(addr: Option<String>) {
    let mut config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => error!("Cannot start the proxy. Err: {}", e),
    };
    if let Some(addr) = addr {
        config.addr = addr;
    }

    if let Err(e) = start_api_server(config).await {
        error!("Proxy stopped. Err: {}", e);
    }
}
