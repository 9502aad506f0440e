use crate::application::settings::Settings;
use crate::http::http_server::HttpServer;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tokio::sync::RwLock;

pub struct ApplicationState {
    settings: Settings,
    http_server: OnceCell<HttpServer>,
}

impl ApplicationState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            http_server: OnceCell::new(),
        }
    }

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn http_server(&self) -> &HttpServer {
        self.http_server.get().expect("HTTP server not initialized")
    }

    pub fn set_http_server(&self, http_server: HttpServer) -> Result<()> {
        self.http_server
            .set(http_server)
            .map_err(|_| anyhow::anyhow!("Failed to set HTTP server in application state"))
    }
}

pub type SharedApplicationState = Arc<RwLock<ApplicationState>>;

pub async fn create_application_state(settings: Settings) -> Result<SharedApplicationState> {
    let http_port = settings.http_port();
    let application_state = Arc::new(RwLock::new(ApplicationState::new(settings)));

    let http_server = HttpServer::new(http_port);

    let application_state_guard = application_state.read().await;
    application_state_guard.set_http_server(http_server)?;
    drop(application_state_guard);

    Ok(application_state)
}

pub async fn start_application(application_state: SharedApplicationState) -> Result<()> {
    let application_state_guard = application_state.read().await;
    let mut handles = [application_state_guard
        .http_server()
        .start(Arc::clone(&application_state))];
    drop(application_state_guard);

    for handle in handles.iter_mut().flatten() {
        handle.await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::settings::Endpoints;

    #[tokio::test]
    async fn application_state_is_only_owned_by_its_caller() {
        let settings = Settings::new(
            0,
            false,
            Endpoints::new(
                "http://localhost/list",
                "http://localhost/claim",
                "http://localhost/test",
            ),
        );

        let application_state = create_application_state(settings).await.unwrap();

        assert_eq!(Arc::strong_count(&application_state), 1);
        assert_eq!(
            application_state
                .read()
                .await
                .settings()
                .endpoints()
                .claim_url(),
            "http://localhost/claim"
        );

        let weak_state = Arc::downgrade(&application_state);
        drop(application_state);
        assert!(weak_state.upgrade().is_none());
    }
}
