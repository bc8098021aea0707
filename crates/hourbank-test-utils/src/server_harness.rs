//! Test server harness for E2E testing
//!
//! Spawns a real service instance on a loopback port, backed by the
//! in-memory store so tests need no database.

use crate::fixtures::test_config;
use hourbank_service::config::Config;
use hourbank_service::handlers::AppState;
use hourbank_service::routes;
use hourbank_service::store::MemoryStore;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Test harness for spawning the hour-bank server in E2E tests
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_login_flow() -> anyhow::Result<()> {
///     let server = TestServer::spawn().await?;
///     server.register_faculty("F1", "Dr. A", "secret").await?;
///
///     let token = server.login_faculty("F1", "secret").await?;
///     token.assert_valid_jwt();
///     Ok(())
/// }
/// ```
pub struct TestServer {
    addr: SocketAddr,
    client: reqwest::Client,
    config: Config,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Spawn a new server instance on a random loopback port with a fresh
    /// in-memory store.
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        let config = test_config();

        let state = Arc::new(AppState {
            store: Arc::new(MemoryStore::new()),
            config: config.clone(),
        });

        // The global recorder can only be installed once per process; later
        // spawns in the same test binary fall back to a standalone recorder.
        let metrics_handle = match routes::init_metrics_recorder() {
            Ok(handle) => handle,
            Err(_) => {
                use metrics_exporter_prometheus::PrometheusBuilder;
                let recorder = PrometheusBuilder::new().build_recorder();
                recorder.handle()
            }
        };

        let app = routes::build_routes(state, metrics_handle);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;
        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            client: reqwest::Client::new(),
            config,
            _handle: handle,
        })
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get reference to the server configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get reference to the shared HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Register a student account, failing the call on a non-2xx response.
    pub async fn register_student(
        &self,
        roll: &str,
        name: &str,
        password: &str,
    ) -> Result<(), anyhow::Error> {
        let response = self
            .client
            .post(format!("{}/register", self.url()))
            .json(&json!({
                "role": "student",
                "roll": roll,
                "name": name,
                "password": password,
                "course": "CS",
                "year": 2,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Student registration failed: {}", response.status());
        }
        Ok(())
    }

    /// Register a faculty account, failing the call on a non-2xx response.
    pub async fn register_faculty(
        &self,
        fid: &str,
        name: &str,
        password: &str,
    ) -> Result<(), anyhow::Error> {
        let response = self
            .client
            .post(format!("{}/register", self.url()))
            .json(&json!({
                "role": "faculty",
                "fid": fid,
                "name": name,
                "password": password,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Faculty registration failed: {}", response.status());
        }
        Ok(())
    }

    /// Log in as a student and return the access token.
    pub async fn login_student(
        &self,
        roll: &str,
        password: &str,
    ) -> Result<String, anyhow::Error> {
        self.login(json!({ "roll": roll, "password": password }))
            .await
    }

    /// Log in as a faculty member and return the access token.
    pub async fn login_faculty(
        &self,
        fid: &str,
        password: &str,
    ) -> Result<String, anyhow::Error> {
        self.login(json!({ "fid": fid, "password": password })).await
    }

    async fn login(&self, body: serde_json::Value) -> Result<String, anyhow::Error> {
        let response = self
            .client
            .post(format!("{}/login", self.url()))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Login failed: {}", response.status());
        }

        let payload: serde_json::Value = response.json().await?;
        payload
            .get("access_token")
            .and_then(|t| t.as_str())
            .map(|t| t.to_string())
            .ok_or_else(|| anyhow::anyhow!("Login response missing access_token"))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Stop the background server task when the test completes.
        self._handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_spawns_successfully() -> Result<(), anyhow::Error> {
        let server = TestServer::spawn().await?;

        assert!(server.url().starts_with("http://127.0.0.1:"));

        let response = reqwest::get(format!("{}/health", server.url())).await?;
        assert_eq!(response.status(), 200);
        assert_eq!(response.text().await?, "OK");

        Ok(())
    }

    #[tokio::test]
    async fn test_register_and_login_helpers() -> Result<(), anyhow::Error> {
        let server = TestServer::spawn().await?;

        server.register_faculty("F1", "Dr. A", "secret").await?;
        let token = server.login_faculty("F1", "secret").await?;
        assert!(!token.is_empty());

        Ok(())
    }
}
