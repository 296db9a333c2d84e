//! # Common Test Utilities
//!
//! `TestApp` spawns the real router on a random port, with the Groq endpoint
//! pointed at an `httpmock::MockServer`, so end-to-end tests never leave the
//! machine.

// Not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use httpmock::MockServer;
use reqwest::Client;
use serde_json::{json, Value};
use std::{fs::File, io::Write, net::SocketAddr};
use tempfile::{tempdir, TempDir};
use textsum_server::{
    config, router,
    state::{build_app_state, AppState},
};
use tokio::{net::TcpListener, task::JoinHandle};

/// The path the mock Groq endpoint is served on.
pub const CHAT_COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

/// A well-formed key that the validator accepts.
pub const TEST_API_KEY: &str = "gsk_test_0123456789abcdef";

/// A chat-completions response body carrying `content`.
pub fn chat_completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "llama3-70b-8192",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    _config_dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application server with the default pipeline settings.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_yaml("").await
    }

    /// Spawns the application server, appending `extra_yaml` to the config.
    pub async fn spawn_with_yaml(extra_yaml: &str) -> Result<Self> {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start_async().await;

        let config_dir = tempdir()?;
        let config_path = config_dir.path().join("config.yml");
        let config_content = format!(
            r#"
port: 0
groq:
  api_url: "{}"
  default_model: "llama3-70b-8192"
{extra_yaml}
"#,
            mock_server.url(CHAT_COMPLETIONS_PATH),
        );
        let mut file = File::create(&config_path)?;
        file.write_all(config_content.as_bytes())?;

        let config_path = config_path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("temp path is not valid UTF-8"))?;
        let config = config::get_config(Some(config_path))?;
        let app_state = build_app_state(config)?;
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            app_state: app_state_for_harness,
            _config_dir: config_dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Posts the HTML form and returns the status and page body.
    pub async fn submit_form(&self, text: &str, api_key: &str) -> Result<(u16, String)> {
        let response = self
            .client
            .post(format!("{}/", self.address))
            .form(&[("text", text), ("groq_api_key", api_key)])
            .send()
            .await?;
        let status = response.status().as_u16();
        Ok((status, response.text().await?))
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
