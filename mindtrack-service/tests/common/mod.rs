#![allow(dead_code)]

use axum::Router;
use mindtrack_service::config::MindtrackConfig;
use mindtrack_service::services::providers::mock::MockTextProvider;
use mindtrack_service::services::providers::TextProvider;
use mindtrack_service::services::Generator;
use mindtrack_service::startup::Application;
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

/// Default configuration with a random port and no demo latency.
pub fn test_config() -> MindtrackConfig {
    let mut config = MindtrackConfig::default();
    config.common.port = 0;
    config.insights.demo_delay_ms = 0;
    config
}

/// Wrap a mock as a generator handle while keeping access to its call count.
pub fn mock_handle(
    provider: MockTextProvider,
) -> (Arc<MockTextProvider>, Option<Arc<dyn TextProvider>>) {
    let provider = Arc::new(provider);
    let handle: Arc<dyn TextProvider> = provider.clone();
    (provider, Some(handle))
}

impl TestApp {
    /// Spawn the service around the given generator set.
    pub async fn spawn(generator: Generator) -> Self {
        Self::spawn_with(test_config(), generator).await
    }

    pub async fn spawn_with(config: MindtrackConfig, generator: Generator) -> Self {
        let app = Application::build_with_generator(config, generator)
            .await
            .expect("Failed to build test application");
        Self::start(app).await
    }

    /// Spawn the service, letting it initialize generators from `config`.
    pub async fn spawn_from_config(config: MindtrackConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        Self::start(app).await
    }

    async fn start(app: Application) -> Self {
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_raw(&self, path: &str, body: &'static str) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Serve `router` on a random local port and return its base URL.
pub async fn spawn_fake_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake upstream");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    format!("http://127.0.0.1:{}", port)
}
