//! Test helpers: build AppState and router for integration tests.
//!
//! Storage is the in-memory `MockStorage`, so no external services are needed.

pub mod fixtures;

use axum_test::TestServer;
use magazine_api::constants;
use magazine_api::setup::{build_state, routes};
use magazine_core::{ApiConfig, BaseConfig, Config, StorageBackend};
use magazine_storage::MockStorage;
use std::sync::Arc;

/// API path prefix for tests (e.g. `/api/v1`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server plus the storage it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<MockStorage>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn create_test_config(max_multipart_bytes: usize) -> Config {
    Config(Box::new(ApiConfig {
        base: BaseConfig {
            server_port: 4000,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            http_concurrency_limit: 10_000,
        },
        storage_backend: Some(StorageBackend::Local),
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        aws_region: None,
        local_storage_path: Some("/tmp/magazine-test".to_string()),
        local_storage_base_url: Some("http://localhost:4000/media".to_string()),
        max_multipart_bytes,
        upload_max_concurrency: 8,
        upload_rollback_on_failure: true,
        signed_url_expiry_secs: 60,
    }))
}

/// Setup test app with default limits and well-behaved storage.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(MockStorage::new(), 10 << 20)
}

/// Test config for a production deployment with an explicit CORS origin.
pub fn create_production_config() -> Config {
    let mut config = create_test_config(10 << 20);
    config.0.base.environment = "production".to_string();
    config.0.base.cors_origins = vec!["https://magazine.example".to_string()];
    config
}

pub fn setup_test_app_with(storage: MockStorage, max_multipart_bytes: usize) -> TestApp {
    setup_test_app_with_config(storage, create_test_config(max_multipart_bytes))
}

pub fn setup_test_app_with_config(storage: MockStorage, config: Config) -> TestApp {
    let storage = Arc::new(storage);

    let state = build_state(config.clone(), storage.clone());
    let router = routes::setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(router.into_make_service()).expect("Failed to start test server");

    TestApp { server, storage }
}
