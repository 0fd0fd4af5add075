use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use catalog_api::{
    config::AppConfig,
    db,
    services::seeding::{SeedOutcome, SeedPlan, SeedReport, Seeder},
    AppState,
};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Helper harness for spinning up an application backed by a throwaway SQLite file.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    pub db: Arc<DatabaseConnection>,
    _dir: TempDir,
}

impl TestApp {
    /// Construct a new test application with a migrated, empty store.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let db_file = dir.path().join("catalog_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_file.display()),
            "127.0.0.1".to_string(),
            18_000,
            "test".to_string(),
        );
        cfg.db_max_connections = 4;
        cfg.seed_on_startup = false;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db = Arc::new(pool);
        let state = AppState::new(db.clone(), cfg);
        let router = catalog_api::app_router(state.clone()).expect("build router");

        Self {
            router,
            state,
            db,
            _dir: dir,
        }
    }

    /// Construct a test application and seed it with `plan`.
    #[allow(dead_code)]
    pub async fn seeded(plan: SeedPlan) -> (Self, SeedReport) {
        let app = Self::new().await;
        let report = match app.seeder(plan).seed_if_empty().await.expect("seed store") {
            SeedOutcome::Seeded(report) => report,
            other => panic!("expected a fresh seed, got {other:?}"),
        };
        (app, report)
    }

    /// Seeder writing to this application's store.
    #[allow(dead_code)]
    pub fn seeder(&self, plan: SeedPlan) -> Seeder {
        Seeder::new(self.db.clone(), plan)
    }

    /// Send a request against the router with optional extra headers.
    #[allow(dead_code)]
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let request = builder
            .body(Body::empty())
            .expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// GET `uri` and decode the JSON body.
    #[allow(dead_code)]
    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let response = self.request(Method::GET, uri, &[]).await;
        let status = response.status();
        (status, response_json(response).await)
    }
}

/// Small plan that keeps integration tests fast.
#[allow(dead_code)]
pub fn small_plan(products: usize, out_of_stock: usize) -> SeedPlan {
    SeedPlan {
        product_count: products,
        out_of_stock_count: out_of_stock,
        rng_seed: Some(7),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub async fn response_json(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&body).expect("response body is json")
}
