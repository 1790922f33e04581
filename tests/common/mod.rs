//! Shared harness: in-memory store, a mocked provider, and the app served on
//! a random port.

#![allow(dead_code)]

use std::net::SocketAddr;

use movierank::{AppState, config::Config, db, models::NewMovie, router};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

pub struct TestHarness {
    pub state: AppState,
    pub provider: MockServer,
    pub addr: SocketAddr,
    pub client: reqwest::Client,
}

impl TestHarness {
    pub async fn start() -> Self {
        let provider = MockServer::start().await;
        let config = Config {
            addr: "127.0.0.1:0".parse().unwrap(),
            tmdb_api_key: "test-key".to_string(),
            tmdb_base_url: provider.uri(),
            tmdb_image_url: IMAGE_BASE.to_string(),
            tmdb_timeout_secs: 5,
            database_url: "sqlite::memory:".to_string(),
            secret_key: Some("integration-secret-with-at-least-32-bytes".to_string()),
        };

        let db = db::connect_and_migrate(&config.database_url)
            .await
            .expect("failed to create in-memory database");
        let state = AppState::new(config, db).expect("failed to build app state");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");
        let app = router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("failed to build client");

        Self { state, provider, addr, client }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Loads a form page and returns the CSRF token embedded in it.
    pub async fn csrf_token(&self, path: &str) -> String {
        let body = self.client.get(self.url(path)).send().await.unwrap().text().await.unwrap();
        let marker = "name=\"csrf_token\" value=\"";
        let start = body.find(marker).expect("form has no csrf field") + marker.len();
        let end = body[start..].find('"').unwrap() + start;
        body[start..end].to_string()
    }

    pub async fn seed(&self, title: &str, rating: Option<f64>) -> i32 {
        let id = self
            .state
            .store
            .insert(NewMovie {
                title: title.to_string(),
                year: 2000,
                description: format!("All about {title}."),
                img_url: format!("{IMAGE_BASE}/{title}.jpg"),
            })
            .await
            .unwrap();
        if let Some(rating) = rating {
            self.state.store.rate(id, rating, "seeded").await.unwrap();
        }
        id
    }

    pub async fn mock_dune_details(&self) {
        Mock::given(method("GET"))
            .and(path("/movie/438631"))
            .and(query_param("api_key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 438631,
                "title": "Dune",
                "release_date": "2021-10-01",
                "overview": "A noble family becomes embroiled in a war.",
                "poster_path": "/x.jpg"
            })))
            .mount(&self.provider)
            .await;
    }
}

pub fn location(resp: &reqwest::Response) -> String {
    resp.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
