pub mod config;
pub mod csrf;
pub mod db;
pub mod entities;
pub mod error;
pub mod forms;
pub mod models;
pub mod ranking;
pub mod routes;
pub mod store;
pub mod templates;
pub mod tmdb;

use std::{sync::Arc, time::Duration};

use axum::{Router, extract::FromRef, routing::get};
use axum_extra::extract::cookie::Key;
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;

use crate::{config::Config, store::MovieStore, tmdb::TmdbClient};

#[derive(Clone)]
pub struct AppState {
    pub store: MovieStore,
    pub tmdb: Arc<TmdbClient>,
    pub cookie_key: Key,
}

impl AppState {
    pub fn new(config: Config, db: DatabaseConnection) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("movierank/0.1")
            .timeout(Duration::from_secs(config.tmdb_timeout_secs))
            .build()?;

        let tmdb = TmdbClient::new(
            http,
            config.tmdb_api_key.clone(),
            config.tmdb_base_url.clone(),
            config.tmdb_image_url.clone(),
        );

        Ok(Self { store: MovieStore::new(db), tmdb: Arc::new(tmdb), cookie_key: config.cookie_key() })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/add", get(routes::add_form).post(routes::add_submit))
        .route("/select", get(routes::select).post(routes::select))
        .route("/update", get(routes::update_form).post(routes::update_submit))
        .route("/delete", get(routes::delete).post(routes::delete))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
