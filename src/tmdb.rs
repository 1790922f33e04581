use anyhow::Context;
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{NewMovie, SearchHit},
};

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    image_base_url: String,
}

impl TmdbClient {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        base_url: String,
        image_base_url: String,
    ) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("no TMDB_API_KEY provided - provider calls will be rejected");
        }
        Self { client, api_key, base_url, image_base_url }
    }

    /// Title search; results keep the provider's relevance order.
    pub async fn search_movies(&self, query: &str) -> AppResult<Vec<SearchHit>> {
        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));
        tracing::debug!(query, "tmdb search");

        let resp: SearchResponse = self
            .client
            .get(url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("Content-Type", "application/json;charset=utf-8"),
                ("query", query),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp
            .results
            .into_iter()
            .map(|m| SearchHit {
                tmdb_id: m.id,
                year: m.release_date.as_deref().and_then(release_year),
                title: m.title,
            })
            .collect())
    }

    pub async fn movie_details(&self, tmdb_id: i32) -> AppResult<MovieDetails> {
        let url = format!("{}/movie/{}", self.base_url.trim_end_matches('/'), tmdb_id);
        tracing::debug!(tmdb_id, "tmdb details");

        let details = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(details)
    }

    /// Details for `tmdb_id` shaped as a fresh, unrated record.
    pub async fn fetch_new_movie(&self, tmdb_id: i32) -> AppResult<NewMovie> {
        self.movie_details(tmdb_id).await?.into_new_movie(&self.image_base_url)
    }
}

fn release_year(release_date: &str) -> Option<i16> {
    release_date.split('-').next().and_then(|y| y.parse().ok())
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchMovie>,
}

#[derive(Debug, Deserialize)]
struct SearchMovie {
    id: i32,
    title: String,
    release_date: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MovieDetails {
    pub title: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
}

impl MovieDetails {
    pub fn into_new_movie(self, image_base_url: &str) -> AppResult<NewMovie> {
        let date: jiff::civil::Date = self
            .release_date
            .parse()
            .with_context(|| format!("{:?} has no usable release date", self.title))?;

        let img_url = match self.poster_path {
            Some(path) => format!("{}{}", image_base_url.trim_end_matches('/'), path),
            None => String::new(),
        };

        Ok(NewMovie {
            title: self.title,
            year: i32::from(date.year()),
            description: self.overview,
            img_url,
        })
    }
}
