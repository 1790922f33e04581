use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;

use crate::{
    AppState, csrf,
    entities::movie,
    error::{AppError, AppResult},
    forms::{AddForm, FormErrors, RateForm, Rating},
    ranking, templates,
};

pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let movies = ranking::display_order(state.store.ranked().await?);
    Ok(Html(templates::index_page(&movies)))
}

pub async fn add_form(jar: SignedCookieJar) -> (SignedCookieJar, Html<String>) {
    let (jar, token) = csrf::issue(jar);
    let body = templates::add_page(&AddForm::default(), &token, &FormErrors::default());
    (jar, Html(body))
}

pub async fn add_submit(jar: SignedCookieJar, Form(form): Form<AddForm>) -> Response {
    match form.validate(csrf::token(&jar).as_deref()) {
        Ok(query) => {
            Redirect::to(&format!("/select?user_query={}", urlencoding::encode(&query)))
                .into_response()
        }
        Err(errors) => {
            let (jar, token) = csrf::issue(jar);
            (jar, Html(templates::add_page(&form, &token, &errors))).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SelectQuery {
    user_query: Option<String>,
    movie_id: Option<i32>,
}

/// Shows search results, or adds the chosen provider movie when `movie_id` is given.
pub async fn select(
    State(state): State<AppState>,
    Query(q): Query<SelectQuery>,
) -> AppResult<Response> {
    if let Some(tmdb_id) = q.movie_id {
        let new_movie = state.tmdb.fetch_new_movie(tmdb_id).await?;
        let id = state.store.insert(new_movie).await?;
        return Ok(Redirect::to(&format!("/update?movie_id={id}")).into_response());
    }

    let query = q
        .user_query
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::bad_request("user_query is required"))?;

    let hits = state.tmdb.search_movies(query).await?;
    Ok(Html(templates::select_page(query, &hits)).into_response())
}

#[derive(Debug, Deserialize)]
pub struct MovieIdQuery {
    movie_id: i32,
}

pub async fn update_form(
    State(state): State<AppState>,
    Query(q): Query<MovieIdQuery>,
    jar: SignedCookieJar,
) -> AppResult<(SignedCookieJar, Html<String>)> {
    let movie = find_movie(&state, q.movie_id).await?;
    let (jar, token) = csrf::issue(jar);
    let body = templates::update_page(&movie, &RateForm::default(), &token, &FormErrors::default());
    Ok((jar, Html(body)))
}

pub async fn update_submit(
    State(state): State<AppState>,
    Query(q): Query<MovieIdQuery>,
    jar: SignedCookieJar,
    Form(form): Form<RateForm>,
) -> AppResult<Response> {
    let movie = find_movie(&state, q.movie_id).await?;

    match form.validate(csrf::token(&jar).as_deref()) {
        Ok(Rating { rating, review }) => {
            state
                .store
                .rate(movie.id, rating, &review)
                .await?
                .ok_or_else(|| not_found(movie.id))?;
            Ok(Redirect::to("/").into_response())
        }
        Err(errors) => {
            let (jar, token) = csrf::issue(jar);
            let body = templates::update_page(&movie, &form, &token, &errors);
            Ok((jar, Html(body)).into_response())
        }
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Query(q): Query<MovieIdQuery>,
) -> AppResult<Redirect> {
    if !state.store.delete(q.movie_id).await? {
        return Err(not_found(q.movie_id));
    }
    Ok(Redirect::to("/"))
}

async fn find_movie(state: &AppState, id: i32) -> AppResult<movie::Model> {
    state.store.get(id).await?.ok_or_else(|| not_found(id))
}

fn not_found(id: i32) -> AppError {
    AppError::not_found(format!("no movie with id {id}"))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use crate::{AppState, config::Config, db, models::NewMovie, router};

    async fn state() -> AppState {
        let config = Config {
            addr: "127.0.0.1:0".parse().unwrap(),
            tmdb_api_key: "test-key".to_string(),
            tmdb_base_url: "http://127.0.0.1:9".to_string(),
            tmdb_image_url: "https://image.tmdb.org/t/p/w500".to_string(),
            tmdb_timeout_secs: 5,
            database_url: "sqlite::memory:".to_string(),
            secret_key: Some("a-test-secret-that-is-long-enough-for-hkdf".to_string()),
        };
        let db = db::connect_and_migrate(&config.database_url).await.unwrap();
        AppState::new(config, db).unwrap()
    }

    async fn body_string(resp: axum::response::Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn empty_list_renders() {
        let app = router(state().await);
        let resp = app.oneshot(Request::get("/").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_string(resp).await.contains("No movies yet"));
    }

    #[tokio::test]
    async fn add_without_csrf_cookie_rerenders() {
        let app = router(state().await);
        let resp = app
            .oneshot(
                Request::post("/add")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("title_query=Dune&csrf_token=forged"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get(header::LOCATION).is_none());
        assert!(body_string(resp).await.contains("The CSRF token is invalid."));
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let app = router(state().await);
        let resp =
            app.oneshot(Request::get("/delete?movie_id=7").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_form_shows_title() {
        let state = state().await;
        let id = state
            .store
            .insert(NewMovie {
                title: "Heat".to_string(),
                year: 1995,
                description: "Cops and robbers.".to_string(),
                img_url: String::new(),
            })
            .await
            .unwrap();

        let resp = router(state)
            .oneshot(Request::get(format!("/update?movie_id={id}")).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get(header::SET_COOKIE).is_some());
        let body = body_string(resp).await;
        assert!(body.contains("Heat"));
        assert!(body.contains("name=\"csrf_token\""));
    }

    #[tokio::test]
    async fn select_without_query_is_bad_request() {
        let app = router(state().await);
        let resp = app.oneshot(Request::get("/select").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
