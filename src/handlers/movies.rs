use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::NaiveDate;
use tracing::instrument;

use crate::{
    auth::Claims,
    error::{AppError, Result},
    models::Movie,
    pagination::Pagination,
    startup::AppState,
};

#[derive(Debug, serde::Serialize)]
pub struct MovieListResponse {
    success: bool,
    movies: Vec<Movie>,
    total_movies: i64,
}

#[instrument(name = "list_movies", skip(claims, state))]
pub async fn list_movies(
    claims: Claims,
    State(state): State<Arc<AppState>>,
    pagination: core::result::Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<MovieListResponse>> {
    claims.require("get:movies")?;

    let Query(pagination) = pagination.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let total_movies = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM movies")
        .fetch_one(&state.db)
        .await?;

    pagination.check_in_range(total_movies)?;

    let movies = sqlx::query_as::<_, Movie>(
        "SELECT id, title, release_date FROM movies ORDER BY id LIMIT $1 OFFSET $2",
    )
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(&state.db)
    .await?;

    Ok(Json(MovieListResponse {
        success: true,
        movies,
        total_movies,
    }))
}

#[derive(Debug, serde::Deserialize)]
pub struct CreateMovieModel {
    title: String,
    release_date: NaiveDate,
}

#[derive(Debug, serde::Serialize)]
pub struct MovieResponse {
    success: bool,
    movie: Movie,
}

#[instrument(name = "create_movie", skip(claims, state, payload))]
pub async fn create_movie(
    claims: Claims,
    State(state): State<Arc<AppState>>,
    payload: core::result::Result<Json<CreateMovieModel>, JsonRejection>,
) -> Result<(StatusCode, Json<MovieResponse>)> {
    claims.require("post:movies")?;

    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    if payload.title.trim().is_empty() {
        return Err(AppError::BadRequest("title is required".to_string()));
    }

    let movie = sqlx::query_as::<_, Movie>(
        "INSERT INTO movies (title, release_date) VALUES ($1, $2) RETURNING id, title, release_date",
    )
    .bind(&payload.title)
    .bind(payload.release_date)
    .fetch_one(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(MovieResponse {
            success: true,
            movie,
        }),
    ))
}

#[derive(Debug, serde::Deserialize)]
pub struct UpdateMovieModel {
    title: Option<String>,
    release_date: Option<NaiveDate>,
}

#[instrument(name = "update_movie", skip(claims, state, payload))]
pub async fn update_movie(
    claims: Claims,
    State(state): State<Arc<AppState>>,
    movie_id: core::result::Result<Path<i64>, PathRejection>,
    payload: core::result::Result<Json<UpdateMovieModel>, JsonRejection>,
) -> Result<Json<MovieResponse>> {
    claims.require("patch:movies")?;

    let Path(movie_id) = movie_id.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    if payload.title.is_none() && payload.release_date.is_none() {
        return Err(AppError::BadRequest(
            "at least one of title, release_date is required".to_string(),
        ));
    }

    if payload.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(AppError::BadRequest("title must not be empty".to_string()));
    }

    let movie = sqlx::query_as::<_, Movie>(
        r#"
    UPDATE movies
    SET title = COALESCE($1, title),
        release_date = COALESCE($2, release_date)
    WHERE id = $3
    RETURNING id, title, release_date
    "#,
    )
    .bind(payload.title)
    .bind(payload.release_date)
    .bind(movie_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(Json(MovieResponse {
        success: true,
        movie,
    }))
}

#[derive(Debug, serde::Serialize)]
pub struct DeleteMovieResponse {
    success: bool,
    delete: i64,
}

#[instrument(name = "delete_movie", skip(claims, state))]
pub async fn delete_movie(
    claims: Claims,
    State(state): State<Arc<AppState>>,
    movie_id: core::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteMovieResponse>> {
    claims.require("delete:movies")?;

    let Path(movie_id) = movie_id.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let deleted = sqlx::query_scalar::<_, i64>("DELETE FROM movies WHERE id = $1 RETURNING id")
        .bind(movie_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(DeleteMovieResponse {
        success: true,
        delete: deleted,
    }))
}

#[derive(Debug, serde::Deserialize)]
pub struct SearchMoviesModel {
    search_term: String,
}

// `%` and `_` in the user's term must match themselves, not act as LIKE
// wildcards
fn escape_like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

#[instrument(name = "search_movies", skip(claims, state, payload))]
pub async fn search_movies(
    claims: Claims,
    State(state): State<Arc<AppState>>,
    payload: core::result::Result<Json<SearchMoviesModel>, JsonRejection>,
) -> Result<Json<MovieListResponse>> {
    claims.require("get:movies")?;

    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let term = payload.search_term.trim();
    if term.is_empty() {
        return Err(AppError::BadRequest("search_term is required".to_string()));
    }

    let movies = sqlx::query_as::<_, Movie>(
        "SELECT id, title, release_date FROM movies \
         WHERE title ILIKE '%' || $1 || '%' ESCAPE '\\' ORDER BY id",
    )
    .bind(escape_like_pattern(term))
    .fetch_all(&state.db)
    .await?;

    // a search with no hits reads as a missing resource, same as the listings
    if movies.is_empty() {
        return Err(AppError::NotFound);
    }

    let total_movies = movies.len() as i64;

    Ok(Json(MovieListResponse {
        success: true,
        movies,
        total_movies,
    }))
}
