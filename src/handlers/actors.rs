use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use tracing::instrument;

use crate::{
    auth::Claims,
    error::{AppError, Result},
    models::Actor,
    pagination::Pagination,
    startup::AppState,
};

#[derive(Debug, serde::Serialize)]
pub struct ActorListResponse {
    success: bool,
    actors: Vec<Actor>,
    total_actors: i64,
}

#[instrument(name = "list_actors", skip(claims, state))]
pub async fn list_actors(
    claims: Claims,
    State(state): State<Arc<AppState>>,
    pagination: core::result::Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<ActorListResponse>> {
    claims.require("get:actors")?;

    let Query(pagination) = pagination.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let total_actors = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM actors")
        .fetch_one(&state.db)
        .await?;

    pagination.check_in_range(total_actors)?;

    let actors = sqlx::query_as::<_, Actor>(
        "SELECT id, name, age, gender FROM actors ORDER BY id LIMIT $1 OFFSET $2",
    )
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(&state.db)
    .await?;

    Ok(Json(ActorListResponse {
        success: true,
        actors,
        total_actors,
    }))
}

#[derive(Debug, serde::Deserialize)]
pub struct CreateActorModel {
    name: String,
    age: i32,
    gender: String,
}

#[derive(Debug, serde::Serialize)]
pub struct ActorResponse {
    success: bool,
    actor: Actor,
}

#[instrument(name = "create_actor", skip(claims, state, payload))]
pub async fn create_actor(
    claims: Claims,
    State(state): State<Arc<AppState>>,
    payload: core::result::Result<Json<CreateActorModel>, JsonRejection>,
) -> Result<(StatusCode, Json<ActorResponse>)> {
    claims.require("post:actors")?;

    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    if payload.gender.trim().is_empty() {
        return Err(AppError::BadRequest("gender is required".to_string()));
    }

    let actor = sqlx::query_as::<_, Actor>(
        "INSERT INTO actors (name, age, gender) VALUES ($1, $2, $3) RETURNING id, name, age, gender",
    )
    .bind(&payload.name)
    .bind(payload.age)
    .bind(&payload.gender)
    .fetch_one(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ActorResponse {
            success: true,
            actor,
        }),
    ))
}

#[derive(Debug, serde::Deserialize)]
pub struct UpdateActorModel {
    name: Option<String>,
    age: Option<i32>,
    gender: Option<String>,
}

#[instrument(name = "update_actor", skip(claims, state, payload))]
pub async fn update_actor(
    claims: Claims,
    State(state): State<Arc<AppState>>,
    actor_id: core::result::Result<Path<i64>, PathRejection>,
    payload: core::result::Result<Json<UpdateActorModel>, JsonRejection>,
) -> Result<Json<ActorResponse>> {
    claims.require("patch:actors")?;

    let Path(actor_id) = actor_id.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    if payload.name.is_none() && payload.age.is_none() && payload.gender.is_none() {
        return Err(AppError::BadRequest(
            "at least one of name, age, gender is required".to_string(),
        ));
    }

    if payload.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }
    if payload
        .gender
        .as_deref()
        .is_some_and(|g| g.trim().is_empty())
    {
        return Err(AppError::BadRequest("gender must not be empty".to_string()));
    }

    let actor = sqlx::query_as::<_, Actor>(
        r#"
    UPDATE actors
    SET name = COALESCE($1, name),
        age = COALESCE($2, age),
        gender = COALESCE($3, gender)
    WHERE id = $4
    RETURNING id, name, age, gender
    "#,
    )
    .bind(payload.name)
    .bind(payload.age)
    .bind(payload.gender)
    .bind(actor_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(Json(ActorResponse {
        success: true,
        actor,
    }))
}

#[derive(Debug, serde::Serialize)]
pub struct DeleteActorResponse {
    success: bool,
    delete: i64,
}

#[instrument(name = "delete_actor", skip(claims, state))]
pub async fn delete_actor(
    claims: Claims,
    State(state): State<Arc<AppState>>,
    actor_id: core::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteActorResponse>> {
    claims.require("delete:actors")?;

    let Path(actor_id) = actor_id.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let deleted = sqlx::query_scalar::<_, i64>("DELETE FROM actors WHERE id = $1 RETURNING id")
        .bind(actor_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(DeleteActorResponse {
        success: true,
        delete: deleted,
    }))
}
