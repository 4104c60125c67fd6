use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument};

use crate::{error::ApiError, state::AppState};

use super::dto::{
    CareerUsersResponse, CareersResponse, CedRequest, CedResponse, FilterEcho, FilterQuery,
    FilteredResponse, PageQuery, PaginatedResponse, Pagination, PublicUser, SummariesResponse,
    UsersResponse,
};
use super::repo;

pub fn listing_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/summary", get(list_users_summary))
        .route("/users/paginated", get(list_users_paginated))
        .route("/users/career/:career", get(list_users_by_career))
        .route("/users/filter", get(list_users_filtered))
        .route("/careers", get(list_careers))
}

pub fn verify_routes() -> Router<AppState> {
    Router::new().route("/ced", post(verify_document))
}

/// POST /api/ced — existence check driving the wizard's search step.
#[instrument(skip(state, body))]
pub async fn verify_document(
    State(state): State<AppState>,
    Json(body): Json<CedRequest>,
) -> Result<Response, ApiError> {
    let user = repo::find_by_id(&state.db, &body.id).await?;
    match user {
        Some(user) => {
            info!(id = %user.id, "document verified");
            Ok(Json(CedResponse {
                success: true,
                exists: true,
                message: "Usuario encontrado".into(),
                user: PublicUser::from(&user),
            })
            .into_response())
        }
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "exists": false,
                "error": "Usuario no encontrado con el documento de identidad proporcionado",
            })),
        )
            .into_response()),
    }
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UsersResponse>, ApiError> {
    let users = repo::list_all(&state.db).await?;
    Ok(Json(UsersResponse {
        success: true,
        count: users.len(),
        users,
    }))
}

#[instrument(skip(state))]
pub async fn list_users_summary(
    State(state): State<AppState>,
) -> Result<Json<SummariesResponse>, ApiError> {
    let users = repo::list_summary(&state.db).await?;
    Ok(Json(SummariesResponse {
        success: true,
        count: users.len(),
        users,
    }))
}

#[instrument(skip(state))]
pub async fn list_users_paginated(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<PaginatedResponse>, ApiError> {
    let page = q.page.max(1);
    let limit = q.limit.max(1);
    let offset = (page - 1) * limit;

    let users = repo::list_page(&state.db, limit, offset).await?;
    let total_users = repo::count_all(&state.db).await?;
    let total_pages = (total_users + limit - 1) / limit;

    Ok(Json(PaginatedResponse {
        success: true,
        pagination: Pagination {
            current_page: page,
            total_pages,
            total_users,
            users_per_page: limit,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        },
        users,
    }))
}

#[instrument(skip(state))]
pub async fn list_users_by_career(
    State(state): State<AppState>,
    Path(career): Path<String>,
) -> Result<Json<CareerUsersResponse>, ApiError> {
    let users = repo::list_by_career(&state.db, &career).await?;
    Ok(Json(CareerUsersResponse {
        success: true,
        career,
        count: users.len(),
        users,
    }))
}

#[instrument(skip(state))]
pub async fn list_users_filtered(
    State(state): State<AppState>,
    Query(q): Query<FilterQuery>,
) -> Result<Json<FilteredResponse>, ApiError> {
    let users = repo::list_filtered(
        &state.db,
        q.career.as_deref(),
        q.gender.as_deref(),
        q.limit,
    )
    .await?;
    Ok(Json(FilteredResponse {
        success: true,
        filters: FilterEcho {
            career: q.career.unwrap_or_else(|| "all".into()),
            gender: q.gender.unwrap_or_else(|| "all".into()),
            limit: q
                .limit
                .map(|l| l.to_string())
                .unwrap_or_else(|| "no limit".into()),
        },
        count: users.len(),
        users,
    }))
}

#[instrument(skip(state))]
pub async fn list_careers(
    State(state): State<AppState>,
) -> Result<Json<CareersResponse>, ApiError> {
    let careers = repo::list_careers(&state.db).await?;
    Ok(Json(CareersResponse {
        success: true,
        count: careers.len(),
        careers,
    }))
}
