use axum::Json;
use axum::extract::{Path, Query};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, patch, post};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use crate::error::AppError;
use crate::models::*;
use crate::registry::{SyncStatus, export};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/{id}", delete(remove_course))
        .route("/courses/{id}/status", patch(change_course_status))
        .route("/members", get(list_members).post(join_community))
        .route("/members/export", get(export_members))
        .route("/members/{id}", delete(remove_member))
        .route("/sync", post(sync_now))
        .route("/sync/status", get(sync_status))
        .with_state(state)
}

/// Mutating and member-listing routes require the admin token header.
fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    let provided = headers.get("x-admin-token").and_then(|v| v.to_str().ok());
    if provided == Some(state.admin_token.as_str()) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_courses(State(state): State<AppState>) -> Json<Vec<Course>> {
    Json(state.catalog.list().await)
}

async fn create_course(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<NewCourseRequest>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    require_admin(&state, &headers)?;
    let course = state.catalog.add(req).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

async fn remove_course(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    require_admin(&state, &headers)?;
    if state.catalog.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

async fn change_course_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCourseStatusRequest>,
) -> Result<Json<Course>, AppError> {
    require_admin(&state, &headers)?;
    let course = state
        .catalog
        .set_status(id, req.status)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(course))
}

/// Public signup. The raw field set is forwarded to the form relay
/// independently of the registry's own persistence.
async fn join_community(
    State(state): State<AppState>,
    Json(signup): Json<MemberSignup>,
) -> Result<(StatusCode, Json<Member>), AppError> {
    signup.validate().map_err(AppError::Validation)?;
    state.relay.submit(signup.raw_fields());
    let member = state.registry.add(signup).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

async fn list_members(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(criteria): Query<MemberFilter>,
) -> Result<Json<Vec<Member>>, AppError> {
    require_admin(&state, &headers)?;
    Ok(Json(state.registry.filter(&criteria).await))
}

async fn remove_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    require_admin(&state, &headers)?;
    if state.registry.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

async fn export_members(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    require_admin(&state, &headers)?;
    let members = state.registry.list().await;
    let bytes = export::to_csv(&members)?;
    let filename = export::export_filename();

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "text/csv; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

#[derive(Debug, Serialize)]
struct SyncResponse {
    members: usize,
    status: SyncStatus,
}

async fn sync_now(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SyncResponse>, AppError> {
    require_admin(&state, &headers)?;
    let members = state.registry.load().await?;
    Ok(Json(SyncResponse {
        members: members.len(),
        status: state.registry.sync_status().await,
    }))
}

async fn sync_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SyncStatus>, AppError> {
    require_admin(&state, &headers)?;
    Ok(Json(state.registry.sync_status().await))
}
