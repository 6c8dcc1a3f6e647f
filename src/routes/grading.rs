use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    Points,
    error::ApiError,
    models::{Attempt, GradeState},
    state::GradegateState,
};

pub fn router() -> Router<GradegateState> {
    Router::new()
        .route("/attempts", post(create_attempt))
        .route("/attempts/{attempt_id}/grade", put(record_grade))
        .route("/attempts/{attempt_id}/release", put(schedule_release))
}

#[derive(Debug, Deserialize)]
pub struct NewAttemptForm {
    pub assignment_id: Uuid,
    pub user_id: Uuid,
    pub submitted_at: Option<NaiveDateTime>,
}

async fn create_attempt(
    State(db): State<SqlitePool>,
    Json(NewAttemptForm {
        assignment_id,
        user_id,
        submitted_at,
    }): Json<NewAttemptForm>,
) -> Result<(StatusCode, Json<Attempt>), ApiError> {
    let attempt = Attempt {
        id: Uuid::new_v4(),
        assignment_id,
        user_id,
        grade_state: GradeState::Draft,
        release_at: None,
        submitted_at,
        points_achieved: None,
        points_maximum: None,
    };

    attempt.insert(&db).await?;

    tracing::info!(attempt_id = %attempt.id, %user_id, "attempt created");

    Ok((StatusCode::CREATED, Json(attempt)))
}

#[derive(Debug, Deserialize)]
pub struct RecordGradeForm {
    pub grade_state: GradeState,
    pub points_achieved: Option<i64>,
    pub points_maximum: Option<i64>,
}

async fn record_grade(
    State(db): State<SqlitePool>,
    Path(attempt_id): Path<Uuid>,
    Json(RecordGradeForm {
        grade_state,
        points_achieved,
        points_maximum,
    }): Json<RecordGradeForm>,
) -> Result<StatusCode, ApiError> {
    let points = match (points_maximum, points_achieved) {
        (None, None) => None,
        (maximum, achieved) => {
            Some(Points::from_parts(maximum, achieved).ok_or(ApiError::IncompletePoints)?)
        }
    };

    if !Attempt::record_grade(&db, attempt_id, grade_state, points).await? {
        return Err(ApiError::NotFound);
    }

    tracing::info!(%attempt_id, %grade_state, "grade recorded");

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ScheduleReleaseForm {
    pub release_at: Option<NaiveDateTime>,
}

async fn schedule_release(
    State(db): State<SqlitePool>,
    Path(attempt_id): Path<Uuid>,
    Json(ScheduleReleaseForm { release_at }): Json<ScheduleReleaseForm>,
) -> Result<StatusCode, ApiError> {
    if !Attempt::schedule_release(&db, attempt_id, release_at).await? {
        return Err(ApiError::NotFound);
    }

    tracing::info!(%attempt_id, ?release_at, "release scheduled");

    Ok(StatusCode::NO_CONTENT)
}
