use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    Points,
    error::ApiError,
    models::{Attempt, GradeState},
    release::GradeReleasePolicy,
    state::GradegateState,
};

pub fn router() -> Router<GradegateState> {
    Router::new()
        .route("/students/{student_id}/attempts", get(released_attempts))
        .route(
            "/students/{student_id}/attempts/{attempt_id}",
            get(attempt_detail),
        )
}

async fn released_attempts(
    State(state): State<GradegateState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<AttemptDetail>>, ApiError> {
    let attempts = Attempt::released_for_student(&state.db_pool, student_id, &state.policy).await?;

    Ok(Json(
        attempts
            .iter()
            .map(|attempt| AttemptDetail::project(attempt, &state.policy))
            .collect(),
    ))
}

/// What a student may see of one attempt; grade fields only once visible.
#[derive(Debug, Serialize)]
pub struct AttemptDetail {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub submitted_at: Option<NaiveDateTime>,

    pub grades_visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_state: Option<GradeState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Points>,
}

impl AttemptDetail {
    fn project(attempt: &Attempt, policy: &GradeReleasePolicy) -> Self {
        let grades_visible = policy.can_student_see_grades(&attempt.snapshot());

        Self {
            id: attempt.id,
            assignment_id: attempt.assignment_id,
            submitted_at: attempt.submitted_at,
            grades_visible,
            grade_state: grades_visible.then_some(attempt.grade_state),
            points: attempt.points().filter(|_| grades_visible),
        }
    }
}

async fn attempt_detail(
    State(state): State<GradegateState>,
    Path((student_id, attempt_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<AttemptDetail>, ApiError> {
    let attempt = Attempt::find(&state.db_pool, attempt_id)
        .await?
        .filter(|attempt| attempt.user_id == student_id)
        .ok_or(ApiError::NotFound)?;

    Ok(Json(AttemptDetail::project(&attempt, &state.policy)))
}
