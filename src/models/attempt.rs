use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::{
    Points,
    release::{GradeReleasePolicy, Predicate},
};

const ATTEMPT_COLUMNS: &str = "SELECT id, assignment_id, user_id, grade_state, release_at, submitted_at, points_achieved, points_maximum FROM attempts";

#[derive(sqlx::Type, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GradeState {
    Draft,
    PendingReview,
    Graded,
    Released,
}

impl GradeState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingReview => "pending_review",
            Self::Graded => "graded",
            Self::Released => "released",
        }
    }
}

impl fmt::Display for GradeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three fields release decisions read, detached from the stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptSnapshot {
    pub grade_state: GradeState,
    pub release_at: Option<NaiveDateTime>,
    pub submitted_at: Option<NaiveDateTime>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Attempt {
    pub id: Uuid,

    pub assignment_id: Uuid,
    pub user_id: Uuid,

    pub grade_state: GradeState,
    pub release_at: Option<NaiveDateTime>,
    pub submitted_at: Option<NaiveDateTime>,

    pub points_achieved: Option<i64>,
    pub points_maximum: Option<i64>,
}

impl Attempt {
    #[must_use]
    pub const fn snapshot(&self) -> AttemptSnapshot {
        AttemptSnapshot {
            grade_state: self.grade_state,
            release_at: self.release_at,
            submitted_at: self.submitted_at,
        }
    }

    #[must_use]
    pub fn points(&self) -> Option<Points> {
        Points::from_parts(self.points_maximum, self.points_achieved)
    }

    pub async fn insert(&self, db: &SqlitePool) -> sqlx::Result<()> {
        sqlx::query(
            "INSERT INTO attempts (id, assignment_id, user_id, grade_state, release_at, submitted_at, points_achieved, points_maximum) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(self.id)
        .bind(self.assignment_id)
        .bind(self.user_id)
        .bind(self.grade_state)
        .bind(self.release_at)
        .bind(self.submitted_at)
        .bind(self.points_achieved)
        .bind(self.points_maximum)
        .execute(db)
        .await?;

        Ok(())
    }

    pub async fn find(db: &SqlitePool, id: Uuid) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(&format!("{ATTEMPT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn for_student(db: &SqlitePool, user_id: Uuid) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(&format!(
            "{ATTEMPT_COLUMNS} WHERE user_id = ? ORDER BY submitted_at DESC"
        ))
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    /// Attempts of `user_id` whose grades are released, filtered in SQL.
    pub async fn released_for_student(
        db: &SqlitePool,
        user_id: Uuid,
        policy: &GradeReleasePolicy,
    ) -> sqlx::Result<Vec<Self>> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("{ATTEMPT_COLUMNS} WHERE user_id = "));
        builder.push_bind(user_id);

        policy.apply_visibility_scope(&mut builder);

        builder.push(" ORDER BY submitted_at DESC");

        builder.build_query_as::<Self>().fetch_all(db).await
    }

    /// Every stored attempt the predicate selects.
    pub async fn matching(db: &SqlitePool, predicate: &Predicate) -> sqlx::Result<Vec<Self>> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("{ATTEMPT_COLUMNS} WHERE 1 = 1"));

        predicate.and_where(&mut builder);

        tracing::debug!(%predicate, "selecting attempts");

        builder.build_query_as::<Self>().fetch_all(db).await
    }

    /// Sets the grade state, and the score when `points` is given; without
    /// `points` the stored score is kept. Returns `false` when no attempt has
    /// this id.
    pub async fn record_grade(
        db: &SqlitePool,
        id: Uuid,
        grade_state: GradeState,
        points: Option<Points>,
    ) -> sqlx::Result<bool> {
        let result = sqlx::query(
            "UPDATE attempts SET grade_state = ?, points_achieved = COALESCE(?, points_achieved), points_maximum = COALESCE(?, points_maximum) WHERE id = ?",
        )
        .bind(grade_state)
        .bind(points.map(|p| p.achieved()))
        .bind(points.map(|p| p.maximum()))
        .bind(id)
        .execute(db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns `false` when no attempt has this id.
    pub async fn schedule_release(
        db: &SqlitePool,
        id: Uuid,
        release_at: Option<NaiveDateTime>,
    ) -> sqlx::Result<bool> {
        let result = sqlx::query("UPDATE attempts SET release_at = ? WHERE id = ?")
            .bind(release_at)
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
