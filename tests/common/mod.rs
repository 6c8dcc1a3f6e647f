#![allow(dead_code, clippy::unwrap_used)]

use std::time;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use gradegate::models::{Attempt, GradeState};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use uuid::Uuid;

pub const STATES: [GradeState; 4] = [
    GradeState::Draft,
    GradeState::PendingReview,
    GradeState::Graded,
    GradeState::Released,
];

pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 16)
        .and_then(|d| d.and_hms_milli_opt(12, 0, 0, 250))
        .unwrap()
}

/// Single-connection in-memory database with the attempts table.
pub async fn pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<time::Duration>)
        .max_lifetime(None::<time::Duration>)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    gradegate::migrate(&pool).await.unwrap();

    pool
}

pub fn release_times() -> [Option<NaiveDateTime>; 6] {
    [
        None,
        Some(now() - Duration::days(1)),
        Some(now() - Duration::microseconds(100)),
        Some(now()),
        Some(now() + Duration::nanoseconds(1)),
        Some(now() + Duration::days(1)),
    ]
}

/// Inserts one attempt for every combination of grade state, release time
/// and submission presence.
pub async fn seed_grid(db: &SqlitePool, user_id: Uuid) -> Vec<Attempt> {
    let mut attempts = Vec::new();

    for grade_state in STATES {
        for release_at in release_times() {
            for submitted_at in [None, Some(now() - Duration::days(3))] {
                let attempt = Attempt {
                    id: Uuid::new_v4(),
                    assignment_id: Uuid::new_v4(),
                    user_id,
                    grade_state,
                    release_at,
                    submitted_at,
                    points_achieved: Some(3),
                    points_maximum: Some(5),
                };
                attempt.insert(db).await.unwrap();
                attempts.push(attempt);
            }
        }
    }

    attempts
}
