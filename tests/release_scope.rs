#![allow(clippy::unwrap_used)]

mod common;

use std::{collections::BTreeSet, sync::Arc};

use chrono::Duration;
use gradegate::{
    clock::FixedClock,
    models::{Attempt, GradeState},
    release::{GradeReleaseGate, GradeReleasePolicy},
};
use uuid::Uuid;

fn ids<'a>(attempts: impl IntoIterator<Item = &'a Attempt>) -> BTreeSet<Uuid> {
    attempts.into_iter().map(|attempt| attempt.id).collect()
}

#[tokio::test]
async fn released_predicate_selects_what_is_released_in_memory() {
    let db = common::pool().await;
    let attempts = common::seed_grid(&db, Uuid::new_v4()).await;
    let gate = GradeReleaseGate::new(Arc::new(FixedClock::new(common::now())));

    let selected = Attempt::matching(&db, &gate.released_predicate())
        .await
        .unwrap();
    let expected = attempts
        .iter()
        .filter(|attempt| gate.is_released(&attempt.snapshot()));

    assert!(!selected.is_empty());
    assert_eq!(ids(&selected), ids(expected));
}

#[tokio::test]
async fn details_predicate_selects_what_students_may_see() {
    let db = common::pool().await;
    let attempts = common::seed_grid(&db, Uuid::new_v4()).await;
    let gate = GradeReleaseGate::new(Arc::new(FixedClock::new(common::now())));

    let selected = Attempt::matching(&db, &gate.details_predicate())
        .await
        .unwrap();
    let expected = attempts
        .iter()
        .filter(|attempt| gate.can_student_see_details(&attempt.snapshot()));

    assert_eq!(ids(&selected), ids(expected));
    assert!(selected.iter().all(|attempt| attempt.submitted_at.is_some()));
}

#[tokio::test]
async fn release_boundary_is_inclusive_in_sql() {
    let db = common::pool().await;
    let attempts = common::seed_grid(&db, Uuid::new_v4()).await;
    let gate = GradeReleaseGate::new(Arc::new(FixedClock::new(common::now())));

    let selected = ids(&Attempt::matching(&db, &gate.released_predicate())
        .await
        .unwrap());

    for attempt in attempts
        .iter()
        .filter(|attempt| attempt.grade_state != GradeState::Released)
    {
        let Some(release_at) = attempt.release_at else {
            assert!(!selected.contains(&attempt.id));
            continue;
        };

        assert_eq!(
            selected.contains(&attempt.id),
            release_at <= common::now(),
            "release_at = {release_at}"
        );
    }
}

#[tokio::test]
async fn visibility_scope_keeps_other_students_out() {
    let db = common::pool().await;
    let student = Uuid::new_v4();
    common::seed_grid(&db, student).await;
    common::seed_grid(&db, Uuid::new_v4()).await;

    let gate = GradeReleaseGate::new(Arc::new(FixedClock::new(common::now())));
    let policy = GradeReleasePolicy::new(gate.clone());

    let released = Attempt::released_for_student(&db, student, &policy)
        .await
        .unwrap();

    let all = Attempt::for_student(&db, student).await.unwrap();

    assert_eq!(all.len(), 48);
    assert!(released.iter().all(|attempt| attempt.user_id == student));
    assert_eq!(
        ids(&released),
        ids(all.iter().filter(|attempt| gate.is_released(&attempt.snapshot())))
    );
}

#[tokio::test]
async fn scheduled_release_opens_without_a_write() {
    let db = common::pool().await;
    let student = Uuid::new_v4();
    let clock = Arc::new(FixedClock::new(common::now()));
    let policy = GradeReleasePolicy::new(GradeReleaseGate::new(clock.clone()));

    let attempt = Attempt {
        id: Uuid::new_v4(),
        assignment_id: Uuid::new_v4(),
        user_id: student,
        grade_state: GradeState::Graded,
        release_at: Some(common::now() + Duration::hours(1)),
        submitted_at: Some(common::now() - Duration::hours(5)),
        points_achieved: Some(8),
        points_maximum: Some(10),
    };
    attempt.insert(&db).await.unwrap();

    let before = Attempt::released_for_student(&db, student, &policy)
        .await
        .unwrap();
    assert!(before.is_empty());

    clock.set(common::now() + Duration::hours(1));

    let after = Attempt::released_for_student(&db, student, &policy)
        .await
        .unwrap();
    assert_eq!(after, vec![attempt.clone()]);

    let stored = Attempt::find(&db, attempt.id).await.unwrap().unwrap();
    assert_eq!(stored.grade_state, GradeState::Graded);
}

#[tokio::test]
async fn unknown_grade_state_fails_to_decode() {
    let db = common::pool().await;
    let id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO attempts (id, assignment_id, user_id, grade_state) VALUES (?, ?, ?, 'archived')",
    )
    .bind(id)
    .bind(Uuid::new_v4())
    .bind(Uuid::new_v4())
    .execute(&db)
    .await
    .unwrap();

    assert!(Attempt::find(&db, id).await.is_err());
}

#[tokio::test]
async fn grading_writes_report_missing_attempts() {
    let db = common::pool().await;
    let missing = Uuid::new_v4();

    assert!(
        !Attempt::record_grade(&db, missing, GradeState::Released, None)
            .await
            .unwrap()
    );
    assert!(
        !Attempt::schedule_release(&db, missing, Some(common::now()))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn grading_without_points_keeps_the_stored_score() {
    let db = common::pool().await;
    let attempt = Attempt {
        id: Uuid::new_v4(),
        assignment_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        grade_state: GradeState::Graded,
        release_at: None,
        submitted_at: Some(common::now()),
        points_achieved: Some(6),
        points_maximum: Some(10),
    };
    attempt.insert(&db).await.unwrap();

    assert!(
        Attempt::record_grade(&db, attempt.id, GradeState::Released, None)
            .await
            .unwrap()
    );

    let stored = Attempt::find(&db, attempt.id).await.unwrap().unwrap();
    assert_eq!(stored.grade_state, GradeState::Released);
    assert_eq!(stored.points(), attempt.points());
}
