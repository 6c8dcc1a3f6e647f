use std::{fmt, sync::Arc};

use chrono::NaiveDateTime;

use crate::{
    clock::{Clock, SystemClock},
    models::{AttemptSnapshot, GradeState},
    release::predicate::{Predicate, TimestampColumn},
};

/// Decides whether an attempt's grades are released to its student.
///
/// An attempt is released when its grade state is `released`, or when a
/// scheduled `release_at` has been reached. The second case is derived from
/// the clock on every call and never written back to the attempt.
///
/// Each decision reads the clock exactly once.
#[derive(Clone)]
pub struct GradeReleaseGate {
    clock: Arc<dyn Clock>,
}

impl GradeReleaseGate {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    #[must_use]
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    #[must_use]
    pub fn is_released(&self, attempt: &AttemptSnapshot) -> bool {
        Self::is_released_at(attempt, self.clock.now())
    }

    #[must_use]
    pub fn is_released_at(attempt: &AttemptSnapshot, now: NaiveDateTime) -> bool {
        if attempt.grade_state == GradeState::Released {
            return true;
        }

        attempt.release_at.is_some_and(|release_at| release_at <= now)
    }

    /// Released and actually submitted; an unsubmitted attempt has nothing
    /// to reveal.
    #[must_use]
    pub fn can_student_see_details(&self, attempt: &AttemptSnapshot) -> bool {
        Self::can_student_see_details_at(attempt, self.clock.now())
    }

    #[must_use]
    pub fn can_student_see_details_at(attempt: &AttemptSnapshot, now: NaiveDateTime) -> bool {
        Self::is_released_at(attempt, now) && attempt.submitted_at.is_some()
    }

    /// The query form of [`Self::is_released`].
    #[must_use]
    pub fn released_predicate(&self) -> Predicate {
        Self::released_predicate_at(self.clock.now())
    }

    #[must_use]
    pub fn released_predicate_at(now: NaiveDateTime) -> Predicate {
        Predicate::GradeStateIs(GradeState::Released).or(Predicate::IsSet(
            TimestampColumn::ReleaseAt,
        )
        .and(Predicate::NotAfter(TimestampColumn::ReleaseAt, now)))
    }

    /// The query form of [`Self::can_student_see_details`], for bulk
    /// selections that must only return attempts whose details a student may
    /// read. Compose it with [`Predicate::and_where`] or hand it to
    /// [`crate::models::Attempt::matching`].
    #[must_use]
    pub fn details_predicate(&self) -> Predicate {
        Self::released_predicate_at(self.clock.now())
            .and(Predicate::IsSet(TimestampColumn::SubmittedAt))
    }
}

impl fmt::Debug for GradeReleaseGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GradeReleaseGate").finish_non_exhaustive()
    }
}
