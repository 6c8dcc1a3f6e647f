use sqlx::{QueryBuilder, Sqlite};

use crate::{models::AttemptSnapshot, release::GradeReleaseGate};

/// Named capabilities over [`GradeReleaseGate`] for the student-facing
/// permission check and for scoped attempt listings.
#[derive(Clone, Debug)]
pub struct GradeReleasePolicy {
    gate: GradeReleaseGate,
}

impl GradeReleasePolicy {
    #[must_use]
    pub const fn new(gate: GradeReleaseGate) -> Self {
        Self { gate }
    }

    #[must_use]
    pub fn can_student_see_grades(&self, attempt: &AttemptSnapshot) -> bool {
        self.gate.can_student_see_details(attempt)
    }

    pub fn apply_visibility_scope(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        let predicate = self.gate.released_predicate();
        tracing::debug!(%predicate, "applying grade visibility scope");
        predicate.and_where(builder);
    }
}
