use std::fmt;

use chrono::NaiveDateTime;
use sqlx::{QueryBuilder, Sqlite};

use crate::models::{AttemptSnapshot, GradeState};

const GRADE_STATE_COLUMN: &str = "grade_state";
const TIMESTAMP_FORMAT: &str = "%F %T%.f";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampColumn {
    ReleaseAt,
    SubmittedAt,
}

impl TimestampColumn {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ReleaseAt => "release_at",
            Self::SubmittedAt => "submitted_at",
        }
    }

    const fn read(self, attempt: &AttemptSnapshot) -> Option<NaiveDateTime> {
        match self {
            Self::ReleaseAt => attempt.release_at,
            Self::SubmittedAt => attempt.submitted_at,
        }
    }
}

/// A boolean condition over attempts that can be evaluated in memory or
/// appended to a SQL query against the `attempts` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    GradeStateIs(GradeState),
    IsSet(TimestampColumn),
    /// `column <= at`; an unset column never matches.
    NotAfter(TimestampColumn, NaiveDateTime),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn matches(&self, attempt: &AttemptSnapshot) -> bool {
        match self {
            Self::GradeStateIs(state) => attempt.grade_state == *state,
            Self::IsSet(column) => column.read(attempt).is_some(),
            Self::NotAfter(column, at) => column.read(attempt).is_some_and(|value| value <= *at),
            Self::And(left, right) => left.matches(attempt) && right.matches(attempt),
            Self::Or(left, right) => left.matches(attempt) || right.matches(attempt),
        }
    }

    /// Appends the SQL form of the predicate, binding every value.
    pub fn push_sql(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        match self {
            Self::GradeStateIs(state) => {
                builder
                    .push(GRADE_STATE_COLUMN)
                    .push(" = ")
                    .push_bind(*state);
            }
            Self::IsSet(column) => {
                builder.push(column.name()).push(" IS NOT NULL");
            }
            Self::NotAfter(column, at) => {
                builder.push(column.name()).push(" <= ").push_bind(*at);
            }
            Self::And(left, right) => Self::push_pair(builder, left, " AND ", right),
            Self::Or(left, right) => Self::push_pair(builder, left, " OR ", right),
        }
    }

    /// Narrows a query that already has a `WHERE` clause to the rows this
    /// predicate selects.
    pub fn and_where(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        builder.push(" AND (");
        self.push_sql(builder);
        builder.push(")");
    }

    fn push_pair(
        builder: &mut QueryBuilder<'_, Sqlite>,
        left: &Self,
        joiner: &str,
        right: &Self,
    ) {
        builder.push("(");
        left.push_sql(builder);
        builder.push(joiner);
        right.push_sql(builder);
        builder.push(")");
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GradeStateIs(state) => write!(f, "{GRADE_STATE_COLUMN} = '{state}'"),
            Self::IsSet(column) => write!(f, "{} IS NOT NULL", column.name()),
            Self::NotAfter(column, at) => {
                write!(f, "{} <= '{}'", column.name(), at.format(TIMESTAMP_FORMAT))
            }
            Self::And(left, right) => write!(f, "({left} AND {right})"),
            Self::Or(left, right) => write!(f, "({left} OR {right})"),
        }
    }
}
