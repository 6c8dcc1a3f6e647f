use std::fmt;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::release::GradeReleasePolicy;

#[derive(Clone)]
pub struct GradegateState {
    pub db_pool: SqlitePool,
    pub policy: GradeReleasePolicy,
}

impl fmt::Debug for GradegateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GradegateState")
            .field("db_pool", &self.db_pool)
            .field("policy", &self.policy)
            .finish()
    }
}

impl FromRef<GradegateState> for SqlitePool {
    fn from_ref(state: &GradegateState) -> Self {
        state.db_pool.clone()
    }
}
