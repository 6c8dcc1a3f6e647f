#![deny(
    clippy::as_conversions,
    clippy::expect_used,
    clippy::future_not_send,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::pedantic,
    clippy::string_slice,
    clippy::todo,
    clippy::unwrap_used,
    unsafe_code
)]
#![allow(
    clippy::manual_non_exhaustive,
    clippy::missing_errors_doc,
    clippy::module_inception,
    clippy::module_name_repetitions,
    clippy::needless_return,
    clippy::single_match_else,
    clippy::multiple_crate_versions
)]

use std::{io, str::FromStr};

use axum::Router;
use sqlx::{
    SqlitePool,
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::release::{GradeReleaseGate, GradeReleasePolicy};

pub use args::GradegateArgs;
pub use points::Points;
pub use state::GradegateState;

mod args;
pub mod clock;
mod error;
pub mod models;
mod points;
pub mod release;
mod routes;
mod state;

pub async fn server(args: &GradegateArgs) -> Result<Router, io::Error> {
    let options = SqliteConnectOptions::from_str(&args.database_url)
        .map_err(io::Error::other)?
        .create_if_missing(true);

    let db_pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .map_err(io::Error::other)?;

    migrate(&db_pool).await.map_err(io::Error::other)?;

    tracing::info!(database_url = %args.database_url, "database ready");

    let policy = GradeReleasePolicy::new(GradeReleaseGate::system());

    Ok(router(GradegateState { db_pool, policy }))
}

pub async fn migrate(db_pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(db_pool).await
}

pub fn router(state: GradegateState) -> Router {
    Router::new()
        .merge(routes::student::router())
        .merge(routes::grading::router())
        .with_state(state)
}
