#![deny(
    clippy::expect_used,
    clippy::future_not_send,
    clippy::pedantic,
    clippy::as_conversions,
    clippy::unwrap_used,
    unsafe_code
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::manual_non_exhaustive,
    clippy::multiple_crate_versions
)]

use std::io;

use clap::Parser;
use gradegate::{GradegateArgs, server};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), io::Error> {
    // A missing .env is fine; the environment and flags still apply.
    dotenvy::dotenv().ok();

    let args = GradegateArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log_filter).map_err(io::Error::other)?)
        .init();

    let listener = TcpListener::bind(format!("127.0.0.1:{}", args.port)).await?;

    let app = server(&args).await?;

    tracing::info!(port = args.port, "listening");

    axum::serve(listener, app).await
}
