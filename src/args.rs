use clap::Parser;

#[derive(Clone, Debug, Parser)]
pub struct GradegateArgs {
    /// SQLite connection string
    #[clap(long, env = "GRADEGATE_DATABASE_URL", default_value = "sqlite:gradegate.db")]
    pub database_url: String,

    /// Port
    #[clap(long, env = "GRADEGATE_PORT")]
    pub port: u16,

    /// Tracing filter directives
    #[clap(long, env = "GRADEGATE_LOG", default_value = "gradegate=info")]
    pub log_filter: String,
}
