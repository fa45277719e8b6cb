#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod article;
mod error;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Command line client for the blog REST API"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Base URL of the blog API server
    #[clap(
        long,
        env = "BLOG_API_URL",
        global = true,
        default_value = "http://localhost:8080"
    )]
    api_url: String,

    /// Whether to display additional information.
    #[clap(long, env = "BLOG_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Blog article operations
    Article(crate::article::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Article(sub_app) => crate::article::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
