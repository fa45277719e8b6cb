use crate::prelude::{println, *};
use blogtools_core::article::ArticleInfo;
use colored::Colorize;

use super::{extract_article_name, post_article_action};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct LikeOptions {
    /// Article name (slug) or URL
    #[clap(env = "BLOG_ARTICLE")]
    pub article: String,

    /// Output the updated article as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: LikeOptions, global: crate::Global) -> Result<()> {
    let name = extract_article_name(&options.article)?;

    if global.verbose {
        println!("Liking article: {}", name);
    }

    let info = like_article_data(&global.api_url, &name).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print!("{}", format_like_result(&name, &info));
    }

    Ok(())
}

/// Upvotes an article and returns the updated payload
pub async fn like_article_data(api_url: &str, name: &str) -> Result<ArticleInfo> {
    let client = reqwest::Client::new();
    post_article_action(&client, api_url, name, "upvote", None).await
}

fn format_like_result(name: &str, info: &ArticleInfo) -> String {
    let mut result = String::new();

    result.push_str(&format!(
        "\n{} {}\n",
        "Liked".green(),
        info.article.title.white().bold()
    ));
    result.push_str(&format!(
        "{}: {}\n",
        "Likes".green(),
        info.like_count().to_string().bright_yellow()
    ));

    result.push_str(&format!(
        "\n{}: {}\n",
        "To read the article".bright_white().bold(),
        format!("blogtools article read {name}").cyan()
    ));

    result
}
