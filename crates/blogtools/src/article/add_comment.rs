use crate::prelude::{println, *};
use blogtools_core::article::ArticleInfo;
use colored::Colorize;

use super::{extract_article_name, post_article_action};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct CommentOptions {
    /// Article name (slug) or URL
    #[clap(env = "BLOG_ARTICLE")]
    pub article: String,

    /// Name to sign the comment with
    #[arg(short, long, env = "BLOG_AUTHOR")]
    pub author: String,

    /// Comment text
    #[arg(short, long)]
    pub text: String,

    /// Output the updated article as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: CommentOptions, global: crate::Global) -> Result<()> {
    let name = extract_article_name(&options.article)?;

    if options.text.trim().is_empty() {
        return Err(eyre!("Refusing to post an empty comment"));
    }

    if global.verbose {
        println!("Posting comment on article: {}", name);
    }

    let info = add_comment_data(&global.api_url, &name, &options.author, &options.text).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print!("{}", format_comment_result(&name, &info, &options.author));
    }

    Ok(())
}

/// Posts a comment and returns the updated article payload
pub async fn add_comment_data(
    api_url: &str,
    name: &str,
    author: &str,
    text: &str,
) -> Result<ArticleInfo> {
    let client = reqwest::Client::new();
    post_article_action(
        &client,
        api_url,
        name,
        "add-comment",
        Some(serde_json::json!({ "postedBy": author, "text": text })),
    )
    .await
}

fn format_comment_result(name: &str, info: &ArticleInfo, author: &str) -> String {
    let mut result = String::new();

    result.push_str(&format!(
        "\n{} {} {} {}\n",
        "Comment posted on".green(),
        info.article.title.white().bold(),
        "by".green(),
        author.bright_white()
    ));
    result.push_str(&format!(
        "{}: {}\n",
        "Comments".green(),
        info.comments.len().to_string().bright_magenta()
    ));

    result.push_str(&format!(
        "\n{}: {}\n",
        "To read the article".bright_white().bold(),
        format!("blogtools article read {name}").cyan()
    ));

    result
}
