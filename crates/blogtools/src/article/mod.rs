use crate::prelude::{println, *};
use blogtools_core::article::{Article, ArticleInfo, TagFilterResponse};
use blogtools_core::tag::Tag;
use regex::Regex;

pub mod add_comment;
pub mod like_article;
pub mod list_articles;
pub mod read_article;
pub mod tags;

// Re-export public data functions
pub use list_articles::list_articles_data;
pub use read_article::read_article_data;

#[derive(Debug, clap::Parser)]
#[command(name = "article")]
#[command(about = "Blog article operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List articles with search, sort, and tag filtering
    #[clap(name = "list")]
    List(list_articles::ListOptions),

    /// Read an article and its comments
    #[clap(name = "read")]
    Read(read_article::ReadOptions),

    /// Post a comment on an article
    #[clap(name = "comment")]
    Comment(add_comment::CommentOptions),

    /// Like an article
    #[clap(name = "like")]
    Like(like_article::LikeOptions),

    /// Show the tag catalog
    #[clap(name = "tags")]
    Tags(tags::TagsOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Blog API Base: {}", global.api_url);
        println!();
    }

    match app.command {
        Commands::List(options) => list_articles::run(options, global).await,
        Commands::Read(options) => read_article::run(options, global).await,
        Commands::Comment(options) => add_comment::run(options, global).await,
        Commands::Like(options) => like_article::run(options, global).await,
        Commands::Tags(options) => tags::run(options, global).await,
    }
}

// Shared utility functions
pub fn extract_article_name(input: &str) -> Result<String> {
    // Try to extract from a web URL first
    let re = Regex::new(r"/article/([^/?#]+)").unwrap();
    if let Some(caps) = re.captures(input) {
        if let Some(name_match) = caps.get(1) {
            return Ok(name_match.as_str().to_string());
        }
    }

    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.contains('/') {
        return Err(eyre!("Invalid article name or URL: {}", input));
    }

    Ok(trimmed.to_string())
}

pub async fn fetch_all_articles(
    client: &reqwest::Client,
    api_url: &str,
) -> Result<Vec<Article>> {
    let url = format!("{api_url}/api/article/getallarticle");
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| eyre!("Failed to fetch articles: {}", e))?;

    if !response.status().is_success() {
        return Err(eyre!(
            "Failed to fetch articles: HTTP {}",
            response.status()
        ));
    }

    let articles: Vec<Article> = response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse article list: {}", e))?;

    Ok(articles)
}

/// Server-side tag filter. A `success: false` response is the empty set,
/// not an error.
pub async fn fetch_articles_by_tag(
    client: &reqwest::Client,
    api_url: &str,
    tag: Tag,
) -> Result<Vec<Article>> {
    let url = format!("{api_url}/api/article/getarticlebytag");
    let response = client
        .post(&url)
        .json(&serde_json::json!({ "tag": tag.wire_value() }))
        .send()
        .await
        .map_err(|e| eyre!("Failed to fetch articles for tag {}: {}", tag, e))?;

    if !response.status().is_success() {
        return Err(eyre!(
            "Failed to fetch articles for tag {}: HTTP {}",
            tag,
            response.status()
        ));
    }

    let body: TagFilterResponse = response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse tag filter response: {}", e))?;

    if body.success {
        Ok(body.articles)
    } else {
        Ok(Vec::new())
    }
}

pub async fn fetch_article_info(
    client: &reqwest::Client,
    api_url: &str,
    name: &str,
) -> Result<ArticleInfo> {
    let url = format!("{api_url}/api/articles/{}", urlencoding::encode(name));
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| eyre!("Failed to fetch article {}: {}", name, e))?;

    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(eyre!(Error::ArticleNotFound(name.to_string())));
    }

    if !response.status().is_success() {
        return Err(eyre!(
            "Failed to fetch article {}: HTTP {}",
            name,
            response.status()
        ));
    }

    let info: ArticleInfo = response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse article {}: {}", name, e))?;

    Ok(info)
}

/// POST to one of the per-article mutation endpoints (`add-comment`,
/// `upvote`) and return the updated detail payload.
pub async fn post_article_action(
    client: &reqwest::Client,
    api_url: &str,
    name: &str,
    action: &str,
    body: Option<serde_json::Value>,
) -> Result<ArticleInfo> {
    let url = format!(
        "{api_url}/api/articles/{}/{action}",
        urlencoding::encode(name)
    );

    let mut request = client.post(&url);
    if let Some(body) = body {
        request = request.json(&body);
    }

    let response = request
        .send()
        .await
        .map_err(|e| eyre!("Failed to {} article {}: {}", action, name, e))?;

    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(eyre!(Error::ArticleNotFound(name.to_string())));
    }

    if !response.status().is_success() {
        return Err(eyre!(
            "Failed to {} article {}: HTTP {}",
            action,
            name,
            response.status()
        ));
    }

    let info: ArticleInfo = response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse article {}: {}", name, e))?;

    Ok(info)
}

pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        text.to_string()
    } else {
        format!("{}...", &text[..max_len])
    }
}
