use crate::prelude::{println, *};
use blogtools_core::article::{
    build_article_output, calculate_pagination, other_articles, transform_comments, ArticleOutput,
};
use colored::Colorize;

use super::{extract_article_name, fetch_all_articles, fetch_article_info, truncate_text};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ReadOptions {
    /// Article name (slug) or URL (e.g., "learn-react" or "https://blog.example.com/article/learn-react")
    #[clap(env = "BLOG_ARTICLE")]
    pub article: String,

    /// Number of comments per page
    #[arg(short, long, env = "BLOG_LIMIT", default_value = "10")]
    pub limit: usize,

    /// Page number for comments (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ReadOptions, global: crate::Global) -> Result<()> {
    let name = extract_article_name(&options.article)?;

    if global.verbose {
        println!("Fetching article: {}", name);
    }

    let output = read_article_data(&global.api_url, &name, options.limit, options.page).await?;

    if options.json {
        output_json(&output)?;
    } else {
        output_formatted(&output, &options)?;
    }

    Ok(())
}

/// Fetches an article with its comments and returns a structured ArticleOutput
///
/// The detail payload and the other-articles strip come from independent
/// endpoints and are fetched concurrently. The strip is decoration; a
/// failed list fetch does not sink the read.
pub async fn read_article_data(
    api_url: &str,
    name: &str,
    limit: usize,
    page: usize,
) -> Result<ArticleOutput> {
    let client = reqwest::Client::new();

    let (info, all) = futures::join!(
        fetch_article_info(&client, api_url, name),
        fetch_all_articles(&client, api_url)
    );
    let info = info?;
    let others = other_articles(all.unwrap_or_default(), name);

    let total_comments = info.comments.len();
    let page_comments = if total_comments == 0 {
        Vec::new()
    } else {
        let (start, end) =
            calculate_pagination(total_comments, page, limit).map_err(|e| eyre!("{}", e))?;
        info.comments[start..end].to_vec()
    };

    Ok(build_article_output(
        name,
        info,
        transform_comments(page_comments),
        others,
        page,
        limit,
        total_comments,
    ))
}

/// Convert article output to JSON string
fn format_article_json(output: &ArticleOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Build formatted text output for the detail view
fn format_article_text(output: &ArticleOutput, options: &ReadOptions) -> String {
    let mut result = String::new();
    let pagination = &output.pagination;

    // Article header
    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}: {}\n",
        "ARTICLE".bright_cyan().bold(),
        output.title.white().bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    result.push_str(&format!(
        "{}: {}\n",
        "Tag".green(),
        output
            .tag
            .as_ref()
            .unwrap_or(&"Uncategorized".to_string())
            .bright_white()
    ));
    result.push_str(&format!(
        "{}: {}\n",
        "Likes".green(),
        output.likes.to_string().bright_yellow()
    ));
    result.push_str(&format!(
        "{}: {}\n",
        "Time".green(),
        output
            .time
            .as_ref()
            .unwrap_or(&"(unknown)".to_string())
            .bright_black()
    ));
    result.push_str(&format!(
        "{}: {}\n",
        "Name".green(),
        output.name.bright_white()
    ));

    if let Some(content) = &output.content {
        result.push_str(&format!("\n{}\n", content.bright_white()));
    }

    // Comments section
    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_magenta()));
    result.push_str(&format!(
        "{} ({} {} {} {})\n",
        "COMMENTS".bright_magenta().bold(),
        "Page".bright_white(),
        pagination.current_page.to_string().bright_cyan().bold(),
        "of".bright_white(),
        pagination.total_pages.to_string().bright_cyan().bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_magenta()));

    if output.comments.is_empty() {
        result.push_str(&format!("\n{}\n", "No comments on this page.".yellow()));
    } else {
        for (idx, comment) in output.comments.iter().enumerate() {
            let comment_num = (pagination.current_page - 1) * pagination.limit + idx + 1;
            result.push_str(&format!(
                "\n{} {} {}\n",
                format!("[Comment #{comment_num}]").yellow().bold(),
                "by".bright_black(),
                comment
                    .author
                    .as_ref()
                    .unwrap_or(&"(anonymous)".to_string())
                    .bright_white()
            ));

            if let Some(text) = &comment.text {
                let truncated = truncate_text(text, 500);
                result.push_str(&format!("{}\n", truncated.white()));
            }
        }
    }

    // Other articles strip
    if !output.other_articles.is_empty() {
        result.push_str(&format!("\n{}\n", "=".repeat(80).bright_blue()));
        result.push_str(&format!("{}\n", "OTHER ARTICLES".bright_blue().bold()));
        result.push_str(&format!("{}\n", "=".repeat(80).bright_blue()));

        for other in &output.other_articles {
            result.push_str(&format!(
                "\n  {} ({})\n",
                other.title.white().bold(),
                other
                    .tag
                    .as_ref()
                    .unwrap_or(&"Uncategorized".to_string())
                    .bright_white()
            ));
            result.push_str(&format!(
                "    {}: {}\n",
                "Read".green(),
                format!("blogtools article read {}", other.name).cyan()
            ));
        }
    }

    // Navigation section
    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&format!("{}\n", "NAVIGATION".bright_yellow().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_yellow()));

    result.push_str(&format!(
        "\n{} {} {} {} ({} {})\n",
        "Showing page".bright_white(),
        pagination.current_page.to_string().bright_cyan().bold(),
        "of".bright_white(),
        pagination.total_pages.to_string().bright_cyan().bold(),
        pagination.total_comments.to_string().bright_cyan().bold(),
        "total comments".bright_white()
    ));

    result.push_str(&format!(
        "\n{}:\n",
        "To view more comments".bright_white().bold()
    ));
    if let Some(next) = &pagination.next_page_command {
        result.push_str(&format!("  {}: {}\n", "Next page".green(), next.cyan()));
    }
    if let Some(prev) = &pagination.prev_page_command {
        result.push_str(&format!("  {}: {}\n", "Previous page".green(), prev.cyan()));
    }
    if pagination.current_page == pagination.total_pages && pagination.current_page > 1 {
        result.push_str(&format!(
            "  {}: {}\n",
            "First page".green(),
            format!("blogtools article read {} --page 1", output.name).cyan()
        ));
    }

    result.push_str(&format!(
        "\n{}:\n",
        "To post a comment".bright_white().bold()
    ));
    result.push_str(&format!(
        "  {}\n",
        format!(
            "blogtools article comment {} --author <you> --text <comment>",
            output.name
        )
        .cyan()
    ));

    result.push_str(&format!(
        "\n{}:\n",
        "To like this article".bright_white().bold()
    ));
    result.push_str(&format!(
        "  {}\n",
        format!("blogtools article like {}", output.name).cyan()
    ));

    result.push_str(&format!(
        "\n{}:\n",
        "To change page size".bright_white().bold()
    ));
    result.push_str(&format!(
        "  {}\n",
        format!("blogtools article read {} --limit <number>", output.name).cyan()
    ));

    result.push_str(&format!(
        "\n{}:\n",
        "To get JSON output".bright_white().bold()
    ));
    result.push_str(&format!(
        "  {}\n",
        format!("blogtools article read {} --json", output.name).cyan()
    ));

    result.push('\n');
    result
}

fn output_json(output: &ArticleOutput) -> Result<()> {
    let json = format_article_json(output)?;
    println!("{}", json);
    Ok(())
}

fn output_formatted(output: &ArticleOutput, options: &ReadOptions) -> Result<()> {
    let formatted = format_article_text(output, options);
    print!("{}", formatted);
    Ok(())
}
