use crate::prelude::{println, *};
use blogtools_core::article::{calculate_pagination, transform_articles, ListOutput};
use blogtools_core::query::{apply_query, SortKey};
use blogtools_core::tag::Tag;
use colored::Colorize;

use super::{fetch_all_articles, fetch_articles_by_tag};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ListOptions {
    /// Case-insensitive search over title and content
    #[arg(short, long, env = "BLOG_SEARCH")]
    pub search: Option<String>,

    /// Sort key: newest, oldest, most-liked, more-than-500-words,
    /// less-than-500-words, more-than-1000-words, less-than-1000-words
    #[arg(long, default_value = "newest")]
    pub sort: String,

    /// Filter by tag on the server (replaces the fetched set)
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Number of articles per page
    #[arg(short, long, env = "BLOG_LIMIT", default_value = "10")]
    pub limit: usize,

    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        match &options.tag {
            Some(tag) => println!("Fetching articles tagged {tag}..."),
            None => println!("Fetching articles..."),
        }
    }

    let list_output = list_articles_data(
        &global.api_url,
        options.search.clone(),
        options.sort.clone(),
        options.tag.clone(),
        options.limit,
        options.page,
    )
    .await?;

    if options.json {
        output_json(&list_output)?;
    } else {
        output_formatted(&list_output, &options)?;
    }

    Ok(())
}

/// Fetches articles and returns the filtered, sorted, paginated ListOutput
pub async fn list_articles_data(
    api_url: &str,
    search: Option<String>,
    sort: String,
    tag: Option<String>,
    limit: usize,
    page: usize,
) -> Result<ListOutput> {
    let sort_key: SortKey = sort.parse().map_err(|e| eyre!("{}", e))?;
    let tag_filter: Option<Tag> = match tag.as_deref() {
        Some(t) => Some(t.parse().map_err(|e| eyre!("{}", e))?),
        None => None,
    };

    let client = reqwest::Client::new();

    // Tag filtering is a server round-trip: the server's filtered set
    // replaces the fetched one wholesale instead of narrowing it locally.
    let articles = match tag_filter {
        Some(tag) => fetch_articles_by_tag(&client, api_url, tag).await?,
        None => fetch_all_articles(&client, api_url).await?,
    };

    let filtered = apply_query(articles, search.as_deref(), sort_key);
    let total_items = filtered.len();

    // An empty post-load set is the "No Articles Found" state, not an error.
    let page_slice = if total_items == 0 {
        Vec::new()
    } else {
        let (start, end) =
            calculate_pagination(total_items, page, limit).map_err(|e| eyre!("{}", e))?;
        filtered[start..end].to_vec()
    };

    Ok(transform_articles(
        page_slice,
        sort_key.to_string(),
        tag_filter.map(|t| t.wire_value().to_string()),
        page,
        limit,
        total_items,
    ))
}

/// Convert list output to JSON string
fn format_list_json(output: &ListOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn first_page_command(output: &ListOutput) -> String {
    let mut cmd = String::from("blogtools article list");
    if output.sort_key != "newest" {
        cmd.push_str(&format!(" --sort {}", output.sort_key));
    }
    if let Some(tag) = &output.tag {
        cmd.push_str(&format!(" --tag {tag}"));
    }
    cmd.push_str(" --page 1");
    cmd
}

/// Convert list output to formatted text with colors
fn format_list_text(output: &ListOutput, options: &ListOptions) -> String {
    let mut result = String::new();
    let pagination = &output.pagination;
    let heading = match &output.tag {
        Some(tag) => format!("{} ARTICLES", tag.to_uppercase()),
        None => "ALL ARTICLES".to_string(),
    };

    // Header
    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!(
            "{} (Page {} of {})",
            heading, pagination.current_page, pagination.total_pages
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    result.push_str(&format!(
        "{}: {}",
        "Sorted by".green(),
        output.sort_key.bright_white()
    ));
    if let Some(search) = &options.search {
        result.push_str(&format!(" | {}: {}", "Search".green(), search.bright_white()));
    }
    result.push('\n');

    if output.items.is_empty() {
        result.push_str(&format!("\n{}\n", "No Articles Found".yellow().bold()));
        result.push_str(&format!(
            "{}\n",
            "Check back later or start writing your first article!".bright_black()
        ));
    } else {
        for (idx, item) in output.items.iter().enumerate() {
            let article_num = (pagination.current_page - 1) * pagination.limit + idx + 1;
            result.push_str(&format!(
                "\n{} {}\n",
                format!("[{article_num}]").yellow().bold(),
                item.title.white().bold()
            ));

            result.push_str(&format!(
                "    {}: {} | {}: {} | {}: {}\n",
                "Tag".green(),
                item.tag
                    .as_ref()
                    .unwrap_or(&"Uncategorized".to_string())
                    .bright_white(),
                "Likes".green(),
                item.likes.unwrap_or(0).to_string().bright_yellow(),
                "Time".green(),
                item.time
                    .as_ref()
                    .unwrap_or(&"unknown".to_string())
                    .bright_black()
            ));

            if let Some(excerpt) = &item.excerpt {
                result.push_str(&format!("    {}\n", excerpt.white()));
            }

            if let Some(thumbnail) = &item.thumbnail {
                result.push_str(&format!(
                    "    {}: {}\n",
                    "Thumbnail".green(),
                    thumbnail.cyan().underline()
                ));
            }

            if let Some(name) = &item.name {
                result.push_str(&format!(
                    "    {}: {}\n",
                    "Read".green(),
                    format!("blogtools article read {name}").cyan()
                ));
            }
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
        pagination.total_items.to_string().bright_cyan().bold(),
        "total articles".bright_white()
    ));

    result.push_str(&format!("\n{}:\n", "To navigate".bright_white().bold()));
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
            first_page_command(output).cyan()
        ));
    }

    result.push_str(&format!(
        "\n{}:\n",
        "To change page size".bright_white().bold()
    ));
    result.push_str(&format!(
        "  {}\n",
        "blogtools article list --limit <number>".cyan()
    ));

    result.push_str(&format!(
        "\n{}:\n",
        "To filter by tag".bright_white().bold()
    ));
    result.push_str(&format!(
        "  {}\n",
        "blogtools article list --tag <tag>  (run `blogtools article tags` for the catalog)".cyan()
    ));

    result.push_str(&format!(
        "\n{}:\n",
        "To search and sort".bright_white().bold()
    ));
    result.push_str(&format!(
        "  {}\n",
        "blogtools article list --search <text> --sort <key>".cyan()
    ));

    result.push_str(&format!(
        "\n{}:\n",
        "To read an article".bright_white().bold()
    ));
    result.push_str(&format!("  {}\n", "blogtools article read <name>".cyan()));
    if let Some(first_named) = output.items.iter().find_map(|item| item.name.as_ref()) {
        result.push_str(&format!(
            "  {}: {}\n",
            "Example".green(),
            format!("blogtools article read {first_named}").cyan()
        ));
    }

    result.push_str(&format!(
        "\n{}:\n",
        "To get JSON output".bright_white().bold()
    ));
    result.push_str(&format!(
        "  {}\n",
        "blogtools article list --json".cyan()
    ));

    result.push('\n');
    result
}

fn output_json(output: &ListOutput) -> Result<()> {
    let json = format_list_json(output)?;
    println!("{}", json);
    Ok(())
}

fn output_formatted(output: &ListOutput, options: &ListOptions) -> Result<()> {
    let formatted = format_list_text(output, options);
    print!("{}", formatted);
    Ok(())
}
