use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Characters of content shown on a list card, mirroring the three-line
/// clamp of the web client
pub const LIST_EXCERPT_CHARS: usize = 200;

/// Article record from the API
///
/// Everything except `title` may be absent in server data; `name` is the
/// URL slug the detail endpoints key on.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Article {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub likes: Option<u64>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

/// Comment from the detail endpoint; flat, no nested replies
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Comment {
    #[serde(rename = "postedBy", default)]
    pub posted_by: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Detail endpoint payload: an article plus its comment list
///
/// Older deployments report the like count as `upvotes` on the payload
/// instead of `likes` on the article; both are tolerated.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ArticleInfo {
    #[serde(flatten)]
    pub article: Article,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub upvotes: Option<u64>,
}

impl ArticleInfo {
    pub fn like_count(&self) -> u64 {
        self.article.likes.or(self.upvotes).unwrap_or(0)
    }
}

/// Response of the tag filter endpoint
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TagFilterResponse {
    pub success: bool,
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Individual list item output
#[derive(Debug, Serialize, Clone)]
pub struct ListItem {
    pub name: Option<String>,
    pub title: String,
    pub tag: Option<String>,
    pub excerpt: Option<String>,
    pub likes: Option<u64>,
    pub time: Option<String>,
    pub thumbnail: Option<String>,
}

/// Pagination metadata for list output
#[derive(Debug, Serialize, Clone)]
pub struct ListPaginationInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub limit: usize,
    pub next_page_command: Option<String>,
    pub prev_page_command: Option<String>,
}

/// Complete list output with items and pagination
#[derive(Debug, Serialize, Clone)]
pub struct ListOutput {
    pub sort_key: String,
    pub tag: Option<String>,
    pub items: Vec<ListItem>,
    pub pagination: ListPaginationInfo,
}

/// Detail view output with comments and pagination
#[derive(Debug, Serialize, Clone)]
pub struct ArticleOutput {
    pub name: String,
    pub title: String,
    pub tag: Option<String>,
    pub likes: u64,
    pub time: Option<String>,
    pub content: Option<String>,
    pub total_comments: usize,
    pub comments: Vec<CommentOutput>,
    pub other_articles: Vec<OtherArticle>,
    pub pagination: PaginationInfo,
}

/// Individual comment output
#[derive(Debug, Serialize, Clone)]
pub struct CommentOutput {
    pub author: Option<String>,
    pub text: Option<String>,
}

/// Entry in the "other articles" strip of the detail view
#[derive(Debug, Serialize, Clone)]
pub struct OtherArticle {
    pub name: String,
    pub title: String,
    pub tag: Option<String>,
}

/// Pagination metadata for the detail view's comment list
#[derive(Debug, Serialize, Clone)]
pub struct PaginationInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_comments: usize,
    pub limit: usize,
    pub next_page_command: Option<String>,
    pub prev_page_command: Option<String>,
}

/// Convert an RFC 3339 timestamp to a formatted string
pub fn format_timestamp(timestamp: Option<&str>) -> Option<String> {
    timestamp.and_then(|ts| {
        let dt = DateTime::parse_from_rfc3339(ts).ok()?;
        Some(
            dt.with_timezone(&Utc)
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
        )
    })
}

/// Millisecond instant of an RFC 3339 timestamp, for ordering
///
/// Absent or unparseable timestamps sort as the oldest possible instant.
pub fn timestamp_millis(timestamp: Option<&str>) -> i64 {
    timestamp
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
        .map(|dt| dt.with_timezone(&Utc).timestamp_millis())
        .unwrap_or(i64::MIN)
}

/// Build a short plain-text excerpt from article content
///
/// Replaces markdown links with their text, drops decoration characters,
/// collapses whitespace, and truncates on a character boundary.
pub fn excerpt(content: &str, max_chars: usize) -> String {
    let link_re = Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap();
    let linked = link_re.replace_all(content, "$1");
    let decoration_re = Regex::new(r"[#>*_`]+").unwrap();
    let cleaned = decoration_re.replace_all(&linked, "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let truncated: String = collapsed.chars().take(max_chars).collect();
        format!("{}...", truncated.trim_end())
    }
}

/// Calculate pagination bounds for a given page
///
/// Returns (start_index, end_index) for slicing the items array.
/// Returns an error if the page is out of range or if there are no items.
pub fn calculate_pagination(
    total_items: usize,
    page: usize,
    limit: usize,
) -> Result<(usize, usize), String> {
    if total_items == 0 {
        return Err("No items available for pagination".to_string());
    }

    let start = (page - 1) * limit;

    if start >= total_items {
        let total_pages = total_items.div_ceil(limit);
        return Err(format!(
            "Page {page} is out of range. Only {total_pages} pages available."
        ));
    }

    let end = (start + limit).min(total_items);
    Ok((start, end))
}

fn list_command(page: usize, sort_key: &str, tag: Option<&str>) -> String {
    let mut cmd = String::from("blogtools article list");
    if sort_key != "newest" {
        cmd.push_str(&format!(" --sort {sort_key}"));
    }
    if let Some(tag) = tag {
        cmd.push_str(&format!(" --tag {tag}"));
    }
    cmd.push_str(&format!(" --page {page}"));
    cmd
}

/// Transform an already filtered and sorted article page into list output
///
/// Takes the page slice of articles and constructs a complete ListOutput
/// with excerpts, formatted timestamps, pagination metadata, and
/// navigation commands.
pub fn transform_articles(
    articles: Vec<Article>,
    sort_key: String,
    tag: Option<String>,
    page: usize,
    limit: usize,
    total_items: usize,
) -> ListOutput {
    let items: Vec<ListItem> = articles
        .iter()
        .map(|article| ListItem {
            name: article.name.clone(),
            title: article.title.clone(),
            tag: article.tag.clone(),
            excerpt: article
                .content
                .as_deref()
                .map(|c| excerpt(c, LIST_EXCERPT_CHARS)),
            likes: article.likes,
            time: format_timestamp(article.created_at.as_deref()),
            thumbnail: article.thumbnail.clone(),
        })
        .collect();

    let total_pages = total_items.div_ceil(limit);

    let next_page = if page < total_pages {
        Some(list_command(page + 1, &sort_key, tag.as_deref()))
    } else {
        None
    };

    let prev_page = if page > 1 {
        Some(list_command(page - 1, &sort_key, tag.as_deref()))
    } else {
        None
    };

    ListOutput {
        sort_key,
        tag,
        items,
        pagination: ListPaginationInfo {
            current_page: page,
            total_pages,
            total_items,
            limit,
            next_page_command: next_page,
            prev_page_command: prev_page,
        },
    }
}

/// Transform comments to comment outputs
pub fn transform_comments(comments: Vec<Comment>) -> Vec<CommentOutput> {
    comments
        .iter()
        .map(|c| CommentOutput {
            author: c.posted_by.clone(),
            text: c.text.clone(),
        })
        .collect()
}

/// Build the "other articles" strip: everything except the current slug
///
/// Articles without a slug are dropped since there is no way to navigate
/// to them.
pub fn other_articles(all: Vec<Article>, current: &str) -> Vec<OtherArticle> {
    all.into_iter()
        .filter_map(|article| {
            let name = article.name?;
            if name == current {
                return None;
            }
            Some(OtherArticle {
                name,
                title: article.title,
                tag: article.tag,
            })
        })
        .collect()
}

/// Build detail view output with pagination metadata
///
/// Constructs a complete article output including the article details,
/// the current comment page, the other-articles strip, and pagination
/// information with navigation commands.
pub fn build_article_output(
    name: &str,
    info: ArticleInfo,
    comments: Vec<CommentOutput>,
    others: Vec<OtherArticle>,
    page: usize,
    limit: usize,
    total_comments: usize,
) -> ArticleOutput {
    let total_pages = total_comments.div_ceil(limit);

    let next_page = if page < total_pages {
        Some(format!(
            "blogtools article read {} --page {}",
            name,
            page + 1
        ))
    } else {
        None
    };

    let prev_page = if page > 1 {
        Some(format!(
            "blogtools article read {} --page {}",
            name,
            page - 1
        ))
    } else {
        None
    };

    let likes = info.like_count();

    ArticleOutput {
        name: name.to_string(),
        title: info.article.title.clone(),
        tag: info.article.tag.clone(),
        likes,
        time: format_timestamp(info.article.created_at.as_deref()),
        content: info.article.content.clone(),
        total_comments,
        comments,
        other_articles: others,
        pagination: PaginationInfo {
            current_page: page,
            total_pages,
            total_comments,
            limit,
            next_page_command: next_page,
            prev_page_command: prev_page,
        },
    }
}
