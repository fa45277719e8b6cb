//! Client-side article query pipeline: substring search composed with one
//! of the sort comparators.
//!
//! Tag filtering is deliberately NOT here; it is a server round-trip (the
//! filtered set replaces the fetched one wholesale). Search and sort apply
//! on top of whatever set the server returned.

use std::cmp::Reverse;

use crate::article::{timestamp_millis, Article};

/// Error type for sort key parsing
#[derive(Debug)]
pub struct ParseSortKeyError(pub String);

impl std::fmt::Display for ParseSortKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid sort key: {}. Valid keys: newest, oldest, most-liked, \
             more-than-500-words, less-than-500-words, more-than-1000-words, \
             less-than-1000-words",
            self.0
        )
    }
}

impl std::error::Error for ParseSortKeyError {}

/// Sort comparator selected by a string key on the list view
///
/// Word-threshold keys order articles meeting the threshold before the
/// rest; within each partition the newest-first order applies. Every key
/// is a total order and sorting is stable, so ties keep fetched order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    MostLiked,
    MoreThanWords(usize),
    LessThanWords(usize),
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Newest => f.write_str("newest"),
            SortKey::Oldest => f.write_str("oldest"),
            SortKey::MostLiked => f.write_str("most-liked"),
            SortKey::MoreThanWords(n) => write!(f, "more-than-{n}-words"),
            SortKey::LessThanWords(n) => write!(f, "less-than-{n}-words"),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            "most-liked" => Ok(SortKey::MostLiked),
            "more-than-500-words" => Ok(SortKey::MoreThanWords(500)),
            "less-than-500-words" => Ok(SortKey::LessThanWords(500)),
            "more-than-1000-words" => Ok(SortKey::MoreThanWords(1000)),
            "less-than-1000-words" => Ok(SortKey::LessThanWords(1000)),
            _ => Err(ParseSortKeyError(s.to_string())),
        }
    }
}

/// Whitespace-separated token count of the article content
pub fn word_count(article: &Article) -> usize {
    article
        .content
        .as_deref()
        .map(|c| c.split_whitespace().count())
        .unwrap_or(0)
}

/// Case-insensitive substring filter on title or content
pub fn filter_articles(articles: Vec<Article>, search: &str) -> Vec<Article> {
    let query = search.to_lowercase();
    articles
        .into_iter()
        .filter(|article| {
            article.title.to_lowercase().contains(&query)
                || article
                    .content
                    .as_deref()
                    .map(|c| c.to_lowercase().contains(&query))
                    .unwrap_or(false)
        })
        .collect()
}

/// Stable sort by the selected comparator
pub fn sort_articles(mut articles: Vec<Article>, key: SortKey) -> Vec<Article> {
    match key {
        SortKey::Newest => {
            articles.sort_by_key(|a| Reverse(timestamp_millis(a.created_at.as_deref())));
        }
        SortKey::Oldest => {
            articles.sort_by_key(|a| timestamp_millis(a.created_at.as_deref()));
        }
        SortKey::MostLiked => {
            articles.sort_by_key(|a| Reverse(a.likes.unwrap_or(0)));
        }
        SortKey::MoreThanWords(n) => {
            articles.sort_by_key(|a| {
                (
                    word_count(a) <= n,
                    Reverse(timestamp_millis(a.created_at.as_deref())),
                )
            });
        }
        SortKey::LessThanWords(n) => {
            articles.sort_by_key(|a| {
                (
                    word_count(a) >= n,
                    Reverse(timestamp_millis(a.created_at.as_deref())),
                )
            });
        }
    }
    articles
}

/// Compose search filtering and sorting
///
/// An absent or blank search term skips the filter pass entirely.
pub fn apply_query(articles: Vec<Article>, search: Option<&str>, key: SortKey) -> Vec<Article> {
    let filtered = match search {
        Some(q) if !q.trim().is_empty() => filter_articles(articles, q),
        _ => articles,
    };
    sort_articles(filtered, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(name: &str, title: &str, content: &str, likes: u64, created_at: &str) -> Article {
        Article {
            id: None,
            name: Some(name.to_string()),
            title: title.to_string(),
            content: Some(content.to_string()),
            tag: None,
            thumbnail: None,
            likes: Some(likes),
            created_at: Some(created_at.to_string()),
        }
    }

    fn names(articles: &[Article]) -> Vec<&str> {
        articles
            .iter()
            .map(|a| a.name.as_deref().unwrap())
            .collect()
    }

    fn fixture_set() -> Vec<Article> {
        vec![
            article("mid", "Middle Post", "short body", 5, "2021-06-01T00:00:00Z"),
            article("old", "Old Post", "ancient words", 10, "2020-01-01T00:00:00Z"),
            article("new", "New Post", "fresh words", 1, "2022-01-01T00:00:00Z"),
        ]
    }

    #[test]
    fn test_filter_matches_title_case_insensitive() {
        let result = filter_articles(fixture_set(), "MIDDLE");
        assert_eq!(names(&result), vec!["mid"]);
    }

    #[test]
    fn test_filter_matches_content_case_insensitive() {
        let result = filter_articles(fixture_set(), "ANCIENT");
        assert_eq!(names(&result), vec!["old"]);
    }

    #[test]
    fn test_filter_no_match_is_empty() {
        let result = filter_articles(fixture_set(), "zebra");
        assert!(result.is_empty());
    }

    #[test]
    fn test_filter_skips_missing_content() {
        let mut bare = article("bare", "Bare", "", 0, "2021-01-01T00:00:00Z");
        bare.content = None;
        let result = filter_articles(vec![bare], "anything");
        assert!(result.is_empty());
    }

    #[test]
    fn test_apply_query_blank_search_keeps_all() {
        let result = apply_query(fixture_set(), Some("   "), SortKey::Newest);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_sort_newest() {
        let result = sort_articles(fixture_set(), SortKey::Newest);
        assert_eq!(names(&result), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_sort_oldest_non_decreasing() {
        let result = sort_articles(fixture_set(), SortKey::Oldest);
        assert_eq!(names(&result), vec!["old", "mid", "new"]);

        let times: Vec<i64> = result
            .iter()
            .map(|a| timestamp_millis(a.created_at.as_deref()))
            .collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_sort_most_liked() {
        let result = sort_articles(fixture_set(), SortKey::MostLiked);
        assert_eq!(names(&result), vec!["old", "mid", "new"]);
    }

    #[test]
    fn test_sort_most_liked_missing_counts_as_zero() {
        let mut unliked = article("none", "None", "x", 0, "2023-01-01T00:00:00Z");
        unliked.likes = None;
        let mut set = fixture_set();
        set.push(unliked);

        let result = sort_articles(set, SortKey::MostLiked);
        assert_eq!(names(&result), vec!["old", "mid", "new", "none"]);
    }

    #[test]
    fn test_sort_missing_timestamp_goes_last_on_newest() {
        let mut undated = article("undated", "Undated", "x", 0, "");
        undated.created_at = None;
        let mut set = fixture_set();
        set.insert(0, undated);

        let result = sort_articles(set, SortKey::Newest);
        assert_eq!(names(&result), vec!["new", "mid", "old", "undated"]);
    }

    #[test]
    fn test_sort_word_threshold_partitions() {
        let long_body = "word ".repeat(600);
        let set = vec![
            article("short", "Short", "just a few words", 0, "2022-01-01T00:00:00Z"),
            article("long", "Long", &long_body, 0, "2020-01-01T00:00:00Z"),
        ];

        let more = sort_articles(set.clone(), SortKey::MoreThanWords(500));
        assert_eq!(names(&more), vec!["long", "short"]);

        let less = sort_articles(set, SortKey::LessThanWords(500));
        assert_eq!(names(&less), vec!["short", "long"]);
    }

    #[test]
    fn test_sort_word_threshold_newest_within_partition() {
        let long_a = "word ".repeat(600);
        let long_b = "word ".repeat(700);
        let set = vec![
            article("older-long", "A", &long_a, 0, "2020-01-01T00:00:00Z"),
            article("newer-long", "B", &long_b, 0, "2021-01-01T00:00:00Z"),
        ];

        let result = sort_articles(set, SortKey::MoreThanWords(500));
        assert_eq!(names(&result), vec!["newer-long", "older-long"]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let set = vec![
            article("first", "A", "x", 7, "2021-01-01T00:00:00Z"),
            article("second", "B", "x", 7, "2021-01-01T00:00:00Z"),
            article("third", "C", "x", 7, "2021-01-01T00:00:00Z"),
        ];

        let by_time = sort_articles(set.clone(), SortKey::Newest);
        assert_eq!(names(&by_time), vec!["first", "second", "third"]);

        let by_likes = sort_articles(set, SortKey::MostLiked);
        assert_eq!(names(&by_likes), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let keys = [
            SortKey::Newest,
            SortKey::Oldest,
            SortKey::MostLiked,
            SortKey::MoreThanWords(500),
            SortKey::LessThanWords(1000),
        ];

        for key in keys {
            let once = sort_articles(fixture_set(), key);
            let twice = sort_articles(once.clone(), key);
            assert_eq!(names(&once), names(&twice), "key {key} not idempotent");
        }
    }

    #[test]
    fn test_word_count() {
        let a = article("a", "A", "one two  three\nfour", 0, "2021-01-01T00:00:00Z");
        assert_eq!(word_count(&a), 4);

        let mut empty = a.clone();
        empty.content = None;
        assert_eq!(word_count(&empty), 0);
    }

    #[test]
    fn test_parse_all_sort_keys() {
        let cases = [
            ("newest", SortKey::Newest),
            ("oldest", SortKey::Oldest),
            ("most-liked", SortKey::MostLiked),
            ("more-than-500-words", SortKey::MoreThanWords(500)),
            ("less-than-500-words", SortKey::LessThanWords(500)),
            ("more-than-1000-words", SortKey::MoreThanWords(1000)),
            ("less-than-1000-words", SortKey::LessThanWords(1000)),
        ];

        for (input, expected) in cases {
            assert_eq!(input.parse::<SortKey>().unwrap(), expected);
        }
    }

    #[test]
    fn test_parse_sort_key_case_insensitive() {
        assert_eq!("NEWEST".parse::<SortKey>().unwrap(), SortKey::Newest);
        assert_eq!("Most-Liked".parse::<SortKey>().unwrap(), SortKey::MostLiked);
    }

    #[test]
    fn test_parse_sort_key_unknown() {
        let result = "alphabetical".parse::<SortKey>();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Valid keys"));
    }

    #[test]
    fn test_sort_key_display_round_trip() {
        let keys = [
            SortKey::Newest,
            SortKey::Oldest,
            SortKey::MostLiked,
            SortKey::MoreThanWords(500),
            SortKey::LessThanWords(1000),
        ];
        for key in keys {
            assert_eq!(key.to_string().parse::<SortKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_apply_query_filters_then_sorts() {
        let mut set = fixture_set();
        set.push(article("extra", "Another Post", "fresh extras", 2, "2019-01-01T00:00:00Z"));

        let result = apply_query(set, Some("post"), SortKey::Oldest);
        assert_eq!(names(&result), vec!["extra", "old", "mid", "new"]);
    }
}
