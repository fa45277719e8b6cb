use crate::prelude::{new_table, println, *};
use blogtools_core::tag::Tag;
use colored::Colorize;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct TagsOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: TagsOptions, _global: crate::Global) -> Result<()> {
    if options.json {
        println!("{}", format_tags_json()?);
    } else {
        print!("{}", format_tags_table());
    }

    Ok(())
}

fn format_tags_json() -> Result<String> {
    let tags: Vec<serde_json::Value> = Tag::ALL
        .iter()
        .map(|tag| {
            serde_json::json!({
                "tag": tag.wire_value(),
                "label": tag.label(),
            })
        })
        .collect();

    serde_json::to_string_pretty(&tags).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_tags_table() -> String {
    let mut table = new_table();
    table.add_row(prettytable::row!["Tag", "Label"]);

    for tag in Tag::ALL {
        table.add_row(prettytable::row![tag.wire_value(), tag.label()]);
    }

    let mut result = String::new();
    result.push_str(&table.to_string());
    result.push_str(&format!(
        "\n{}: {}\n",
        "To filter by tag".bright_white().bold(),
        "blogtools article list --tag <tag>".cyan()
    ));

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tags_table_lists_all_tags() {
        let formatted = format_tags_table();

        for tag in Tag::ALL {
            assert!(formatted.contains(tag.wire_value()));
        }
        assert!(formatted.contains("Technology"));
        assert!(formatted.contains("Gaming"));
        assert!(formatted.contains("Trending Topics"));
    }

    #[test]
    fn test_format_tags_table_includes_hint() {
        let formatted = format_tags_table();

        assert!(formatted.contains("blogtools article list --tag"));
    }

    #[test]
    fn test_format_tags_json() {
        let json = format_tags_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let tags = parsed.as_array().unwrap();
        assert_eq!(tags.len(), 15);
        assert!(tags
            .iter()
            .any(|t| t["tag"] == "Sci-Fi" && t["label"] == "Sci-Fi"));
        assert!(tags
            .iter()
            .any(|t| t["tag"] == "Tech" && t["label"] == "Technology"));
    }
}
