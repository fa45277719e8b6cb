//! The fixed category enumeration used for server-side tag filtering.

/// Error type for tag parsing
#[derive(Debug)]
pub struct ParseTagError(pub String);

impl std::fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unknown tag: {}. Run `blogtools article tags` to see valid tags.",
            self.0
        )
    }
}

impl std::error::Error for ParseTagError {}

/// Article category tag
///
/// The server filters on the short wire value (`Tech`, `Sci-Fi`); the
/// catalog command shows the longer label next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Tech,
    Music,
    Game,
    Movies,
    Books,
    Food,
    Travel,
    Fashion,
    Health,
    Sports,
    SciFi,
    Finance,
    Politics,
    Narratives,
    TrendingTopics,
}

impl Tag {
    pub const ALL: [Tag; 15] = [
        Tag::Tech,
        Tag::Music,
        Tag::Game,
        Tag::Movies,
        Tag::Books,
        Tag::Food,
        Tag::Travel,
        Tag::Fashion,
        Tag::Health,
        Tag::Sports,
        Tag::SciFi,
        Tag::Finance,
        Tag::Politics,
        Tag::Narratives,
        Tag::TrendingTopics,
    ];

    /// Value the API expects in the tag filter request body
    pub fn wire_value(&self) -> &'static str {
        match self {
            Tag::Tech => "Tech",
            Tag::Music => "Music",
            Tag::Game => "Game",
            Tag::Movies => "Movies",
            Tag::Books => "Books",
            Tag::Food => "Food",
            Tag::Travel => "Travel",
            Tag::Fashion => "Fashion",
            Tag::Health => "Health",
            Tag::Sports => "Sports",
            Tag::SciFi => "Sci-Fi",
            Tag::Finance => "Finance",
            Tag::Politics => "Politics",
            Tag::Narratives => "Narratives",
            Tag::TrendingTopics => "Trending-Topics",
        }
    }

    /// Human-facing label
    pub fn label(&self) -> &'static str {
        match self {
            Tag::Tech => "Technology",
            Tag::Music => "Music",
            Tag::Game => "Gaming",
            Tag::Movies => "Movies",
            Tag::Books => "Books",
            Tag::Food => "Food",
            Tag::Travel => "Travel",
            Tag::Fashion => "Fashion",
            Tag::Health => "Health",
            Tag::Sports => "Sports",
            Tag::SciFi => "Sci-Fi",
            Tag::Finance => "Finance",
            Tag::Politics => "Politics",
            Tag::Narratives => "Narratives",
            Tag::TrendingTopics => "Trending Topics",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_value())
    }
}

impl std::str::FromStr for Tag {
    type Err = ParseTagError;

    /// Accepts the wire value or the label, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        for tag in Tag::ALL {
            if tag.wire_value().to_lowercase() == normalized
                || tag.label().to_lowercase() == normalized
            {
                return Ok(tag);
            }
        }
        Err(ParseTagError(s.to_string()))
    }
}
