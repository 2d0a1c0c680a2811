//! Wall post record - the social feed on the dashboard.

use crate::{
    core::filter::Filterable,
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::{borrow::Cow, fmt, str::FromStr};

/// Kind of wall post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallPostKind {
    /// Company-wide announcement
    Announcement,
    /// Team or product update
    Update,
    /// External news
    News,
    /// Birthdays, anniversaries, wins
    Celebration,
}

impl WallPostKind {
    /// Every kind, in display order.
    pub const ALL: [Self; 4] = [
        Self::Announcement,
        Self::Update,
        Self::News,
        Self::Celebration,
    ];

    /// Wire and selector value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Announcement => "announcement",
            Self::Update => "update",
            Self::News => "news",
            Self::Celebration => "celebration",
        }
    }
}

impl fmt::Display for WallPostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WallPostKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidValue {
                kind: "wall post type",
                value: s.to_string(),
            })
    }
}

/// Post author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name
    pub name: String,
    /// Job title or role
    pub role: String,
}

/// Reaction counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reactions {
    /// Thumbs up
    pub likes: u32,
    /// Hearts
    pub hearts: u32,
}

impl Reactions {
    /// All reactions combined.
    #[must_use]
    pub const fn total(self) -> u32 {
        self.likes.saturating_add(self.hearts)
    }
}

/// A post on the wall
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallPost {
    /// Unique identifier
    pub id: i64,
    /// Post kind
    #[serde(rename = "type")]
    pub kind: WallPostKind,
    /// Headline
    pub title: String,
    /// Body text
    pub content: String,
    /// Who wrote it
    pub author: Author,
    /// When it was posted
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Pinned posts lead the feed
    #[serde(rename = "isPinned", default)]
    pub is_pinned: bool,
    /// Reaction counters
    #[serde(default)]
    pub reactions: Reactions,
    /// Number of comments
    #[serde(default)]
    pub comments: u32,
    /// Number of views
    #[serde(default)]
    pub views: u32,
    /// Tags, in author order
    #[serde(default)]
    pub tags: Vec<String>,
}

impl WallPost {
    /// Reactions plus comments.
    #[must_use]
    pub const fn engagement(&self) -> u32 {
        self.reactions.total().saturating_add(self.comments)
    }

    /// Whether the post carries `tag` (ASCII case-insensitive).
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Naive layouts the backend also sends; both are read as UTC.
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parses a wall timestamp: RFC 3339, or `YYYY-MM-DD HH:MM:SS` taken as UTC.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| Error::InvalidValue {
            kind: "timestamp",
            value: raw.to_string(),
        })
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// Wall post fields a selector can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WallField {
    /// Headline
    Title,
    /// Body text
    Content,
    /// Post kind
    Kind,
    /// Author name
    Author,
}

impl FromStr for WallField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "title" => Ok(Self::Title),
            "content" => Ok(Self::Content),
            "type" | "kind" => Ok(Self::Kind),
            "author" => Ok(Self::Author),
            other => Err(Error::UnknownField {
                entity: WallPost::ENTITY,
                field: other.to_string(),
            }),
        }
    }
}

impl Filterable for WallPost {
    type Field = WallField;

    const ENTITY: &'static str = "wall post";
    const SEARCH_FIELDS: &'static [WallField] = &[WallField::Title, WallField::Content];

    fn field_value(&self, field: WallField) -> Cow<'_, str> {
        match field {
            WallField::Title => Cow::Borrowed(&self.title),
            WallField::Content => Cow::Borrowed(&self.content),
            WallField::Kind => Cow::Borrowed(self.kind.as_str()),
            WallField::Author => Cow::Borrowed(&self.author.name),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_wall_post_uses_wire_names() {
        let json = r#"{
            "id": 1,
            "type": "celebration",
            "title": "Ten years!",
            "content": "Happy anniversary to the support team",
            "author": {"name": "Sam Lee", "role": "HR"},
            "timestamp": "2024-05-01T09:30:00Z",
            "isPinned": true,
            "reactions": {"likes": 12, "hearts": 30},
            "comments": 5,
            "views": 210,
            "tags": ["Team", "milestone"]
        }"#;
        let post: WallPost = serde_json::from_str(json).unwrap();

        assert_eq!(post.kind, WallPostKind::Celebration);
        assert!(post.is_pinned);
        assert_eq!(post.engagement(), 47);
        assert!(post.has_tag("team"));
        assert_eq!(post.tags, vec!["Team".to_string(), "milestone".to_string()]);
    }

    fn post_with_timestamp(timestamp: &str) -> serde_json::Result<WallPost> {
        serde_json::from_value(serde_json::json!({
            "id": 2,
            "type": "news",
            "title": "Office move",
            "content": "We move floors next week",
            "author": {"name": "Ana Ruiz", "role": "Facilities"},
            "timestamp": timestamp,
        }))
    }

    #[test]
    fn test_timestamp_accepts_backend_layout() {
        let post = post_with_timestamp("2024-01-15 10:30:00").unwrap();
        assert_eq!(post.timestamp.to_rfc3339(), "2024-01-15T10:30:00+00:00");

        let post = post_with_timestamp("2024-01-15T10:30:00").unwrap();
        assert_eq!(post.timestamp.to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn test_timestamp_accepts_rfc3339_with_offset() {
        let post = post_with_timestamp("2024-01-15T12:30:00+02:00").unwrap();
        assert_eq!(post.timestamp.to_rfc3339(), "2024-01-15T10:30:00+00:00");

        let post = post_with_timestamp("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(post.timestamp.to_rfc3339(), "2024-01-15T10:30:00+00:00");
    }

    #[test]
    fn test_timestamp_rejects_unparseable_text() {
        assert!(post_with_timestamp("yesterday").is_err());
        assert!(post_with_timestamp("2024-01-15").is_err());
        assert!(matches!(
            parse_timestamp("15/01/2024 10:30"),
            Err(Error::InvalidValue { kind: "timestamp", .. })
        ));
    }

    #[test]
    fn test_timestamp_from_toml_fixture() {
        #[derive(Deserialize)]
        struct Feed {
            wall_posts: Vec<WallPost>,
        }

        let feed: Feed = toml::from_str(
            r#"
            [[wall_posts]]
            id = 3
            type = "update"
            title = "New dashboard"
            content = "Charts now load faster"
            author = { name = "Kim Park", role = "Engineering" }
            timestamp = "2024-01-15 10:30:00"
            "#,
        )
        .unwrap();
        assert_eq!(
            feed.wall_posts[0].timestamp.to_rfc3339(),
            "2024-01-15T10:30:00+00:00"
        );
    }

    #[test]
    fn test_kind_field_aliases() {
        assert_eq!("type".parse::<WallField>().unwrap(), WallField::Kind);
        assert_eq!("kind".parse::<WallField>().unwrap(), WallField::Kind);
    }
}
