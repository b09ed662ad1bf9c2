use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Opaque experience identifier
///
/// Stored as text regardless of whether the catalog uses uuid or integer keys.
pub type ExperienceId = String;

/// A short tag token (category, niche category, trait name, free-text tag)
pub type Tag = String;

/// Catalog item
///
/// Columns the pipeline does not interpret are kept in `attributes` and
/// serialized back out unchanged, so API consumers receive the full row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(deserialize_with = "flexible_id")]
    pub id: ExperienceId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub niche_category: Option<String>,
    /// Comma-delimited free-text tags
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub trending: Option<bool>,
    #[serde(default)]
    pub featured: Option<bool>,
    /// Trait flags and any other columns
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Experience {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: None,
            niche_category: None,
            tags: None,
            trending: None,
            featured: None,
            attributes: Map::new(),
        }
    }

    /// Whether the named boolean trait column is set to true
    pub fn has_trait(&self, name: &str) -> bool {
        self.attributes
            .get(name)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn set_trait(&mut self, name: &str, value: bool) {
        self.attributes.insert(name.to_string(), Value::Bool(value));
    }

    /// Trending or featured
    pub fn is_highlighted(&self) -> bool {
        self.trending.unwrap_or(false) || self.featured.unwrap_or(false)
    }

    /// Tokens of the delimited tag field
    pub fn free_tags(&self) -> BTreeSet<Tag> {
        self.tags.as_deref().map(split_tag_field).unwrap_or_default()
    }

    /// Category, niche category and every true trait from `traits`
    ///
    /// These are the tags the catalog can be filtered on.
    pub fn filterable_tags(&self, traits: &[String]) -> BTreeSet<Tag> {
        let mut tags = BTreeSet::new();
        for value in [&self.category, &self.niche_category].into_iter().flatten() {
            if !value.is_empty() {
                tags.insert(value.clone());
            }
        }
        for name in traits {
            if self.has_trait(name) {
                tags.insert(name.clone());
            }
        }
        tags
    }

    /// Every tag this experience contributes to a user's preferences
    pub fn preference_tags(&self, traits: &[String]) -> BTreeSet<Tag> {
        let mut tags = self.filterable_tags(traits);
        tags.extend(self.free_tags());
        tags
    }
}

/// Split a delimited tag field into trimmed, non-empty tokens
pub fn split_tag_field(field: &str) -> BTreeSet<Tag> {
    field
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Wishlist (or viewed) row projected to the experience id
///
/// A null or missing id is a row that points at nothing.
#[derive(Debug, Clone, Deserialize)]
pub struct EngagementRow {
    #[serde(default, deserialize_with = "flexible_optional_id")]
    pub experience_id: Option<ExperienceId>,
}

/// Swipe row projected to the liked experience ids
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwipeRow {
    #[serde(default, deserialize_with = "flexible_id_list")]
    pub likes: Vec<ExperienceId>,
}

/// Chat message role for the completion oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One message of an oracle conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

fn id_from_value(value: Value) -> Option<ExperienceId> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn flexible_id<'de, D>(deserializer: D) -> Result<ExperienceId, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    id_from_value(value).ok_or_else(|| serde::de::Error::custom("expected string or integer id"))
}

fn flexible_optional_id<'de, D>(deserializer: D) -> Result<Option<ExperienceId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => id_from_value(value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom("expected string or integer id")),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// `likes` may be null, or a list of string or integer ids
fn flexible_id_list<'de, D>(deserializer: D) -> Result<Vec<ExperienceId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(value
        .unwrap_or_default()
        .into_iter()
        .filter_map(id_from_value)
        .collect())
}
