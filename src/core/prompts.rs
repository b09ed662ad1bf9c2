use crate::models::{ChatMessage, Experience, Tag};
use std::collections::BTreeSet;

/// System framing sent ahead of every oracle task
pub const SYSTEM_PROMPT: &str = "You are an expert at analyzing experience categories and finding similar tags. \
You help match user preferences with relevant experience categories.";

/// Wrap a task prompt into the two-message conversation the oracle expects
pub fn conversation(task: String) -> Vec<ChatMessage> {
    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(task)]
}

fn join_tags<'a>(tags: impl IntoIterator<Item = &'a Tag>) -> String {
    tags.into_iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

pub fn expansion_prompt(preferred: &BTreeSet<Tag>, available: &BTreeSet<Tag>, count: usize) -> String {
    format!(
        "Given the user's preferred tags: {}\n\n\
         And the available experience tags: {}\n\n\
         Find the top {} most semantically similar tags from the available tags that would match the user's preferences.\n\
         Consider:\n\
         - Direct matches\n\
         - Related categories (e.g., 'adventure' matches 'outdoor', 'sports', 'adrenaline')\n\
         - Complementary experiences (e.g., 'romantic' matches 'dining', 'wellness', 'luxury')\n\
         - Contextual relationships\n\n\
         Return only the tag names as a comma-separated list, no explanations.",
        join_tags(preferred),
        join_tags(available),
        count
    )
}

fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "N/A",
    }
}

/// One numbered line per shown candidate, numbered from 1
pub fn candidate_listing(shown: &[Experience]) -> String {
    shown
        .iter()
        .enumerate()
        .map(|(i, exp)| {
            format!(
                "{}. {} (Category: {}, Niche: {}, Tags: {})",
                i + 1,
                exp.title,
                or_na(exp.category.as_deref()),
                or_na(exp.niche_category.as_deref()),
                or_na(exp.tags.as_deref()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn ranking_prompt(preferred: &BTreeSet<Tag>, shown: &[Experience], k: usize) -> String {
    format!(
        "Given the user's preferred tags: {}\n\n\
         Rank these experiences by relevance to the user's preferences:\n{}\n\n\
         Return only the numbers of the top {} most relevant experiences, separated by commas.",
        join_tags(preferred),
        candidate_listing(shown),
        k
    )
}
