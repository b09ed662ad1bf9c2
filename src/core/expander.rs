use crate::core::prompts::{conversation, expansion_prompt};
use crate::core::replies::parse_tag_list;
use crate::models::Tag;
use crate::services::Oracle;
use std::collections::BTreeSet;

/// How a tag expansion was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionSource {
    Oracle,
    /// The oracle failed or replied with nothing usable
    Preferences,
}

/// Maps preference tags onto the catalog vocabulary via the oracle
#[derive(Debug, Clone)]
pub struct TagExpander {
    count: usize,
}

impl TagExpander {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    /// Produce up to `count` tags related to `preferred`
    ///
    /// Never fails: if the oracle errors or its reply holds no tag, the
    /// preference set is returned unchanged. Returned tags are not checked
    /// against `available`.
    pub async fn expand(
        &self,
        oracle: &dyn Oracle,
        preferred: &BTreeSet<Tag>,
        available: &BTreeSet<Tag>,
    ) -> (Vec<Tag>, ExpansionSource) {
        let prompt = expansion_prompt(preferred, available, self.count);

        match oracle.complete(&conversation(prompt)).await {
            Ok(reply) => {
                let mut tags = parse_tag_list(&reply);
                if tags.is_empty() {
                    tracing::warn!("Tag expansion reply had no tags, using preference tags");
                    return (preferred.iter().cloned().collect(), ExpansionSource::Preferences);
                }
                tags.truncate(self.count);
                (tags, ExpansionSource::Oracle)
            }
            Err(e) => {
                tracing::warn!("LLM tag analysis failed, using preference tags: {}", e);
                (preferred.iter().cloned().collect(), ExpansionSource::Preferences)
            }
        }
    }
}

impl Default for TagExpander {
    fn default() -> Self {
        Self::new(10)
    }
}
