use crate::models::{ExperienceId, Tag};
use crate::services::{CatalogStore, StoreError};
use std::collections::{BTreeSet, HashSet};

/// What a user's history says about them
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Engagement {
    /// Nothing wishlisted, liked or viewed
    NoHistory,
    /// Seen experiences exist but none carries a usable tag
    NoUsableTags { seen: HashSet<ExperienceId> },
    /// Seen ids and the preference tags derived from them
    Profile {
        seen: HashSet<ExperienceId>,
        tags: BTreeSet<Tag>,
    },
}

/// Collects seen ids and preference tags for a user
#[derive(Debug, Clone)]
pub struct EngagementCollector {
    traits: Vec<String>,
    include_viewed: bool,
}

impl EngagementCollector {
    pub fn new(traits: Vec<String>, include_viewed: bool) -> Self {
        Self { traits, include_viewed }
    }

    /// Union of wishlist ids and liked ids (and viewed ids when enabled)
    pub async fn seen_ids(
        &self,
        store: &dyn CatalogStore,
        user_id: &str,
    ) -> Result<HashSet<ExperienceId>, StoreError> {
        let mut seen: HashSet<ExperienceId> = store.wishlist_ids(user_id).await?.into_iter().collect();
        seen.extend(store.liked_ids(user_id).await?);
        if self.include_viewed {
            seen.extend(store.viewed_ids(user_id).await?);
        }
        Ok(seen)
    }

    /// Determine the user's seen ids and preference tags
    ///
    /// Store faults propagate; sparse data is reported through the variant.
    pub async fn collect(
        &self,
        store: &dyn CatalogStore,
        user_id: &str,
    ) -> Result<Engagement, StoreError> {
        let seen = self.seen_ids(store, user_id).await?;
        if seen.is_empty() {
            return Ok(Engagement::NoHistory);
        }

        let mut ids: Vec<ExperienceId> = seen.iter().cloned().collect();
        ids.sort();
        let records = store.experiences_by_ids(&ids).await?;

        let tags: BTreeSet<Tag> = records
            .iter()
            .flat_map(|exp| exp.preference_tags(&self.traits))
            .collect();

        tracing::debug!(
            "User {} has {} seen experiences ({} found) and {} preference tags",
            user_id,
            seen.len(),
            records.len(),
            tags.len()
        );

        if tags.is_empty() {
            return Ok(Engagement::NoUsableTags { seen });
        }

        Ok(Engagement::Profile { seen, tags })
    }
}
