use crate::config::{RecommendationSettings, VocabularySource};
use crate::core::engagement::{Engagement, EngagementCollector};
use crate::core::expander::{ExpansionSource, TagExpander};
use crate::core::filters::{build_tag_filter, exclude_seen};
use crate::core::ranker::{random_pick, Ranker, RankingSource};
use crate::models::{Experience, ExperienceId, Tag};
use crate::services::{CatalogStore, Oracle, StoreError};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use thiserror::Error;

/// Errors that escape the pipeline
///
/// Only store faults do; oracle faults and empty data are absorbed.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Catalog store error: {0}")]
    Store(#[from] StoreError),
}

/// Why the cold-start path was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColdStartReason {
    NoHistory,
    NoUsableTags,
}

/// Which path produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    ColdStart(ColdStartReason),
    Personalized {
        expansion: ExpansionSource,
        ranking: RankingSource,
    },
}

/// Result of one recommendation request
#[derive(Debug)]
pub struct Suggestions {
    pub experiences: Vec<Experience>,
    pub strategy: Strategy,
    /// Candidates left after excluding seen items (0 on cold start)
    pub total_candidates: usize,
}

/// Tunables of the pipeline
#[derive(Debug, Clone)]
pub struct RecommenderOptions {
    pub traits: Vec<String>,
    pub include_viewed: bool,
    pub expansion_count: usize,
    pub ranking_window: usize,
    pub vocabulary: VocabularySource,
    pub static_tags: Vec<Tag>,
}

impl RecommenderOptions {
    pub fn from_settings(settings: &RecommendationSettings, include_viewed: bool) -> Self {
        Self {
            traits: settings.traits.clone(),
            include_viewed,
            expansion_count: settings.expansion_count,
            ranking_window: settings.ranking_window,
            vocabulary: settings.vocabulary,
            static_tags: settings.static_tags.clone(),
        }
    }
}

impl Default for RecommenderOptions {
    fn default() -> Self {
        Self::from_settings(&RecommendationSettings::default(), false)
    }
}

/// Main recommendation orchestrator
///
/// # Pipeline Stages
/// 1. Engagement collection (seen ids, preference tags)
/// 2. Tag expansion through the oracle
/// 3. Candidate fetch, minus seen items
/// 4. Ranking through the oracle
///
/// Users without usable history get the cold-start list instead.
#[derive(Clone)]
pub struct Recommender {
    store: Arc<dyn CatalogStore>,
    oracle: Arc<dyn Oracle>,
    collector: EngagementCollector,
    expander: TagExpander,
    ranker: Ranker,
    options: RecommenderOptions,
}

impl Recommender {
    pub fn new(store: Arc<dyn CatalogStore>, oracle: Arc<dyn Oracle>, options: RecommenderOptions) -> Self {
        Self {
            store,
            oracle,
            collector: EngagementCollector::new(options.traits.clone(), options.include_viewed),
            expander: TagExpander::new(options.expansion_count),
            ranker: Ranker::new(options.ranking_window),
            options,
        }
    }

    /// Recommend up to `k` unseen experiences for a user
    pub async fn suggest(&self, user_id: &str, k: usize) -> Result<Suggestions, RecommendError> {
        let store = self.store.as_ref();

        let (seen, preferred) = match self.collector.collect(store, user_id).await? {
            Engagement::NoHistory => {
                tracing::info!("No history for user {}, serving cold start", user_id);
                return self.cold_start(k, ColdStartReason::NoHistory).await;
            }
            Engagement::NoUsableTags { .. } => {
                tracing::info!("No usable tags for user {}, serving cold start", user_id);
                return self.cold_start(k, ColdStartReason::NoUsableTags).await;
            }
            Engagement::Profile { seen, tags } => (seen, tags),
        };

        let available = self.available_tags().await?;
        let (expanded, expansion) = self
            .expander
            .expand(self.oracle.as_ref(), &preferred, &available)
            .await;

        tracing::debug!("Expanded {:?} into {:?} ({:?})", preferred, expanded, expansion);

        let candidates = self.fetch_candidates(&expanded, &seen).await?;
        let total_candidates = candidates.len();

        let (experiences, ranking) = self
            .ranker
            .rank(self.oracle.as_ref(), &preferred, candidates, k)
            .await;

        tracing::info!(
            "Returning {} suggestions for user {} (from {} candidates, ranking: {:?})",
            experiences.len(),
            user_id,
            total_candidates,
            ranking
        );

        Ok(Suggestions {
            experiences,
            strategy: Strategy::Personalized { expansion, ranking },
            total_candidates,
        })
    }

    /// Trending or featured experiences, shuffled, at most `k`
    async fn cold_start(&self, k: usize, reason: ColdStartReason) -> Result<Suggestions, RecommendError> {
        let highlighted = self.store.highlighted_experiences(k).await?;
        Ok(Suggestions {
            experiences: random_pick(highlighted, k),
            strategy: Strategy::ColdStart(reason),
            total_candidates: 0,
        })
    }

    /// Experiences matching any expanded tag, excluding seen ones
    ///
    /// An empty tag list yields no candidates without touching the store.
    pub async fn fetch_candidates(
        &self,
        tags: &[Tag],
        seen: &HashSet<ExperienceId>,
    ) -> Result<Vec<Experience>, RecommendError> {
        let filter = build_tag_filter(tags, &self.options.traits);
        if filter.is_empty() {
            return Ok(Vec::new());
        }
        let rows = self.store.experiences_matching(&filter).await?;
        Ok(exclude_seen(rows, seen))
    }

    /// The vocabulary the oracle may pick expanded tags from
    pub async fn available_tags(&self) -> Result<BTreeSet<Tag>, RecommendError> {
        match self.options.vocabulary {
            VocabularySource::Static => Ok(self.options.static_tags.iter().cloned().collect()),
            VocabularySource::Catalog => {
                let rows = self.store.tag_columns().await?;
                Ok(rows
                    .iter()
                    .flat_map(|exp| exp.filterable_tags(&self.options.traits))
                    .collect())
            }
        }
    }
}
