use crate::core::prompts::{conversation, ranking_prompt};
use crate::core::replies::parse_index_list;
use crate::models::{Experience, Tag};
use crate::services::Oracle;
use rand::seq::SliceRandom;
use std::collections::{BTreeSet, HashSet};

/// How a ranked list was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingSource {
    Oracle,
    /// Oracle failed or gave no usable index; random pick from all candidates
    Random,
    /// Nothing to rank
    Empty,
}

/// Orders candidates by asking the oracle for the best item numbers
#[derive(Debug, Clone)]
pub struct Ranker {
    window: usize,
}

impl Ranker {
    /// `window` is how many leading candidates the oracle gets to see
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Return at most `k` candidates, best first
    ///
    /// # Pipeline Stages
    /// 1. Show the first `window` candidates to the oracle as a numbered list
    /// 2. Parse the reply into indices, dropping out-of-range and repeated ones
    /// 3. Fall back to a random pick over *all* candidates when nothing survives
    pub async fn rank(
        &self,
        oracle: &dyn Oracle,
        preferred: &BTreeSet<Tag>,
        candidates: Vec<Experience>,
        k: usize,
    ) -> (Vec<Experience>, RankingSource) {
        if candidates.is_empty() || k == 0 {
            return (Vec::new(), RankingSource::Empty);
        }

        let shown = &candidates[..candidates.len().min(self.window)];
        let prompt = ranking_prompt(preferred, shown, k);

        match oracle.complete(&conversation(prompt)).await {
            Ok(reply) => {
                let picked = select_indices(&parse_index_list(&reply), shown.len(), k);
                if picked.is_empty() {
                    tracing::warn!("Ranking reply had no usable numbers: {:?}", reply);
                    return (random_pick(candidates, k), RankingSource::Random);
                }
                let ranked = picked.into_iter().map(|i| candidates[i].clone()).collect();
                (ranked, RankingSource::Oracle)
            }
            Err(e) => {
                tracing::warn!("LLM ranking failed, falling back to random selection: {}", e);
                (random_pick(candidates, k), RankingSource::Random)
            }
        }
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(20)
    }
}

/// Keep in-range, first-seen indices in reply order, at most `k`
pub fn select_indices(indices: &[usize], shown: usize, k: usize) -> Vec<usize> {
    let mut used = HashSet::new();
    indices
        .iter()
        .copied()
        .filter(|&i| i < shown)
        .filter(|&i| used.insert(i))
        .take(k)
        .collect()
}

/// Up to `k` items in random order
pub fn random_pick<T>(mut items: Vec<T>, k: usize) -> Vec<T> {
    items.shuffle(&mut rand::thread_rng());
    items.truncate(k);
    items
}
