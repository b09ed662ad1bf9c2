// Shared test doubles for the catalog store and the completion oracle

#![allow(dead_code)]

use async_trait::async_trait;
use experience_recs::core::AnyOf;
use experience_recs::models::{ChatMessage, Experience, ExperienceId};
use experience_recs::services::{CatalogStore, Oracle, OracleError, StoreError};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

pub fn traits() -> Vec<String> {
    vec!["adventurous".to_string(), "romantic".to_string(), "group_a".to_string()]
}

pub fn experience(id: &str, category: &str, niche: &str) -> Experience {
    let mut exp = Experience::new(id, format!("Experience {}", id));
    exp.category = Some(category.to_string());
    exp.niche_category = Some(niche.to_string());
    exp
}

/// A small catalog:
/// - h1..h3 are highlighted (trending/featured), h3 has no category
/// - o1..o4 are outdoor, d1..d2 dining, r1 is a romantic spa
pub fn sample_catalog() -> Vec<Experience> {
    let mut h1 = experience("h1", "nightlife", "jazz");
    h1.trending = Some(true);
    let mut h2 = experience("h2", "culture", "museum");
    h2.featured = Some(true);
    let mut h3 = Experience::new("h3", "Mystery tour");
    h3.trending = Some(true);
    h3.featured = Some(true);

    let mut r1 = experience("r1", "wellness", "spa");
    r1.set_trait("romantic", true);

    let mut o1 = experience("o1", "outdoor", "kayak");
    o1.set_trait("adventurous", true);
    o1.tags = Some("water, sunset".to_string());

    vec![
        h1,
        h2,
        h3,
        o1,
        experience("o2", "outdoor", "hiking"),
        experience("o3", "outdoor", "climbing"),
        experience("o4", "sports", "outdoor"),
        experience("d1", "dining", "wine"),
        experience("d2", "dining", "street food"),
        r1,
    ]
}

/// In-memory catalog store
#[derive(Default)]
pub struct FakeStore {
    pub wishlists: HashMap<String, Vec<ExperienceId>>,
    pub swipes: HashMap<String, Vec<Vec<ExperienceId>>>,
    pub viewed: HashMap<String, Vec<ExperienceId>>,
    pub experiences: Vec<Experience>,
    pub fail: bool,
    pub filters: Mutex<Vec<AnyOf>>,
    pub highlight_limits: Mutex<Vec<usize>>,
}

impl FakeStore {
    pub fn with_catalog(experiences: Vec<Experience>) -> Self {
        Self {
            experiences,
            ..Default::default()
        }
    }

    pub fn wishlist(mut self, user: &str, ids: &[&str]) -> Self {
        self.wishlists
            .insert(user.to_string(), ids.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn likes(mut self, user: &str, ids: &[&str]) -> Self {
        self.swipes
            .entry(user.to_string())
            .or_default()
            .push(ids.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn viewed(mut self, user: &str, ids: &[&str]) -> Self {
        self.viewed
            .insert(user.to_string(), ids.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn recorded_filters(&self) -> Vec<AnyOf> {
        self.filters.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail {
            Err(StoreError::ApiError("503 Service Unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CatalogStore for FakeStore {
    async fn wishlist_ids(&self, user_id: &str) -> Result<Vec<ExperienceId>, StoreError> {
        self.check()?;
        Ok(self.wishlists.get(user_id).cloned().unwrap_or_default())
    }

    async fn liked_ids(&self, user_id: &str) -> Result<Vec<ExperienceId>, StoreError> {
        self.check()?;
        Ok(self
            .swipes
            .get(user_id)
            .map(|rows| rows.iter().flatten().cloned().collect())
            .unwrap_or_default())
    }

    async fn viewed_ids(&self, user_id: &str) -> Result<Vec<ExperienceId>, StoreError> {
        self.check()?;
        Ok(self.viewed.get(user_id).cloned().unwrap_or_default())
    }

    async fn experiences_by_ids(&self, ids: &[ExperienceId]) -> Result<Vec<Experience>, StoreError> {
        self.check()?;
        Ok(self
            .experiences
            .iter()
            .filter(|e| ids.contains(&e.id))
            .cloned()
            .collect())
    }

    async fn experiences_matching(&self, filter: &AnyOf) -> Result<Vec<Experience>, StoreError> {
        self.check()?;
        self.filters.lock().unwrap().push(filter.clone());
        Ok(self
            .experiences
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }

    async fn highlighted_experiences(&self, limit: usize) -> Result<Vec<Experience>, StoreError> {
        self.check()?;
        self.highlight_limits.lock().unwrap().push(limit);
        Ok(self
            .experiences
            .iter()
            .filter(|e| e.is_highlighted())
            .take(limit)
            .cloned()
            .collect())
    }

    async fn tag_columns(&self) -> Result<Vec<Experience>, StoreError> {
        self.check()?;
        Ok(self.experiences.clone())
    }
}

/// Oracle that plays back canned replies; an exhausted script is a failure
#[derive(Default)]
pub struct ScriptedOracle {
    replies: Mutex<VecDeque<Result<String, String>>>,
    pub calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err("connection refused".to_string()));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn prompt(&self, call: usize) -> String {
        self.calls.lock().unwrap()[call]
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn complete(&self, conversation: &[ChatMessage]) -> Result<String, OracleError> {
        self.calls.lock().unwrap().push(conversation.to_vec());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(msg)) => Err(OracleError::InvalidResponse(msg)),
            None => Err(OracleError::InvalidResponse("no scripted reply".to_string())),
        }
    }
}
