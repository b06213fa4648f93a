use async_trait::async_trait;
use tokio::sync::RwLock;

use devdash_common::Result;

use crate::models::{IndicatorFilter, IndicatorRecord, SdgGoal};
use crate::store::ContentStore;

/// Process-local store. Search is a case-insensitive substring match over
/// name and description.
#[derive(Default)]
pub struct InMemoryStore {
    indicators: RwLock<Vec<IndicatorRecord>>,
    goals: RwLock<Vec<SdgGoal>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(indicators: Vec<IndicatorRecord>, goals: Vec<SdgGoal>) -> Self {
        Self {
            indicators: RwLock::new(indicators),
            goals: RwLock::new(goals),
        }
    }
}

fn matches(record: &IndicatorRecord, filter: &IndicatorFilter) -> bool {
    if let Some(category) = &filter.category {
        if &record.category != category {
            return false;
        }
    }
    match &filter.search {
        Some(search) => {
            let needle = search.to_lowercase();
            record.name.to_lowercase().contains(&needle)
                || record.description.to_lowercase().contains(&needle)
        }
        None => true,
    }
}

#[async_trait]
impl ContentStore for InMemoryStore {
    async fn find_indicator(&self, slug: &str) -> Result<Option<IndicatorRecord>> {
        let indicators = self.indicators.read().await;
        Ok(indicators.iter().find(|r| r.slug == slug).cloned())
    }

    async fn find_indicators(&self, filter: IndicatorFilter) -> Result<Vec<IndicatorRecord>> {
        let filter = filter.normalized();
        let indicators = self.indicators.read().await;
        let mut found: Vec<IndicatorRecord> = indicators
            .iter()
            .filter(|r| matches(r, &filter))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn find_sdg_goal(&self, number: i32) -> Result<Option<SdgGoal>> {
        let goals = self.goals.read().await;
        Ok(goals.iter().find(|g| g.number == number).cloned())
    }

    async fn find_sdg_goal_by_slug(&self, slug: &str) -> Result<Option<SdgGoal>> {
        let goals = self.goals.read().await;
        Ok(goals.iter().find(|g| g.slug == slug).cloned())
    }

    async fn list_sdg_goals(&self) -> Result<Vec<SdgGoal>> {
        let mut goals = self.goals.read().await.clone();
        goals.sort_by_key(|g| g.number);
        Ok(goals)
    }

    async fn upsert_indicator(&self, record: &IndicatorRecord) -> Result<()> {
        let mut indicators = self.indicators.write().await;
        match indicators.iter_mut().find(|r| r.slug == record.slug) {
            Some(existing) => *existing = record.clone(),
            None => indicators.push(record.clone()),
        }
        Ok(())
    }

    async fn upsert_sdg_goal(&self, goal: &SdgGoal) -> Result<()> {
        let mut goals = self.goals.write().await;
        match goals.iter_mut().find(|g| g.slug == goal.slug) {
            Some(existing) => *existing = goal.clone(),
            None => goals.push(goal.clone()),
        }
        Ok(())
    }
}
