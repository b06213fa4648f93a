// Read-mostly document store behind one trait. Request handlers only read;
// the upsert methods are used by the seed tool.

use async_trait::async_trait;

use devdash_common::Result;

use crate::models::{IndicatorFilter, IndicatorRecord, SdgGoal};

#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn find_indicator(&self, slug: &str) -> Result<Option<IndicatorRecord>>;

    /// Sorted by name.
    async fn find_indicators(&self, filter: IndicatorFilter) -> Result<Vec<IndicatorRecord>>;

    async fn find_sdg_goal(&self, number: i32) -> Result<Option<SdgGoal>>;

    async fn find_sdg_goal_by_slug(&self, slug: &str) -> Result<Option<SdgGoal>>;

    /// Sorted by goal number.
    async fn list_sdg_goals(&self) -> Result<Vec<SdgGoal>>;

    async fn upsert_indicator(&self, record: &IndicatorRecord) -> Result<()>;

    async fn upsert_sdg_goal(&self, goal: &SdgGoal) -> Result<()>;
}
