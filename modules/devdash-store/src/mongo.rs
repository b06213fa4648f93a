use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use tracing::info;

use devdash_common::{DevdashError, Result};

use crate::models::{IndicatorFilter, IndicatorRecord, SdgGoal};
use crate::store::ContentStore;

const INDICATORS: &str = "indicators";
const SDG_GOALS: &str = "sdggoals";

fn db_err(e: mongodb::error::Error) -> DevdashError {
    DevdashError::Database(e.to_string())
}

/// MongoDB-backed store. Search uses the `$text` index over name and
/// description, so `ensure_indexes` must have run at least once.
#[derive(Clone)]
pub struct MongoStore {
    indicators: Collection<IndicatorRecord>,
    goals: Collection<SdgGoal>,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await.map_err(db_err)?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 }).await.map_err(db_err)?;
        info!(database, "Connected to MongoDB");
        Ok(Self::from_database(&db))
    }

    pub fn from_database(db: &Database) -> Self {
        Self {
            indicators: db.collection(INDICATORS),
            goals: db.collection(SDG_GOALS),
        }
    }

    pub async fn ensure_indexes(&self) -> Result<()> {
        let unique = || IndexOptions::builder().unique(true).build();

        self.indicators
            .create_indexes([
                IndexModel::builder()
                    .keys(doc! { "slug": 1 })
                    .options(unique())
                    .build(),
                IndexModel::builder().keys(doc! { "category": 1 }).build(),
                IndexModel::builder()
                    .keys(doc! { "name": "text", "description": "text" })
                    .build(),
            ])
            .await
            .map_err(db_err)?;

        self.goals
            .create_indexes([
                IndexModel::builder()
                    .keys(doc! { "number": 1 })
                    .options(unique())
                    .build(),
                IndexModel::builder()
                    .keys(doc! { "slug": 1 })
                    .options(unique())
                    .build(),
            ])
            .await
            .map_err(db_err)?;

        info!("MongoDB indexes ensured");
        Ok(())
    }
}

fn indicator_query(filter: &IndicatorFilter) -> Document {
    let mut query = Document::new();
    if let Some(category) = &filter.category {
        query.insert("category", category.as_str());
    }
    if let Some(search) = &filter.search {
        query.insert("$text", doc! { "$search": search.as_str() });
    }
    query
}

#[async_trait]
impl ContentStore for MongoStore {
    async fn find_indicator(&self, slug: &str) -> Result<Option<IndicatorRecord>> {
        self.indicators
            .find_one(doc! { "slug": slug })
            .await
            .map_err(db_err)
    }

    async fn find_indicators(&self, filter: IndicatorFilter) -> Result<Vec<IndicatorRecord>> {
        let query = indicator_query(&filter.normalized());
        let cursor = self
            .indicators
            .find(query)
            .sort(doc! { "name": 1 })
            .await
            .map_err(db_err)?;
        cursor.try_collect().await.map_err(db_err)
    }

    async fn find_sdg_goal(&self, number: i32) -> Result<Option<SdgGoal>> {
        self.goals
            .find_one(doc! { "number": number })
            .await
            .map_err(db_err)
    }

    async fn find_sdg_goal_by_slug(&self, slug: &str) -> Result<Option<SdgGoal>> {
        self.goals
            .find_one(doc! { "slug": slug })
            .await
            .map_err(db_err)
    }

    async fn list_sdg_goals(&self) -> Result<Vec<SdgGoal>> {
        let cursor = self
            .goals
            .find(doc! {})
            .sort(doc! { "number": 1 })
            .await
            .map_err(db_err)?;
        cursor.try_collect().await.map_err(db_err)
    }

    async fn upsert_indicator(&self, record: &IndicatorRecord) -> Result<()> {
        self.indicators
            .replace_one(doc! { "slug": record.slug.as_str() }, record)
            .upsert(true)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn upsert_sdg_goal(&self, goal: &SdgGoal) -> Result<()> {
        self.goals
            .replace_one(doc! { "slug": goal.slug.as_str() }, goal)
            .upsert(true)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_matches_everything() {
        assert_eq!(indicator_query(&IndicatorFilter::default()), Document::new());
    }

    #[test]
    fn search_uses_text_index_and_category_is_equality() {
        let filter = IndicatorFilter {
            category: Some("health".to_string()),
            search: Some("life expectancy".to_string()),
        };

        let query = indicator_query(&filter);

        assert_eq!(
            query,
            doc! {
                "category": "health",
                "$text": { "$search": "life expectancy" },
            }
        );
    }
}
