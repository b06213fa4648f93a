pub mod memory;
pub mod models;
pub mod mongo;
pub mod sdg;
pub mod store;

pub use memory::InMemoryStore;
pub use models::{IndicatorFilter, IndicatorRecord, SdgGoal, SdgTarget};
pub use mongo::MongoStore;
pub use sdg::{overall_score, SdgGoalDef, SDG_GOALS};
pub use store::ContentStore;
