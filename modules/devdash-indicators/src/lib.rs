pub mod cache;
pub mod catalog;
pub mod comparison;
pub mod fallback;
pub mod normalize;
pub mod service;
pub mod sources;
pub mod trend;

pub use cache::{CacheKey, TtlCache};
pub use catalog::{GenderComponent, GenderIndicator, HdroIndicator, WhoIndicator, WorldBankIndicator};
pub use comparison::build_comparison;
pub use fallback::FallbackPolicy;
pub use service::{CacheTtls, DocumentParams, IndicatorService, IndicatorSummary, Overview, WhoSeries};
pub use sources::{GhoSource, HdroSource, WorldBankSource};
pub use trend::TrendPolicy;
