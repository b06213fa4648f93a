use std::fmt::Display;

use tracing::warn;

/// What to serve when the live series cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FallbackPolicy<T: 'static> {
    PropagateError,
    /// Baked-in series served on error or when the live series is empty.
    StaticDefault(&'static [T]),
}

impl<T: Clone> FallbackPolicy<T> {
    pub fn resolve<E: Display>(&self, slug: &str, fetched: Result<Vec<T>, E>) -> Result<Vec<T>, E> {
        match (self, fetched) {
            (_, Ok(points)) if !points.is_empty() => Ok(points),
            (FallbackPolicy::StaticDefault(points), Ok(_)) => {
                warn!(slug, "Live series empty, serving static fallback");
                Ok(points.to_vec())
            }
            (FallbackPolicy::StaticDefault(points), Err(e)) => {
                warn!(slug, error = %e, "Live fetch failed, serving static fallback");
                Ok(points.to_vec())
            }
            (FallbackPolicy::PropagateError, fetched) => fetched,
        }
    }
}
