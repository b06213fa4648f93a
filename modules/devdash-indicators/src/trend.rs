use devdash_common::{Observation, Trend};

/// Trend direction over the most recent points of a newest-first history.
///
/// The window is read in history order (newest first). `up` needs every
/// consecutive pair to be non-decreasing in that order and the oldest value to
/// exceed the newest by more than `epsilon`; `down` is the mirror image.
/// Anything else, including fewer than two points, is `neutral`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPolicy {
    pub window: usize,
    pub epsilon: f64,
}

impl Default for TrendPolicy {
    fn default() -> Self {
        Self {
            window: 3,
            epsilon: 0.001,
        }
    }
}

impl TrendPolicy {
    pub fn direction<P: Observation>(&self, history: &[P]) -> Trend {
        if history.len() < 2 || self.window < 2 {
            return Trend::Neutral;
        }

        let recent: Vec<f64> = history
            .iter()
            .take(self.window)
            .map(Observation::headline)
            .collect();
        let newest = recent[0];
        let oldest = recent[recent.len() - 1];

        // Pairs are (newer, older).
        let non_decreasing = recent.windows(2).all(|w| w[0] <= w[1]);
        let non_increasing = recent.windows(2).all(|w| w[0] >= w[1]);

        if non_decreasing && oldest - newest > self.epsilon {
            Trend::Up
        } else if non_increasing && newest - oldest > self.epsilon {
            Trend::Down
        } else {
            Trend::Neutral
        }
    }
}
