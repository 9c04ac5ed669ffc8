use std::time::Duration;

/// Key the stats blob is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "zensho_bookkeeping_v7";

/// Tunables for sessions and explanation playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    comprehensive_quota: usize,
    focused_quota: usize,
    storage_key: String,
    tick_interval: Duration,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            comprehensive_quota: 10,
            focused_quota: 5,
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            tick_interval: Duration::from_millis(2_500),
        }
    }
}

impl QuizConfig {
    /// Questions per comprehensive session.
    #[must_use]
    pub fn comprehensive_quota(&self) -> usize {
        self.comprehensive_quota
    }

    /// Questions per major or sub category session.
    #[must_use]
    pub fn focused_quota(&self) -> usize {
        self.focused_quota
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Delay between auto-advance steps of the explanation player.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn with_comprehensive_quota(mut self, quota: usize) -> Self {
        self.comprehensive_quota = quota.max(1);
        self
    }

    #[must_use]
    pub fn with_focused_quota(mut self, quota: usize) -> Self {
        self.focused_quota = quota.max(1);
        self
    }

    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Zero intervals are bumped to one millisecond; tokio rejects a zero period.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval.max(Duration::from_millis(1));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_drill_app() {
        let config = QuizConfig::default();
        assert_eq!(config.comprehensive_quota(), 10);
        assert_eq!(config.focused_quota(), 5);
        assert_eq!(config.storage_key(), "zensho_bookkeeping_v7");
        assert_eq!(config.tick_interval(), Duration::from_millis(2_500));
    }

    #[test]
    fn builders_clamp_degenerate_values() {
        let config = QuizConfig::default()
            .with_focused_quota(0)
            .with_tick_interval(Duration::ZERO)
            .with_storage_key("other");
        assert_eq!(config.focused_quota(), 1);
        assert_eq!(config.tick_interval(), Duration::from_millis(1));
        assert_eq!(config.storage_key(), "other");
    }
}
