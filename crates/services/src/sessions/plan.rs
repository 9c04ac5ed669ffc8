use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;

use drill_core::Catalog;
use drill_core::model::QuestionTemplate;
use drill_core::model::category::{find_major, find_sub};

use super::queue::SessionQueue;
use crate::config::QuizConfig;
use crate::error::SessionError;

const COMPREHENSIVE_TITLE: &str = "総合演習";

//
// ─── MODE ──────────────────────────────────────────────────────────────────────
//

/// Which slice of the catalog a session draws from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SessionMode {
    /// Every template.
    Comprehensive,
    /// Templates of one major category id.
    Major(String),
    /// Templates of one sub category id.
    Sub(String),
}

impl SessionMode {
    #[must_use]
    pub fn major(id: impl Into<String>) -> Self {
        Self::Major(id.into())
    }

    #[must_use]
    pub fn sub(id: impl Into<String>) -> Self {
        Self::Sub(id.into())
    }

    /// Category whose last score this session replaces; `None` for comprehensive.
    #[must_use]
    pub fn category_id(&self) -> Option<&str> {
        match self {
            SessionMode::Comprehensive => None,
            SessionMode::Major(id) | SessionMode::Sub(id) => Some(id),
        }
    }

    /// Header shown while the session runs. Unknown ids fall back to the raw id.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            SessionMode::Comprehensive => COMPREHENSIVE_TITLE.to_owned(),
            SessionMode::Major(id) => {
                let title = find_major(id).map_or(id.as_str(), |major| major.title);
                format!("{title} (まとめ)")
            }
            SessionMode::Sub(id) => find_sub(id)
                .map_or(id.as_str(), |(_, sub)| sub.title)
                .to_owned(),
        }
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionMode::Comprehensive => f.write_str("comprehensive"),
            SessionMode::Major(id) => write!(f, "major:{id}"),
            SessionMode::Sub(id) => write!(f, "sub:{id}"),
        }
    }
}

//
// ─── BUILDER ───────────────────────────────────────────────────────────────────
//

/// Picks and mutates the questions of one session.
///
/// Each selected template gets its own seed drawn from the builder's rng, so a
/// builder created `with_seed` reproduces the same sessions in the same order.
pub struct SessionBuilder<'a> {
    catalog: &'a Catalog,
    rng: StdRng,
    comprehensive_quota: usize,
    focused_quota: usize,
}

impl<'a> SessionBuilder<'a> {
    /// Builder seeded from the operating system.
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        let defaults = QuizConfig::default();
        Self {
            catalog,
            rng: StdRng::from_os_rng(),
            comprehensive_quota: defaults.comprehensive_quota(),
            focused_quota: defaults.focused_quota(),
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Takes the session sizes from `config`.
    #[must_use]
    pub fn with_quotas(mut self, config: &QuizConfig) -> Self {
        self.comprehensive_quota = config.comprehensive_quota();
        self.focused_quota = config.focused_quota();
        self
    }

    /// Builds a queue for `mode`.
    ///
    /// Sub category pools smaller than the quota are repeated until they can
    /// fill it, so the same template may appear more than once with
    /// independently drawn amounts.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestionsAvailable` if the mode selects no templates.
    pub fn build(&mut self, mode: SessionMode) -> Result<SessionQueue, SessionError> {
        let (mut pool, quota) = self.pool(&mode);
        if pool.is_empty() {
            return Err(SessionError::NoQuestionsAvailable(mode.title()));
        }

        pool.shuffle(&mut self.rng);
        pool.truncate(quota);

        let questions = pool
            .into_iter()
            .map(|template| template.instantiate(self.rng.random::<u64>()))
            .collect();

        Ok(SessionQueue::new(mode, questions))
    }

    fn pool(&self, mode: &SessionMode) -> (Vec<QuestionTemplate>, usize) {
        match mode {
            SessionMode::Comprehensive => (
                self.catalog.templates().to_vec(),
                self.comprehensive_quota,
            ),
            SessionMode::Major(id) => (
                self.catalog.in_major(id).copied().collect(),
                self.focused_quota,
            ),
            SessionMode::Sub(id) => {
                let pool: Vec<_> = self.catalog.in_sub(id).copied().collect();
                (tile(pool, self.focused_quota), self.focused_quota)
            }
        }
    }
}

/// Repeats `pool` until it holds at least `quota` items.
fn tile<T: Copy>(pool: Vec<T>, quota: usize) -> Vec<T> {
    if pool.is_empty() || pool.len() >= quota {
        return pool;
    }
    let copies = quota.div_ceil(pool.len());
    let mut tiled = Vec::with_capacity(pool.len() * copies);
    for _ in 0..copies {
        tiled.extend_from_slice(&pool);
    }
    tiled
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ids(queue: &SessionQueue) -> Vec<&'static str> {
        queue
            .questions()
            .iter()
            .map(|q| q.template_id.as_str())
            .collect()
    }

    #[test]
    fn comprehensive_takes_ten_distinct_templates() {
        let catalog = Catalog::standard();
        let queue = SessionBuilder::new(&catalog)
            .with_seed(7)
            .build(SessionMode::Comprehensive)
            .unwrap();

        assert_eq!(queue.len(), 10);
        let distinct: HashSet<_> = ids(&queue).into_iter().collect();
        assert_eq!(distinct.len(), 10);
        assert_eq!(queue.title(), "総合演習");
    }

    #[test]
    fn major_mode_stays_inside_the_category() {
        let catalog = Catalog::standard();
        let queue = SessionBuilder::new(&catalog)
            .with_seed(3)
            .build(SessionMode::major("closing"))
            .unwrap();

        assert_eq!(queue.len(), 5);
        assert!(queue.questions().iter().all(|q| q.major.as_str() == "closing"));
        assert_eq!(queue.title(), "📊 決算整理 (まとめ)");
    }

    #[test]
    fn small_sub_pools_still_fill_the_quota() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.in_sub("petty_cash").count(), 2);

        let mut builder = SessionBuilder::new(&catalog).with_seed(11);
        for _ in 0..20 {
            let queue = builder
                .build(SessionMode::sub("petty_cash"))
                .unwrap();
            assert_eq!(queue.len(), 5);
            assert!(queue.questions().iter().all(|q| q.sub.as_str() == "petty_cash"));
            assert_eq!(queue.title(), "小口現金");
        }
    }

    #[test]
    fn large_sub_pools_pick_distinct_templates() {
        let catalog = Catalog::standard();
        assert!(catalog.in_sub("purchase_sales").count() >= 5);

        let mut builder = SessionBuilder::new(&catalog).with_seed(5);
        for _ in 0..20 {
            let queue = builder
                .build(SessionMode::sub("purchase_sales"))
                .unwrap();
            let distinct: HashSet<_> = ids(&queue).into_iter().collect();
            assert_eq!(distinct.len(), 5);
        }
    }

    #[test]
    fn tile_repeats_until_quota() {
        assert_eq!(tile(vec![1, 2], 5), vec![1, 2, 1, 2, 1, 2]);
        assert_eq!(tile(vec![1, 2, 3, 4, 5, 6], 5).len(), 6);
        assert!(tile(Vec::<u8>::new(), 5).is_empty());
    }

    #[test]
    fn same_seed_builds_the_same_session() {
        let catalog = Catalog::standard();
        let a = SessionBuilder::new(&catalog)
            .with_seed(42)
            .build(SessionMode::Comprehensive)
            .unwrap();
        let b = SessionBuilder::new(&catalog)
            .with_seed(42)
            .build(SessionMode::Comprehensive)
            .unwrap();
        assert_eq!(a.questions(), b.questions());
    }

    #[test]
    fn unknown_category_has_no_questions() {
        let catalog = Catalog::standard();
        let err = SessionBuilder::new(&catalog)
            .build(SessionMode::sub("nope"))
            .unwrap_err();
        assert!(matches!(err, SessionError::NoQuestionsAvailable(title) if title == "nope"));
    }

    #[test]
    fn quotas_follow_config() {
        let catalog = Catalog::standard();
        let config = QuizConfig::default()
            .with_comprehensive_quota(3)
            .with_focused_quota(2);
        let mut builder = SessionBuilder::new(&catalog).with_quotas(&config).with_seed(1);
        assert_eq!(builder.build(SessionMode::Comprehensive).unwrap().len(), 3);
        assert_eq!(builder.build(SessionMode::sub("loan")).unwrap().len(), 2);
    }
}
