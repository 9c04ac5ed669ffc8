use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

//
// ─── SCORE ─────────────────────────────────────────────────────────────────────
//

/// A `{correct, total}` pair, used for sessions and category badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Score {
    pub correct: u64,
    pub total: u64,
}

/// Accuracy band for a category badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Untried,
    Weak,
    Fair,
    Strong,
}

impl Score {
    #[must_use]
    pub fn new(correct: u64, total: u64) -> Self {
        Self { correct, total }
    }

    /// Records one answer.
    pub fn record(&mut self, correct: bool) {
        if correct {
            self.correct = self.correct.saturating_add(1);
        }
        self.total = self.total.saturating_add(1);
    }

    /// Fraction of correct answers; `0.0` when nothing was answered.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }

    /// Strong at 80% or better, Fair at 40% or better, Weak below.
    #[must_use]
    pub fn band(&self) -> ScoreBand {
        let rate = self.accuracy();
        if rate >= 0.8 {
            ScoreBand::Strong
        } else if rate >= 0.4 {
            ScoreBand::Fair
        } else {
            ScoreBand::Weak
        }
    }
}

//
// ─── HISTORY ───────────────────────────────────────────────────────────────────
//

/// One submitted answer. Older blobs used `qId` / `res` / `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    #[serde(alias = "qId")]
    pub question_id: String,
    #[serde(alias = "res")]
    pub result: bool,
    /// Milliseconds since the Unix epoch.
    #[serde(alias = "date")]
    pub timestamp: i64,
}

//
// ─── USER STATS ────────────────────────────────────────────────────────────────
//

/// Persisted progress aggregate.
///
/// Every field falls back to its default when missing or `null`, so partial
/// and older blobs still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub correct: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub history: Vec<HistoryRecord>,
    /// Last session score per category id; replaced, never summed.
    #[serde(default, deserialize_with = "null_as_default")]
    pub category_scores: BTreeMap<String, Score>,
}

impl UserStats {
    /// Counts one answer globally and appends it to history.
    pub fn record_answer(&mut self, question_id: &str, correct: bool, timestamp: i64) {
        if correct {
            self.correct = self.correct.saturating_add(1);
        }
        self.total = self.total.saturating_add(1);
        self.history.push(HistoryRecord {
            question_id: question_id.to_owned(),
            result: correct,
            timestamp,
        });
    }

    /// Overwrites the stored score for `category_id`.
    pub fn replace_category_score(&mut self, category_id: &str, score: Score) {
        self.category_scores.insert(category_id.to_owned(), score);
    }

    #[must_use]
    pub fn category_score(&self, category_id: &str) -> Option<Score> {
        self.category_scores.get(category_id).copied()
    }

    /// Badge band for a category; `Untried` when no session was recorded.
    #[must_use]
    pub fn category_band(&self, category_id: &str) -> ScoreBand {
        self.category_score(category_id)
            .map_or(ScoreBand::Untried, |score| score.band())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
