use std::sync::Arc;

use drill_core::model::{Score, UserStats};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use storage::repository::{KeyValueStore, StorageError};
use tracing::{debug, warn};

use crate::sessions::SessionQueue;
use crate::Clock;

/// Owns the persisted progress aggregate and flushes it after every change.
pub struct StatsTracker {
    store: Arc<dyn KeyValueStore>,
    key: String,
    clock: Clock,
    stats: UserStats,
}

impl StatsTracker {
    /// Loads the aggregate stored under `key`.
    ///
    /// A missing blob yields defaults. A stored blob is merged over the
    /// defaults one top-level field at a time, so a malformed field only
    /// loses that field. Anything dropped is logged and disappears from the
    /// store on the next save.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    pub async fn load(
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        clock: Clock,
    ) -> Result<Self, StorageError> {
        let key = key.into();
        let stats = match store.get(&key).await? {
            Some(blob) => parse_stats(&key, &blob),
            None => UserStats::default(),
        };
        Ok(Self {
            store,
            key,
            clock,
            stats,
        })
    }

    #[must_use]
    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    /// Counts one submission globally, appends it to history and saves.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the aggregate cannot be written.
    pub async fn record_answer(
        &mut self,
        question_id: &str,
        correct: bool,
    ) -> Result<(), StorageError> {
        let timestamp = self.clock.now_millis();
        self.stats.record_answer(question_id, correct, timestamp);
        self.save().await
    }

    /// Replaces the category score with the finished session's score and saves.
    ///
    /// Comprehensive sessions have no category and leave the aggregate
    /// untouched. Returns the category id that was updated, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the aggregate cannot be written.
    pub async fn record_session_end(
        &mut self,
        queue: &SessionQueue,
    ) -> Result<Option<String>, StorageError> {
        let Some(category_id) = queue.mode().category_id() else {
            return Ok(None);
        };
        self.stats.replace_category_score(category_id, queue.score());
        self.save().await?;
        Ok(Some(category_id.to_owned()))
    }

    /// Restores the default aggregate and saves it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the aggregate cannot be written.
    pub async fn reset(&mut self) -> Result<(), StorageError> {
        self.stats = UserStats::default();
        self.save().await
    }

    /// Writes the whole aggregate as one blob.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails, or the store's
    /// error if the write fails.
    pub async fn save(&self) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&self.stats)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.store.set(&self.key, &blob).await?;
        debug!(key = %self.key, total = self.stats.total, "stats saved");
        Ok(())
    }
}

/// Merges a stored blob over the default aggregate, field by field.
///
/// A top-level field that is missing or malformed keeps its default without
/// affecting the others. History records and category scores that fail to
/// parse are dropped one by one.
fn parse_stats(key: &str, blob: &str) -> UserStats {
    let fields = match serde_json::from_str::<Value>(blob) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => {
            warn!(%key, "discarding stats blob that is not an object");
            return UserStats::default();
        }
        Err(err) => {
            warn!(%key, error = %err, "discarding unreadable stats blob");
            return UserStats::default();
        }
    };

    let mut stats = UserStats::default();
    if let Some(correct) = field(key, &fields, "correct") {
        stats.correct = correct;
    }
    if let Some(total) = field(key, &fields, "total") {
        stats.total = total;
    }
    if let Some(Value::Array(records)) = fields.get("history") {
        stats.history = records.iter().filter_map(parse_entry).collect();
        let dropped = records.len() - stats.history.len();
        if dropped > 0 {
            warn!(%key, dropped, "skipping unreadable history records");
        }
    }
    if let Some(Value::Object(scores)) = fields.get("categoryScores") {
        for (category_id, score) in scores {
            match parse_entry::<Score>(score) {
                Some(score) => stats.replace_category_score(category_id, score),
                None => warn!(%key, %category_id, "skipping unreadable category score"),
            }
        }
    }
    stats
}

fn field<T: DeserializeOwned>(key: &str, fields: &Map<String, Value>, name: &str) -> Option<T> {
    let value = fields.get(name).filter(|value| !value.is_null())?;
    let parsed = parse_entry(value);
    if parsed.is_none() {
        warn!(%key, field = name, "keeping default for unreadable stats field");
    }
    parsed
}

fn parse_entry<T: DeserializeOwned>(value: &Value) -> Option<T> {
    T::deserialize(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::{SessionBuilder, SessionMode};
    use async_trait::async_trait;
    use drill_core::Catalog;
    use drill_core::model::ScoreBand;
    use drill_core::time::{FIXED_TEST_TIMESTAMP, fixed_clock};
    use storage::repository::InMemoryStore;

    const KEY: &str = "stats";

    struct FailingStore;

    #[async_trait]
    impl KeyValueStore for FailingStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Connection("disk full".into()))
        }
    }

    async fn tracker(store: &InMemoryStore) -> StatsTracker {
        StatsTracker::load(Arc::new(store.clone()), KEY, fixed_clock())
            .await
            .unwrap()
    }

    fn answered_session(mode: SessionMode, correct: usize) -> SessionQueue {
        let catalog = Catalog::standard();
        let mut queue = SessionBuilder::new(&catalog)
            .with_seed(9)
            .build(mode)
            .unwrap();
        for i in 0..queue.len() {
            queue.record(i < correct).unwrap();
            queue.advance().unwrap();
        }
        queue
    }

    #[tokio::test]
    async fn record_answer_persists_history() {
        let store = InMemoryStore::new();
        let mut stats = tracker(&store).await;
        stats.record_answer("101", true).await.unwrap();
        stats.record_answer("102", false).await.unwrap();

        let reloaded = tracker(&store).await;
        assert_eq!(reloaded.stats().correct, 1);
        assert_eq!(reloaded.stats().total, 2);
        assert_eq!(
            reloaded.stats().history[0].timestamp,
            FIXED_TEST_TIMESTAMP * 1000
        );
    }

    #[tokio::test]
    async fn session_end_replaces_category_score() {
        let store = InMemoryStore::new();
        let mut stats = tracker(&store).await;

        let first = answered_session(SessionMode::sub("loan"), 5);
        let updated = stats.record_session_end(&first).await.unwrap();
        assert_eq!(updated.as_deref(), Some("loan"));
        assert_eq!(stats.stats().category_band("loan"), ScoreBand::Strong);

        let second = answered_session(SessionMode::sub("loan"), 1);
        stats.record_session_end(&second).await.unwrap();

        let reloaded = tracker(&store).await;
        assert_eq!(reloaded.stats().category_score("loan"), Some(Score::new(1, 5)));
    }

    #[tokio::test]
    async fn comprehensive_sessions_leave_categories_alone() {
        let store = InMemoryStore::new();
        let mut stats = tracker(&store).await;
        let queue = answered_session(SessionMode::Comprehensive, 10);

        assert_eq!(stats.record_session_end(&queue).await.unwrap(), None);
        assert!(stats.stats().category_scores.is_empty());
        assert_eq!(store.get(KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_blob_loads_as_defaults() {
        let store = InMemoryStore::new();
        store.set(KEY, "{not json").await.unwrap();

        let mut stats = tracker(&store).await;
        assert_eq!(stats.stats(), &UserStats::default());

        stats.record_answer("101", true).await.unwrap();
        let blob = store.get(KEY).await.unwrap().unwrap();
        assert!(blob.contains("\"questionId\":\"101\""));
    }

    #[tokio::test]
    async fn legacy_blob_is_merged_over_defaults() {
        let store = InMemoryStore::new();
        store
            .set(
                KEY,
                r#"{"correct":2,"total":3,"history":[{"qId":"101","res":true,"date":5}]}"#,
            )
            .await
            .unwrap();

        let stats = tracker(&store).await;
        assert_eq!(stats.stats().correct, 2);
        assert_eq!(stats.stats().history[0].question_id, "101");
        assert!(stats.stats().category_scores.is_empty());
    }

    #[tokio::test]
    async fn malformed_nested_values_only_lose_themselves() {
        let store = InMemoryStore::new();
        store
            .set(
                KEY,
                r#"{
                    "correct": 12,
                    "total": 20,
                    "history": [
                        {"qId": "101", "res": true},
                        {"questionId": "102", "result": false, "timestamp": 7}
                    ],
                    "categoryScores": {
                        "cash": {"correct": 4, "total": 5},
                        "loan": {"correct": null, "total": 5}
                    }
                }"#,
            )
            .await
            .unwrap();

        let mut stats = tracker(&store).await;
        assert_eq!(stats.stats().correct, 12);
        assert_eq!(stats.stats().total, 20);
        assert_eq!(stats.stats().history.len(), 1);
        assert_eq!(stats.stats().history[0].question_id, "102");
        assert_eq!(stats.stats().category_score("cash"), Some(Score::new(4, 5)));
        assert_eq!(stats.stats().category_score("loan"), None);

        stats.record_answer("103", true).await.unwrap();
        let reloaded = tracker(&store).await;
        assert_eq!(reloaded.stats().correct, 13);
        assert_eq!(reloaded.stats().total, 21);
        assert_eq!(reloaded.stats().category_score("cash"), Some(Score::new(4, 5)));
    }

    #[tokio::test]
    async fn malformed_top_level_field_keeps_its_default() {
        let store = InMemoryStore::new();
        store
            .set(
                KEY,
                r#"{"correct":"many","total":9,"history":{"oops":1},"categoryScores":{"notes":{"correct":1,"total":5}}}"#,
            )
            .await
            .unwrap();

        let stats = tracker(&store).await;
        assert_eq!(stats.stats().correct, 0);
        assert_eq!(stats.stats().total, 9);
        assert!(stats.stats().history.is_empty());
        assert_eq!(stats.stats().category_score("notes"), Some(Score::new(1, 5)));
    }

    #[tokio::test]
    async fn non_object_blob_loads_as_defaults() {
        let store = InMemoryStore::new();
        store.set(KEY, "[1,2,3]").await.unwrap();

        let stats = tracker(&store).await;
        assert_eq!(stats.stats(), &UserStats::default());
    }

    #[tokio::test]
    async fn reset_clears_everything() {
        let store = InMemoryStore::new();
        let mut stats = tracker(&store).await;
        stats.record_answer("101", true).await.unwrap();
        stats.reset().await.unwrap();

        let reloaded = tracker(&store).await;
        assert_eq!(reloaded.stats(), &UserStats::default());
    }

    #[tokio::test]
    async fn write_failures_surface() {
        let mut stats = StatsTracker::load(Arc::new(FailingStore), KEY, fixed_clock())
            .await
            .unwrap();
        let err = stats.record_answer("101", true).await.unwrap_err();
        assert!(matches!(err, StorageError::Connection(_)));
        assert_eq!(stats.stats().total, 1);
    }
}
