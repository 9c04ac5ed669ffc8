use drill_core::Error as CoreError;
use drill_core::catalog::CatalogError;
use drill_core::model::category::{find_major, find_sub};
use storage::repository::Storage;

use crate::config::QuizConfig;
use crate::controller::QuizController;
use crate::error::AppServicesError;
use crate::sessions::SessionMode;
use crate::Clock;

/// Assembles the storage backend and configuration the app runs on.
#[derive(Clone)]
pub struct AppServices {
    storage: Storage,
    config: QuizConfig,
    clock: Clock,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the database cannot be opened or migrated.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        config: QuizConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self {
            storage,
            config,
            clock,
        })
    }

    /// Build services over a throwaway in-memory store.
    #[must_use]
    pub fn in_memory(clock: Clock, config: QuizConfig) -> Self {
        Self {
            storage: Storage::in_memory(),
            config,
            clock,
        }
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Loads persisted stats and returns a controller sitting on the menu.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the stats blob cannot be read.
    pub async fn controller(&self) -> Result<QuizController, AppServicesError> {
        let controller =
            QuizController::load(self.storage.kv.clone(), self.config.clone(), self.clock).await?;
        Ok(controller)
    }
}

/// Resolves a mode name (`comprehensive`, `major`, `sub`) and category id.
///
/// # Errors
///
/// Returns `AppServicesError::Core` if the id is not a category of that kind
/// or the mode name is unknown.
pub fn resolve_mode(kind: &str, filter: Option<&str>) -> Result<SessionMode, AppServicesError> {
    let unknown = |id: &str| {
        AppServicesError::Core(CoreError::from(CatalogError::UnknownCategory(id.to_owned())))
    };
    match (kind, filter) {
        ("comprehensive" | "all", _) => Ok(SessionMode::Comprehensive),
        ("major", Some(id)) if find_major(id).is_some() => Ok(SessionMode::major(id)),
        ("sub", Some(id)) if find_sub(id).is_some() => Ok(SessionMode::sub(id)),
        (_, Some(id)) => Err(unknown(id)),
        (other, None) => Err(unknown(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::Catalog;
    use drill_core::time::fixed_clock;

    #[test]
    fn modes_resolve_against_the_category_tree() {
        assert_eq!(resolve_mode("comprehensive", None).unwrap(), SessionMode::Comprehensive);
        assert_eq!(
            resolve_mode("major", Some("closing")).unwrap(),
            SessionMode::major("closing")
        );
        assert_eq!(
            resolve_mode("sub", Some("petty_cash")).unwrap(),
            SessionMode::sub("petty_cash")
        );
        assert!(resolve_mode("major", Some("petty_cash")).is_err());
        assert!(resolve_mode("sub", None).is_err());
    }

    #[tokio::test]
    async fn in_memory_services_build_a_controller() {
        let services = AppServices::in_memory(fixed_clock(), QuizConfig::default());
        let controller = services.controller().await.unwrap();
        assert_eq!(controller.stats().total, 0);
        assert_eq!(controller.catalog().len(), Catalog::standard().len());
    }
}
