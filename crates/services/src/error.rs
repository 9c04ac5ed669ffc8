//! Shared error types for the services crate.

use thiserror::Error;

use drill_core::model::{LineId, Side};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by session building and progression.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for {0}")]
    NoQuestionsAvailable(String),
    #[error("session already completed")]
    Completed,
    #[error("current question has not been answered")]
    NotAnswered,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while editing an answer sheet.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SheetError {
    #[error("no {0} line with id {1}")]
    UnknownLine(Side, LineId),
    #[error("the last {0} line cannot be removed")]
    LastLine(Side),
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),
}

/// Errors emitted by `QuizController::dispatch`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ControllerError {
    #[error("{command} is not available on the {screen} screen")]
    InvalidCommand {
        command: &'static str,
        screen: &'static str,
    },
    #[error("the explanation is not open")]
    ExplanationClosed,
    #[error(transparent)]
    Sheet(#[from] SheetError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Core(#[from] drill_core::Error),
}
