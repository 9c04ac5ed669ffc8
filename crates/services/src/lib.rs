#![forbid(unsafe_code)]

pub mod answer_sheet;
pub mod app_services;
pub mod config;
pub mod controller;
pub mod error;
pub mod playback;
pub mod sessions;
pub mod stats_tracker;

pub use drill_core::Clock;

pub use answer_sheet::AnswerSheet;
pub use app_services::{AppServices, resolve_mode};
pub use config::QuizConfig;
pub use controller::{Command, Outcome, QuizController, Screen};
pub use error::{AppServicesError, ControllerError, SessionError, SheetError};
pub use playback::PlaybackTimer;
pub use sessions::{SessionBuilder, SessionMode, SessionProgress, SessionQueue};
pub use stats_tracker::StatsTracker;
