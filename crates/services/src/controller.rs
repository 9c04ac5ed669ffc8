//! Single-writer quiz state machine driven by presentation commands.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

use drill_core::Catalog;
use drill_core::model::{ConcreteQuestion, LineId, Score, Side, UserStats};
use drill_core::player::{Frame, Tick};
use drill_core::verifier::{Submission, SubmissionWarning};
use drill_core::ExplanationPlayer;
use storage::repository::{KeyValueStore, StorageError};
use tracing::{debug, info};

use crate::answer_sheet::AnswerSheet;
use crate::config::QuizConfig;
use crate::error::{ControllerError, SessionError};
use crate::playback::PlaybackTimer;
use crate::sessions::{SessionBuilder, SessionMode, SessionQueue};
use crate::stats_tracker::StatsTracker;
use crate::Clock;

//
// ─── SCREENS & COMMANDS ────────────────────────────────────────────────────────
//

/// Where the user currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    /// Editing the answer sheet.
    Answering,
    /// A soft warning is waiting for confirm or cancel.
    Confirming(SubmissionWarning),
    /// The verdict for the current question is shown.
    Feedback { correct: bool },
    /// The explanation player is open over the feedback.
    Explaining { correct: bool },
    /// Session summary.
    Finished,
}

impl Screen {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Menu => "menu",
            Screen::Answering => "answering",
            Screen::Confirming(_) => "confirming",
            Screen::Feedback { .. } => "feedback",
            Screen::Explaining { .. } => "explaining",
            Screen::Finished => "finished",
        }
    }
}

/// Input from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start(SessionMode),
    SelectChoice(String),
    AssignAccount {
        side: Side,
        line: LineId,
        account: String,
    },
    /// Puts the selected choice on a line.
    PlaceSelection { side: Side, line: LineId },
    ClearAccount { side: Side, line: LineId },
    SetAmount { side: Side, line: LineId, amount: u64 },
    AddLine(Side),
    RemoveLine { side: Side, line: LineId },
    ResetQuestion,
    Submit,
    ConfirmSubmit,
    CancelSubmit,
    Advance,
    OpenExplanation,
    StepExplanation(isize),
    TogglePlay,
    CloseExplanation,
    BackToMenu,
    ResetStats,
}

impl Command {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start(_) => "start",
            Command::SelectChoice(_) => "select-choice",
            Command::AssignAccount { .. } => "assign-account",
            Command::PlaceSelection { .. } => "place-selection",
            Command::ClearAccount { .. } => "clear-account",
            Command::SetAmount { .. } => "set-amount",
            Command::AddLine(_) => "add-line",
            Command::RemoveLine { .. } => "remove-line",
            Command::ResetQuestion => "reset-question",
            Command::Submit => "submit",
            Command::ConfirmSubmit => "confirm-submit",
            Command::CancelSubmit => "cancel-submit",
            Command::Advance => "advance",
            Command::OpenExplanation => "open-explanation",
            Command::StepExplanation(_) => "step-explanation",
            Command::TogglePlay => "toggle-play",
            Command::CloseExplanation => "close-explanation",
            Command::BackToMenu => "back-to-menu",
            Command::ResetStats => "reset-stats",
        }
    }
}

/// What a dispatched command did, for the presentation layer to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed; re-render.
    Updated,
    SessionStarted { title: String, total: usize },
    NeedsConfirmation(SubmissionWarning),
    Graded { correct: bool },
    NextQuestion { position: usize },
    SessionFinished {
        score: Score,
        category_id: Option<String>,
    },
    Playback { playing: bool },
    StatsReset,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Owns the running session, the answer sheet, the explanation player and
/// the stats tracker. Every mutation goes through [`QuizController::dispatch`].
pub struct QuizController {
    catalog: Catalog,
    config: QuizConfig,
    rng: StdRng,
    tracker: StatsTracker,
    screen: Screen,
    queue: Option<SessionQueue>,
    sheet: AnswerSheet,
    pending: Option<Submission>,
    player: Option<ExplanationPlayer>,
    timer: PlaybackTimer,
}

impl QuizController {
    #[must_use]
    pub fn new(catalog: Catalog, tracker: StatsTracker, config: QuizConfig) -> Self {
        let timer = PlaybackTimer::new(config.tick_interval());
        Self {
            catalog,
            config,
            rng: StdRng::from_os_rng(),
            tracker,
            screen: Screen::Menu,
            queue: None,
            sheet: AnswerSheet::new(),
            pending: None,
            player: None,
            timer,
        }
    }

    /// Loads stats from `store` and builds a controller over the standard catalog.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    pub async fn load(
        store: Arc<dyn KeyValueStore>,
        config: QuizConfig,
        clock: Clock,
    ) -> Result<Self, StorageError> {
        let tracker = StatsTracker::load(store, config.storage_key(), clock).await?;
        Ok(Self::new(Catalog::standard(), tracker, config))
    }

    /// Makes session building reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn stats(&self) -> &UserStats {
        self.tracker.stats()
    }

    #[must_use]
    pub fn session(&self) -> Option<&SessionQueue> {
        self.queue.as_ref()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&ConcreteQuestion> {
        self.queue.as_ref().and_then(SessionQueue::current)
    }

    #[must_use]
    pub fn sheet(&self) -> &AnswerSheet {
        &self.sheet
    }

    #[must_use]
    pub fn player(&self) -> Option<&ExplanationPlayer> {
        self.player.as_ref()
    }

    /// Rendering data for the open explanation.
    #[must_use]
    pub fn frame(&self) -> Option<Frame> {
        self.player.as_ref().map(ExplanationPlayer::frame)
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.timer.is_running()
    }

    /// Applies one command.
    ///
    /// A failed command leaves the screen unchanged, except that storage
    /// failures are reported after the in-memory state was already updated.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::InvalidCommand` if the command does not apply
    /// to the current screen, or the sheet/session/storage error it hit.
    pub async fn dispatch(&mut self, command: Command) -> Result<Outcome, ControllerError> {
        debug!(command = command.name(), screen = self.screen.name(), "dispatch");
        match (self.screen, command) {
            (Screen::Menu | Screen::Finished, Command::Start(mode)) => self.start(mode),
            (Screen::Menu | Screen::Finished, Command::ResetStats) => {
                self.tracker.reset().await?;
                info!("stats reset");
                Ok(Outcome::StatsReset)
            }
            (_, Command::BackToMenu) => {
                self.close_player();
                self.queue = None;
                self.pending = None;
                self.screen = Screen::Menu;
                Ok(Outcome::Updated)
            }
            (Screen::Answering, command) if is_sheet_edit(&command) => self.edit_sheet(command),
            (Screen::Answering, Command::Submit) => {
                let submission = self.sheet.submission();
                if let Some(warning) = submission.warning {
                    self.pending = Some(submission);
                    self.screen = Screen::Confirming(warning);
                    return Ok(Outcome::NeedsConfirmation(warning));
                }
                self.grade(submission).await
            }
            (Screen::Confirming(_), Command::ConfirmSubmit) => {
                let submission = self
                    .pending
                    .take()
                    .unwrap_or_else(|| self.sheet.submission());
                self.grade(submission).await
            }
            (Screen::Confirming(_), Command::CancelSubmit) => {
                self.pending = None;
                self.screen = Screen::Answering;
                Ok(Outcome::Updated)
            }
            (Screen::Feedback { .. }, Command::Advance) => self.advance().await,
            (Screen::Feedback { correct }, Command::OpenExplanation) => {
                let question = self.current_question().ok_or(SessionError::Completed)?;
                self.player = Some(ExplanationPlayer::open(question));
                self.screen = Screen::Explaining { correct };
                Ok(Outcome::Updated)
            }
            (Screen::Explaining { .. }, Command::StepExplanation(delta)) => {
                self.player_mut()?.step(delta);
                Ok(Outcome::Updated)
            }
            (Screen::Explaining { .. }, Command::TogglePlay) => {
                let player = self.player_mut()?;
                player.toggle_play();
                let playing = player.is_playing();
                if playing {
                    self.timer.start();
                } else {
                    self.timer.stop();
                }
                Ok(Outcome::Playback { playing })
            }
            (Screen::Explaining { correct }, Command::CloseExplanation) => {
                self.close_player();
                self.screen = Screen::Feedback { correct };
                Ok(Outcome::Updated)
            }
            (screen, command) => Err(ControllerError::InvalidCommand {
                command: command.name(),
                screen: screen.name(),
            }),
        }
    }

    /// Resolves on the next auto-advance tick; never resolves while paused.
    pub async fn next_tick(&mut self) {
        self.timer.tick().await;
    }

    /// Advances the playing explanation one step, stopping the timer at the end.
    pub fn on_tick(&mut self) -> Tick {
        let tick = self.player.as_mut().map_or(Tick::Idle, ExplanationPlayer::tick);
        if tick != Tick::Advanced {
            self.timer.stop();
        }
        tick
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    fn start(&mut self, mode: SessionMode) -> Result<Outcome, ControllerError> {
        let seed = self.rng.random::<u64>();
        let queue = SessionBuilder::new(&self.catalog)
            .with_quotas(&self.config)
            .with_seed(seed)
            .build(mode)?;

        let title = queue.title().to_owned();
        let total = queue.len();
        info!(mode = %queue.mode(), total, "session started");

        self.queue = Some(queue);
        self.sheet = AnswerSheet::new();
        self.pending = None;
        self.screen = Screen::Answering;
        Ok(Outcome::SessionStarted { title, total })
    }

    fn edit_sheet(&mut self, command: Command) -> Result<Outcome, ControllerError> {
        match command {
            Command::SelectChoice(name) => self.sheet.select_choice(&name),
            Command::AssignAccount {
                side,
                line,
                account,
            } => self.sheet.assign(side, line, &account)?,
            Command::PlaceSelection { side, line } => {
                self.sheet.place_selection(side, line)?;
            }
            Command::ClearAccount { side, line } => self.sheet.clear_account(side, line)?,
            Command::SetAmount { side, line, amount } => {
                self.sheet.set_amount(side, line, amount)?;
            }
            Command::AddLine(side) => {
                self.sheet.add_line(side);
            }
            Command::RemoveLine { side, line } => self.sheet.remove_line(side, line)?,
            Command::ResetQuestion => self.sheet.reset(),
            other => {
                return Err(ControllerError::InvalidCommand {
                    command: other.name(),
                    screen: self.screen.name(),
                });
            }
        }
        Ok(Outcome::Updated)
    }

    async fn grade(&mut self, submission: Submission) -> Result<Outcome, ControllerError> {
        let queue = self.queue.as_mut().ok_or(SessionError::Completed)?;
        let question = queue.current().ok_or(SessionError::Completed)?;
        let question_id = question.template_id;
        let correct = submission.check(&question.correct_entries).correct;
        queue.record(correct)?;

        self.screen = Screen::Feedback { correct };
        info!(question = %question_id, correct, "answer graded");
        self.tracker
            .record_answer(question_id.as_str(), correct)
            .await?;
        Ok(Outcome::Graded { correct })
    }

    async fn advance(&mut self) -> Result<Outcome, ControllerError> {
        let queue = self.queue.as_mut().ok_or(SessionError::Completed)?;
        if queue.advance()? {
            let position = queue.position();
            self.sheet.reset();
            self.screen = Screen::Answering;
            return Ok(Outcome::NextQuestion { position });
        }

        let score = queue.score();
        self.screen = Screen::Finished;
        let category_id = self.tracker.record_session_end(queue).await?;
        info!(
            correct = score.correct,
            total = score.total,
            category = category_id.as_deref().unwrap_or("-"),
            "session finished"
        );
        Ok(Outcome::SessionFinished { score, category_id })
    }

    fn player_mut(&mut self) -> Result<&mut ExplanationPlayer, ControllerError> {
        self.player.as_mut().ok_or(ControllerError::ExplanationClosed)
    }

    fn close_player(&mut self) {
        self.timer.stop();
        self.player = None;
    }
}

fn is_sheet_edit(command: &Command) -> bool {
    matches!(
        command,
        Command::SelectChoice(_)
            | Command::AssignAccount { .. }
            | Command::PlaceSelection { .. }
            | Command::ClearAccount { .. }
            | Command::SetAmount { .. }
            | Command::AddLine(_)
            | Command::RemoveLine { .. }
            | Command::ResetQuestion
    )
}
