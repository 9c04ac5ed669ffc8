//! Step-by-step playback of a question's worked explanation.
//!
//! The player is a plain state machine. It owns no timer: whoever drives it
//! calls [`ExplanationPlayer::tick`] on each interval while it is playing.

use crate::model::{ConcreteQuestion, ExplanationStep, Side, StepAmount};

const INTRO_COMMENT: &str =
    "それでは、仕訳のプロセスを順番に確認しましょう。再生ボタンを押すか、矢印で進めてください。";
const DEBIT_FALLBACK: &str = "借方の仕訳を確認します。";
const CREDIT_FALLBACK: &str = "貸方の仕訳を確認します。";
const SUMMARY_FALLBACK: &str = "全体の流れを確認しましょう。";

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Position in the step list; `Start` sits before the first step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCursor {
    Start,
    At(usize),
}

impl StepCursor {
    #[must_use]
    pub fn index(self) -> Option<usize> {
        match self {
            StepCursor::Start => None,
            StepCursor::At(i) => Some(i),
        }
    }
}

/// Result of one auto-advance tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not playing; nothing moved.
    Idle,
    Advanced,
    /// Landed on the last step and stopped playing.
    Finished,
}

#[derive(Debug, Clone)]
pub struct ExplanationPlayer {
    text: String,
    steps: Vec<ExplanationStep>,
    cursor: StepCursor,
    playing: bool,
}

impl ExplanationPlayer {
    /// Opens the explanation for `question`, generating fallback steps when the
    /// question has none.
    #[must_use]
    pub fn open(question: &ConcreteQuestion) -> Self {
        let steps = if question.has_steps() {
            question.steps.clone()
        } else {
            fallback_steps(question)
        };
        Self::new(question.text.clone(), steps)
    }

    #[must_use]
    pub fn new(text: impl Into<String>, steps: Vec<ExplanationStep>) -> Self {
        Self {
            text: text.into(),
            steps,
            cursor: StepCursor::Start,
            playing: false,
        }
    }

    #[must_use]
    pub fn cursor(&self) -> StepCursor {
        self.cursor
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn steps(&self) -> &[ExplanationStep] {
        &self.steps
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        match (self.cursor, self.last_index()) {
            (StepCursor::At(i), Some(last)) => i >= last,
            _ => false,
        }
    }

    fn last_index(&self) -> Option<usize> {
        self.steps.len().checked_sub(1)
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────────
    //

    pub fn next(&mut self) {
        self.step(1);
    }

    pub fn prev(&mut self) {
        self.step(-1);
    }

    /// Moves the cursor by `delta`, clamped to `[Start, last step]`.
    #[allow(clippy::cast_possible_wrap)]
    pub fn step(&mut self, delta: isize) {
        let Some(last) = self.last_index() else {
            return;
        };
        // Start is position -1.
        let current = self.cursor.index().map_or(-1, |i| i as isize);
        let target = current.saturating_add(delta).clamp(-1, last as isize);
        self.cursor = usize::try_from(target).map_or(StepCursor::Start, StepCursor::At);
    }

    pub fn restart(&mut self) {
        self.cursor = StepCursor::Start;
    }

    //
    // ─── PLAYBACK ──────────────────────────────────────────────────────────────
    //

    /// Starts auto-advance; from the last step playback restarts at `Start`.
    pub fn play(&mut self) {
        if self.steps.is_empty() {
            return;
        }
        if self.is_at_end() {
            self.restart();
        }
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle_play(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Advances one step while playing and stops on reaching the last step.
    pub fn tick(&mut self) -> Tick {
        if !self.playing {
            return Tick::Idle;
        }
        self.next();
        if self.is_at_end() {
            self.playing = false;
            Tick::Finished
        } else {
            Tick::Advanced
        }
    }

    //
    // ─── RENDERING ─────────────────────────────────────────────────────────────
    //

    /// Entries of one side accumulated over steps `0..=cursor`.
    ///
    /// A later entry for the same account overwrites the earlier amount, so a
    /// `Pending` line is replaced once its value is revealed.
    #[must_use]
    pub fn accumulate(&self, side: Side) -> Vec<ShownEntry> {
        let Some((current, before)) = self
            .cursor
            .index()
            .and_then(|i| self.steps.get(..=i))
            .and_then(<[ExplanationStep]>::split_last)
        else {
            return Vec::new();
        };
        let mut shown: Vec<ShownEntry> = Vec::new();
        for step in before.iter().chain(std::iter::once(current)) {
            for entry in step.entries.iter().filter(|e| e.side == side) {
                match shown.iter_mut().find(|s| s.account == entry.account) {
                    Some(existing) => existing.amount = entry.amount,
                    None => shown.push(ShownEntry {
                        account: entry.account.clone(),
                        amount: entry.amount,
                        is_new: false,
                    }),
                }
            }
        }
        for entry in &mut shown {
            entry.is_new = current.touches(side, &entry.account);
        }
        shown
    }

    #[must_use]
    pub fn frame(&self) -> Frame {
        let current = self.cursor.index().and_then(|i| self.steps.get(i));
        let narrative = Narrative::split(
            &self.text,
            current.and_then(|step| step.highlight.as_deref()),
        );
        let comment = current.map_or_else(|| INTRO_COMMENT.to_owned(), |s| s.comment.clone());
        let dots = (0..self.steps.len())
            .map(|j| match self.cursor.index() {
                Some(i) if j == i => Dot::Current,
                Some(i) if j < i => Dot::Done,
                _ => Dot::Upcoming,
            })
            .collect();
        let control = if self.playing {
            PlayControl::Pause
        } else if self.is_at_end() {
            PlayControl::Replay
        } else {
            PlayControl::Play
        };

        Frame {
            cursor: self.cursor,
            narrative,
            debit: self.accumulate(Side::Debit),
            credit: self.accumulate(Side::Credit),
            comment,
            dots,
            can_prev: self.cursor != StepCursor::Start,
            can_next: !self.steps.is_empty() && !self.is_at_end(),
            control,
        }
    }
}

/// Steps used when a question carries no authored explanation.
///
/// A side with no entries gets no step; the summary step always closes.
fn fallback_steps(question: &ConcreteQuestion) -> Vec<ExplanationStep> {
    let entries = &question.correct_entries;
    let mut steps = Vec::with_capacity(3);
    if !entries.debit.is_empty() {
        let step = entries
            .debit
            .iter()
            .fold(ExplanationStep::new(DEBIT_FALLBACK), |step, entry| {
                step.debit(&entry.account_name, entry.amount)
            });
        steps.push(step);
    }
    if !entries.credit.is_empty() {
        let step = entries
            .credit
            .iter()
            .fold(ExplanationStep::new(CREDIT_FALLBACK), |step, entry| {
                step.credit(&entry.account_name, entry.amount)
            });
        steps.push(step);
    }
    let summary = if question.explanation.is_empty() {
        SUMMARY_FALLBACK.to_owned()
    } else {
        question.explanation.clone()
    };
    steps.push(ExplanationStep::new(summary));
    steps
}

//
// ─── FRAME ─────────────────────────────────────────────────────────────────────
//

/// An account line as shown in the T-account view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownEntry {
    pub account: String,
    pub amount: StepAmount,
    /// Touched by the current step.
    pub is_new: bool,
}

/// Question text split around the highlighted span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    pub before: String,
    pub highlight: Option<String>,
    pub after: String,
}

impl Narrative {
    fn split(text: &str, span: Option<&str>) -> Self {
        let found = span
            .filter(|s| !s.is_empty())
            .and_then(|s| text.find(s).map(|at| (at, s)));
        match found {
            Some((at, span)) => Self {
                before: text[..at].to_owned(),
                highlight: Some(span.to_owned()),
                after: text[at + span.len()..].to_owned(),
            },
            None => Self {
                before: text.to_owned(),
                highlight: None,
                after: String::new(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dot {
    Done,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayControl {
    Play,
    Pause,
    Replay,
}

/// Everything needed to render the player at its current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub cursor: StepCursor,
    pub narrative: Narrative,
    pub debit: Vec<ShownEntry>,
    pub credit: Vec<ShownEntry>,
    pub comment: String,
    pub dots: Vec<Dot>,
    pub can_prev: bool,
    pub can_next: bool,
    pub control: PlayControl,
}
