use drill_core::model::{ConcreteQuestion, Score};

use super::plan::SessionMode;
use super::progress::SessionProgress;
use crate::error::SessionError;

/// Ordered questions of one running session.
///
/// The question list never changes after construction; only the cursor moves.
/// The cursor may only advance past a question once it has been answered.
#[derive(Debug, Clone)]
pub struct SessionQueue {
    mode: SessionMode,
    title: String,
    questions: Vec<ConcreteQuestion>,
    cursor: usize,
    score: Score,
    answered_current: bool,
}

impl SessionQueue {
    #[must_use]
    pub fn new(mode: SessionMode, questions: Vec<ConcreteQuestion>) -> Self {
        let title = mode.title();
        Self {
            mode,
            title,
            questions,
            cursor: 0,
            score: Score::default(),
            answered_current: false,
        }
    }

    #[must_use]
    pub fn mode(&self) -> &SessionMode {
        &self.mode
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn questions(&self) -> &[ConcreteQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The question on screen, or `None` once the session is finished.
    #[must_use]
    pub fn current(&self) -> Option<&ConcreteQuestion> {
        self.questions.get(self.cursor)
    }

    /// Zero-based index of the current question.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Correct and attempted answers so far.
    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.answered_current
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.questions.len()
    }

    /// Counts one graded submission for the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the session has no current question.
    pub fn record(&mut self, correct: bool) -> Result<(), SessionError> {
        if self.is_finished() {
            return Err(SessionError::Completed);
        }
        self.score.record(correct);
        self.answered_current = true;
        Ok(())
    }

    /// Moves to the next question and reports whether one remains.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the session is already finished, or
    /// `SessionError::NotAnswered` if the current question has no submission.
    pub fn advance(&mut self) -> Result<bool, SessionError> {
        if self.is_finished() {
            return Err(SessionError::Completed);
        }
        if !self.answered_current {
            return Err(SessionError::NotAnswered);
        }
        self.cursor += 1;
        self.answered_current = false;
        Ok(!self.is_finished())
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.questions.len();
        SessionProgress {
            position: (self.cursor + 1).min(total),
            total,
            correct: self.score.correct,
            answered: self.score.total,
            is_complete: self.is_finished(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::Catalog;

    fn queue(len: usize) -> SessionQueue {
        let catalog = Catalog::standard();
        let questions = catalog
            .templates()
            .iter()
            .take(len)
            .map(|t| t.instantiate(1))
            .collect();
        SessionQueue::new(SessionMode::sub("cash"), questions)
    }

    #[test]
    fn advance_requires_an_answer() {
        let mut q = queue(2);
        assert!(matches!(q.advance(), Err(SessionError::NotAnswered)));

        q.record(true).unwrap();
        assert!(q.advance().unwrap());
        assert_eq!(q.position(), 1);
        assert!(!q.is_answered());

        q.record(false).unwrap();
        assert!(!q.advance().unwrap());
        assert!(q.is_finished());
        assert!(q.current().is_none());
        assert!(matches!(q.advance(), Err(SessionError::Completed)));
        assert!(matches!(q.record(true), Err(SessionError::Completed)));
    }

    #[test]
    fn progress_tracks_score_and_position() {
        let mut q = queue(3);
        q.record(true).unwrap();
        q.advance().unwrap();
        q.record(false).unwrap();

        let progress = q.progress();
        assert_eq!(progress.position, 2);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.correct, 1);
        assert_eq!(progress.answered, 2);
        assert!(!progress.is_complete);
        assert_eq!(q.score(), Score::new(1, 2));
        assert_eq!(q.title(), "現金");
    }
}
