use std::fmt;

use crate::model::Side;
use crate::randomizer::format_amount;

/// Amount shown in an explanation step.
///
/// `Pending` marks a line whose value is revealed by a later step; the later
/// step overwrites it with `Known`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepAmount {
    Known(u64),
    Pending,
}

impl StepAmount {
    #[must_use]
    pub fn known(self) -> Option<u64> {
        match self {
            StepAmount::Known(amount) => Some(amount),
            StepAmount::Pending => None,
        }
    }
}

impl From<u64> for StepAmount {
    fn from(amount: u64) -> Self {
        StepAmount::Known(amount)
    }
}

impl fmt::Display for StepAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepAmount::Known(amount) => f.write_str(&format_amount(*amount)),
            StepAmount::Pending => f.write_str("???"),
        }
    }
}

/// One account line revealed by an explanation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEntry {
    pub side: Side,
    pub account: String,
    pub amount: StepAmount,
}

/// A single frame of the worked explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanationStep {
    pub highlight: Option<String>,
    pub entries: Vec<StepEntry>,
    pub comment: String,
}

impl ExplanationStep {
    #[must_use]
    pub fn new(comment: impl Into<String>) -> Self {
        Self {
            highlight: None,
            entries: Vec::new(),
            comment: comment.into(),
        }
    }

    /// Sets the substring of the question text to highlight.
    #[must_use]
    pub fn highlight(mut self, span: impl Into<String>) -> Self {
        self.highlight = Some(span.into());
        self
    }

    #[must_use]
    pub fn debit(self, account: &str, amount: impl Into<StepAmount>) -> Self {
        self.entry(Side::Debit, account, amount.into())
    }

    #[must_use]
    pub fn credit(self, account: &str, amount: impl Into<StepAmount>) -> Self {
        self.entry(Side::Credit, account, amount.into())
    }

    #[must_use]
    pub fn entry(mut self, side: Side, account: &str, amount: StepAmount) -> Self {
        self.entries.push(StepEntry {
            side,
            account: account.to_owned(),
            amount,
        });
        self
    }

    /// True when this step touches `account` on `side`.
    #[must_use]
    pub fn touches(&self, side: Side, account: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.side == side && e.account == account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_entries_in_order() {
        let step = ExplanationStep::new("まずは目標額を計算しましょう。")
            .highlight("2% の貸倒れを見積もる")
            .credit("貸倒引当金", StepAmount::Pending)
            .debit("貸倒引当金繰入", 6_000);

        assert_eq!(step.highlight.as_deref(), Some("2% の貸倒れを見積もる"));
        assert_eq!(step.entries.len(), 2);
        assert_eq!(step.entries[0].amount, StepAmount::Pending);
        assert_eq!(step.entries[1].amount, StepAmount::Known(6_000));
        assert!(step.touches(Side::Credit, "貸倒引当金"));
        assert!(!step.touches(Side::Debit, "貸倒引当金"));
    }

    #[test]
    fn pending_amount_renders_as_placeholder() {
        assert_eq!(StepAmount::Pending.to_string(), "???");
        assert_eq!(StepAmount::Known(12_345).to_string(), "12,345");
        assert_eq!(StepAmount::Pending.known(), None);
    }
}
