use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::LineId;

//
// ─── SIDE ──────────────────────────────────────────────────────────────────────
//

/// The two sides of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Debit,
    Credit,
}

impl Side {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Debit => "debit",
            Side::Credit => "credit",
        }
    }

    /// Label used on the entry sheet (借方 / 貸方).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Side::Debit => "借方",
            Side::Credit => "貸方",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── JOURNAL ENTRY ─────────────────────────────────────────────────────────────
//

/// One account/amount line of a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub account_name: String,
    pub amount: u64,
}

impl JournalEntry {
    #[must_use]
    pub fn new(account_name: impl Into<String>, amount: u64) -> Self {
        Self {
            account_name: account_name.into(),
            amount,
        }
    }
}

/// Canonical answer for a question: both sides of the journal entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectEntries {
    pub debit: Vec<JournalEntry>,
    pub credit: Vec<JournalEntry>,
}

impl CorrectEntries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a debit line.
    #[must_use]
    pub fn debit(mut self, account: &str, amount: u64) -> Self {
        self.debit.push(JournalEntry::new(account, amount));
        self
    }

    /// Appends a credit line.
    #[must_use]
    pub fn credit(mut self, account: &str, amount: u64) -> Self {
        self.credit.push(JournalEntry::new(account, amount));
        self
    }

    #[must_use]
    pub fn side(&self, side: Side) -> &[JournalEntry] {
        match side {
            Side::Debit => &self.debit,
            Side::Credit => &self.credit,
        }
    }

    #[must_use]
    pub fn total(&self, side: Side) -> u64 {
        self.side(side).iter().map(|e| e.amount).sum()
    }

    /// True when debit and credit totals agree.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.total(Side::Debit) == self.total(Side::Credit)
    }

    /// Iterates every account name on either side.
    pub fn accounts(&self) -> impl Iterator<Item = &str> {
        self.debit
            .iter()
            .chain(self.credit.iter())
            .map(|e| e.account_name.as_str())
    }
}

//
// ─── ENTRY LINE ────────────────────────────────────────────────────────────────
//

/// A user-editable line on the answer sheet.
///
/// Unlike `JournalEntry`, a line may be half filled: no account yet, or an
/// account with amount `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLine {
    pub id: LineId,
    pub account: Option<String>,
    pub amount: u64,
}

impl EntryLine {
    #[must_use]
    pub fn empty(id: LineId) -> Self {
        Self {
            id,
            account: None,
            amount: 0,
        }
    }

    /// Account name, treating an empty string as unset.
    #[must_use]
    pub fn account_name(&self) -> Option<&str> {
        self.account.as_deref().filter(|name| !name.is_empty())
    }

    /// Both an account and a positive amount are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.account_name().is_some() && self.amount > 0
    }

    /// Exactly one of account and amount is present.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.account_name().is_some() != (self.amount > 0)
    }

    #[must_use]
    pub fn to_entry(&self) -> Option<JournalEntry> {
        if !self.is_complete() {
            return None;
        }
        self.account_name()
            .map(|name| JournalEntry::new(name, self.amount))
    }
}
