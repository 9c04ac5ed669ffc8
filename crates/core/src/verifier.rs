//! Grading of a submitted answer sheet against a question's canonical entries.

use crate::model::{CorrectEntries, EntryLine, JournalEntry, Side};

/// Why a submission should be confirmed before it is graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionWarning {
    /// No complete line on either side.
    Empty,
    /// Some line has an account without an amount, or an amount without an account.
    IncompleteLines,
}

/// The graded part of an answer sheet: complete lines only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub debit: Vec<JournalEntry>,
    pub credit: Vec<JournalEntry>,
    pub warning: Option<SubmissionWarning>,
}

impl Submission {
    #[must_use]
    pub fn side(&self, side: Side) -> &[JournalEntry] {
        match side {
            Side::Debit => &self.debit,
            Side::Credit => &self.credit,
        }
    }

    #[must_use]
    pub fn needs_confirmation(&self) -> bool {
        self.warning.is_some()
    }

    /// Grades this submission; the warning does not affect the verdict.
    #[must_use]
    pub fn check(&self, correct: &CorrectEntries) -> Verdict {
        check(&self.debit, &self.credit, correct)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub correct: bool,
}

/// Drops blank and half-filled lines and flags sheets worth confirming.
#[must_use]
pub fn prefilter(debit: &[EntryLine], credit: &[EntryLine]) -> Submission {
    let debit_entries: Vec<_> = debit.iter().filter_map(EntryLine::to_entry).collect();
    let credit_entries: Vec<_> = credit.iter().filter_map(EntryLine::to_entry).collect();

    let warning = if debit_entries.is_empty() && credit_entries.is_empty() {
        Some(SubmissionWarning::Empty)
    } else if debit.iter().chain(credit).any(EntryLine::is_partial) {
        Some(SubmissionWarning::IncompleteLines)
    } else {
        None
    };

    Submission {
        debit: debit_entries,
        credit: credit_entries,
        warning,
    }
}

/// Exact, order-insensitive comparison of both sides.
///
/// Entries with an empty account or a zero amount are ignored on the
/// submitted side. There is no partial credit and no tolerance.
#[must_use]
pub fn check(debit: &[JournalEntry], credit: &[JournalEntry], correct: &CorrectEntries) -> Verdict {
    let correct = same_entries(debit, &correct.debit) && same_entries(credit, &correct.credit);
    Verdict { correct }
}

fn same_entries(submitted: &[JournalEntry], expected: &[JournalEntry]) -> bool {
    normalized(submitted) == normalized(expected)
}

fn normalized(entries: &[JournalEntry]) -> Vec<(&str, u64)> {
    let mut pairs: Vec<_> = entries
        .iter()
        .filter(|e| !e.account_name.is_empty() && e.amount > 0)
        .map(|e| (e.account_name.as_str(), e.amount))
        .collect();
    pairs.sort_unstable();
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineId;

    fn line(id: u64, account: Option<&str>, amount: u64) -> EntryLine {
        EntryLine {
            id: LineId::new(id),
            account: account.map(str::to_owned),
            amount,
        }
    }

    fn compound() -> CorrectEntries {
        CorrectEntries::new()
            .debit("当座預金", 990_000)
            .debit("支払利息", 10_000)
            .credit("借入金", 1_000_000)
    }

    #[test]
    fn capital_contribution_is_accepted() {
        let correct = CorrectEntries::new()
            .debit("現金", 2_500_000)
            .credit("資本金", 2_500_000);
        let verdict = check(
            &[JournalEntry::new("現金", 2_500_000)],
            &[JournalEntry::new("資本金", 2_500_000)],
            &correct,
        );
        assert!(verdict.correct);
    }

    #[test]
    fn order_within_a_side_does_not_matter() {
        let credit = [JournalEntry::new("借入金", 1_000_000)];
        let a = [
            JournalEntry::new("当座預金", 990_000),
            JournalEntry::new("支払利息", 10_000),
        ];
        let b = [a[1].clone(), a[0].clone()];
        assert!(check(&a, &credit, &compound()).correct);
        assert!(check(&b, &credit, &compound()).correct);
    }

    #[test]
    fn duplicate_accounts_compare_by_amount_too() {
        let correct = CorrectEntries::new()
            .debit("仕入", 100)
            .debit("仕入", 200)
            .credit("買掛金", 300);
        let credit = [JournalEntry::new("買掛金", 300)];
        let forward = [JournalEntry::new("仕入", 100), JournalEntry::new("仕入", 200)];
        let reverse = [JournalEntry::new("仕入", 200), JournalEntry::new("仕入", 100)];
        assert!(check(&forward, &credit, &correct).correct);
        assert!(check(&reverse, &credit, &correct).correct);
    }

    #[test]
    fn any_single_difference_is_wrong() {
        let credit = [JournalEntry::new("借入金", 1_000_000)];
        let off_by_one = [
            JournalEntry::new("当座預金", 989_999),
            JournalEntry::new("支払利息", 10_000),
        ];
        let wrong_account = [
            JournalEntry::new("現金", 990_000),
            JournalEntry::new("支払利息", 10_000),
        ];
        let missing = [JournalEntry::new("当座預金", 990_000)];
        let extra = [
            JournalEntry::new("当座預金", 990_000),
            JournalEntry::new("支払利息", 10_000),
            JournalEntry::new("雑費", 1),
        ];
        for debit in [&off_by_one[..], &wrong_account[..], &missing[..], &extra[..]] {
            assert!(!check(debit, &credit, &compound()).correct, "{debit:?}");
        }
        let swapped = check(&credit, &off_by_one[..1], &compound());
        assert!(!swapped.correct);
    }

    #[test]
    fn prefilter_keeps_complete_lines_only() {
        let submission = prefilter(
            &[line(1, Some("現金"), 2_500_000), line(2, None, 0)],
            &[line(3, Some("資本金"), 2_500_000)],
        );
        assert_eq!(submission.debit, vec![JournalEntry::new("現金", 2_500_000)]);
        assert_eq!(submission.warning, None);
        assert!(
            submission
                .check(&CorrectEntries::new().debit("現金", 2_500_000).credit("資本金", 2_500_000))
                .correct
        );
    }

    #[test]
    fn prefilter_flags_empty_and_partial_sheets() {
        let empty = prefilter(&[line(1, None, 0)], &[line(2, Some(""), 0)]);
        assert_eq!(empty.warning, Some(SubmissionWarning::Empty));

        let partial = prefilter(
            &[line(1, Some("現金"), 0)],
            &[line(2, Some("資本金"), 2_500_000)],
        );
        assert_eq!(partial.warning, Some(SubmissionWarning::IncompleteLines));
        assert!(partial.debit.is_empty());

        let amount_only = prefilter(&[line(1, None, 500)], &[line(2, Some("資本金"), 500)]);
        assert_eq!(amount_only.warning, Some(SubmissionWarning::IncompleteLines));
    }
}
