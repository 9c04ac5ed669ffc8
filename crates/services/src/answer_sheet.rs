//! Editable two-sided entry sheet for the question on screen.

use drill_core::model::{EntryLine, LineId, Side};
use drill_core::verifier::{Submission, prefilter};

use crate::error::SheetError;

/// The user's in-progress journal entry plus the currently picked choice.
///
/// Each side always keeps at least one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSheet {
    debit: Vec<EntryLine>,
    credit: Vec<EntryLine>,
    next_id: u64,
    selected: Option<String>,
}

impl Default for AnswerSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl AnswerSheet {
    /// A fresh sheet with one empty line per side.
    #[must_use]
    pub fn new() -> Self {
        Self {
            debit: vec![EntryLine::empty(LineId::new(1))],
            credit: vec![EntryLine::empty(LineId::new(2))],
            next_id: 3,
            selected: None,
        }
    }

    #[must_use]
    pub fn lines(&self, side: Side) -> &[EntryLine] {
        match side {
            Side::Debit => &self.debit,
            Side::Credit => &self.credit,
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Picks `name`; picking the selected choice again clears the selection.
    pub fn select_choice(&mut self, name: &str) {
        if self.selected.as_deref() == Some(name) {
            self.selected = None;
        } else {
            self.selected = Some(name.to_owned());
        }
    }

    /// Writes `name` into a line's account slot and drops the selection.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::UnknownLine` if `id` is not on `side`.
    pub fn assign(&mut self, side: Side, id: LineId, name: &str) -> Result<(), SheetError> {
        self.line_mut(side, id)?.account = Some(name.to_owned());
        self.selected = None;
        Ok(())
    }

    /// Places the selected choice on a line. Returns `false` when nothing is selected.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::UnknownLine` if `id` is not on `side`.
    pub fn place_selection(&mut self, side: Side, id: LineId) -> Result<bool, SheetError> {
        let Some(name) = self.selected.clone() else {
            return Ok(false);
        };
        self.assign(side, id, &name)?;
        Ok(true)
    }

    /// # Errors
    ///
    /// Returns `SheetError::UnknownLine` if `id` is not on `side`.
    pub fn clear_account(&mut self, side: Side, id: LineId) -> Result<(), SheetError> {
        self.line_mut(side, id)?.account = None;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `SheetError::UnknownLine` if `id` is not on `side`.
    pub fn set_amount(&mut self, side: Side, id: LineId, amount: u64) -> Result<(), SheetError> {
        self.line_mut(side, id)?.amount = amount;
        Ok(())
    }

    /// Appends an empty line and returns its id.
    pub fn add_line(&mut self, side: Side) -> LineId {
        let id = LineId::new(self.next_id);
        self.next_id += 1;
        self.side_mut(side).push(EntryLine::empty(id));
        id
    }

    /// # Errors
    ///
    /// Returns `SheetError::LastLine` when `id` is the only line on `side`, or
    /// `SheetError::UnknownLine` if `id` is not on `side`.
    pub fn remove_line(&mut self, side: Side, id: LineId) -> Result<(), SheetError> {
        let lines = self.side_mut(side);
        let index = lines
            .iter()
            .position(|line| line.id == id)
            .ok_or(SheetError::UnknownLine(side, id))?;
        if lines.len() == 1 {
            return Err(SheetError::LastLine(side));
        }
        lines.remove(index);
        Ok(())
    }

    /// Back to one empty line per side. Line ids keep counting up.
    pub fn reset(&mut self) {
        let debit = LineId::new(self.next_id);
        let credit = LineId::new(self.next_id + 1);
        self.next_id += 2;
        self.debit = vec![EntryLine::empty(debit)];
        self.credit = vec![EntryLine::empty(credit)];
        self.selected = None;
    }

    /// Complete lines of both sides plus any confirmation warning.
    #[must_use]
    pub fn submission(&self) -> Submission {
        prefilter(&self.debit, &self.credit)
    }

    fn side_mut(&mut self, side: Side) -> &mut Vec<EntryLine> {
        match side {
            Side::Debit => &mut self.debit,
            Side::Credit => &mut self.credit,
        }
    }

    fn line_mut(&mut self, side: Side, id: LineId) -> Result<&mut EntryLine, SheetError> {
        self.side_mut(side)
            .iter_mut()
            .find(|line| line.id == id)
            .ok_or(SheetError::UnknownLine(side, id))
    }
}

/// Parses keypad input such as `"2,500,000"` or `"12000円"`; blank input is zero.
///
/// # Errors
///
/// Returns `SheetError::InvalidAmount` if anything but digits remains.
pub fn parse_amount(input: &str) -> Result<u64, SheetError> {
    let digits: String = input
        .trim()
        .trim_end_matches('円')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if digits.is_empty() {
        return Ok(0);
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(SheetError::InvalidAmount(input.to_owned()));
    }
    digits
        .parse()
        .map_err(|_| SheetError::InvalidAmount(input.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::JournalEntry;
    use drill_core::verifier::SubmissionWarning;

    fn first(sheet: &AnswerSheet, side: Side) -> LineId {
        sheet.lines(side)[0].id
    }

    #[test]
    fn new_sheet_has_one_empty_line_per_side() {
        let sheet = AnswerSheet::new();
        assert_eq!(sheet.lines(Side::Debit).len(), 1);
        assert_eq!(sheet.lines(Side::Credit).len(), 1);
        assert_ne!(first(&sheet, Side::Debit), first(&sheet, Side::Credit));
        assert_eq!(sheet.submission().warning, Some(SubmissionWarning::Empty));
    }

    #[test]
    fn selecting_twice_clears_the_choice() {
        let mut sheet = AnswerSheet::new();
        sheet.select_choice("現金");
        assert_eq!(sheet.selected(), Some("現金"));
        sheet.select_choice("資本金");
        assert_eq!(sheet.selected(), Some("資本金"));
        sheet.select_choice("資本金");
        assert_eq!(sheet.selected(), None);
    }

    #[test]
    fn placing_consumes_the_selection() {
        let mut sheet = AnswerSheet::new();
        let debit = first(&sheet, Side::Debit);
        assert!(!sheet.place_selection(Side::Debit, debit).unwrap());

        sheet.select_choice("現金");
        assert!(sheet.place_selection(Side::Debit, debit).unwrap());
        assert_eq!(sheet.selected(), None);
        assert_eq!(sheet.lines(Side::Debit)[0].account_name(), Some("現金"));

        sheet.clear_account(Side::Debit, debit).unwrap();
        assert_eq!(sheet.lines(Side::Debit)[0].account, None);
    }

    #[test]
    fn filled_sheet_submits_complete_entries() {
        let mut sheet = AnswerSheet::new();
        let (debit, credit) = (first(&sheet, Side::Debit), first(&sheet, Side::Credit));
        sheet.assign(Side::Debit, debit, "現金").unwrap();
        sheet.set_amount(Side::Debit, debit, 2_500_000).unwrap();
        sheet.assign(Side::Credit, credit, "資本金").unwrap();
        sheet.set_amount(Side::Credit, credit, 2_500_000).unwrap();

        let submission = sheet.submission();
        assert_eq!(submission.warning, None);
        assert_eq!(submission.debit, vec![JournalEntry::new("現金", 2_500_000)]);
        assert_eq!(submission.credit, vec![JournalEntry::new("資本金", 2_500_000)]);
    }

    #[test]
    fn last_line_cannot_be_removed() {
        let mut sheet = AnswerSheet::new();
        let original = first(&sheet, Side::Credit);
        assert_eq!(
            sheet.remove_line(Side::Credit, original),
            Err(SheetError::LastLine(Side::Credit))
        );

        let added = sheet.add_line(Side::Credit);
        sheet.remove_line(Side::Credit, original).unwrap();
        assert_eq!(sheet.lines(Side::Credit)[0].id, added);
    }

    #[test]
    fn lines_are_scoped_to_their_side() {
        let mut sheet = AnswerSheet::new();
        let debit = first(&sheet, Side::Debit);
        assert_eq!(
            sheet.set_amount(Side::Credit, debit, 1),
            Err(SheetError::UnknownLine(Side::Credit, debit))
        );
    }

    #[test]
    fn reset_restores_a_fresh_sheet() {
        let mut sheet = AnswerSheet::new();
        sheet.add_line(Side::Debit);
        sheet.select_choice("現金");
        let before = first(&sheet, Side::Debit);

        sheet.reset();
        assert_eq!(sheet.lines(Side::Debit).len(), 1);
        assert_eq!(sheet.selected(), None);
        assert_ne!(first(&sheet, Side::Debit), before);
    }

    #[test]
    fn amounts_parse_with_separators() {
        assert_eq!(parse_amount("2,500,000"), Ok(2_500_000));
        assert_eq!(parse_amount(" 12000円 "), Ok(12_000));
        assert_eq!(parse_amount(""), Ok(0));
        assert!(matches!(parse_amount("-5"), Err(SheetError::InvalidAmount(_))));
        assert!(matches!(parse_amount("1.5"), Err(SheetError::InvalidAmount(_))));
    }
}
