//! Line-oriented input for the terminal driver.
//!
//! Lines refer to sheet rows and choices by their 1-based on-screen number;
//! [`Request::resolve`] maps those onto controller ids.

use std::fmt;

use drill_core::model::Side;
use services::{Command, QuizController, SessionMode, resolve_mode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    Unknown(String),
    MissingArgument { command: &'static str, what: &'static str },
    InvalidSide(String),
    InvalidNumber(String),
    InvalidAmount(String),
    InvalidMode(String),
    NoSuchLine { side: Side, row: usize },
    NoSuchChoice(String),
    NoQuestion,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty input"),
            ParseError::Unknown(word) => write!(f, "unknown command: {word} (try `help`)"),
            ParseError::MissingArgument { command, what } => {
                write!(f, "{command} requires {what}")
            }
            ParseError::InvalidSide(raw) => write!(f, "side must be d or c, got {raw}"),
            ParseError::InvalidNumber(raw) => write!(f, "not a row number: {raw}"),
            ParseError::InvalidAmount(raw) => write!(f, "not an amount: {raw}"),
            ParseError::InvalidMode(msg) => write!(f, "{msg}"),
            ParseError::NoSuchLine { side, row } => {
                write!(f, "no {} row {row}", side.label())
            }
            ParseError::NoSuchChoice(raw) => write!(f, "no such choice: {raw}"),
            ParseError::NoQuestion => write!(f, "no question on screen"),
        }
    }
}

impl std::error::Error for ParseError {}

/// A choice given either by number or by account name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceRef {
    Index(usize),
    Name(String),
}

/// One parsed input line, before row numbers are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Help,
    Quit,
    Show,
    Start(SessionMode),
    Pick(ChoiceRef),
    Put { side: Side, row: usize },
    Account { side: Side, row: usize, choice: ChoiceRef },
    Clear { side: Side, row: usize },
    Amount { side: Side, row: usize, amount: u64 },
    Add(Side),
    Remove { side: Side, row: usize },
    Plain(Command),
}

pub const HELP: &str = "\
commands:
  start all | start major <id> | start sub <id>
  pick <n|name>          select a choice (again to deselect)
  put <d|c> <row>        place the selected choice on a row
  acct <d|c> <row> <n|name>
  amt <d|c> <row> <amount>
  clear <d|c> <row>      remove the account from a row
  add <d|c> | rm <d|c> <row>
  reset                  start the question over
  submit | yes | no      answer, confirm, cancel
  next                   go to the next question
  explain | > | < | play | close
  menu | reset-stats | show | help | quit";

/// Parses one input line.
///
/// # Errors
///
/// Returns `ParseError` if the line is not a known command or an argument is malformed.
pub fn parse(line: &str) -> Result<Request, ParseError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(ParseError::Empty);
    };
    let rest: Vec<&str> = words.collect();

    let request = match head {
        "help" | "h" | "?" => Request::Help,
        "quit" | "q" | "exit" => Request::Quit,
        "show" | "ls" => Request::Show,
        "start" => Request::Start(parse_mode(&rest)?),
        "pick" => Request::Pick(choice_arg(&rest, 0, "pick")?),
        "put" => {
            let (side, row) = side_row(&rest, "put")?;
            Request::Put { side, row }
        }
        "acct" => {
            let (side, row) = side_row(&rest, "acct")?;
            Request::Account {
                side,
                row,
                choice: choice_arg(&rest, 2, "acct")?,
            }
        }
        "clear" => {
            let (side, row) = side_row(&rest, "clear")?;
            Request::Clear { side, row }
        }
        "amt" => {
            let (side, row) = side_row(&rest, "amt")?;
            let raw = rest.get(2).ok_or(ParseError::MissingArgument {
                command: "amt",
                what: "an amount",
            })?;
            let amount = services::answer_sheet::parse_amount(raw)
                .map_err(|_| ParseError::InvalidAmount((*raw).to_owned()))?;
            Request::Amount { side, row, amount }
        }
        "add" => Request::Add(side_arg(&rest, "add")?),
        "rm" => {
            let (side, row) = side_row(&rest, "rm")?;
            Request::Remove { side, row }
        }
        "reset" => Request::Plain(Command::ResetQuestion),
        "submit" | "s" => Request::Plain(Command::Submit),
        "yes" | "y" => Request::Plain(Command::ConfirmSubmit),
        "no" | "n" => Request::Plain(Command::CancelSubmit),
        "next" => Request::Plain(Command::Advance),
        "explain" | "e" => Request::Plain(Command::OpenExplanation),
        ">" => Request::Plain(Command::StepExplanation(1)),
        "<" => Request::Plain(Command::StepExplanation(-1)),
        "play" | "p" => Request::Plain(Command::TogglePlay),
        "close" => Request::Plain(Command::CloseExplanation),
        "menu" => Request::Plain(Command::BackToMenu),
        "reset-stats" => Request::Plain(Command::ResetStats),
        other => return Err(ParseError::Unknown(other.to_owned())),
    };
    Ok(request)
}

impl Request {
    /// Maps row and choice numbers onto the controller's current state.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if a row or choice does not exist.
    pub fn resolve(self, controller: &QuizController) -> Result<Command, ParseError> {
        let command = match self {
            Request::Start(mode) => Command::Start(mode),
            Request::Pick(choice) => Command::SelectChoice(choice_name(controller, choice)?),
            Request::Put { side, row } => Command::PlaceSelection {
                side,
                line: line_id(controller, side, row)?,
            },
            Request::Account { side, row, choice } => Command::AssignAccount {
                side,
                line: line_id(controller, side, row)?,
                account: choice_name(controller, choice)?,
            },
            Request::Clear { side, row } => Command::ClearAccount {
                side,
                line: line_id(controller, side, row)?,
            },
            Request::Amount { side, row, amount } => Command::SetAmount {
                side,
                line: line_id(controller, side, row)?,
                amount,
            },
            Request::Add(side) => Command::AddLine(side),
            Request::Remove { side, row } => Command::RemoveLine {
                side,
                line: line_id(controller, side, row)?,
            },
            Request::Plain(command) => command,
            Request::Help | Request::Quit | Request::Show => {
                return Err(ParseError::Unknown("meta command".into()));
            }
        };
        Ok(command)
    }
}

fn parse_mode(rest: &[&str]) -> Result<SessionMode, ParseError> {
    let kind = rest.first().copied().unwrap_or("all");
    resolve_mode(kind, rest.get(1).copied()).map_err(|err| ParseError::InvalidMode(err.to_string()))
}

fn side_arg(rest: &[&str], command: &'static str) -> Result<Side, ParseError> {
    let raw = rest.first().ok_or(ParseError::MissingArgument {
        command,
        what: "a side",
    })?;
    match *raw {
        "d" | "debit" | "借方" => Ok(Side::Debit),
        "c" | "credit" | "貸方" => Ok(Side::Credit),
        other => Err(ParseError::InvalidSide(other.to_owned())),
    }
}

fn side_row(rest: &[&str], command: &'static str) -> Result<(Side, usize), ParseError> {
    let side = side_arg(rest, command)?;
    let raw = rest.get(1).ok_or(ParseError::MissingArgument {
        command,
        what: "a row number",
    })?;
    let row = raw
        .parse::<usize>()
        .ok()
        .filter(|row| *row > 0)
        .ok_or_else(|| ParseError::InvalidNumber((*raw).to_owned()))?;
    Ok((side, row))
}

fn choice_arg(rest: &[&str], at: usize, command: &'static str) -> Result<ChoiceRef, ParseError> {
    let raw = rest.get(at).ok_or(ParseError::MissingArgument {
        command,
        what: "a choice",
    })?;
    Ok(match raw.parse::<usize>() {
        Ok(index) => ChoiceRef::Index(index),
        Err(_) => ChoiceRef::Name((*raw).to_owned()),
    })
}

fn line_id(
    controller: &QuizController,
    side: Side,
    row: usize,
) -> Result<drill_core::model::LineId, ParseError> {
    let lines = controller.sheet().lines(side);
    row.checked_sub(1)
        .and_then(|i| lines.get(i))
        .map(|line| line.id)
        .ok_or(ParseError::NoSuchLine { side, row })
}

fn choice_name(controller: &QuizController, choice: ChoiceRef) -> Result<String, ParseError> {
    let question = controller.current_question().ok_or(ParseError::NoQuestion)?;
    match choice {
        ChoiceRef::Index(index) => index
            .checked_sub(1)
            .and_then(|i| question.choices.get(i))
            .cloned()
            .ok_or_else(|| ParseError::NoSuchChoice(index.to_string())),
        ChoiceRef::Name(name) if question.choices.contains(&name) => Ok(name),
        ChoiceRef::Name(name) => Err(ParseError::NoSuchChoice(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_session_starts() {
        assert_eq!(parse("start").unwrap(), Request::Start(SessionMode::Comprehensive));
        assert_eq!(
            parse("start sub petty_cash").unwrap(),
            Request::Start(SessionMode::sub("petty_cash"))
        );
        assert!(matches!(parse("start major nope"), Err(ParseError::InvalidMode(_))));
    }

    #[test]
    fn parses_sheet_edits() {
        assert_eq!(
            parse("amt d 1 2,500,000").unwrap(),
            Request::Amount {
                side: Side::Debit,
                row: 1,
                amount: 2_500_000
            }
        );
        assert_eq!(
            parse("acct c 2 資本金").unwrap(),
            Request::Account {
                side: Side::Credit,
                row: 2,
                choice: ChoiceRef::Name("資本金".into())
            }
        );
        assert_eq!(parse("pick 3").unwrap(), Request::Pick(ChoiceRef::Index(3)));
        assert_eq!(parse("add c").unwrap(), Request::Add(Side::Credit));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!(parse("   "), Err(ParseError::Empty));
        assert!(matches!(parse("dance"), Err(ParseError::Unknown(_))));
        assert!(matches!(parse("put x 1"), Err(ParseError::InvalidSide(_))));
        assert!(matches!(parse("rm d 0"), Err(ParseError::InvalidNumber(_))));
        assert!(matches!(parse("amt d 1 1.5"), Err(ParseError::InvalidAmount(_))));
        assert!(matches!(
            parse("clear d"),
            Err(ParseError::MissingArgument { command: "clear", .. })
        ));
    }

    #[test]
    fn explanation_shortcuts_map_to_commands() {
        assert_eq!(parse(">").unwrap(), Request::Plain(Command::StepExplanation(1)));
        assert_eq!(parse("<").unwrap(), Request::Plain(Command::StepExplanation(-1)));
        assert_eq!(parse("p").unwrap(), Request::Plain(Command::TogglePlay));
    }
}
