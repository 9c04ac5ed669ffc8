//! Plain-text rendering of the controller state.

use drill_core::model::{GENRES, JournalEntry, Score, ScoreBand, Side, UserStats};
use drill_core::player::{Dot, Frame, PlayControl, ShownEntry};
use drill_core::randomizer::format_amount;
use drill_core::verifier::SubmissionWarning;
use services::{QuizController, Screen};

/// Everything that should be on screen for the controller's current state.
#[must_use]
pub fn screen(controller: &QuizController) -> String {
    match controller.screen() {
        Screen::Menu => menu(controller.stats()),
        Screen::Answering => question(controller),
        Screen::Confirming(warning) => confirm(warning),
        Screen::Feedback { correct } => feedback(controller, correct),
        Screen::Explaining { .. } => controller.frame().map(|f| frame(&f)).unwrap_or_default(),
        Screen::Finished => finished(controller),
    }
}

#[must_use]
pub fn menu(stats: &UserStats) -> String {
    let overall = Score::new(stats.correct, stats.total);
    let mut lines = vec![
        "=== 仕訳ドリル ===".to_owned(),
        format!(
            "正答率 {}% ({}/{})",
            percent(overall),
            stats.correct,
            stats.total
        ),
        "start all : 総合演習 (10問)".to_owned(),
    ];
    for major in GENRES {
        lines.push(format!(
            "{} [{}] start major {}",
            major.title,
            badge(stats, major.id.as_str()),
            major.id
        ));
        for sub in major.subs {
            lines.push(format!(
                "    {} [{}] start sub {}",
                sub.title,
                badge(stats, sub.id.as_str()),
                sub.id
            ));
        }
    }
    lines.join("\n")
}

fn badge(stats: &UserStats, category_id: &str) -> String {
    match (stats.category_band(category_id), stats.category_score(category_id)) {
        (ScoreBand::Untried, _) | (_, None) => "未挑戦".to_owned(),
        (band, Some(score)) => {
            let mark = match band {
                ScoreBand::Strong => "◎",
                ScoreBand::Fair => "○",
                _ => "△",
            };
            format!("{mark} {}/{}", score.correct, score.total)
        }
    }
}

fn question(controller: &QuizController) -> String {
    let (Some(session), Some(question)) = (controller.session(), controller.current_question())
    else {
        return String::new();
    };
    let progress = session.progress();
    let sheet = controller.sheet();

    let mut lines = vec![
        format!("--- {} [{}/{}] ---", session.title(), progress.position, progress.total),
        question.text.clone(),
        String::new(),
    ];
    let choices: Vec<String> = question
        .choices
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if sheet.selected() == Some(name.as_str()) {
                format!("[{}:{name}]", i + 1)
            } else {
                format!("{}:{name}", i + 1)
            }
        })
        .collect();
    lines.push(format!("選択肢 {}", choices.join("  ")));

    for side in [Side::Debit, Side::Credit] {
        lines.push(format!("{}:", side.label()));
        for (row, line) in sheet.lines(side).iter().enumerate() {
            let account = line.account_name().unwrap_or("空欄");
            let amount = if line.amount > 0 {
                format_amount(line.amount)
            } else {
                "-".to_owned()
            };
            lines.push(format!("  {}. {account} {amount}", row + 1));
        }
    }
    lines.join("\n")
}

fn confirm(warning: SubmissionWarning) -> String {
    let reason = match warning {
        SubmissionWarning::Empty => "何も入力されていません。",
        SubmissionWarning::IncompleteLines => "未入力または不完全な項目があります。",
    };
    format!("{reason}\nこのまま解答しますか？ (yes / no)")
}

fn feedback(controller: &QuizController, correct: bool) -> String {
    let Some(question) = controller.current_question() else {
        return String::new();
    };
    let mut lines = vec![if correct {
        "正解！".to_owned()
    } else {
        "不正解...".to_owned()
    }];
    lines.push(entries_table(
        &question.correct_entries.debit,
        &question.correct_entries.credit,
    ));
    lines.push(question.explanation.clone());
    lines.push("next : 次の問題へ / explain : 解説を再生".to_owned());
    lines.join("\n")
}

fn entries_table(debit: &[JournalEntry], credit: &[JournalEntry]) -> String {
    let side = |entries: &[JournalEntry]| {
        entries
            .iter()
            .map(|e| format!("{} {}", e.account_name, format_amount(e.amount)))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!("借方: {}\n貸方: {}", side(debit), side(credit))
}

#[must_use]
pub fn frame(frame: &Frame) -> String {
    let narrative = match &frame.narrative.highlight {
        Some(span) => format!(
            "{}【{span}】{}",
            frame.narrative.before, frame.narrative.after
        ),
        None => frame.narrative.before.clone(),
    };
    let dots: String = frame
        .dots
        .iter()
        .map(|dot| match dot {
            Dot::Done => '●',
            Dot::Current => '◉',
            Dot::Upcoming => '○',
        })
        .collect();
    let control = match frame.control {
        PlayControl::Play => "play",
        PlayControl::Pause => "pause",
        PlayControl::Replay => "replay",
    };

    let mut lines = vec![narrative, String::new()];
    lines.push(format!("借方: {}", shown(&frame.debit)));
    lines.push(format!("貸方: {}", shown(&frame.credit)));
    lines.push(format!("💬 {}", frame.comment));
    lines.push(format!(
        "{dots}  {}{}[{control}] close",
        if frame.can_prev { "< " } else { "" },
        if frame.can_next { "> " } else { "" },
    ));
    lines.join("\n")
}

fn shown(entries: &[ShownEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            let mark = if e.is_new { "*" } else { "" };
            format!("{mark}{} {}", e.account, e.amount)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn finished(controller: &QuizController) -> String {
    let Some(session) = controller.session() else {
        return String::new();
    };
    let score = session.score();
    format!(
        "=== {} 終了 ===\nスコア {}/{}\nstart ... で再挑戦 / menu で戻る",
        session.title(),
        score.correct,
        score.total
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent(score: Score) -> u64 {
    (score.accuracy() * 100.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::ExplanationPlayer;
    use drill_core::model::ExplanationStep;

    #[test]
    fn menu_shows_badges_per_category() {
        let mut stats = UserStats::default();
        stats.replace_category_score("loan", Score::new(4, 5));
        stats.replace_category_score("cash", Score::new(1, 5));

        let text = menu(&stats);
        assert!(text.contains("貸付金・借入金 [◎ 4/5] start sub loan"));
        assert!(text.contains("現金 [△ 1/5] start sub cash"));
        assert!(text.contains("小口現金 [未挑戦] start sub petty_cash"));
    }

    #[test]
    fn frame_marks_highlight_and_new_entries() {
        let mut player = ExplanationPlayer::new(
            "現金 2,500,000円 を元入れして営業を開始した。",
            vec![
                ExplanationStep::new("現金が増えます。")
                    .highlight("現金 2,500,000円")
                    .debit("現金", 2_500_000),
                ExplanationStep::new("元入れは資本金です。")
                    .highlight("元入れ")
                    .credit("資本金", 2_500_000),
            ],
        );
        player.next();

        let text = frame(&player.frame());
        assert!(text.starts_with("【現金 2,500,000円】 を元入れ"));
        assert!(text.contains("借方: *現金 2,500,000"));
        assert!(text.contains("◉○"));
        assert!(text.contains("< > [play]"));
    }
}
