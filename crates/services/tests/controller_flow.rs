use std::sync::Arc;

use drill_core::model::{Score, Side};
use drill_core::time::fixed_clock;
use services::{Command, Outcome, QuizConfig, QuizController, Screen, SessionMode};
use storage::repository::{InMemoryStore, KeyValueStore};

async fn fill_sheet(controller: &mut QuizController, correct: bool) {
    let entries = controller
        .current_question()
        .expect("question on screen")
        .correct_entries
        .clone();
    for side in [Side::Debit, Side::Credit] {
        for (i, entry) in entries.side(side).iter().enumerate() {
            if i > 0 {
                controller.dispatch(Command::AddLine(side)).await.unwrap();
            }
            let line = controller.sheet().lines(side).last().unwrap().id;
            controller
                .dispatch(Command::SelectChoice(entry.account_name.clone()))
                .await
                .unwrap();
            controller
                .dispatch(Command::PlaceSelection { side, line })
                .await
                .unwrap();
            let amount = if correct { entry.amount } else { entry.amount + 1 };
            controller
                .dispatch(Command::SetAmount { side, line, amount })
                .await
                .unwrap();
        }
    }
}

async fn play_session(controller: &mut QuizController, mode: SessionMode, correct: bool) -> Outcome {
    let started = controller.dispatch(Command::Start(mode)).await.unwrap();
    let Outcome::SessionStarted { total, .. } = started else {
        panic!("unexpected outcome {started:?}");
    };

    for _ in 0..total {
        fill_sheet(controller, correct).await;
        let graded = controller.dispatch(Command::Submit).await.unwrap();
        assert_eq!(graded, Outcome::Graded { correct });
        let next = controller.dispatch(Command::Advance).await.unwrap();
        if controller.screen() == Screen::Finished {
            return next;
        }
    }
    panic!("session did not finish");
}

#[tokio::test]
async fn focused_session_persists_and_replaces_category_score() {
    let store = InMemoryStore::new();
    let config = QuizConfig::default();
    let mut controller = QuizController::load(Arc::new(store.clone()), config.clone(), fixed_clock())
        .await
        .unwrap()
        .with_seed(2024);

    let outcome = play_session(&mut controller, SessionMode::sub("loan"), true).await;
    assert_eq!(
        outcome,
        Outcome::SessionFinished {
            score: Score::new(5, 5),
            category_id: Some("loan".into()),
        }
    );

    let blob = store.get(config.storage_key()).await.unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&blob).unwrap();
    assert_eq!(json["correct"], 5);
    assert_eq!(json["total"], 5);
    assert_eq!(json["history"].as_array().unwrap().len(), 5);
    assert_eq!(json["categoryScores"]["loan"]["correct"], 5);

    play_session(&mut controller, SessionMode::sub("loan"), false).await;

    let reloaded = QuizController::load(Arc::new(store.clone()), config, fixed_clock())
        .await
        .unwrap();
    assert_eq!(reloaded.stats().category_score("loan"), Some(Score::new(0, 5)));
    assert_eq!(reloaded.stats().correct, 5);
    assert_eq!(reloaded.stats().total, 10);
}

#[tokio::test]
async fn comprehensive_session_only_counts_answers() {
    let store = InMemoryStore::new();
    let mut controller =
        QuizController::load(Arc::new(store.clone()), QuizConfig::default(), fixed_clock())
            .await
            .unwrap()
            .with_seed(7);

    let outcome = play_session(&mut controller, SessionMode::Comprehensive, true).await;
    assert_eq!(
        outcome,
        Outcome::SessionFinished {
            score: Score::new(10, 10),
            category_id: None,
        }
    );
    assert!(controller.stats().category_scores.is_empty());

    controller.dispatch(Command::ResetStats).await.unwrap();
    assert_eq!(controller.stats().total, 0);
}

#[tokio::test]
async fn back_to_menu_abandons_the_session() {
    let mut controller = QuizController::load(
        Arc::new(InMemoryStore::new()),
        QuizConfig::default(),
        fixed_clock(),
    )
    .await
    .unwrap();

    controller
        .dispatch(Command::Start(SessionMode::major("closing")))
        .await
        .unwrap();
    controller.dispatch(Command::BackToMenu).await.unwrap();

    assert_eq!(controller.screen(), Screen::Menu);
    assert!(controller.session().is_none());
    assert!(controller.stats().category_scores.is_empty());
}
