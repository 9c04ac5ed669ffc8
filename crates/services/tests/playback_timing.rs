use std::sync::Arc;
use std::time::Duration;

use drill_core::player::{StepCursor, Tick};
use drill_core::time::fixed_clock;
use services::{Command, QuizConfig, QuizController, SessionMode};
use storage::repository::InMemoryStore;
use tokio::time::Instant;

async fn explaining_controller(config: QuizConfig) -> QuizController {
    let mut controller = QuizController::load(Arc::new(InMemoryStore::new()), config, fixed_clock())
        .await
        .unwrap()
        .with_seed(3);
    controller
        .dispatch(Command::Start(SessionMode::sub("depreciation")))
        .await
        .unwrap();
    controller.dispatch(Command::Submit).await.unwrap();
    controller.dispatch(Command::ConfirmSubmit).await.unwrap();
    controller.dispatch(Command::OpenExplanation).await.unwrap();
    controller
}

#[tokio::test(start_paused = true)]
async fn auto_advance_reaches_the_end_and_stops() {
    let mut controller = explaining_controller(QuizConfig::default()).await;
    let steps = controller.player().unwrap().steps().len();
    assert!(steps > 1);

    let started = Instant::now();
    controller.dispatch(Command::TogglePlay).await.unwrap();

    let mut ticks = 0;
    loop {
        controller.next_tick().await;
        ticks += 1;
        if controller.on_tick() == Tick::Finished {
            break;
        }
    }

    assert_eq!(ticks, steps);
    assert_eq!(started.elapsed(), Duration::from_millis(2_500) * u32::try_from(steps).unwrap());
    assert_eq!(
        controller.frame().unwrap().cursor,
        StepCursor::At(steps - 1)
    );
    assert!(!controller.is_playing());
    assert!(!controller.player().unwrap().is_playing());
}

#[tokio::test(start_paused = true)]
async fn pausing_cancels_the_interval() {
    let config = QuizConfig::default().with_tick_interval(Duration::from_millis(100));
    let mut controller = explaining_controller(config).await;

    controller.dispatch(Command::TogglePlay).await.unwrap();
    controller.next_tick().await;
    assert_eq!(controller.on_tick(), Tick::Advanced);

    controller.dispatch(Command::TogglePlay).await.unwrap();
    assert!(!controller.is_playing());
    let waited = tokio::time::timeout(Duration::from_secs(5), controller.next_tick()).await;
    assert!(waited.is_err());
    assert_eq!(controller.frame().unwrap().cursor, StepCursor::At(0));
}

#[tokio::test(start_paused = true)]
async fn play_from_the_end_restarts() {
    let config = QuizConfig::default().with_tick_interval(Duration::from_millis(100));
    let mut controller = explaining_controller(config).await;
    controller.dispatch(Command::StepExplanation(99)).await.unwrap();
    assert!(controller.player().unwrap().is_at_end());

    controller.dispatch(Command::TogglePlay).await.unwrap();
    assert_eq!(controller.frame().unwrap().cursor, StepCursor::Start);
    assert!(controller.is_playing());
}
